//! Token-to-IR lowering.
//!
//! A single forward scan over the token sequence with one or two tokens of
//! lookahead — there is no parse tree. Four trigger shapes emit
//! instructions; every other token is passed over. The result is a shallow,
//! keyword-driven approximation of the program: good enough for the report
//! and the optimizer, with no claim to operator precedence, scoping, or
//! control-flow nesting.
//!
//! Generated temporary and label names come from per-instance counters, so
//! concurrent lowerings never share numbering state.

use glot_ir::{Instruction, OpCode, Operand, Token, TokenKind};

/// One lowering run. Owns the temp/label counters; create a fresh value
/// per token sequence.
#[derive(Default)]
pub struct Lowering {
    temp_counter: u32,
    label_counter: u32,
}

impl Lowering {
    pub fn new() -> Self {
        Lowering::default()
    }

    /// Next generated temporary name (`t0`, `t1`, ...).
    pub fn fresh_temp(&mut self) -> String {
        let temp = format!("t{}", self.temp_counter);
        self.temp_counter += 1;
        temp
    }

    /// Next generated label name (`L0`, `L1`, ...).
    pub fn fresh_label(&mut self) -> String {
        let label = format!("L{}", self.label_counter);
        self.label_counter += 1;
        label
    }

    /// Lower `tokens` to a flat instruction sequence.
    ///
    /// Triggers, checked at each position:
    /// - `def` / `function` emits FUNC_BEGIN naming the following token
    ///   (`unknown` when the definition is cut off);
    /// - `print` / `console` emits PRINT of the next token;
    /// - `return` emits RETURN of the next token;
    /// - an identifier followed by `=` emits STORE of the token after the
    ///   `=` into the identifier.
    ///
    /// The scan advances one token at a time, so a token consumed as
    /// lookahead is still visited as a trigger candidate itself.
    pub fn lower(&mut self, tokens: &[Token]) -> Vec<Instruction> {
        let mut instructions = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            if token.is_eof() {
                break;
            }
            let next = lookahead(tokens, i + 1);

            match token.text.as_str() {
                "def" | "function" => {
                    let name = next.map_or("unknown", |t| t.text.as_str());
                    instructions.push(Instruction::new(
                        OpCode::FuncBegin,
                        [Operand::name(name)],
                        token.line,
                    ));
                }
                "print" | "console" => {
                    if let Some(next) = next {
                        instructions.push(Instruction::new(
                            OpCode::Print,
                            [operand(next)],
                            token.line,
                        ));
                    }
                }
                "return" => {
                    if let Some(next) = next {
                        instructions.push(Instruction::new(
                            OpCode::Return,
                            [operand(next)],
                            token.line,
                        ));
                    }
                }
                _ => {
                    let assigns = token.kind == TokenKind::Identifier
                        && next.is_some_and(|t| t.text == "=");
                    if assigns {
                        if let Some(value) = lookahead(tokens, i + 2) {
                            instructions.push(
                                Instruction::new(OpCode::Store, [operand(value)], token.line)
                                    .with_result(&token.text),
                            );
                        }
                    }
                }
            }
        }

        instructions
    }
}

/// The token at `index`, unless it is past the end or the end-of-input
/// sentinel.
fn lookahead(tokens: &[Token], index: usize) -> Option<&Token> {
    tokens.get(index).filter(|t| !t.is_eof())
}

/// Literal tokens lower to literal operands; everything else is a name
/// reference.
fn operand(token: &Token) -> Operand {
    match token.kind {
        TokenKind::Number | TokenKind::Str => Operand::literal(&token.text),
        _ => Operand::name(&token.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glot_lexer::tokenize;
    use glot_profile::{profile, Language};
    use pretty_assertions::assert_eq;

    fn lower(source: &str, language: Language) -> Vec<Instruction> {
        let output = tokenize(source, profile(language));
        Lowering::new().lower(&output.tokens)
    }

    fn rendered(instructions: &[Instruction]) -> Vec<String> {
        instructions.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn function_definition_emits_func_begin() {
        let instructions = lower("def greet(name):", Language::Python);
        assert_eq!(rendered(&instructions), vec!["FUNC_BEGIN greet"]);
        assert_eq!(instructions[0].line, 1);
    }

    #[test]
    fn cut_off_definition_names_unknown() {
        let instructions = lower("def", Language::Python);
        assert_eq!(rendered(&instructions), vec!["FUNC_BEGIN unknown"]);
    }

    #[test]
    fn print_takes_the_next_token_verbatim() {
        // The next token after `print` is the open delimiter, not the
        // argument. The lowering is lookahead-driven, not grammatical.
        let instructions = lower("print(name)", Language::Python);
        assert_eq!(rendered(&instructions), vec!["PRINT ("]);
    }

    #[test]
    fn return_value_is_lowered() {
        let instructions = lower("return 42", Language::Python);
        assert_eq!(rendered(&instructions), vec!["RETURN 42"]);
        assert_eq!(instructions[0].operands[0], Operand::literal("42"));
    }

    #[test]
    fn trailing_return_emits_nothing() {
        let instructions = lower("return", Language::Python);
        assert!(instructions.is_empty());
    }

    #[test]
    fn assignment_stores_into_the_identifier() {
        let instructions = lower("x = 5", Language::Python);
        assert_eq!(rendered(&instructions), vec!["x = STORE 5"]);
        assert_eq!(instructions[0].result.as_deref(), Some("x"));
        assert_eq!(instructions[0].operands[0], Operand::literal("5"));
    }

    #[test]
    fn string_assignment_is_a_literal_operand() {
        let instructions = lower("name = 'glot'", Language::Python);
        assert_eq!(instructions[0].operands[0], Operand::literal("glot"));
    }

    #[test]
    fn name_assignment_is_a_name_operand() {
        let instructions = lower("alias = name", Language::Python);
        assert_eq!(instructions[0].operands[0], Operand::name("name"));
    }

    #[test]
    fn keyword_never_triggers_store() {
        // `==` lexes as one operator, so neither side sees a bare `=`.
        let instructions = lower("if x == y:", Language::Python);
        assert!(instructions.is_empty());
    }

    #[test]
    fn line_numbers_follow_the_trigger_token() {
        let instructions = lower("def f():\n    return 1\nx = 2\n", Language::Python);
        let lines: Vec<u32> = instructions.iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[test]
    fn javascript_function_and_console() {
        let instructions = lower("function f() { console.log(1); }", Language::JavaScript);
        assert_eq!(rendered(&instructions)[0], "FUNC_BEGIN f");
        assert!(rendered(&instructions).contains(&"PRINT .".to_owned()));
    }

    #[test]
    fn counters_are_instance_scoped() {
        let mut first = Lowering::new();
        assert_eq!(first.fresh_temp(), "t0");
        assert_eq!(first.fresh_temp(), "t1");
        assert_eq!(first.fresh_label(), "L0");

        // A new lowering starts numbering from zero again.
        let mut second = Lowering::new();
        assert_eq!(second.fresh_temp(), "t0");
        assert_eq!(second.fresh_label(), "L0");
    }
}
