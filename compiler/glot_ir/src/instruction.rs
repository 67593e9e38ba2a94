//! Linear IR instructions.
//!
//! Instructions are value objects sequenced in a flat list; the list index
//! is the sole notion of program order. Every temporary referenced by a
//! retained instruction must have been introduced by a prior
//! LOAD_CONST/STORE/arithmetic instruction in the same unoptimized
//! sequence.

use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

/// IR operation codes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpCode {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Logical
    And,
    Or,
    Not,

    // Control flow
    Jump,
    JumpIfFalse,
    JumpIfTrue,
    Call,
    Return,

    // Memory
    Load,
    Store,
    LoadConst,

    // Functions
    FuncBegin,
    FuncEnd,
    Param,

    // I/O
    Print,
    Input,

    // Special
    Nop,
    Halt,
}

impl OpCode {
    /// Mnemonic used in IR listings.
    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Add => "ADD",
            OpCode::Sub => "SUB",
            OpCode::Mul => "MUL",
            OpCode::Div => "DIV",
            OpCode::Mod => "MOD",
            OpCode::Eq => "EQ",
            OpCode::Ne => "NE",
            OpCode::Lt => "LT",
            OpCode::Le => "LE",
            OpCode::Gt => "GT",
            OpCode::Ge => "GE",
            OpCode::And => "AND",
            OpCode::Or => "OR",
            OpCode::Not => "NOT",
            OpCode::Jump => "JUMP",
            OpCode::JumpIfFalse => "JUMP_IF_FALSE",
            OpCode::JumpIfTrue => "JUMP_IF_TRUE",
            OpCode::Call => "CALL",
            OpCode::Return => "RETURN",
            OpCode::Load => "LOAD",
            OpCode::Store => "STORE",
            OpCode::LoadConst => "LOAD_CONST",
            OpCode::FuncBegin => "FUNC_BEGIN",
            OpCode::FuncEnd => "FUNC_END",
            OpCode::Param => "PARAM",
            OpCode::Print => "PRINT",
            OpCode::Input => "INPUT",
            OpCode::Nop => "NOP",
            OpCode::Halt => "HALT",
        }
    }

    /// Binary arithmetic opcodes eligible for common-subexpression
    /// elimination.
    pub fn is_arithmetic(self) -> bool {
        matches!(self, OpCode::Add | OpCode::Sub | OpCode::Mul | OpCode::Div)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A single instruction operand: either a literal value carried verbatim
/// from the source, or a name (variable, generated temporary `tN`, or
/// label `LN`).
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Literal(String),
    Name(String),
}

impl Operand {
    pub fn literal(value: impl Into<String>) -> Self {
        Operand::Literal(value.into())
    }

    pub fn name(value: impl Into<String>) -> Self {
        Operand::Name(value.into())
    }

    /// The referenced name, if this operand is a name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Operand::Name(name) => Some(name),
            Operand::Literal(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(value) | Operand::Name(value) => f.write_str(value),
        }
    }
}

/// Operand list storage. Almost every instruction carries 0-2 operands.
pub type Operands = SmallVec<[Operand; 2]>;

/// Whether `name` is a generated temporary (`t` followed by digits).
///
/// Ordinary variables that merely start with `t` (for example `total`)
/// are not temporaries.
pub fn is_temp_name(name: &str) -> bool {
    name.strip_prefix('t')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// A single IR instruction.
#[derive(Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Instruction {
    pub opcode: OpCode,
    pub operands: Operands,
    /// Destination name, when the operation produces a value.
    pub result: Option<String>,
    /// 1-based source line the instruction was lowered from.
    pub line: u32,
}

impl Instruction {
    pub fn new(opcode: OpCode, operands: impl IntoIterator<Item = Operand>, line: u32) -> Self {
        Instruction {
            opcode,
            operands: operands.into_iter().collect(),
            result: None,
            line,
        }
    }

    #[must_use]
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Names read by this instruction (literal operands are not reads).
    pub fn reads(&self) -> impl Iterator<Item = &str> {
        self.operands.iter().filter_map(Operand::as_name)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(result) = &self.result {
            write!(f, "{result} = {}", self.opcode)?;
        } else {
            write!(f, "{}", self.opcode)?;
        }
        for (i, operand) in self.operands.iter().enumerate() {
            if i == 0 {
                write!(f, " {operand}")?;
            } else {
                write!(f, ", {operand}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} @ line {}", self.line)
    }
}

/// Render an instruction sequence as a numbered listing.
pub fn render_listing(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    for (index, instruction) in instructions.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{index:3}: {instruction}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    #[test]
    fn display_with_result() {
        let instruction = Instruction::new(
            OpCode::Add,
            [Operand::name("x"), Operand::literal("1")],
            3,
        )
        .with_result("t0");
        assert_eq!(instruction.to_string(), "t0 = ADD x, 1");
    }

    #[test]
    fn display_without_result() {
        let instruction = Instruction::new(OpCode::Print, [Operand::name("greeting")], 1);
        assert_eq!(instruction.to_string(), "PRINT greeting");
    }

    #[test]
    fn reads_skip_literals() {
        let instruction = Instruction {
            opcode: OpCode::Add,
            operands: smallvec![Operand::name("a"), Operand::literal("2")],
            result: Some("t0".into()),
            line: 1,
        };
        assert_eq!(instruction.reads().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn temp_names_are_t_then_digits() {
        assert!(is_temp_name("t0"));
        assert!(is_temp_name("t17"));
        assert!(!is_temp_name("t"));
        assert!(!is_temp_name("total"));
        assert!(!is_temp_name("x0"));
    }

    #[test]
    fn listing_is_numbered() {
        let instructions = vec![
            Instruction::new(OpCode::Print, [Operand::literal("hi")], 1),
            Instruction::new(OpCode::Halt, [], 2),
        ];
        assert_eq!(render_listing(&instructions), "  0: PRINT hi\n  1: HALT");
    }
}
