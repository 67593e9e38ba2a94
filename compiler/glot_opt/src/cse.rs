//! Common-subexpression elimination.

use glot_ir::{Instruction, OpCode, Operand, Operands};
use rustc_hash::FxHashMap;

/// Replace repeated arithmetic with a LOAD of the first computation.
///
/// Only ADD/SUB/MUL/DIV instructions that carry a result name
/// participate. The signature is the opcode plus the exact operand list;
/// a repeat becomes `LOAD <first result>` keeping its own result name and
/// line. Result-less arithmetic passes through untouched — a LOAD would
/// have nothing to reference.
pub fn eliminate_common_subexpressions(instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut seen: FxHashMap<(OpCode, Operands), String> = FxHashMap::default();

    instructions
        .into_iter()
        .map(|instruction| {
            if !instruction.opcode.is_arithmetic() {
                return instruction;
            }
            let Some(result) = instruction.result.clone() else {
                return instruction;
            };

            let signature = (instruction.opcode, instruction.operands.clone());
            if let Some(previous) = seen.get(&signature) {
                Instruction::new(OpCode::Load, [Operand::name(previous.as_str())], instruction.line)
                    .with_result(result)
            } else {
                seen.insert(signature, result);
                instruction
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn add(result: &str, line: u32) -> Instruction {
        Instruction::new(
            OpCode::Add,
            [Operand::name("a"), Operand::name("b")],
            line,
        )
        .with_result(result)
    }

    #[test]
    fn repeated_add_becomes_load() {
        let output = eliminate_common_subexpressions(vec![add("x", 1), add("y", 2)]);
        assert_eq!(output[0].to_string(), "x = ADD a, b");
        assert_eq!(output[1].to_string(), "y = LOAD x");
        assert_eq!(output[1].line, 2);
    }

    #[test]
    fn different_operands_are_different_signatures() {
        let other = Instruction::new(
            OpCode::Add,
            [Operand::name("a"), Operand::name("c")],
            2,
        )
        .with_result("y");
        let output = eliminate_common_subexpressions(vec![add("x", 1), other]);
        assert_eq!(output[1].opcode, OpCode::Add);
    }

    #[test]
    fn opcode_is_part_of_the_signature() {
        let sub = Instruction::new(
            OpCode::Sub,
            [Operand::name("a"), Operand::name("b")],
            2,
        )
        .with_result("y");
        let output = eliminate_common_subexpressions(vec![add("x", 1), sub]);
        assert_eq!(output[1].opcode, OpCode::Sub);
    }

    #[test]
    fn literal_and_name_operands_differ() {
        let literal = Instruction::new(
            OpCode::Add,
            [Operand::literal("a"), Operand::name("b")],
            2,
        )
        .with_result("y");
        let output = eliminate_common_subexpressions(vec![add("x", 1), literal]);
        assert_eq!(output[1].opcode, OpCode::Add);
    }

    #[test]
    fn result_less_arithmetic_passes_through() {
        let bare = Instruction::new(OpCode::Add, [Operand::name("a"), Operand::name("b")], 2);
        let output = eliminate_common_subexpressions(vec![add("x", 1), bare]);
        assert_eq!(output[1].opcode, OpCode::Add);
        assert_eq!(output[1].result, None);
    }

    #[test]
    fn non_arithmetic_never_participates() {
        let first = Instruction::new(OpCode::Eq, [Operand::name("a"), Operand::name("b")], 1)
            .with_result("x");
        let second = Instruction::new(OpCode::Eq, [Operand::name("a"), Operand::name("b")], 2)
            .with_result("y");
        let output = eliminate_common_subexpressions(vec![first, second]);
        assert_eq!(output[1].opcode, OpCode::Eq);
    }
}
