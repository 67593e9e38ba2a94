//! Dead-code elimination.

use glot_ir::{is_temp_name, Instruction};
use rustc_hash::FxHashSet;

/// Drop instructions whose result is a generated temporary that no
/// instruction in the input ever reads.
///
/// The read set comes from one backward scan over the *input* sequence,
/// so removing a dead instruction does not make its own operands dead
/// within the same call. Program order of retained instructions is
/// preserved. Only temporaries are candidates; named variables are
/// observable and always kept.
pub fn eliminate_dead_code(instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut read: FxHashSet<String> = FxHashSet::default();
    for instruction in instructions.iter().rev() {
        for name in instruction.reads() {
            read.insert(name.to_owned());
        }
    }

    instructions
        .into_iter()
        .filter(|instruction| {
            instruction
                .result
                .as_deref()
                .is_none_or(|result| !is_temp_name(result) || read.contains(result))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glot_ir::{OpCode, Operand};
    use pretty_assertions::assert_eq;

    fn load_const(value: &str, result: &str, line: u32) -> Instruction {
        Instruction::new(OpCode::LoadConst, [Operand::literal(value)], line).with_result(result)
    }

    #[test]
    fn unread_temp_is_removed() {
        let input = vec![
            load_const("1", "t0", 1),
            load_const("2", "x", 2),
            Instruction::new(OpCode::Print, [Operand::name("x")], 3),
        ];
        let output = eliminate_dead_code(input);
        assert_eq!(output.len(), 2);
        assert!(output.iter().all(|i| i.result.as_deref() != Some("t0")));
    }

    #[test]
    fn read_temp_is_kept() {
        let input = vec![
            load_const("1", "t0", 1),
            Instruction::new(OpCode::Add, [Operand::name("t0"), Operand::literal("2")], 2)
                .with_result("x"),
        ];
        let output = eliminate_dead_code(input);
        assert_eq!(output.len(), 2);
    }

    #[test]
    fn named_variables_are_never_candidates() {
        // `total` starts with `t` but is a variable, not a temporary.
        let input = vec![load_const("1", "total", 1)];
        let output = eliminate_dead_code(input);
        assert_eq!(output.len(), 1);
    }

    #[test]
    fn dead_chain_loses_one_link_per_call() {
        // t1 reads t0, nothing reads t1: the read set is computed over
        // the input, so t0 survives this call even though its only
        // reader is itself dead.
        let input = vec![
            load_const("1", "t0", 1),
            Instruction::new(OpCode::Add, [Operand::name("t0"), Operand::literal("1")], 2)
                .with_result("t1"),
        ];
        let output = eliminate_dead_code(input);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].result.as_deref(), Some("t0"));
    }

    #[test]
    fn order_of_retained_instructions_is_preserved() {
        let input = vec![
            load_const("1", "a", 1),
            load_const("2", "t9", 2),
            load_const("3", "b", 3),
        ];
        let output = eliminate_dead_code(input);
        let results: Vec<_> = output.iter().filter_map(|i| i.result.as_deref()).collect();
        assert_eq!(results, vec!["a", "b"]);
    }
}
