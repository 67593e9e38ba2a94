//! Execution preview.
//!
//! A pseudo-source rendering of the optimized IR, attached to successful
//! reports. The pipeline never runs it; actually executing user code is
//! the execution backend's job, outside this crate.

use glot_ir::{Instruction, OpCode};

pub fn render(instructions: &[Instruction]) -> String {
    let mut lines = vec!["# Execution preview generated from optimized IR".to_owned()];

    for instruction in instructions {
        match instruction.opcode {
            OpCode::Print => {
                if let Some(operand) = instruction.operands.first() {
                    lines.push(format!("print({operand})"));
                }
            }
            OpCode::Store => {
                if let (Some(result), Some(operand)) =
                    (&instruction.result, instruction.operands.first())
                {
                    lines.push(format!("{result} = {operand}"));
                }
            }
            OpCode::FuncBegin => {
                if let Some(operand) = instruction.operands.first() {
                    lines.push(format!("def {operand}():"));
                }
            }
            OpCode::Return => {
                if let Some(operand) = instruction.operands.first() {
                    lines.push(format!("    return {operand}"));
                }
            }
            _ => {}
        }
    }

    lines.join("\n")
}
