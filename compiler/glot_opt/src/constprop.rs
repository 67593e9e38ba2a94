//! Constant propagation.

use glot_ir::{Instruction, OpCode, Operand};
use rustc_hash::FxHashMap;

/// Substitute operand names with literals recorded by LOAD_CONST.
///
/// One forward scan. The name-to-literal map is only ever extended: a
/// later STORE or arithmetic write to a mapped name does not invalidate
/// its entry, so a reassigned variable keeps propagating its first
/// constant. This is a documented simplification of the pass, not a
/// soundness guarantee.
pub fn propagate_constants(instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut constants: FxHashMap<String, String> = FxHashMap::default();

    instructions
        .into_iter()
        .map(|mut instruction| {
            if instruction.opcode == OpCode::LoadConst {
                if let (Some(result), Some(Operand::Literal(value))) =
                    (&instruction.result, instruction.operands.first())
                {
                    constants.insert(result.clone(), value.clone());
                }
            }

            for operand in &mut instruction.operands {
                if let Operand::Name(name) = operand {
                    if let Some(value) = constants.get(name) {
                        *operand = Operand::Literal(value.clone());
                    }
                }
            }

            instruction
        })
        .collect()
}
