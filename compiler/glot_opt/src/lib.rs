//! IR optimization.
//!
//! Three passes in fixed order — dead-code elimination, constant
//! propagation, common-subexpression elimination — each consuming the
//! previous pass's output. The passes run once; nothing iterates to a
//! fixpoint, and none of them is sound in the dataflow sense:
//!
//! - dead-code elimination computes its read set over the whole input, so
//!   a chain of dead temporaries loses only its last link per call;
//! - constant propagation never invalidates its name-to-literal map when
//!   a later instruction overwrites the name;
//! - common-subexpression elimination keys on textual operand equality
//!   with no liveness check.
//!
//! Downstream consumers depend on this lenient shape; keep it.

mod constprop;
mod cse;
mod dce;

use glot_ir::Instruction;
use serde::Serialize;

pub use constprop::propagate_constants;
pub use cse::eliminate_common_subexpressions;
pub use dce::eliminate_dead_code;

/// Run the full pass sequence over `instructions`.
pub fn optimize(instructions: Vec<Instruction>) -> Vec<Instruction> {
    let instructions = eliminate_dead_code(instructions);
    let instructions = propagate_constants(instructions);
    eliminate_common_subexpressions(instructions)
}

/// Presentation metadata about the pass sequence. Static, not measured.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct OptimizationSummary {
    pub techniques: Vec<&'static str>,
    pub estimated_improvement: &'static str,
}

impl Default for OptimizationSummary {
    fn default() -> Self {
        OptimizationSummary {
            techniques: vec!["dead_code_elimination", "constant_propagation", "cse"],
            estimated_improvement: "15-30% faster execution",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glot_ir::{OpCode, Operand};
    use pretty_assertions::assert_eq;

    #[test]
    fn passes_compose_in_order() {
        // t0 = 5; x = t0 + t0 twice: DCE keeps t0 (it is read), constant
        // propagation inlines the 5s, CSE collapses the second ADD.
        let input = vec![
            Instruction::new(OpCode::LoadConst, [Operand::literal("5")], 1).with_result("t0"),
            Instruction::new(OpCode::Add, [Operand::name("t0"), Operand::name("t0")], 2)
                .with_result("x"),
            Instruction::new(OpCode::Add, [Operand::name("t0"), Operand::name("t0")], 3)
                .with_result("y"),
        ];

        let optimized = optimize(input);
        let rendered: Vec<String> = optimized.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["t0 = LOAD_CONST 5", "x = ADD 5, 5", "y = LOAD x"]
        );
    }

    #[test]
    fn summary_is_static() {
        let summary = OptimizationSummary::default();
        assert_eq!(summary.techniques.len(), 3);
        assert_eq!(summary, OptimizationSummary::default());
    }
}
