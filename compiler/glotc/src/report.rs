//! The compilation report.

use glot_correct::FixRecord;
use glot_diagnostic::{Diagnostic, Suggestion};
use glot_ir::{Instruction, Token};
use glot_opt::OptimizationSummary;
use glot_profile::Language;
use serde::Serialize;

/// Per-run counts surfaced in the report.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize)]
pub struct Stats {
    pub tokens: usize,
    pub errors: usize,
    pub warnings: usize,
    pub suggestions: usize,
    pub ir_instructions: usize,
    pub optimized_instructions: usize,
}

/// The sole externally visible artifact of a pipeline run.
///
/// Every field is a plain value; running the same source twice yields
/// byte-identical reports.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct CompilationReport {
    /// No error- or critical-severity diagnostic was produced.
    pub success: bool,
    /// The language the snippet was analyzed as.
    pub language: Language,
    /// Detector confidence, present only when detection replaced the
    /// caller's hint.
    pub detection_confidence: Option<f64>,
    pub tokens: Vec<Token>,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub suggestions: Vec<Suggestion>,
    /// The text the later stages analyzed: the corrector's output when it
    /// applied at least one fix, the original source otherwise.
    pub corrected_code: String,
    pub fixes: Vec<FixRecord>,
    /// Source with recognized cross-language habits rewritten, when the
    /// enhancer found any.
    pub suggested_rewrite: Option<String>,
    pub ir: Vec<Instruction>,
    pub optimized_ir: Vec<Instruction>,
    pub optimization: OptimizationSummary,
    pub stats: Stats,
    /// Human-readable multi-line account of the run.
    pub explanation: String,
    /// Pseudo-source rendering of the optimized IR, present on success.
    /// Never executed by this pipeline.
    pub preview: Option<String>,
}

impl CompilationReport {
    /// The safe report returned when a stage fails internally: empty
    /// token and IR lists, one critical diagnostic.
    pub(crate) fn fallback(language: Language, diagnostic: Diagnostic) -> Self {
        let explanation = format!("Internal error: {}", diagnostic.message);
        CompilationReport {
            success: false,
            language,
            detection_confidence: None,
            tokens: Vec::new(),
            errors: vec![diagnostic],
            warnings: Vec::new(),
            suggestions: Vec::new(),
            corrected_code: String::new(),
            fixes: Vec::new(),
            suggested_rewrite: None,
            ir: Vec::new(),
            optimized_ir: Vec::new(),
            optimization: OptimizationSummary::default(),
            stats: Stats {
                errors: 1,
                ..Stats::default()
            },
            explanation,
            preview: None,
        }
    }
}
