//! Stage sequencing and report assembly.

use std::panic::{self, AssertUnwindSafe};

use glot_diagnostic::Diagnostic;
use glot_lower::Lowering;
use glot_opt::OptimizationSummary;
use glot_profile::{detect, profile, Language};
use tracing::{debug, info_span};

use crate::report::{CompilationReport, Stats};
use crate::{explain, preview};

/// Minimum detector confidence for overriding the caller's hint.
const DETECTION_THRESHOLD: f64 = 0.5;

/// One pipeline invocation.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CompileRequest {
    pub source: String,
    /// Language to analyze as when detection is off or inconclusive.
    pub language_hint: Language,
    pub auto_detect: bool,
}

impl CompileRequest {
    pub fn new(source: impl Into<String>, language_hint: Language) -> Self {
        CompileRequest {
            source: source.into(),
            language_hint,
            auto_detect: true,
        }
    }
}

/// The pipeline entry point. Stateless; all per-run state lives in the
/// stages' own call scopes.
pub struct Compiler;

impl Compiler {
    /// Run the full pipeline. Never panics: an internal stage failure
    /// becomes a critical diagnostic on a fallback report.
    pub fn compile(request: &CompileRequest) -> CompilationReport {
        match panic::catch_unwind(AssertUnwindSafe(|| run(request))) {
            Ok(report) => report,
            Err(payload) => CompilationReport::fallback(
                request.language_hint,
                Diagnostic::critical(format!(
                    "Internal pipeline error: {}",
                    panic_message(payload.as_ref())
                )),
            ),
        }
    }
}

fn run(request: &CompileRequest) -> CompilationReport {
    let span = info_span!("compile", hint = %request.language_hint);
    let _guard = span.enter();

    // Detection only replaces the hint when it clears the threshold.
    let mut language = request.language_hint;
    let mut detection_confidence = None;
    if request.auto_detect {
        let detection = detect(&request.source);
        debug!(language = ?detection.language, confidence = detection.confidence, "detected");
        if let Some(detected) = detection.language {
            if detection.confidence > DETECTION_THRESHOLD {
                language = detected;
                detection_confidence = Some(detection.confidence);
            }
        }
    }

    // The corrector's output feeds the rest of the pipeline only when it
    // actually fixed something.
    let correction = glot_correct::correct(&request.source, language);
    let analyzed = if correction.changed() {
        correction.corrected
    } else {
        request.source.clone()
    };
    debug!(fixes = correction.fixes.len(), "corrected");

    let lex = glot_lexer::tokenize(&analyzed, profile(language));
    debug!(tokens = lex.tokens.len(), diagnostics = lex.diagnostics.len(), "tokenized");

    let enhanced = glot_diagnostic::enhance(lex.diagnostics, &analyzed, language);

    let ir = Lowering::new().lower(&lex.tokens);
    let optimized_ir = glot_opt::optimize(ir.clone());
    debug!(raw = ir.len(), optimized = optimized_ir.len(), "lowered");

    let success = enhanced.errors.is_empty();
    let preview = success.then(|| preview::render(&optimized_ir));

    let stats = Stats {
        tokens: lex.tokens.len(),
        errors: enhanced.errors.len(),
        warnings: enhanced.warnings.len(),
        suggestions: enhanced.suggestions.len(),
        ir_instructions: ir.len(),
        optimized_instructions: optimized_ir.len(),
    };

    let mut report = CompilationReport {
        success,
        language,
        detection_confidence,
        tokens: lex.tokens,
        errors: enhanced.errors,
        warnings: enhanced.warnings,
        suggestions: enhanced.suggestions,
        corrected_code: analyzed,
        fixes: correction.fixes,
        suggested_rewrite: enhanced.suggested_rewrite,
        ir,
        optimized_ir,
        optimization: OptimizationSummary::default(),
        stats,
        explanation: String::new(),
        preview,
    };
    report.explanation = explain::render(&report);
    report
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
