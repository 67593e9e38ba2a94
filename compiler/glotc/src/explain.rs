//! Human-readable report rendering.

use std::fmt::Write as _;

use glot_diagnostic::Diagnostic;

use crate::report::CompilationReport;

/// How many entries of each diagnostic list the explanation shows.
const SHOWN: usize = 3;

/// Render the multi-line explanation for `report`.
pub fn render(report: &CompilationReport) -> String {
    let mut out = String::from("=== glot analysis ===\n");

    if let Some(confidence) = report.detection_confidence {
        let _ = writeln!(
            out,
            "Detected language: {} (confidence: {:.1}%)",
            report.language,
            confidence * 100.0
        );
    } else {
        let _ = writeln!(out, "Language: {}", report.language);
    }

    if !report.fixes.is_empty() {
        let _ = writeln!(out, "\nApplied {} automatic fixes:", report.fixes.len());
        for fix in &report.fixes {
            let _ = writeln!(out, "  - {}", fix.message);
        }
    }

    if !report.errors.is_empty() {
        let _ = writeln!(out, "\nFound {} errors:", report.errors.len());
        render_diagnostics(&mut out, &report.errors, true);
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out, "\n{} warnings:", report.warnings.len());
        render_diagnostics(&mut out, &report.warnings, false);
    }

    if !report.suggestions.is_empty() {
        let _ = writeln!(out, "\nSuggestions ({}):", report.suggestions.len());
        for suggestion in report.suggestions.iter().take(SHOWN) {
            let _ = writeln!(out, "  - {}", suggestion.message);
        }
    }

    let _ = writeln!(
        out,
        "\nOptimizations: {}",
        report.optimization.techniques.join(", ")
    );
    let _ = writeln!(
        out,
        "Estimated improvement: {}",
        report.optimization.estimated_improvement
    );

    if report.success {
        out.push_str("\nAnalysis successful. No blocking errors found.");
    } else {
        out.push_str("\nAnalysis failed. Fix the errors above and retry.");
    }

    out
}

fn render_diagnostics(out: &mut String, diagnostics: &[Diagnostic], with_hints: bool) {
    for diagnostic in diagnostics.iter().take(SHOWN) {
        let _ = writeln!(
            out,
            "  - line {}: {}",
            diagnostic.line, diagnostic.message
        );
        if with_hints {
            if let Some(suggestion) = &diagnostic.suggestion {
                let _ = writeln!(out, "    hint: {suggestion}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glot_profile::Language;

    use crate::{CompileRequest, Compiler};

    #[test]
    fn explanation_mentions_detection_and_outcome() {
        let report = Compiler::compile(&CompileRequest::new(
            "def f():\n    print(1)\n",
            Language::Python,
        ));
        assert!(report.explanation.contains("Detected language: python"));
        assert!(report.explanation.contains("confidence:"));
        assert!(report.explanation.contains("Analysis successful."));
    }

    #[test]
    fn explanation_lists_errors_with_hints() {
        let report = Compiler::compile(&CompileRequest {
            source: "x = 'open\n".to_owned(),
            language_hint: Language::Python,
            auto_detect: false,
        });
        assert!(report.explanation.contains("Language: python"));
        assert!(report.explanation.contains("Found 1 errors:"));
        assert!(report.explanation.contains("Unterminated string literal"));
        assert!(report.explanation.contains("hint: "));
        assert!(report.explanation.contains("Analysis failed."));
    }

    #[test]
    fn explanation_reports_applied_fixes() {
        let report = Compiler::compile(&CompileRequest {
            source: "if x = y:\n    pass\n".to_owned(),
            language_hint: Language::Python,
            auto_detect: false,
        });
        assert!(report.explanation.contains("Applied 1 automatic fixes:"));
        assert!(report
            .explanation
            .contains("Use == for comparison in conditions, not ="));
    }
}
