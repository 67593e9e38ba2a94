#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Cross-stage pipeline tests.
//!
//! Unit tests for each stage live in their own crates; this suite runs
//! whole snippets through `Compiler::compile` and checks the end-to-end
//! behavior the report consumers rely on.

use glot_diagnostic::DiagnosticCategory;
use glot_ir::{OpCode, TokenKind};
use glot_profile::Language;
use glotc::{CompileRequest, Compiler};
use pretty_assertions::assert_eq;

fn compile_python(source: &str) -> glotc::CompilationReport {
    Compiler::compile(&CompileRequest {
        source: source.to_owned(),
        language_hint: Language::Python,
        auto_detect: false,
    })
}

#[test]
fn clean_python_function_produces_no_diagnostics() {
    let report = Compiler::compile(&CompileRequest::new(
        "def greet(name):\n    print(name)",
        Language::Python,
    ));

    assert_eq!(report.language, Language::Python);
    assert_eq!(report.tokens[0].kind, TokenKind::Keyword);
    assert_eq!(report.tokens[0].text, "def");
    assert_eq!(report.tokens[1].kind, TokenKind::Identifier);
    assert_eq!(report.tokens[1].text, "greet");
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
    assert!(report.success);
}

#[test]
fn keyword_typo_surfaces_as_warning_with_suggestion() {
    let report = compile_python("prit('hi')");

    assert!(report.success);
    let warning = report
        .warnings
        .iter()
        .find(|d| d.category == DiagnosticCategory::Typo)
        .expect("typo warning");
    assert_eq!(warning.suggestion.as_deref(), Some("Did you mean 'print'?"));
    // The known-typo scan reports it as a suggestion too.
    assert!(report
        .suggestions
        .iter()
        .any(|s| s.message.contains("'prit'")));
}

#[test]
fn assignment_condition_is_corrected_before_tokenizing() {
    let report = compile_python("if x = y:\n    pass\n");

    assert!(report.corrected_code.starts_with("if x == y:"));
    assert_eq!(report.fixes.len(), 1);
    assert_eq!(report.fixes[0].count, 1);
    // The corrected text is what got tokenized: `==` is one operator.
    assert!(report
        .tokens
        .iter()
        .any(|t| t.kind == TokenKind::Operator && t.text == "=="));
}

#[test]
fn unterminated_string_fails_the_run() {
    let report = compile_python("x = 'open");

    assert!(!report.success);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(
        report.errors[0].category,
        DiagnosticCategory::UnterminatedString
    );
    assert_eq!(report.preview, None);
    // The offending line is attached as context by the enhancer.
    assert_eq!(report.errors[0].context.as_deref(), Some("x = 'open"));
}

#[test]
fn missing_colon_is_added_and_structurally_clean() {
    let report = compile_python("def f()\n    return 1\n");

    // The corrector added the colon before the enhancer's structural
    // scan ran, so no missing-colon error survives.
    assert!(report.corrected_code.starts_with("def f():"));
    assert!(report
        .fixes
        .iter()
        .any(|f| f.line == Some(1)));
    assert!(report
        .errors
        .iter()
        .all(|d| d.category != DiagnosticCategory::MissingColon));
}

#[test]
fn ir_covers_the_trigger_shapes() {
    let report = compile_python("def f():\n    return 1\nx = 2\nprint(x)\n");

    let opcodes: Vec<OpCode> = report.ir.iter().map(|i| i.opcode).collect();
    assert_eq!(
        opcodes,
        vec![OpCode::FuncBegin, OpCode::Return, OpCode::Store, OpCode::Print]
    );
    assert!(report.stats.ir_instructions >= report.stats.optimized_instructions);
}

#[test]
fn detection_feeds_the_report() {
    let report = Compiler::compile(&CompileRequest::new(
        "function f() {\n    console.log(1);\n}\n",
        Language::Python,
    ));

    assert_eq!(report.language, Language::JavaScript);
    let confidence = report.detection_confidence.expect("confidence");
    assert!(confidence > 0.5 && confidence <= 1.0);
}

#[test]
fn pipeline_is_deterministic() {
    let request = CompileRequest::new(
        "dif f()\n    prit('x')\n    return 1;\ny = @\n",
        Language::Python,
    );

    let first = serde_json::to_string(&Compiler::compile(&request)).unwrap();
    let second = serde_json::to_string(&Compiler::compile(&request)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn report_serializes_to_json() {
    let report = compile_python("x = 1\n");
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["success"], serde_json::json!(true));
    assert_eq!(json["language"], serde_json::json!("python"));
    assert!(json["tokens"].as_array().is_some());
    assert!(json["stats"]["tokens"].as_u64().is_some());
}

#[test]
fn preview_renders_optimized_ir_on_success() {
    let report = compile_python("x = 5\nprint(x)\n");

    let preview = report.preview.expect("preview");
    assert!(preview.contains("x = 5"));
    assert!(preview.contains("print"));
}

#[test]
fn explanation_is_present_on_every_report() {
    let ok = compile_python("x = 1\n");
    assert!(ok.explanation.contains("Analysis successful."));

    let broken = compile_python("x = 'open");
    assert!(broken.explanation.contains("Analysis failed."));
}
