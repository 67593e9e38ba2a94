//! The diagnostic enhancer.
//!
//! Takes the tokenizer's raw diagnostics plus the analyzed source and
//! produces the report-facing error/warning/suggestion lists:
//!
//! 1. every lexical diagnostic gets the offending source line as context,
//!    a synthesized suggestion when none is present, and an advisory fix
//!    action derived from its category;
//! 2. the raw source is scanned for cross-language syntax habits and
//!    known keyword misspellings, yielding suggestions and a rewritten
//!    source estimate;
//! 3. the raw source is scanned line-by-line for structural issues
//!    (missing block colon, missing indentation);
//! 4. everything is routed by severity: errors to the error list, the
//!    rest to warnings.

use std::sync::LazyLock;

use glot_profile::Language;
use regex::{Regex, RegexBuilder};

use crate::{Diagnostic, DiagnosticCategory, FixAction, Severity, Suggestion, SuggestionKind};

/// Output of the enhancement pass.
#[derive(Clone, Debug, Default)]
pub struct Enhanced {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub suggestions: Vec<Suggestion>,
    /// Source with the recognized syntax habits rewritten, when any
    /// pattern matched. An estimate only; nothing downstream consumes it.
    pub suggested_rewrite: Option<String>,
}

/// Enhance `diagnostics` against the source they were produced from.
///
/// `line`/`column` of incoming diagnostics are never modified.
pub fn enhance(diagnostics: Vec<Diagnostic>, source: &str, language: Language) -> Enhanced {
    let mut enhanced = Enhanced::default();
    let lines: Vec<&str> = source.split('\n').collect();

    for mut diagnostic in diagnostics {
        enrich(&mut diagnostic, &lines);
        route(&mut enhanced, diagnostic);
    }

    scan_syntax_patterns(&mut enhanced, source, language);
    scan_known_typos(&mut enhanced, source, language);

    if language == Language::Python {
        for mut diagnostic in structural_issues(&lines) {
            diagnostic.fix_action = fix_action_for(diagnostic.category);
            route(&mut enhanced, diagnostic);
        }
    }

    enhanced
}

fn route(enhanced: &mut Enhanced, diagnostic: Diagnostic) {
    if diagnostic.is_error() {
        enhanced.errors.push(diagnostic);
    } else {
        enhanced.warnings.push(diagnostic);
    }
}

fn enrich(diagnostic: &mut Diagnostic, lines: &[&str]) {
    let line_index = diagnostic.line as usize;
    if line_index >= 1 && line_index <= lines.len() {
        diagnostic.context = Some(lines[line_index - 1].to_owned());
    }
    if diagnostic.suggestion.is_none() {
        diagnostic.suggestion = Some(synthesize_suggestion(&diagnostic.message));
    }
    diagnostic.fix_action = fix_action_for(diagnostic.category);
}

fn fix_action_for(category: DiagnosticCategory) -> Option<FixAction> {
    match category {
        DiagnosticCategory::Typo => Some(FixAction::AutoCorrect),
        DiagnosticCategory::MissingColon => Some(FixAction::AddColon),
        DiagnosticCategory::Indentation => Some(FixAction::FixIndentation),
        _ => None,
    }
}

/// Message-keyword classification for diagnostics that arrived without a
/// suggestion.
fn synthesize_suggestion(message: &str) -> String {
    let lowered = message.to_lowercase();

    if lowered.contains("unexpected character") {
        character_hint(message)
    } else if lowered.contains("unterminated string") {
        "Add a closing quote to complete the string".to_owned()
    } else if lowered.contains("typo") {
        "Check spelling".to_owned()
    } else if lowered.contains("undefined") || lowered.contains("not defined") {
        "Variable or function not defined. Check spelling or declare it first".to_owned()
    } else {
        "Review syntax and try running again".to_owned()
    }
}

/// Remediation for an unexpected character, keyed by the character quoted
/// in the message.
fn character_hint(message: &str) -> String {
    let Some(character) = message.split('\'').nth(1) else {
        return "Check for invalid characters".to_owned();
    };

    let hint = match character {
        "@" => "Remove @ or use it for decorators in Python",
        "$" => "Remove $ (not used in Python variable names)",
        "`" => "Use \" or ' for strings instead of `",
        "^" => "Use ** for exponentiation in Python",
        "&" => "Use \"and\" for logical operations in Python",
        "|" => "Use \"or\" for logical operations in Python",
        _ => "Remove or replace this character",
    };
    hint.to_owned()
}

struct RewritePattern {
    pattern: Regex,
    replacement: &'static str,
    message: &'static str,
}

impl RewritePattern {
    // Static tables; a malformed pattern is caught by `tables_build`.
    #[allow(clippy::expect_used)]
    fn new(pattern: &str, replacement: &'static str, message: &'static str) -> Self {
        RewritePattern {
            pattern: RegexBuilder::new(pattern)
                .multi_line(true)
                .build()
                .expect("static rewrite pattern must compile"),
            replacement,
            message,
        }
    }
}

static PYTHON_PATTERNS: LazyLock<Vec<RewritePattern>> = LazyLock::new(|| {
    vec![
        RewritePattern::new(
            r"if\s+(.+)\s+then:",
            "if $1:",
            "Python uses \"if condition:\" without \"then\"",
        ),
        RewritePattern::new(
            r"function\s+(\w+)\s*\(",
            "def $1(",
            "Python uses \"def\" instead of \"function\"",
        ),
        RewritePattern::new(r"(\w+)\s*\{\s*$", "$1:", "Python uses colons (:) not braces ({})"),
    ]
});

static JAVASCRIPT_PATTERNS: LazyLock<Vec<RewritePattern>> = LazyLock::new(|| {
    vec![RewritePattern::new(
        r"def\s+(\w+)\s*\(",
        "function $1(",
        "JavaScript uses \"function\" instead of \"def\"",
    )]
});

fn syntax_patterns(language: Language) -> &'static [RewritePattern] {
    match language {
        Language::Python => &PYTHON_PATTERNS,
        Language::JavaScript => &JAVASCRIPT_PATTERNS,
        Language::Cpp | Language::Java => &[],
    }
}

fn scan_syntax_patterns(enhanced: &mut Enhanced, source: &str, language: Language) {
    let mut rewrite = source.to_owned();
    let mut matched = false;

    for pattern in syntax_patterns(language) {
        if pattern.pattern.is_match(&rewrite) {
            matched = true;
            enhanced.suggestions.push(
                Suggestion::new(SuggestionKind::SyntaxPattern, pattern.message)
                    .with_fix(format!("Change pattern to: {}", pattern.replacement)),
            );
            rewrite = pattern
                .pattern
                .replace_all(&rewrite, pattern.replacement)
                .into_owned();
        }
    }

    if matched && rewrite != source {
        enhanced.suggested_rewrite = Some(rewrite);
    }
}

const PYTHON_TYPOS: &[(&str, &str)] = &[
    ("sintax error", "syntax error"),
    ("prit", "print"),
    ("retrun", "return"),
    ("dif", "def"),
    ("calss", "class"),
    ("improt", "import"),
    ("form", "from"),
    ("elseif", "elif"),
    ("whlie", "while"),
    ("braek", "break"),
    ("contineu", "continue"),
];

const JAVASCRIPT_TYPOS: &[(&str, &str)] = &[
    ("functino", "function"),
    ("vra", "var"),
    ("cosnt", "const"),
    ("consol", "console"),
    ("retrn", "return"),
    ("tru", "true"),
    ("flase", "false"),
];

const CPP_TYPOS: &[(&str, &str)] = &[
    ("inclde", "include"),
    ("inlcude", "include"),
    ("cot", "cout"),
    ("cint", "cin"),
    ("enld", "endl"),
    ("reutrn", "return"),
    ("voiad", "void"),
];

struct TypoEntry {
    matcher: Regex,
    typo: &'static str,
    correct: &'static str,
}

// Static tables; a malformed pattern is caught by `tables_build`.
#[allow(clippy::expect_used)]
fn word_matcher(word: &str) -> Regex {
    Regex::new(&format!(r"\b{}\b", regex::escape(word)))
        .expect("static typo pattern must compile")
}

fn typo_entries(table: &[(&'static str, &'static str)]) -> Vec<TypoEntry> {
    table
        .iter()
        .map(|(typo, correct)| TypoEntry {
            matcher: word_matcher(typo),
            typo,
            correct,
        })
        .collect()
}

static PYTHON_TYPO_MATCHERS: LazyLock<Vec<TypoEntry>> =
    LazyLock::new(|| typo_entries(PYTHON_TYPOS));
static JAVASCRIPT_TYPO_MATCHERS: LazyLock<Vec<TypoEntry>> =
    LazyLock::new(|| typo_entries(JAVASCRIPT_TYPOS));
static CPP_TYPO_MATCHERS: LazyLock<Vec<TypoEntry>> = LazyLock::new(|| typo_entries(CPP_TYPOS));

fn known_typos(language: Language) -> &'static [TypoEntry] {
    match language {
        Language::Python => &PYTHON_TYPO_MATCHERS,
        Language::JavaScript => &JAVASCRIPT_TYPO_MATCHERS,
        Language::Cpp => &CPP_TYPO_MATCHERS,
        Language::Java => &[],
    }
}

fn scan_known_typos(enhanced: &mut Enhanced, source: &str, language: Language) {
    for entry in known_typos(language) {
        if entry.matcher.is_match(source) {
            enhanced.suggestions.push(
                Suggestion::new(
                    SuggestionKind::Typo,
                    format!(
                        "Possible typo: '{}' should be '{}'",
                        entry.typo, entry.correct
                    ),
                )
                .with_fix(format!("Replace \"{}\" with \"{}\"", entry.typo, entry.correct)),
            );
        }
    }
}

const BLOCK_PREFIXES: &[&str] = &["if ", "elif ", "else", "for ", "while ", "def ", "class "];

/// Line-by-line structural checks, independent of lexical diagnostics.
fn structural_issues(lines: &[&str]) -> Vec<Diagnostic> {
    let mut issues = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if line.trim().is_empty() || line.starts_with([' ', '\t']) {
            continue;
        }
        if index >= 1 && lines[index - 1].trim_end().ends_with(':') {
            issues.push(Diagnostic::warning(
                DiagnosticCategory::Indentation,
                (index + 1) as u32,
                1,
                "Expected indentation after colon",
            ));
        }
    }

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let opens_block = BLOCK_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix));
        if opens_block && !trimmed.ends_with(':') {
            issues.push(Diagnostic::error(
                DiagnosticCategory::MissingColon,
                (index + 1) as u32,
                1,
                "Missing colon at end of statement",
            ));
        }
    }

    issues
}
