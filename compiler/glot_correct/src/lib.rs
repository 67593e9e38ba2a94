//! Heuristic syntax correction.
//!
//! Applies a fixed sequence of textual rewrite rules to the raw source:
//! first the cross-language rules, then the language-specific passes.
//! Rules run once each, in declared order, and later rules operate on the
//! output of earlier ones — there is no fixpoint iteration. Every applied
//! rule is recorded as a [`FixRecord`] so the report can say what changed.

use std::sync::LazyLock;

use glot_profile::Language;
use regex::Regex;
use serde::Serialize;

/// Kind of an applied fix.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixKind {
    /// One of the cross-language rewrite rules.
    PatternCorrection,
    /// `int x = 5;` style declaration converted to an assignment.
    CStyleDeclaration,
    /// Trailing statement terminators stripped.
    SemicolonRemoval,
    /// Block terminator appended to a block-opening line.
    MissingColon,
    /// Dangling `then` removed.
    KeywordCorrection,
}

/// Record of one applied correction rule.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct FixRecord {
    pub kind: FixKind,
    pub message: String,
    /// How many sites the rule rewrote.
    pub count: usize,
    /// 1-based line, for per-line fixes.
    pub line: Option<u32>,
}

impl FixRecord {
    fn new(kind: FixKind, message: impl Into<String>, count: usize) -> Self {
        FixRecord {
            kind,
            message: message.into(),
            count,
            line: None,
        }
    }

    fn at_line(kind: FixKind, message: impl Into<String>, line: u32) -> Self {
        FixRecord {
            kind,
            message: message.into(),
            count: 1,
            line: Some(line),
        }
    }
}

/// Result of one correction run. Pure value; recomputed per call.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct CorrectionResult {
    pub corrected: String,
    pub fixes: Vec<FixRecord>,
    pub original: String,
}

impl CorrectionResult {
    /// Whether any rule applied.
    pub fn changed(&self) -> bool {
        !self.fixes.is_empty()
    }
}

struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
    message: &'static str,
}

impl RewriteRule {
    // Static rule tables; a malformed pattern is caught by `rules_build`.
    #[allow(clippy::expect_used)]
    fn new(pattern: &str, replacement: &'static str, message: &'static str) -> Self {
        RewriteRule {
            pattern: Regex::new(pattern).expect("static rewrite rule must compile"),
            replacement,
            message,
        }
    }
}

/// Cross-language rules, applied to every snippet in this order.
static CROSS_LANGUAGE_RULES: LazyLock<Vec<RewriteRule>> = LazyLock::new(|| {
    vec![
        RewriteRule::new(
            r"(\w+)\s*=\s*=\s*(\w+)",
            "$1 == $2",
            "Use == for comparison, not = =",
        ),
        RewriteRule::new(
            r"if\s+(\w+)\s*=\s*(\w+)",
            "if $1 == $2",
            "Use == for comparison in conditions, not =",
        ),
        RewriteRule::new(r"(\w+)\s*===\s*(\w+)", "$1 == $2", "Python uses == not ==="),
    ]
});

/// C-style declaration rewrites for the indentation-based family.
static C_STYLE_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            RewriteRule::new(
                r"\b(int|float|double|long|short|char|bool|string|var)\s+(\w+)\s*=\s*([^;]+);",
                "",
                "",
            )
            .pattern,
            "$2 = $3",
        ),
        (
            RewriteRule::new(
                r"\b(int|float|double|long|short|char|bool|string|var)\s+(\w+)\s*;",
                "",
                "",
            )
            .pattern,
            "$2 = None",
        ),
    ]
});

static THEN_RULE: LazyLock<Regex> =
    LazyLock::new(|| RewriteRule::new(r"\s+then\s*:", "", "").pattern);

const BLOCK_PREFIXES: &[&str] = &["if ", "elif ", "else", "for ", "while ", "def ", "class "];

/// Apply the correction rules for `language` to `source`.
pub fn correct(source: &str, language: Language) -> CorrectionResult {
    let mut corrected = source.to_owned();
    let mut fixes = Vec::new();

    for rule in CROSS_LANGUAGE_RULES.iter() {
        let count = rule.pattern.find_iter(&corrected).count();
        if count > 0 {
            corrected = rule
                .pattern
                .replace_all(&corrected, rule.replacement)
                .into_owned();
            fixes.push(FixRecord::new(FixKind::PatternCorrection, rule.message, count));
        }
    }

    match language {
        Language::Python => correct_python(&mut corrected, &mut fixes),
        // No automated corrections for the brace-based languages yet.
        Language::JavaScript | Language::Cpp | Language::Java => {}
    }

    CorrectionResult {
        corrected,
        fixes,
        original: source.to_owned(),
    }
}

fn correct_python(corrected: &mut String, fixes: &mut Vec<FixRecord>) {
    // C-style declarations.
    for (pattern, replacement) in C_STYLE_RULES.iter() {
        let count = pattern.find_iter(corrected).count();
        if count > 0 {
            *corrected = pattern.replace_all(corrected, *replacement).into_owned();
            fixes.push(FixRecord::new(
                FixKind::CStyleDeclaration,
                format!("Converted {count} C-style declaration(s) to Python syntax"),
                count,
            ));
        }
    }

    // Trailing semicolons, line by line, leaving comment lines alone.
    let mut lines: Vec<String> = corrected.split('\n').map(str::to_owned).collect();
    let mut removed = 0;
    for line in &mut lines {
        let stripped = line.trim_end();
        if stripped.ends_with(';') && !stripped.trim_start().starts_with('#') {
            *line = stripped[..stripped.len() - 1].to_owned();
            removed += 1;
        }
    }
    if removed > 0 {
        fixes.push(FixRecord::new(
            FixKind::SemicolonRemoval,
            format!("Removed {removed} unnecessary semicolon(s)"),
            removed,
        ));
    }

    // Block-opening lines missing their terminator.
    for (index, line) in lines.iter_mut().enumerate() {
        let trimmed = line.trim();
        let opens_block = BLOCK_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix));
        if opens_block && !trimmed.is_empty() && !trimmed.ends_with(':') {
            line.push(':');
            fixes.push(FixRecord::at_line(
                FixKind::MissingColon,
                "Added missing colon",
                (index + 1) as u32,
            ));
        }
    }
    *corrected = lines.join("\n");

    // Dangling `then` immediately before the terminator.
    if corrected.contains("then:") || corrected.contains("then :") {
        *corrected = THEN_RULE.replace_all(corrected, ":").into_owned();
        fixes.push(FixRecord::new(
            FixKind::KeywordCorrection,
            "Removed \"then\" keyword (not used in Python)",
            1,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rules_build() {
        assert_eq!(CROSS_LANGUAGE_RULES.len(), 3);
        assert_eq!(C_STYLE_RULES.len(), 2);
    }

    #[test]
    fn split_equals_collapses() {
        let result = correct("x = = y", Language::Python);
        assert_eq!(result.corrected, "x == y");
        assert_eq!(result.fixes.len(), 1);
        assert_eq!(result.fixes[0].kind, FixKind::PatternCorrection);
        assert_eq!(result.fixes[0].count, 1);
    }

    #[test]
    fn assignment_in_condition_becomes_comparison() {
        let result = correct("if x = y:\n    pass\n", Language::Python);
        assert!(result.corrected.starts_with("if x == y:"));
        let fix = &result.fixes[0];
        assert_eq!(fix.kind, FixKind::PatternCorrection);
        assert_eq!(fix.count, 1);
        assert_eq!(fix.message, "Use == for comparison in conditions, not =");
    }

    #[test]
    fn triple_equals_collapses() {
        let result = correct("a === b", Language::JavaScript);
        assert_eq!(result.corrected, "a == b");
        assert_eq!(result.fixes[0].message, "Python uses == not ===");
    }

    #[test]
    fn comparison_is_left_alone() {
        let result = correct("if x == y:\n    pass\n", Language::Python);
        assert_eq!(result.corrected, result.original);
        assert!(!result.changed());
    }

    #[test]
    fn c_style_declaration_with_initializer() {
        let result = correct("int a = 5;", Language::Python);
        assert_eq!(result.corrected, "a = 5");
        assert!(result
            .fixes
            .iter()
            .any(|f| f.kind == FixKind::CStyleDeclaration));
        // The trailing `;` was consumed by the declaration rewrite, so no
        // semicolon fix is recorded on top.
        assert!(result
            .fixes
            .iter()
            .all(|f| f.kind != FixKind::SemicolonRemoval));
    }

    #[test]
    fn c_style_declaration_without_initializer() {
        let result = correct("float x;", Language::Python);
        assert_eq!(result.corrected, "x = None");
    }

    #[test]
    fn semicolons_stripped_outside_comments() {
        let result = correct("x = 1;\n# keep this;\ny = 2;\n", Language::Python);
        assert_eq!(result.corrected, "x = 1\n# keep this;\ny = 2\n");
        let fix = result
            .fixes
            .iter()
            .find(|f| f.kind == FixKind::SemicolonRemoval)
            .map(|f| f.count);
        assert_eq!(fix, Some(2));
    }

    #[test]
    fn missing_colons_appended_per_line() {
        let result = correct("def f()\nif x > 1\n", Language::Python);
        assert_eq!(result.corrected, "def f():\nif x > 1:\n");
        let colon_fixes: Vec<u32> = result
            .fixes
            .iter()
            .filter(|f| f.kind == FixKind::MissingColon)
            .filter_map(|f| f.line)
            .collect();
        assert_eq!(colon_fixes, vec![1, 2]);
    }

    #[test]
    fn dangling_then_is_removed() {
        // The colon pass runs first, so `if x then` gains a colon and the
        // `then` rule then collapses it.
        let result = correct("if x then:\n    pass\n", Language::Python);
        assert!(result.corrected.starts_with("if x:"));
        assert!(result
            .fixes
            .iter()
            .any(|f| f.kind == FixKind::KeywordCorrection));
    }

    #[test]
    fn rules_are_order_sensitive() {
        // `= =` collapses first; the condition rule then sees `==` and
        // stays quiet.
        let result = correct("if x = = y:\n    pass\n", Language::Python);
        assert!(result.corrected.starts_with("if x == y:"));
        let pattern_fixes = result
            .fixes
            .iter()
            .filter(|f| f.kind == FixKind::PatternCorrection)
            .count();
        assert_eq!(pattern_fixes, 1);
    }

    #[test]
    fn javascript_has_no_language_pass() {
        let result = correct("let x = 1;\nif y\n", Language::JavaScript);
        assert_eq!(result.corrected, result.original);
        assert!(!result.changed());
    }
}
