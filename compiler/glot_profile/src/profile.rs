//! The static profile table.
//!
//! One [`LanguageProfile`] per supported language, built on first use and
//! shared read-only afterwards. The keyword/builtin lists and detection
//! signals are data; the tokenizer, detector and corrector stay generic
//! over whichever profile they are handed.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashSet;

use crate::Language;

/// Line-comment syntax for a profile.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CommentStyle {
    /// `#` to end of line.
    Hash,
    /// `//` to end of line.
    Slash,
}

/// Weighted signals the detector scores a snippet against.
///
/// Keyword hits score 1.5 each (whole-word, counted once), pattern hits
/// 2.0 each, and each syntax-symbol occurrence 0.5.
pub struct DetectionSignature {
    /// Whole-word keyword matchers, in signature order.
    keywords: Vec<Regex>,
    /// Structural patterns, in signature order.
    patterns: Vec<Regex>,
    /// Symbols counted by plain substring occurrence.
    symbols: &'static [&'static str],
}

/// Score weight of one detection keyword hit.
pub(crate) const KEYWORD_WEIGHT: f64 = 1.5;
/// Score weight of one detection pattern hit.
pub(crate) const PATTERN_WEIGHT: f64 = 2.0;
/// Score weight of one syntax-symbol occurrence.
pub(crate) const SYMBOL_WEIGHT: f64 = 0.5;

impl DetectionSignature {
    fn new(
        keywords: &'static [&'static str],
        patterns: &'static [&'static str],
        symbols: &'static [&'static str],
    ) -> Self {
        DetectionSignature {
            keywords: keywords
                .iter()
                .map(|kw| compile(&format!(r"\b{}\b", regex::escape(kw))))
                .collect(),
            patterns: patterns.iter().map(|p| compile(p)).collect(),
            symbols,
        }
    }

    /// Accumulated detection score of `source` against this signature.
    pub fn score(&self, source: &str) -> f64 {
        let mut score = 0.0;
        for keyword in &self.keywords {
            if keyword.is_match(source) {
                score += KEYWORD_WEIGHT;
            }
        }
        for pattern in &self.patterns {
            if pattern.is_match(source) {
                score += PATTERN_WEIGHT;
            }
        }
        for symbol in self.symbols {
            score += source.matches(symbol).count() as f64 * SYMBOL_WEIGHT;
        }
        score
    }
}

// The signal tables are compile-time constants; a malformed pattern is a
// programming error caught by the `profiles_build` test.
#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .expect("static detection pattern must compile")
}

/// The static table for one language.
pub struct LanguageProfile {
    pub language: Language,
    /// Reserved words, in declaration order (typo matching prefers the
    /// earliest on equal similarity).
    pub keywords: &'static [&'static str],
    /// Identifiers never flagged as keyword typos.
    pub builtins: &'static [&'static str],
    pub detection: DetectionSignature,
    pub comment: Option<CommentStyle>,
    keyword_set: FxHashSet<&'static str>,
    builtin_set: FxHashSet<&'static str>,
}

impl LanguageProfile {
    fn new(
        language: Language,
        keywords: &'static [&'static str],
        builtins: &'static [&'static str],
        detection: DetectionSignature,
        comment: Option<CommentStyle>,
    ) -> Self {
        LanguageProfile {
            language,
            keywords,
            builtins,
            detection,
            comment,
            keyword_set: keywords.iter().copied().collect(),
            builtin_set: builtins.iter().copied().collect(),
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keyword_set.contains(word)
    }

    pub fn is_builtin(&self, word: &str) -> bool {
        self.builtin_set.contains(word)
    }
}

const PYTHON_KEYWORDS: &[&str] = &[
    "def", "class", "if", "elif", "else", "while", "for", "in", "return", "import", "from", "as",
    "try", "except", "finally", "with", "lambda", "pass", "break", "continue", "and", "or", "not",
    "True", "False", "None", "print",
];

const PYTHON_BUILTINS: &[&str] = &[
    "int", "str", "float", "bool", "list", "dict", "tuple", "set", "input", "print", "len",
    "range", "type", "isinstance", "abs", "sum", "min", "max", "round", "sorted", "reversed",
    "enumerate", "zip", "map", "filter", "all", "any", "open", "file",
];

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "function", "var", "let", "const", "if", "else", "while", "for", "return", "class", "new",
    "this", "typeof", "instanceof", "try", "catch", "finally", "throw", "async", "await", "true",
    "false", "null", "undefined",
];

const JAVASCRIPT_BUILTINS: &[&str] = &[
    "function", "var", "let", "const", "if", "else", "while", "for", "return", "class", "new",
    "this", "typeof", "instanceof", "try", "catch", "finally", "throw", "async", "await", "true",
    "false", "null", "undefined", "console",
];

const CPP_KEYWORDS: &[&str] = &[
    "int", "float", "double", "char", "bool", "void", "if", "else", "while", "for", "return",
    "class", "struct", "public", "private", "protected", "namespace", "using", "true", "false",
];

const CPP_BUILTINS: &[&str] = &[
    "int", "float", "double", "char", "bool", "void", "string", "if", "else", "while", "for",
    "return", "class", "struct", "public", "private", "protected", "namespace", "using",
    "include", "cout", "cin", "endl", "true", "false",
];

const JAVA_KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "final",
    "finally",
    "float",
    "for",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "try",
    "void",
    "volatile",
    "while",
    "true",
    "false",
    "null",
];

const JAVA_BUILTINS: &[&str] = &[
    "String",
    "System",
    "Scanner",
    "ArrayList",
    "HashMap",
    "Integer",
    "Double",
    "Boolean",
    "Math",
    "Object",
    "Exception",
    "println",
    "print",
    "length",
    "size",
    "add",
    "remove",
    "get",
    "set",
    "equals",
    "toString",
    "indexOf",
    "substring",
    "charAt",
    "split",
    "trim",
];

static PROFILES: LazyLock<Vec<LanguageProfile>> = LazyLock::new(|| {
    vec![
        LanguageProfile::new(
            Language::Python,
            PYTHON_KEYWORDS,
            PYTHON_BUILTINS,
            DetectionSignature::new(
                &["def", "print", "import", "from", "class", "elif", "pass"],
                &[r"def\s+\w+\(", r"print\(", r":\s*$", r"import\s+\w+"],
                &[":", "def", "import"],
            ),
            Some(CommentStyle::Hash),
        ),
        LanguageProfile::new(
            Language::JavaScript,
            JAVASCRIPT_KEYWORDS,
            JAVASCRIPT_BUILTINS,
            DetectionSignature::new(
                &["function", "var", "let", "const", "console", "return"],
                &[r"function\s+\w+\(", r"console\.log\(", r"=>", r"\{\s*$"],
                &["{", "}", "function", "var", "const"],
            ),
            Some(CommentStyle::Slash),
        ),
        LanguageProfile::new(
            Language::Cpp,
            CPP_KEYWORDS,
            CPP_BUILTINS,
            DetectionSignature::new(
                &["include", "cout", "cin", "endl", "namespace", "using"],
                &[r"#include", r"cout\s*<<", r"int\s+main\(", r"std::"],
                &["#include", "::", "cout", "cin", "endl"],
            ),
            Some(CommentStyle::Slash),
        ),
        LanguageProfile::new(
            Language::Java,
            JAVA_KEYWORDS,
            JAVA_BUILTINS,
            DetectionSignature::new(
                &["public", "class", "static", "void", "System"],
                &[
                    r"public\s+class",
                    r"System\.out\.println",
                    r"public\s+static\s+void\s+main",
                ],
                &["public", "class", "System.out"],
            ),
            None,
        ),
    ]
});

/// All profiles, in table order.
pub fn profiles() -> &'static [LanguageProfile] {
    &PROFILES
}

/// The profile for a specific language.
pub fn profile(language: Language) -> &'static LanguageProfile {
    let index = Language::ALL
        .iter()
        .position(|l| *l == language)
        .unwrap_or(0);
    &PROFILES[index]
}
