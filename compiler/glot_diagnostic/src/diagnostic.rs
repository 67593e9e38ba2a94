//! The diagnostic value type.

use std::fmt;

use serde::Serialize;

/// Severity level for diagnostics.
///
/// `Critical` is reserved for pipeline-internal failures surfaced at the
/// orchestration boundary; stages themselves only produce `Error` and
/// `Warning`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
            Severity::Critical => f.write_str("critical"),
        }
    }
}

/// Classified kind of a diagnostic, used to derive fix actions and to
/// aggregate session insights.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCategory {
    UnexpectedCharacter,
    UnterminatedString,
    Typo,
    MissingColon,
    Indentation,
    Internal,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticCategory::UnexpectedCharacter => "unexpected_character",
            DiagnosticCategory::UnterminatedString => "unterminated_string",
            DiagnosticCategory::Typo => "typo",
            DiagnosticCategory::MissingColon => "missing_colon",
            DiagnosticCategory::Indentation => "indentation",
            DiagnosticCategory::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Advisory tag for an optional downstream single-line auto-fix.
///
/// Attaching a fix action never mutates source by itself.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixAction {
    AutoCorrect,
    AddColon,
    FixIndentation,
}

/// A reported issue with location, severity and optional remediation.
///
/// Created by the tokenizer or the enhancer. Enrichment may append
/// `suggestion`, `fix_action` and `context`, but never changes
/// `line`/`column`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct Diagnostic {
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub suggestion: Option<String>,
    pub severity: Severity,
    pub category: DiagnosticCategory,
    pub fix_action: Option<FixAction>,
    /// The offending source line, attached by the enhancer.
    pub context: Option<String>,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        category: DiagnosticCategory,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            line,
            column,
            message: message.into(),
            suggestion: None,
            severity,
            category,
            fix_action: None,
            context: None,
        }
    }

    pub fn error(
        category: DiagnosticCategory,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic::new(Severity::Error, category, line, column, message)
    }

    pub fn warning(
        category: DiagnosticCategory,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic::new(Severity::Warning, category, line, column, message)
    }

    /// A pipeline-internal failure. Positions are meaningless for these.
    pub fn critical(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Critical, DiagnosticCategory::Internal, 0, 0, message)
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Whether this diagnostic blocks a successful run.
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error | Severity::Critical)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.line, self.column, self.severity, self.message
        )?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (hint: {suggestion})")?;
        }
        Ok(())
    }
}
