//! Free-standing improvement suggestions.
//!
//! Unlike a [`Diagnostic`](crate::Diagnostic), a suggestion is not tied to
//! a source position; it reports a pattern found anywhere in the snippet.

use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// A syntax habit from another language (e.g. `then:` in python).
    SyntaxPattern,
    /// A known keyword misspelling (e.g. `prit` for `print`).
    Typo,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
    /// Concrete remediation, when one is known.
    pub fix: Option<String>,
}

impl Suggestion {
    pub fn new(kind: SuggestionKind, message: impl Into<String>) -> Self {
        Suggestion {
            kind,
            message: message.into(),
            fix: None,
        }
    }

    #[must_use]
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }
}
