//! Diagnostics and the diagnostic enhancer.
//!
//! The tokenizer reports raw lexical diagnostics; the enhancer
//! ([`enhance`]) attaches source context, synthesizes remediation
//! suggestions, scans for known typos and cross-language syntax habits,
//! runs the structural checks, and routes everything by severity into the
//! error/warning lists the report exposes.

mod diagnostic;
mod enhance;
mod suggestion;

pub use diagnostic::{Diagnostic, DiagnosticCategory, FixAction, Severity};
pub use enhance::{enhance, Enhanced};
pub use suggestion::{Suggestion, SuggestionKind};
