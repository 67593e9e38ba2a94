//! The glot tokenizer.
//!
//! A single left-to-right scan over the source, parameterized by a
//! [`LanguageProfile`](glot_profile::LanguageProfile): the profile decides
//! which words are keywords, which identifiers are exempt from typo
//! detection, and which line-comment syntax to skip. The scan never
//! aborts — unrecognized characters become `Error` tokens plus a
//! diagnostic, and the token stream always ends with exactly one
//! end-of-input token.

mod scanner;

pub use scanner::{tokenize, LexOutput};
