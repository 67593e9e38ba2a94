//! The glot pipeline driver.
//!
//! Sequences the analysis stages over one snippet and assembles the
//! [`CompilationReport`] the service layer consumes:
//!
//! ```text
//! source
//!   │
//!   ▼
//! detect ──► correct ──► tokenize ──► enhance ──► lower ──► optimize
//!                                                              │
//!                                                              ▼
//!                                                     CompilationReport
//! ```
//!
//! Stages run in strict sequence, at most once per invocation; later
//! stages never re-enter earlier ones. A panic anywhere inside a stage is
//! caught at this boundary and surfaced as a single critical diagnostic
//! on a fallback report, so callers always get a report back.
//!
//! The [`Session`] type carries diagnostic history across runs for a
//! single caller; there is no process-wide state anywhere in the
//! pipeline.

pub mod commands;
mod explain;
mod pipeline;
mod preview;
mod report;
mod session;

use std::path::PathBuf;

pub use pipeline::{CompileRequest, Compiler};
pub use report::{CompilationReport, Stats};
pub use session::{Insights, Session};

/// Driver-level failures. Stage code is total; only the CLI edges
/// (file IO, flag parsing, JSON rendering) can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    UnknownLanguage(#[from] glot_profile::UnknownLanguage),
    #[error("failed to render report as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
