//! CLI command implementations.

use std::path::Path;

use glot_ir::render_listing;
use glot_profile::{detect, Language};

use crate::{CompileRequest, Compiler, Error};

/// Options for `glot check`.
#[derive(Clone, Debug)]
pub struct CheckOptions {
    /// Language to fall back on when detection is off or inconclusive.
    pub language: Language,
    pub auto_detect: bool,
    /// Print the full report as JSON instead of the explanation.
    pub json: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            language: Language::Python,
            auto_detect: true,
            json: false,
        }
    }
}

fn read_source(path: &str) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|source| Error::ReadSource {
        path: Path::new(path).to_path_buf(),
        source,
    })
}

/// Analyze a file and print the explanation (or the JSON report).
///
/// Returns whether the analysis succeeded, so the caller can pick the
/// exit code.
pub fn check_file(path: &str, options: &CheckOptions) -> Result<bool, Error> {
    let request = CompileRequest {
        source: read_source(path)?,
        language_hint: options.language,
        auto_detect: options.auto_detect,
    };
    let report = Compiler::compile(&request);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.explanation);
    }
    Ok(report.success)
}

/// Print the detected language and confidence for a file.
pub fn detect_file(path: &str) -> Result<(), Error> {
    let source = read_source(path)?;
    let detection = detect(&source);
    match detection.language {
        Some(language) => println!(
            "{language} (confidence: {:.1}%)",
            detection.confidence * 100.0
        ),
        None => println!("unknown"),
    }
    Ok(())
}

/// Print the raw and optimized IR listings for a file.
pub fn ir_file(path: &str, options: &CheckOptions) -> Result<(), Error> {
    let request = CompileRequest {
        source: read_source(path)?,
        language_hint: options.language,
        auto_detect: options.auto_detect,
    };
    let report = Compiler::compile(&request);

    println!("IR ({} instructions):", report.ir.len());
    println!("{}", render_listing(&report.ir));
    println!();
    println!("Optimized IR ({} instructions):", report.optimized_ir.len());
    println!("{}", render_listing(&report.optimized_ir));
    Ok(())
}
