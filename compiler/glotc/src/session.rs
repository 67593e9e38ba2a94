//! Per-caller diagnostic history.
//!
//! The orchestrator owns a [`Session`] per user/connection and records
//! each report into it; [`Session::insights`] summarizes what keeps going
//! wrong. Explicit instance state — concurrent callers hold independent
//! sessions, and nothing here is process-global.

use glot_diagnostic::DiagnosticCategory;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::report::CompilationReport;

/// Accumulated diagnostic categories across a caller's runs.
#[derive(Clone, Debug, Default)]
pub struct Session {
    history: Vec<DiagnosticCategory>,
}

/// Summary of a session's diagnostic history.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Insights {
    pub total: usize,
    /// The category seen most often; ties break toward the one recorded
    /// first. Absent while the history is empty.
    pub most_common: Option<DiagnosticCategory>,
    pub focus: String,
    /// Category counts in first-seen order.
    pub breakdown: Vec<(DiagnosticCategory, usize)>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Record every diagnostic of `report` into the history.
    pub fn record(&mut self, report: &CompilationReport) {
        for diagnostic in report.errors.iter().chain(&report.warnings) {
            self.history.push(diagnostic.category);
        }
    }

    pub fn insights(&self) -> Insights {
        if self.history.is_empty() {
            return Insights {
                total: 0,
                most_common: None,
                focus: "No issues yet. Keep coding!".to_owned(),
                breakdown: Vec::new(),
            };
        }

        let mut counts: FxHashMap<DiagnosticCategory, usize> = FxHashMap::default();
        let mut order = Vec::new();
        for category in &self.history {
            let count = counts.entry(*category).or_insert(0);
            if *count == 0 {
                order.push(*category);
            }
            *count += 1;
        }

        let breakdown: Vec<(DiagnosticCategory, usize)> = order
            .into_iter()
            .map(|category| (category, counts[&category]))
            .collect();
        // Strictly-greater scan: on a count tie the first-seen category
        // stays the winner.
        let mut most_common: Option<(DiagnosticCategory, usize)> = None;
        for (category, count) in &breakdown {
            if most_common.is_none_or(|(_, best)| *count > best) {
                most_common = Some((*category, *count));
            }
        }
        let most_common = most_common.map(|(category, _)| category);

        Insights {
            total: self.history.len(),
            focus: most_common.map_or_else(String::new, |category| {
                format!("Focus on improving: {category}")
            }),
            most_common,
            breakdown,
        }
    }
}
