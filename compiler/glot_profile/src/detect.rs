//! Heuristic language detection.
//!
//! Scores a snippet against every profile's detection signature and
//! normalizes the winner's score against the total. Stateless; profiles
//! are the only shared data.

use crate::{profiles, Language};

/// Outcome of language detection.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Detection {
    /// `None` when every profile scored zero.
    pub language: Option<Language>,
    /// Winning score divided by the sum of all scores, in `[0, 1]`.
    pub confidence: f64,
}

/// Per-language raw scores, in profile-table order.
pub fn scores(source: &str) -> Vec<(Language, f64)> {
    profiles()
        .iter()
        .map(|profile| (profile.language, profile.detection.score(source)))
        .collect()
}

/// Detect the most likely language of `source`.
///
/// Ties break toward the earlier profile in table order.
pub fn detect(source: &str) -> Detection {
    let scores = scores(source);
    let total: f64 = scores.iter().map(|(_, score)| score).sum();

    let mut best: Option<(Language, f64)> = None;
    for (language, score) in scores {
        let beats = best.map_or(true, |(_, best_score)| score > best_score);
        if beats {
            best = Some((language, score));
        }
    }

    match best {
        Some((language, score)) if score > 0.0 => Detection {
            language: Some(language),
            confidence: score / total,
        },
        _ => Detection {
            language: None,
            confidence: 0.0,
        },
    }
}
