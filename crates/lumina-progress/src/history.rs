use std::cmp::Ordering;

use lumina_core::models::analysis::AnalysisRecord;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A patient's analyses ordered newest first, with the two most recent
/// singled out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProcessedHistory {
    pub all: Vec<AnalysisRecord>,
    pub current: Option<AnalysisRecord>,
    pub previous: Option<AnalysisRecord>,
}

/// Order an unordered history. The input slice is left untouched.
pub fn process(history: &[AnalysisRecord]) -> ProcessedHistory {
    let mut all = history.to_vec();
    all.sort_by(newest_first);

    let current = all.first().cloned();
    let previous = all.get(1).cloned();

    ProcessedHistory {
        all,
        current,
        previous,
    }
}

/// Descending `created_at`; equal timestamps fall back to ascending id so the
/// order is total.
pub fn newest_first(a: &AnalysisRecord, b: &AnalysisRecord) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Oldest first: the exact reverse of [`process`]'s order.
pub fn chronological(history: &[AnalysisRecord]) -> Vec<&AnalysisRecord> {
    let mut refs: Vec<_> = history.iter().collect();
    refs.sort_by(|a, b| newest_first(a, b));
    refs.reverse();
    refs
}

/// The newest analysis that actually carries scores.
pub fn latest_valid(history: &[AnalysisRecord]) -> Option<&AnalysisRecord> {
    history
        .iter()
        .filter(|a| a.is_valid())
        .min_by(|a, b| newest_first(a, b))
}
