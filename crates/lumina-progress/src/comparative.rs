use jiff::tz::TimeZone;
use lumina_core::models::analysis::AnalysisRecord;
use lumina_core::models::category::{Category, CategoryScores};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::labels::format_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryValue {
    pub category: Category,
    pub label: String,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryDelta {
    pub category: Category,
    pub label: String,
    pub current: u8,
    pub previous: u8,
    /// `current - previous`, in percentage points.
    pub delta: i16,
}

/// Score-level comparison. Without a previous score set there is no second
/// series at all, which keeps "no prior analysis" apart from "scored zero".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum ScoreComparison {
    NoPriorData { current: Vec<CategoryValue> },
    Compared { rows: Vec<CategoryDelta> },
}

/// Pair two score sets category by category, in canonical order.
///
/// Rows exist only for categories the current set recorded. A category the
/// previous set lacks reads as 0 there.
pub fn compare_scores(
    current: &CategoryScores,
    previous: Option<&CategoryScores>,
) -> ScoreComparison {
    let Some(previous) = previous else {
        return ScoreComparison::NoPriorData {
            current: current_values(current),
        };
    };

    ScoreComparison::Compared {
        rows: delta_rows(current, previous),
    }
}

fn delta_rows(current: &CategoryScores, previous: &CategoryScores) -> Vec<CategoryDelta> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let now = current.get(category)?;
            let before = previous.get(category).unwrap_or(0);
            Some(CategoryDelta {
                category,
                label: category.label().to_string(),
                current: now,
                previous: before,
                delta: i16::from(now) - i16::from(before),
            })
        })
        .collect()
}

fn current_values(scores: &CategoryScores) -> Vec<CategoryValue> {
    scores
        .iter()
        .map(|(category, value)| CategoryValue {
            category,
            label: category.label().to_string(),
            value,
        })
        .collect()
}

/// Current vs previous, ready for a two-series bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ComparativeView {
    pub current_label: String,
    pub previous_label: String,
    pub rows: Vec<CategoryDelta>,
}

impl ComparativeView {
    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }

    pub fn current_series(&self) -> Vec<u8> {
        self.rows.iter().map(|r| r.current).collect()
    }

    pub fn previous_series(&self) -> Vec<u8> {
        self.rows.iter().map(|r| r.previous).collect()
    }
}

/// Record-level comparison outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum Comparison {
    /// The current analysis has no scores to compare.
    CurrentUnavailable,
    /// First analysis on record.
    NoPriorData {
        current_label: String,
        current: Vec<CategoryValue>,
    },
    /// A previous analysis exists but carries no scores.
    PreviousIncomplete {
        current_label: String,
        current: Vec<CategoryValue>,
    },
    Available(ComparativeView),
}

pub fn compare_analyses(
    current: &AnalysisRecord,
    previous: Option<&AnalysisRecord>,
    tz: &TimeZone,
) -> Comparison {
    if !current.is_valid() {
        return Comparison::CurrentUnavailable;
    }

    let current_label = format!("Análise Atual ({})", format_date(current.created_at, tz));

    match previous {
        None => Comparison::NoPriorData {
            current_label,
            current: current_values(current.categories()),
        },
        Some(prev) if !prev.is_valid() => Comparison::PreviousIncomplete {
            current_label,
            current: current_values(current.categories()),
        },
        Some(prev) => Comparison::Available(ComparativeView {
            current_label,
            previous_label: format!("Análise Anterior ({})", format_date(prev.created_at, tz)),
            rows: delta_rows(current.categories(), prev.categories()),
        }),
    }
}
