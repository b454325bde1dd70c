use jiff::tz::TimeZone;
use lumina_core::models::analysis::AnalysisRecord;
use lumina_core::models::category::Category;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::history::chronological;
use crate::labels::format_date;

/// Fewer valid analyses than this and there is no trend to draw.
pub const MIN_TREND_POINTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProgressPoint {
    pub analysis_id: Uuid,
    pub created_at: jiff::Timestamp,
    pub label: String,
    pub average: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum OverallProgress {
    InsufficientData { total: usize, valid: usize },
    Series { points: Vec<ProgressPoint> },
}

impl OverallProgress {
    pub fn averages(&self) -> Option<Vec<u8>> {
        match self {
            OverallProgress::Series { points } => Some(points.iter().map(|p| p.average).collect()),
            OverallProgress::InsufficientData { .. } => None,
        }
    }
}

/// Overall average per valid analysis, oldest first.
///
/// Each point is the rounded mean of that analysis's already-rounded
/// category percentages. Analyses without scores are skipped.
pub fn overall_progress(history: &[AnalysisRecord], tz: &TimeZone) -> OverallProgress {
    let valid = valid_chronological(history);
    if valid.len() < MIN_TREND_POINTS {
        return OverallProgress::InsufficientData {
            total: history.len(),
            valid: valid.len(),
        };
    }

    let points = valid
        .iter()
        .zip(point_labels(&valid, tz))
        .filter_map(|(analysis, label)| {
            Some(ProgressPoint {
                analysis_id: analysis.id,
                created_at: analysis.created_at,
                label,
                average: analysis.categories().average()?,
            })
        })
        .collect();

    OverallProgress::Series { points }
}

/// One category's values across analyses. `None` where an analysis did not
/// record that category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategorySeries {
    pub category: Category,
    pub label: String,
    pub values: Vec<Option<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum CategoryEvolution {
    InsufficientData { total: usize, valid: usize },
    Series {
        labels: Vec<String>,
        series: Vec<CategorySeries>,
    },
}

/// Per-category evolution across valid analyses, oldest first.
pub fn category_evolution(history: &[AnalysisRecord], tz: &TimeZone) -> CategoryEvolution {
    let valid = valid_chronological(history);
    if valid.len() < MIN_TREND_POINTS {
        return CategoryEvolution::InsufficientData {
            total: history.len(),
            valid: valid.len(),
        };
    }

    let series = Category::ALL
        .into_iter()
        .map(|category| CategorySeries {
            category,
            label: category.label().to_string(),
            values: valid.iter().map(|a| a.categories().get(category)).collect(),
        })
        .collect();

    CategoryEvolution::Series {
        labels: point_labels(&valid, tz),
        series,
    }
}

fn valid_chronological(history: &[AnalysisRecord]) -> Vec<&AnalysisRecord> {
    chronological(history)
        .into_iter()
        .filter(|a| a.is_valid())
        .collect()
}

fn point_labels(valid: &[&AnalysisRecord], tz: &TimeZone) -> Vec<String> {
    valid
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{} (Análise {})", format_date(a.created_at, tz), i + 1))
        .collect()
}
