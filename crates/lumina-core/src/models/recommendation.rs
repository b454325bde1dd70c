use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::category::Category;

/// Ranking weight. Declared low → high so `Ord` sorts by urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recommendation {
    /// `None` for generic advice not tied to a category.
    pub category: Option<Category>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}
