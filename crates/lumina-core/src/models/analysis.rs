use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::answers::AnswerSet;
use super::category::CategoryScores;
use super::recommendation::Recommendation;

/// One completed questionnaire submission. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub therapist_user_id: Uuid,
    #[serde(default)]
    pub answers: AnswerSet,
    #[serde(default)]
    pub results: AnalysisResults,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    pub created_at: jiff::Timestamp,
}

impl AnalysisRecord {
    /// A record is eligible for comparison and trends when it has scores.
    pub fn is_valid(&self) -> bool {
        !self.results.categories.is_empty()
    }

    pub fn categories(&self) -> &CategoryScores {
        &self.results.categories
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisResults {
    #[serde(default)]
    pub categories: CategoryScores,
}
