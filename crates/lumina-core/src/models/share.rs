use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A public link to one analysis report. The id doubles as the share token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SharedReport {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub analysis_id: Uuid,
    pub therapist_user_id: Uuid,
    pub created_at: jiff::Timestamp,
}
