use jiff::Unit;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::phase::PhaseNumber;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    pub therapist_user_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<Date>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub profession: Option<String>,
    pub marital_status: Option<String>,
    #[serde(default)]
    pub has_analysis: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Patient {
    /// Completed years of age on `today`, `None` without a birth date.
    pub fn age_on(&self, today: Date) -> Option<i16> {
        let span = self.birth_date?.until((Unit::Year, today)).ok()?;
        Some(span.get_years().max(0))
    }

    /// Case-insensitive substring match on name or email. A blank term
    /// matches everyone.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self
                .email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(&term))
    }
}

/// Editable patient fields, used for both creation and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientDetails {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<Date>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub profession: Option<String>,
    pub marital_status: Option<String>,
}

/// A patient row as listed on the dashboard, joined with its phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientSummary {
    pub patient: Patient,
    pub age: Option<i16>,
    pub current_phase_number: PhaseNumber,
    pub phase_start_date: Option<jiff::Timestamp>,
}
