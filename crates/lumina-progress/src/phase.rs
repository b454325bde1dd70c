//! Protocol phase tracker.
//!
//! Six fixed phases, no terminal state. Transitions are therapist-triggered
//! and may jump to any phase; each one stamps a fresh start date. Nothing
//! here advances a phase on its own.

use lumina_core::models::phase::{PhaseNumber, PhaseState};
use uuid::Uuid;

use crate::error::ProgressError;

/// The stored state, or phase 1 with no start date when none exists.
pub fn resolve(patient_id: Uuid, stored: Option<PhaseState>) -> PhaseState {
    stored.unwrap_or_else(|| PhaseState::initial(patient_id))
}

/// Move to `requested`, stamping `now` as the phase start.
///
/// Out-of-range phases are rejected; the current state is never modified.
pub fn advance(
    state: &PhaseState,
    requested: i64,
    now: jiff::Timestamp,
) -> Result<PhaseState, ProgressError> {
    let phase = PhaseNumber::new(requested)?;

    Ok(PhaseState {
        id: state.id,
        patient_id: state.patient_id,
        current_phase_number: phase,
        phase_start_date: Some(now),
    })
}

/// Whole days spent in the current phase, `None` when no start is recorded.
pub fn days_in_phase(state: &PhaseState, now: jiff::Timestamp) -> Option<i64> {
    let start = state.phase_start_date?;
    let elapsed = now.duration_since(start).as_secs();
    Some((elapsed / 86_400).max(0))
}
