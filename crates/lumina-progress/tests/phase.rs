use lumina_core::error::CoreError;
use lumina_core::models::phase::{PhaseNumber, PhaseState};
use lumina_progress::error::ProgressError;
use lumina_progress::phase::{advance, days_in_phase, resolve};
use uuid::Uuid;

fn at(s: &str) -> jiff::Timestamp {
    s.parse().unwrap()
}

#[test]
fn missing_state_resolves_to_phase_one_without_date() {
    let patient = Uuid::from_u128(1);
    let state = resolve(patient, None);
    assert_eq!(state.current_phase_number, PhaseNumber::FIRST);
    assert_eq!(state.phase_start_date, None);
    assert_eq!(state.id, None);
}

#[test]
fn stored_state_is_kept() {
    let patient = Uuid::from_u128(1);
    let stored = PhaseState {
        id: Some(Uuid::from_u128(5)),
        patient_id: patient,
        current_phase_number: PhaseNumber::new(4).unwrap(),
        phase_start_date: Some(at("2025-01-01T00:00:00Z")),
    };
    assert_eq!(resolve(patient, Some(stored.clone())), stored);
}

#[test]
fn advance_sets_phase_and_stamps_start() {
    let state = PhaseState::initial(Uuid::from_u128(1));
    let now = at("2025-06-01T15:30:00Z");

    let next = advance(&state, 3, now).unwrap();
    assert_eq!(next.current_phase_number.get(), 3);
    assert_eq!(next.phase_start_date, Some(now));
    assert_eq!(next.patient_id, state.patient_id);
}

#[test]
fn out_of_range_phases_are_rejected() {
    let state = PhaseState::initial(Uuid::from_u128(1));
    let now = at("2025-06-01T15:30:00Z");

    for requested in [0, 7, -1, 256] {
        assert!(matches!(
            advance(&state, requested, now),
            Err(ProgressError::InvalidPhase(CoreError::InvalidPhase(n))) if n == requested
        ));
    }
}

#[test]
fn any_phase_may_be_chosen_including_going_back() {
    let state = PhaseState::initial(Uuid::from_u128(1));
    let six = advance(&state, 6, at("2025-06-01T00:00:00Z")).unwrap();
    let again = advance(&six, 6, at("2025-07-01T00:00:00Z")).unwrap();
    let back = advance(&again, 2, at("2025-08-01T00:00:00Z")).unwrap();

    assert_eq!(again.phase_start_date, Some(at("2025-07-01T00:00:00Z")));
    assert_eq!(back.current_phase_number.get(), 2);
}

#[test]
fn identity_is_carried_through_transitions() {
    let mut state = PhaseState::initial(Uuid::from_u128(1));
    state.id = Some(Uuid::from_u128(42));
    let next = advance(&state, 5, at("2025-06-01T00:00:00Z")).unwrap();
    assert_eq!(next.id, Some(Uuid::from_u128(42)));
}

#[test]
fn days_in_phase_counts_whole_days() {
    let state = advance(
        &PhaseState::initial(Uuid::from_u128(1)),
        2,
        at("2025-06-01T12:00:00Z"),
    )
    .unwrap();

    assert_eq!(days_in_phase(&state, at("2025-06-04T11:59:00Z")), Some(2));
    let unstarted = PhaseState::initial(Uuid::from_u128(1));
    assert_eq!(days_in_phase(&unstarted, at("2025-06-04T00:00:00Z")), None);
}

#[test]
fn phase_numbers_round_trip_through_json() {
    let json = serde_json::to_string(&PhaseNumber::new(3).unwrap()).unwrap();
    assert_eq!(json, "3");
    assert!(serde_json::from_str::<PhaseNumber>("9").is_err());
    assert_eq!(PhaseNumber::new(5).unwrap().name(), "Integração");
}

#[test]
fn rejection_keeps_the_phase_message() {
    let state = PhaseState::initial(Uuid::from_u128(1));

    let err = advance(&state, 9, at("2025-06-01T00:00:00Z")).unwrap_err();
    assert_eq!(err.to_string(), "phase 9 is outside the protocol range [1, 6]");
}
