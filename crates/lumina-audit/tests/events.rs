use lumina_audit::events::{self, AuditEvent};
use uuid::Uuid;

#[test]
fn new_event_has_no_details() {
    let therapist = Uuid::new_v4();
    let patient = Uuid::new_v4();

    let event = events::patient_created(therapist, patient);
    assert_eq!(event.action, "patient.created");
    assert_eq!(event.resource_type, "patient");
    assert_eq!(event.resource_id, patient.to_string());
    assert_eq!(event.therapist_user_id, therapist);
    assert!(event.details.is_none());
}

#[test]
fn phase_update_records_transition() {
    let event = events::phase_updated(Uuid::new_v4(), Uuid::new_v4(), 2, 3);

    let details = event.details.unwrap();
    assert_eq!(details["from"], 2);
    assert_eq!(details["to"], 3);
}

#[test]
fn analysis_event_carries_patient_and_average() {
    let patient = Uuid::new_v4();
    let analysis = Uuid::new_v4();

    let event = events::analysis_submitted(Uuid::new_v4(), patient, analysis, Some(62));
    assert_eq!(event.resource_id, analysis.to_string());

    let details = event.details.unwrap();
    assert_eq!(details["patient_id"], patient.to_string());
    assert_eq!(details["average"], 62);
}

#[test]
fn serializes_for_log_shipping() {
    let event = AuditEvent::new("share.created", "analysis", "abc", Uuid::nil())
        .with_details(serde_json::json!({ "token": "t" }));

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["action"], "share.created");
    assert_eq!(json["resource_id"], "abc");
    assert_eq!(json["details"]["token"], "t");
}

#[test]
fn emit_without_subscriber_is_a_no_op() {
    events::patient_deleted(Uuid::new_v4(), Uuid::new_v4()).emit();
}
