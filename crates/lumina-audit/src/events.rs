use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// A structured audit event for practice actions.
///
/// Emitted through `tracing`, so it lands wherever the subscriber writes.
/// With JSON output each event is one line with `audit.*` fields.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub therapist_user_id: Uuid,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl ToString,
        therapist_user_id: Uuid,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.to_string(),
            therapist_user_id,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(serde_json::Value::to_string)
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.therapist = %self.therapist_user_id,
            audit.details = %details,
            "audit event"
        );
    }
}

pub fn analysis_submitted(
    therapist: Uuid,
    patient_id: Uuid,
    analysis_id: Uuid,
    average: Option<u8>,
) -> AuditEvent {
    AuditEvent::new("analysis.submitted", "analysis", analysis_id, therapist).with_details(
        serde_json::json!({ "patient_id": patient_id, "average": average }),
    )
}

pub fn phase_updated(therapist: Uuid, patient_id: Uuid, from: u8, to: u8) -> AuditEvent {
    AuditEvent::new("phase.updated", "patient", patient_id, therapist)
        .with_details(serde_json::json!({ "from": from, "to": to }))
}

pub fn patient_created(therapist: Uuid, patient_id: Uuid) -> AuditEvent {
    AuditEvent::new("patient.created", "patient", patient_id, therapist)
}

pub fn patient_deleted(therapist: Uuid, patient_id: Uuid) -> AuditEvent {
    AuditEvent::new("patient.deleted", "patient", patient_id, therapist)
}

pub fn share_created(therapist: Uuid, analysis_id: Uuid, token: Uuid) -> AuditEvent {
    AuditEvent::new("share.created", "analysis", analysis_id, therapist)
        .with_details(serde_json::json!({ "token": token }))
}
