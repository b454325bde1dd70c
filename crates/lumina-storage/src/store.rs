use std::path::PathBuf;

use lumina_core::models::analysis::{AnalysisRecord, AnalysisResults};
use lumina_core::models::answers::AnswerSet;
use lumina_core::models::category::CategoryScores;
use lumina_core::models::patient::{Patient, PatientDetails, PatientSummary};
use lumina_core::models::phase::PhaseState;
use lumina_core::models::recommendation::Recommendation;
use lumina_core::models::session::TherapistSession;
use lumina_core::models::share::SharedReport;
use lumina_core::store_keys;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::StorageError;
use crate::objects;
use crate::state::{load_json, load_json_opt, save_json};

/// Everything a public report link resolves to.
#[derive(Debug, Clone, Serialize)]
pub struct SharedReportView {
    pub share: SharedReport,
    pub patient: Patient,
    pub analysis: AnalysisRecord,
}

/// Practice records rooted at a data directory.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load a patient and check it belongs to the session's therapist.
    async fn owned_patient(
        &self,
        session: &TherapistSession,
        patient_id: Uuid,
    ) -> Result<Patient, StorageError> {
        let patient: Patient = load_json(&self.root, &store_keys::patient(patient_id)).await?;
        if !session.owns(patient.therapist_user_id) {
            warn!(
                %patient_id,
                therapist = %session.user_id,
                "patient belongs to another therapist"
            );
            return Err(StorageError::AccessDenied {
                resource: format!("patient {patient_id}"),
            });
        }
        Ok(patient)
    }

    // ── Patients ───────────────────────────────────────────────────────────

    pub async fn create_patient(
        &self,
        session: &TherapistSession,
        details: PatientDetails,
    ) -> Result<Patient, StorageError> {
        let now = jiff::Timestamp::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            therapist_user_id: session.user_id,
            name: details.name,
            email: details.email,
            phone: details.phone,
            birth_date: details.birth_date,
            address: details.address,
            gender: details.gender,
            profession: details.profession,
            marital_status: details.marital_status,
            has_analysis: false,
            created_at: now,
            updated_at: now,
        };
        save_json(&self.root, &store_keys::patient(patient.id), &patient).await?;
        info!(patient_id = %patient.id, "patient created");
        Ok(patient)
    }

    pub async fn update_patient(
        &self,
        session: &TherapistSession,
        patient_id: Uuid,
        details: PatientDetails,
    ) -> Result<Patient, StorageError> {
        let mut patient = self.owned_patient(session, patient_id).await?;
        patient.name = details.name;
        patient.email = details.email;
        patient.phone = details.phone;
        patient.birth_date = details.birth_date;
        patient.address = details.address;
        patient.gender = details.gender;
        patient.profession = details.profession;
        patient.marital_status = details.marital_status;
        patient.updated_at = jiff::Timestamp::now();
        save_json(&self.root, &store_keys::patient(patient_id), &patient).await?;
        Ok(patient)
    }

    pub async fn get_patient(
        &self,
        session: &TherapistSession,
        patient_id: Uuid,
    ) -> Result<Patient, StorageError> {
        self.owned_patient(session, patient_id).await
    }

    /// The therapist's patients, newest first, each with its age and current
    /// phase. `search` narrows the list by name or email.
    pub async fn list_patients(
        &self,
        session: &TherapistSession,
        search: Option<&str>,
    ) -> Result<Vec<PatientSummary>, StorageError> {
        let keys = objects::list_objects(&self.root, store_keys::PATIENTS_PREFIX).await?;
        let today = jiff::Zoned::now().date();

        let mut summaries = Vec::new();
        for key in &keys {
            let patient: Patient = load_json(&self.root, key).await?;
            if !session.owns(patient.therapist_user_id)
                || !search.is_none_or(|term| patient.matches_search(term))
            {
                continue;
            }
            let phase = self.load_phase(patient.id).await?;
            summaries.push(PatientSummary {
                age: patient.age_on(today),
                current_phase_number: phase.current_phase_number,
                phase_start_date: phase.phase_start_date,
                patient,
            });
        }

        summaries.sort_by(|a, b| b.patient.created_at.cmp(&a.patient.created_at));
        Ok(summaries)
    }

    /// Delete a patient with its analyses, phase state and share links.
    pub async fn delete_patient(
        &self,
        session: &TherapistSession,
        patient_id: Uuid,
    ) -> Result<(), StorageError> {
        self.owned_patient(session, patient_id).await?;

        for key in objects::list_objects(&self.root, store_keys::SHARES_PREFIX).await? {
            let share: SharedReport = load_json(&self.root, &key).await?;
            if share.patient_id == patient_id {
                objects::delete_object(&self.root, &key).await?;
            }
        }
        objects::delete_prefix(&self.root, &store_keys::analyses_prefix(patient_id)).await?;
        objects::delete_object(&self.root, &store_keys::phase(patient_id)).await?;
        objects::delete_object(&self.root, &store_keys::patient(patient_id)).await?;

        info!(%patient_id, "patient deleted with related records");
        Ok(())
    }

    // ── Analyses ───────────────────────────────────────────────────────────

    /// Persist a scored submission. Score sets that are empty, incomplete or
    /// out of range are refused.
    pub async fn save_analysis(
        &self,
        session: &TherapistSession,
        patient_id: Uuid,
        answers: AnswerSet,
        categories: CategoryScores,
        recommendations: Vec<Recommendation>,
        created_at: jiff::Timestamp,
    ) -> Result<AnalysisRecord, StorageError> {
        let mut patient = self.owned_patient(session, patient_id).await?;
        categories.validate()?;

        let record = AnalysisRecord {
            id: Uuid::new_v4(),
            patient_id,
            therapist_user_id: session.user_id,
            answers,
            results: AnalysisResults { categories },
            recommendations,
            created_at,
        };
        save_json(&self.root, &store_keys::analysis(patient_id, record.id), &record).await?;

        if !patient.has_analysis {
            patient.has_analysis = true;
            patient.updated_at = jiff::Timestamp::now();
            save_json(&self.root, &store_keys::patient(patient_id), &patient).await?;
        }

        info!(%patient_id, analysis_id = %record.id, "analysis saved");
        Ok(record)
    }

    pub async fn get_analysis(
        &self,
        session: &TherapistSession,
        patient_id: Uuid,
        analysis_id: Uuid,
    ) -> Result<AnalysisRecord, StorageError> {
        self.owned_patient(session, patient_id).await?;
        load_json(&self.root, &store_keys::analysis(patient_id, analysis_id)).await
    }

    /// All of a patient's analyses, in no particular order. Records that no
    /// longer parse are logged and skipped.
    pub async fn list_analyses(
        &self,
        session: &TherapistSession,
        patient_id: Uuid,
    ) -> Result<Vec<AnalysisRecord>, StorageError> {
        self.owned_patient(session, patient_id).await?;

        let prefix = store_keys::analyses_prefix(patient_id);
        let keys = objects::list_objects(&self.root, &prefix).await?;
        let mut analyses = Vec::with_capacity(keys.len());
        for key in &keys {
            match load_json(&self.root, key).await {
                Ok(record) => analyses.push(record),
                Err(StorageError::Serialization(error)) => {
                    warn!(%patient_id, %key, %error, "skipping unreadable analysis record");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(analyses)
    }

    // ── Phase ──────────────────────────────────────────────────────────────

    async fn load_phase(&self, patient_id: Uuid) -> Result<PhaseState, StorageError> {
        let stored = load_json_opt(&self.root, &store_keys::phase(patient_id)).await?;
        Ok(stored.unwrap_or_else(|| PhaseState::initial(patient_id)))
    }

    /// The patient's phase, phase 1 with no start date when none is stored.
    pub async fn get_phase(
        &self,
        session: &TherapistSession,
        patient_id: Uuid,
    ) -> Result<PhaseState, StorageError> {
        self.owned_patient(session, patient_id).await?;
        self.load_phase(patient_id).await
    }

    /// Persist a phase state, assigning its identity on first save.
    pub async fn save_phase(
        &self,
        session: &TherapistSession,
        state: &PhaseState,
    ) -> Result<PhaseState, StorageError> {
        self.owned_patient(session, state.patient_id).await?;

        let mut stored = state.clone();
        stored.id.get_or_insert_with(Uuid::new_v4);
        save_json(&self.root, &store_keys::phase(state.patient_id), &stored).await?;

        info!(
            patient_id = %state.patient_id,
            phase = %stored.current_phase_number,
            "phase saved"
        );
        Ok(stored)
    }

    // ── Sharing ────────────────────────────────────────────────────────────

    pub async fn create_share_link(
        &self,
        session: &TherapistSession,
        patient_id: Uuid,
        analysis_id: Uuid,
    ) -> Result<SharedReport, StorageError> {
        self.get_analysis(session, patient_id, analysis_id).await?;

        let share = SharedReport {
            id: Uuid::new_v4(),
            patient_id,
            analysis_id,
            therapist_user_id: session.user_id,
            created_at: jiff::Timestamp::now(),
        };
        save_json(&self.root, &store_keys::share(share.id), &share).await?;
        info!(%patient_id, %analysis_id, "share link created");
        Ok(share)
    }

    /// Resolve a public share token. Needs no session: holding the token is
    /// the capability.
    pub async fn get_shared_report(&self, token: Uuid) -> Result<SharedReportView, StorageError> {
        let share: SharedReport = load_json(&self.root, &store_keys::share(token)).await?;
        let patient: Patient = load_json(&self.root, &store_keys::patient(share.patient_id)).await?;
        let analysis: AnalysisRecord = load_json(
            &self.root,
            &store_keys::analysis(share.patient_id, share.analysis_id),
        )
        .await?;
        Ok(SharedReportView {
            share,
            patient,
            analysis,
        })
    }
}
