use std::path::Path;

use jiff::tz::TimeZone;
use lumina_audit::events;
use lumina_core::models::analysis::AnalysisRecord;
use lumina_core::models::answers::AnswerSet;
use lumina_core::models::patient::{Patient, PatientDetails};
use lumina_core::models::phase::{PhaseNumber, PhaseState};
use lumina_core::models::session::TherapistSession;
use lumina_progress::comparative::{compare_analyses, Comparison};
use lumina_progress::history::{latest_valid, process};
use lumina_progress::longitudinal::{
    category_evolution, overall_progress, CategoryEvolution, OverallProgress,
};
use lumina_progress::phase::{advance, days_in_phase};
use lumina_questionnaire::catalog::QuestionCatalog;
use lumina_questionnaire::error::QuestionnaireError;
use lumina_questionnaire::recommendations::RuleTable;
use lumina_questionnaire::submission::evaluate;
use lumina_questionnaire::{get_questionnaire, Questionnaire};
use lumina_storage::store::Store;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::config::LuminaConfig;

const DEFAULT_QUESTIONNAIRE: &str = "quantum_analysis";

pub struct Context {
    store: Store,
    config: LuminaConfig,
    tz: TimeZone,
    therapist: Option<Uuid>,
}

impl Context {
    pub fn new(config: LuminaConfig, therapist: Option<Uuid>) -> eyre::Result<Self> {
        let tz = config.time_zone()?;
        Ok(Self {
            store: Store::new(config.data_dir.clone()),
            config,
            tz,
            therapist,
        })
    }

    fn session(&self) -> eyre::Result<TherapistSession> {
        self.therapist
            .map(TherapistSession::new)
            .ok_or_else(|| {
                eyre::eyre!("no therapist given; pass --therapist or set LUMINA_THERAPIST")
            })
    }

    fn questionnaire(&self) -> eyre::Result<Box<dyn Questionnaire>> {
        match &self.config.catalog_path {
            Some(path) => {
                let json = read_file(path)?;
                Ok(Box::new(QuestionCatalog::from_json(&json)?))
            }
            None => get_questionnaire(DEFAULT_QUESTIONNAIRE).ok_or_else(|| {
                QuestionnaireError::UnknownQuestionnaire(DEFAULT_QUESTIONNAIRE.to_string()).into()
            }),
        }
    }

    fn rules(&self) -> eyre::Result<RuleTable> {
        match &self.config.rules_path {
            Some(path) => Ok(RuleTable::from_json(&read_file(path)?)?),
            None => Ok(RuleTable::builtin().clone()),
        }
    }
}

fn read_file(path: &Path) -> eyre::Result<String> {
    std::fs::read_to_string(path).map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ── Catalog ────────────────────────────────────────────────────────────────

pub fn catalog(ctx: &Context) -> eyre::Result<()> {
    let questionnaire = ctx.questionnaire()?;
    print_json(&QuestionCatalog::from_questionnaire(questionnaire.as_ref()))
}

// ── Patients ───────────────────────────────────────────────────────────────

pub async fn add_patient(ctx: &Context, details: PatientDetails) -> eyre::Result<()> {
    let session = ctx.session()?;
    let patient = ctx.store.create_patient(&session, details).await?;
    events::patient_created(session.user_id, patient.id).emit();
    print_json(&patient)
}

pub async fn update_patient(ctx: &Context, id: Uuid, details: PatientDetails) -> eyre::Result<()> {
    let session = ctx.session()?;
    let patient = ctx.store.update_patient(&session, id, details).await?;
    print_json(&patient)
}

pub async fn list_patients(ctx: &Context, search: Option<&str>) -> eyre::Result<()> {
    let session = ctx.session()?;
    print_json(&ctx.store.list_patients(&session, search).await?)
}

pub async fn show_patient(ctx: &Context, id: Uuid) -> eyre::Result<()> {
    let session = ctx.session()?;
    print_json(&ctx.store.get_patient(&session, id).await?)
}

pub async fn delete_patient(ctx: &Context, id: Uuid) -> eyre::Result<()> {
    let session = ctx.session()?;
    ctx.store.delete_patient(&session, id).await?;
    events::patient_deleted(session.user_id, id).emit();
    print_json(&serde_json::json!({ "deleted": id }))
}

// ── Analyses ───────────────────────────────────────────────────────────────

pub async fn analyze(ctx: &Context, patient_id: Uuid, answers_path: &Path) -> eyre::Result<()> {
    let session = ctx.session()?;
    // Fail on ownership before doing any scoring work.
    ctx.store.get_patient(&session, patient_id).await?;

    let answers: AnswerSet = serde_json::from_str(&read_file(answers_path)?)?;
    let questionnaire = ctx.questionnaire()?;
    let rules = ctx.rules()?;

    let now = jiff::Timestamp::now();
    let evaluation = match evaluate(questionnaire.as_ref(), &rules, &answers, now) {
        Ok(evaluation) => evaluation,
        Err(QuestionnaireError::InvalidAnswers(issues)) => {
            for issue in &issues {
                warn!(question = %issue.question_id, kind = ?issue.kind, "{}", issue.message);
            }
            return Err(QuestionnaireError::InvalidAnswers(issues).into());
        }
        Err(e) => return Err(e.into()),
    };

    let record = ctx
        .store
        .save_analysis(
            &session,
            patient_id,
            answers,
            evaluation.categories,
            evaluation.recommendations,
            evaluation.timestamp,
        )
        .await?;

    events::analysis_submitted(
        session.user_id,
        patient_id,
        record.id,
        record.categories().average(),
    )
    .emit();
    print_json(&record)
}

#[derive(Debug, Serialize)]
struct PhaseView {
    number: PhaseNumber,
    name: &'static str,
    description: &'static str,
    start_date: Option<jiff::Timestamp>,
    days_in_phase: Option<i64>,
}

impl PhaseView {
    fn new(state: &PhaseState, now: jiff::Timestamp) -> Self {
        Self {
            number: state.current_phase_number,
            name: state.current_phase_number.name(),
            description: state.current_phase_number.description(),
            start_date: state.phase_start_date,
            days_in_phase: days_in_phase(state, now),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResultsReport<'a> {
    patient: Patient,
    phase: PhaseView,
    analysis_count: usize,
    current: Option<&'a AnalysisRecord>,
    latest_valid: Option<&'a AnalysisRecord>,
    comparison: Option<Comparison>,
    overall_progress: OverallProgress,
    category_evolution: CategoryEvolution,
}

pub async fn results(ctx: &Context, patient_id: Uuid) -> eyre::Result<()> {
    let session = ctx.session()?;
    let patient = ctx.store.get_patient(&session, patient_id).await?;
    let history = ctx.store.list_analyses(&session, patient_id).await?;
    let phase = ctx.store.get_phase(&session, patient_id).await?;

    let processed = process(&history);
    let comparison = processed
        .current
        .as_ref()
        .map(|current| compare_analyses(current, processed.previous.as_ref(), &ctx.tz));

    let report = ResultsReport {
        patient,
        phase: PhaseView::new(&phase, jiff::Timestamp::now()),
        analysis_count: processed.all.len(),
        current: processed.current.as_ref(),
        latest_valid: latest_valid(&history),
        comparison,
        overall_progress: overall_progress(&history, &ctx.tz),
        category_evolution: category_evolution(&history, &ctx.tz),
    };
    print_json(&report)
}

// ── Phase ──────────────────────────────────────────────────────────────────

pub async fn show_phase(ctx: &Context, patient_id: Uuid) -> eyre::Result<()> {
    let session = ctx.session()?;
    let state = ctx.store.get_phase(&session, patient_id).await?;
    print_json(&PhaseView::new(&state, jiff::Timestamp::now()))
}

pub async fn set_phase(ctx: &Context, patient_id: Uuid, requested: i64) -> eyre::Result<()> {
    let session = ctx.session()?;
    let current = ctx.store.get_phase(&session, patient_id).await?;

    let now = jiff::Timestamp::now();
    let next = advance(&current, requested, now)?;
    let saved = ctx.store.save_phase(&session, &next).await?;

    events::phase_updated(
        session.user_id,
        patient_id,
        current.current_phase_number.get(),
        saved.current_phase_number.get(),
    )
    .emit();
    print_json(&PhaseView::new(&saved, now))
}

// ── Sharing ────────────────────────────────────────────────────────────────

pub async fn share(ctx: &Context, patient_id: Uuid, analysis_id: Uuid) -> eyre::Result<()> {
    let session = ctx.session()?;
    let link = ctx.store.create_share_link(&session, patient_id, analysis_id).await?;
    events::share_created(session.user_id, analysis_id, link.id).emit();
    print_json(&link)
}

pub async fn shared(ctx: &Context, token: Uuid) -> eyre::Result<()> {
    print_json(&ctx.store.get_shared_report(token).await?)
}
