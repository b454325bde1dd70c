use lumina_core::error::CoreError;
use thiserror::Error;

use crate::scoring::AnswerIssue;

#[derive(Debug, Error)]
pub enum QuestionnaireError {
    #[error("unknown questionnaire: {0}")]
    UnknownQuestionnaire(String),

    #[error("{} invalid answer(s), first: {}", .0.len(), first_message(.0))]
    InvalidAnswers(Vec<AnswerIssue>),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("invalid recommendation rules: {0}")]
    InvalidRules(String),

    #[error("invalid category scores: {0}")]
    InvalidScores(#[from] CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn first_message(issues: &[AnswerIssue]) -> &str {
    issues.first().map(|i| i.message.as_str()).unwrap_or("")
}
