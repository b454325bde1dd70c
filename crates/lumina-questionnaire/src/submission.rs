use lumina_core::models::answers::AnswerSet;
use lumina_core::models::category::CategoryScores;
use lumina_core::models::recommendation::Recommendation;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::QuestionnaireError;
use crate::recommendations::RecommendationGenerator;
use crate::scoring::score;
use crate::Questionnaire;

/// What a submission produces, ready for the caller to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Evaluation {
    pub categories: CategoryScores,
    pub recommendations: Vec<Recommendation>,
    pub timestamp: jiff::Timestamp,
}

/// Validate, score and recommend.
///
/// Incomplete or malformed answers are rejected with every issue found, and
/// a score set that is not complete is never returned.
pub fn evaluate<Q, G>(
    questionnaire: &Q,
    generator: &G,
    answers: &AnswerSet,
    now: jiff::Timestamp,
) -> Result<Evaluation, QuestionnaireError>
where
    Q: Questionnaire + ?Sized,
    G: RecommendationGenerator + ?Sized,
{
    let issues = questionnaire.validate_answers(answers);
    if !issues.is_empty() {
        return Err(QuestionnaireError::InvalidAnswers(issues));
    }

    let categories = score(questionnaire, answers);
    categories.validate()?;

    let recommendations = generator.generate(&categories, answers);

    Ok(Evaluation {
        categories,
        recommendations,
        timestamp: now,
    })
}
