use std::collections::BTreeMap;

use lumina_core::models::answers::{AnswerSet, Coerced};
use lumina_core::models::category::{Category, CategoryScores};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::Questionnaire;

/// Inclusive integer answer scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerScale {
    pub min: u8,
    pub max: u8,
}

impl AnswerScale {
    /// Five-point Likert scale used throughout the questionnaire.
    pub const LIKERT: AnswerScale = AnswerScale { min: 1, max: 5 };

    pub fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min) && value <= i64::from(self.max)
    }
}

impl Default for AnswerScale {
    fn default() -> Self {
        Self::LIKERT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub text: String,
}

/// The questions of one category, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    pub category: Category,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub scale: AnswerScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum IssueKind {
    /// The id names a known category but is not in the catalog.
    UnknownQuestion,
    /// Text with no leading integer.
    NotANumber,
    /// Numeric, but outside the section's scale.
    OutOfScale,
    /// A catalog question with no (or a blank) answer.
    Unanswered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct AnswerIssue {
    pub question_id: String,
    pub kind: IssueKind,
    pub message: String,
}

impl AnswerIssue {
    pub fn new(question_id: &str, kind: IssueKind, message: String) -> Self {
        Self {
            question_id: question_id.to_string(),
            kind,
            message,
        }
    }
}

/// Score an answer set into normalized percentages.
///
/// Always returns all five categories in canonical order. Answers whose id is
/// not in the catalog, blank answers, non-numeric text and values outside the
/// scale contribute nothing; [`Questionnaire::validate_answers`] reports them.
pub fn score<Q: Questionnaire + ?Sized>(questionnaire: &Q, answers: &AnswerSet) -> CategoryScores {
    let mut raw: BTreeMap<Category, u32> = BTreeMap::new();

    for (question_id, value) in answers.iter() {
        let Some((section, _)) = questionnaire.find_question(question_id) else {
            continue;
        };
        if let Coerced::Value(v) = value.coerce()
            && section.scale.contains(v)
        {
            *raw.entry(section.category).or_default() += v as u32;
        }
    }

    Category::ALL
        .into_iter()
        .map(|category| {
            let sum = raw.get(&category).copied().unwrap_or(0);
            (category, normalize(sum, questionnaire.max_score(category)))
        })
        .collect()
}

/// `round(raw / max * 100)` with exact half-up rounding; 0 when `max` is 0.
pub fn normalize(raw: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let raw = u64::from(raw.min(max));
    let max = u64::from(max);
    ((raw * 200 + max) / (2 * max)) as u8
}
