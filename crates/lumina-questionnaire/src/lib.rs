//! lumina-questionnaire
//!
//! Questionnaire definitions and the scoring engine. Pure data and pure
//! functions, no I/O. Turns a set of answers into normalized category
//! scores and a ranked list of recommendations.

pub mod catalog;
pub mod error;
pub mod questionnaires;
pub mod recommendations;
pub mod scoring;
pub mod submission;

use lumina_core::models::answers::{AnswerSet, Coerced};
use lumina_core::models::category::Category;
use scoring::{AnswerIssue, IssueKind, Question, Section};

/// Trait implemented by each questionnaire, built-in or loaded from JSON.
pub trait Questionnaire: Send + Sync {
    /// Unique identifier (e.g., "quantum_analysis").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// One section per category, in the order questions are presented.
    fn sections(&self) -> &[Section];

    fn section(&self, category: Category) -> Option<&Section> {
        self.sections().iter().find(|s| s.category == category)
    }

    /// Catalog lookup of a question id. This is the only way answers are
    /// assigned to a category.
    fn find_question(&self, question_id: &str) -> Option<(&Section, &Question)> {
        self.sections().iter().find_map(|section| {
            section
                .questions
                .iter()
                .find(|q| q.id == question_id)
                .map(|q| (section, q))
        })
    }

    /// Highest attainable raw score for a category; 0 when it has no questions.
    fn max_score(&self, category: Category) -> u32 {
        self.section(category)
            .map(|s| s.questions.len() as u32 * s.scale.max as u32)
            .unwrap_or(0)
    }

    fn question_count(&self) -> usize {
        self.sections().iter().map(|s| s.questions.len()).sum()
    }

    /// Check a submission against this questionnaire.
    ///
    /// Ids whose prefix is not a known category are ignored.
    fn validate_answers(&self, answers: &AnswerSet) -> Vec<AnswerIssue> {
        let mut issues = Vec::new();

        for (question_id, value) in answers.iter() {
            let Some((section, _)) = self.find_question(question_id) else {
                if Category::from_question_id(question_id).is_some() {
                    issues.push(AnswerIssue::new(
                        question_id,
                        IssueKind::UnknownQuestion,
                        format!("{}: question '{question_id}' is not in the catalog", self.name()),
                    ));
                }
                continue;
            };

            match value.coerce() {
                Coerced::NotANumber => issues.push(AnswerIssue::new(
                    question_id,
                    IssueKind::NotANumber,
                    format!("{}: answer to '{question_id}' is not a number", self.name()),
                )),
                Coerced::Value(v) if !section.scale.contains(v) => issues.push(AnswerIssue::new(
                    question_id,
                    IssueKind::OutOfScale,
                    format!(
                        "{}: answer {v} to '{question_id}' is outside [{}, {}]",
                        self.name(),
                        section.scale.min,
                        section.scale.max,
                    ),
                )),
                _ => {}
            }
        }

        for section in self.sections() {
            for question in &section.questions {
                let answered = answers
                    .get(&question.id)
                    .is_some_and(|v| !matches!(v.coerce(), Coerced::Blank));
                if !answered {
                    issues.push(AnswerIssue::new(
                        &question.id,
                        IssueKind::Unanswered,
                        format!("{}: question '{}' has no answer", self.name(), question.id),
                    ));
                }
            }
        }

        issues
    }
}

/// Return all built-in questionnaires.
pub fn all_questionnaires() -> Vec<Box<dyn Questionnaire>> {
    vec![Box::new(questionnaires::quantum::QuantumAnalysis)]
}

/// Look up a built-in questionnaire by ID.
pub fn get_questionnaire(id: &str) -> Option<Box<dyn Questionnaire>> {
    all_questionnaires().into_iter().find(|q| q.id() == id)
}
