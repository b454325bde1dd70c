use std::collections::HashSet;

use lumina_core::models::category::Category;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::QuestionnaireError;
use crate::scoring::Section;
use crate::Questionnaire;

/// A questionnaire loaded from configuration rather than compiled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionCatalog {
    pub id: String,
    pub name: String,
    pub sections: Vec<Section>,
}

impl QuestionCatalog {
    /// Parse and check a catalog. Malformed catalogs fail here, before any
    /// answer is scored against them.
    pub fn from_json(json: &str) -> Result<Self, QuestionnaireError> {
        let catalog: QuestionCatalog = serde_json::from_str(json)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Snapshot any questionnaire, e.g. to print the built-in one.
    pub fn from_questionnaire<Q: Questionnaire + ?Sized>(questionnaire: &Q) -> Self {
        Self {
            id: questionnaire.id().to_string(),
            name: questionnaire.name().to_string(),
            sections: questionnaire.sections().to_vec(),
        }
    }

    pub fn check(&self) -> Result<(), QuestionnaireError> {
        let mut categories = HashSet::new();
        let mut ids = HashSet::new();

        for section in &self.sections {
            if !categories.insert(section.category) {
                return Err(QuestionnaireError::InvalidCatalog(format!(
                    "category '{}' has more than one section",
                    section.category
                )));
            }
            if section.scale.min == 0 || section.scale.min > section.scale.max {
                return Err(QuestionnaireError::InvalidCatalog(format!(
                    "section '{}' has an invalid scale [{}, {}]",
                    section.category, section.scale.min, section.scale.max
                )));
            }
            for question in &section.questions {
                if !ids.insert(question.id.as_str()) {
                    return Err(QuestionnaireError::InvalidCatalog(format!(
                        "duplicate question id '{}'",
                        question.id
                    )));
                }
                if Category::from_question_id(&question.id) != Some(section.category) {
                    return Err(QuestionnaireError::InvalidCatalog(format!(
                        "question '{}' does not carry the '{}_' prefix of its section",
                        question.id, section.category
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Questionnaire for QuestionCatalog {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn sections(&self) -> &[Section] {
        &self.sections
    }
}
