use std::cmp::Reverse;
use std::collections::HashSet;

use lumina_core::models::answers::{AnswerSet, Coerced};
use lumina_core::models::category::{Category, CategoryScores};
use lumina_core::models::recommendation::{Priority, Recommendation};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::QuestionnaireError;

/// Derives an ordered list of recommendations from scores and answers.
///
/// Implementations must be deterministic and side-effect free, and must not
/// fail on an all-zero or partial score set.
pub trait RecommendationGenerator: Send + Sync {
    fn generate(&self, scores: &CategoryScores, answers: &AnswerSet) -> Vec<Recommendation>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Advice {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

/// Fires when `from <= score < below` for its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryRule {
    pub category: Category,
    #[serde(default)]
    pub from: u8,
    pub below: u8,
    pub advice: Advice,
}

/// Fires when a single answer is at or below `at_most`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerRule {
    pub question_id: String,
    pub at_most: i64,
    pub advice: Advice,
}

/// Data-driven recommendation rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RuleTable {
    #[serde(default)]
    pub category_rules: Vec<CategoryRule>,
    #[serde(default)]
    pub answer_rules: Vec<AnswerRule>,
    /// Returned alone when there is nothing to score.
    #[serde(default)]
    pub generic: Vec<Advice>,
}

struct Candidate {
    priority: Priority,
    score: u8,
    order: usize,
    index: usize,
    recommendation: Recommendation,
}

impl RuleTable {
    pub fn from_json(json: &str) -> Result<Self, QuestionnaireError> {
        let table: RuleTable = serde_json::from_str(json)?;
        if let Some(rule) = table.category_rules.iter().find(|r| r.from >= r.below) {
            return Err(QuestionnaireError::InvalidRules(format!(
                "rule '{}' has an empty range [{}, {})",
                rule.advice.title, rule.from, rule.below
            )));
        }
        Ok(table)
    }

    /// The practice's default rules.
    pub fn builtin() -> &'static RuleTable {
        static TABLE: std::sync::LazyLock<RuleTable> = std::sync::LazyLock::new(|| RuleTable {
            category_rules: vec![
                tier(
                    Category::Energetico,
                    0,
                    40,
                    Priority::High,
                    "Reequilíbrio energético prioritário",
                    "Sessões semanais de harmonização energética e pausas de descanso ao longo do dia.",
                ),
                tier(
                    Category::Energetico,
                    40,
                    70,
                    Priority::Medium,
                    "Fortalecer a vitalidade",
                    "Práticas diárias de respiração consciente e contato com a natureza.",
                ),
                tier(
                    Category::Emocional,
                    0,
                    40,
                    Priority::High,
                    "Acolhimento emocional",
                    "Acompanhamento terapêutico focado na expressão das emoções e escrita de um diário emocional.",
                ),
                tier(
                    Category::Emocional,
                    40,
                    70,
                    Priority::Medium,
                    "Cultivar o equilíbrio emocional",
                    "Exercícios de autopercepção e momentos de lazer com pessoas queridas.",
                ),
                tier(
                    Category::Mental,
                    0,
                    40,
                    Priority::High,
                    "Desaceleração mental",
                    "Redução de estímulos antes de dormir e meditação guiada para acalmar os pensamentos.",
                ),
                tier(
                    Category::Mental,
                    40,
                    70,
                    Priority::Medium,
                    "Clareza mental",
                    "Organizar a rotina em blocos de foco e praticar atenção plena alguns minutos ao dia.",
                ),
                tier(
                    Category::Fisico,
                    0,
                    40,
                    Priority::High,
                    "Cuidado físico prioritário",
                    "Avaliar sono, alimentação e dores com profissionais de saúde e iniciar movimentos leves diários.",
                ),
                tier(
                    Category::Fisico,
                    40,
                    70,
                    Priority::Medium,
                    "Fortalecer o corpo",
                    "Manter atividade física regular com atenção à hidratação e à alimentação.",
                ),
                tier(
                    Category::Espiritual,
                    0,
                    40,
                    Priority::High,
                    "Reconexão espiritual",
                    "Reservar momentos diários de silêncio, oração ou meditação e refletir sobre o propósito pessoal.",
                ),
                tier(
                    Category::Espiritual,
                    40,
                    70,
                    Priority::Medium,
                    "Aprofundar a espiritualidade",
                    "Práticas de gratidão e leituras que inspirem sentido e conexão.",
                ),
            ],
            answer_rules: vec![
                AnswerRule {
                    question_id: "fisico_1".to_string(),
                    at_most: 2,
                    advice: advice(
                        Priority::High,
                        "Higiene do sono",
                        "Horários regulares para dormir e acordar e um ambiente escuro e silencioso.",
                    ),
                },
                AnswerRule {
                    question_id: "mental_2".to_string(),
                    at_most: 2,
                    advice: advice(
                        Priority::Medium,
                        "Ritual noturno de relaxamento",
                        "Desligar telas uma hora antes de dormir e praticar respiração lenta.",
                    ),
                },
            ],
            generic: vec![
                advice(
                    Priority::Medium,
                    "Completar a análise",
                    "Responda todas as perguntas do questionário para receber recomendações personalizadas.",
                ),
                advice(
                    Priority::Low,
                    "Manter o acompanhamento",
                    "Continue as sessões conforme o plano terapêutico combinado.",
                ),
            ],
        });
        &TABLE
    }

    fn generic_recommendations(&self) -> Vec<Recommendation> {
        self.generic.iter().map(|a| a.to_recommendation(None)).collect()
    }
}

impl RecommendationGenerator for RuleTable {
    /// Ranked by priority (high first), then the triggering category's score
    /// (lowest first), then canonical category order, then table order.
    /// Duplicate titles keep their first occurrence.
    fn generate(&self, scores: &CategoryScores, answers: &AnswerSet) -> Vec<Recommendation> {
        if scores.all_zero() {
            return self.generic_recommendations();
        }

        let mut candidates = Vec::new();

        for (index, rule) in self.category_rules.iter().enumerate() {
            if let Some(score) = scores.get(rule.category)
                && score >= rule.from
                && score < rule.below
            {
                candidates.push(Candidate {
                    priority: rule.advice.priority,
                    score,
                    order: category_order(Some(rule.category)),
                    index,
                    recommendation: rule.advice.to_recommendation(Some(rule.category)),
                });
            }
        }

        let offset = self.category_rules.len();
        for (index, rule) in self.answer_rules.iter().enumerate() {
            let Some(value) = answers.get(&rule.question_id) else {
                continue;
            };
            if let Coerced::Value(v) = value.coerce()
                && v <= rule.at_most
            {
                let category = Category::from_question_id(&rule.question_id);
                candidates.push(Candidate {
                    priority: rule.advice.priority,
                    score: category.and_then(|c| scores.get(c)).unwrap_or(u8::MAX),
                    order: category_order(category),
                    index: offset + index,
                    recommendation: rule.advice.to_recommendation(category),
                });
            }
        }

        candidates.sort_by_key(|c| (Reverse(c.priority), c.score, c.order, c.index));

        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .map(|c| c.recommendation)
            .filter(|r| seen.insert(r.title.clone()))
            .collect()
    }
}

impl Advice {
    fn to_recommendation(&self, category: Option<Category>) -> Recommendation {
        Recommendation {
            category,
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
        }
    }
}

fn category_order(category: Option<Category>) -> usize {
    category
        .and_then(|c| Category::ALL.iter().position(|x| *x == c))
        .unwrap_or(Category::ALL.len())
}

fn advice(priority: Priority, title: &str, description: &str) -> Advice {
    Advice {
        title: title.to_string(),
        description: description.to_string(),
        priority,
    }
}

fn tier(
    category: Category,
    from: u8,
    below: u8,
    priority: Priority,
    title: &str,
    description: &str,
) -> CategoryRule {
    CategoryRule {
        category,
        from,
        below,
        advice: advice(priority, title, description),
    }
}
