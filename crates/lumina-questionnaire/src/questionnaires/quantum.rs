use lumina_core::models::category::Category;

use crate::scoring::{AnswerScale, Question, Section};
use crate::Questionnaire;

/// Análise Quântica: the practice's intake and follow-up questionnaire.
/// Five questions per category, each answered on a 1–5 scale.
pub struct QuantumAnalysis;

impl Questionnaire for QuantumAnalysis {
    fn id(&self) -> &str {
        "quantum_analysis"
    }

    fn name(&self) -> &str {
        "Análise Quântica"
    }

    fn sections(&self) -> &[Section] {
        static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
            vec![
                section(
                    Category::Energetico,
                    &[
                        "Com que frequência você se sente com energia ao acordar?",
                        "Você consegue manter sua disposição ao longo do dia?",
                        "Quanto você se sente revitalizado após momentos de descanso?",
                        "Você percebe equilíbrio entre suas atividades e suas pausas?",
                        "Quanto você se sente protegido de ambientes que drenam sua energia?",
                    ],
                ),
                section(
                    Category::Emocional,
                    &[
                        "Com que facilidade você reconhece e nomeia suas emoções?",
                        "Você consegue expressar o que sente sem receio?",
                        "Quanto você se sente em paz com as pessoas próximas?",
                        "Com que rapidez você se recupera de situações de tristeza ou raiva?",
                        "Quanto você sente alegria nas atividades do dia a dia?",
                    ],
                ),
                section(
                    Category::Mental,
                    &[
                        "Com que facilidade você mantém o foco nas suas tarefas?",
                        "Quanto sua mente permanece tranquila antes de dormir?",
                        "Você consegue tomar decisões com clareza?",
                        "Quanto você se sente livre de preocupações excessivas?",
                        "Com que frequência você se sente criativo e inspirado?",
                    ],
                ),
                section(
                    Category::Fisico,
                    &[
                        "Como você avalia a qualidade do seu sono?",
                        "Quanto você se sente livre de dores ou tensões no corpo?",
                        "Com que regularidade você pratica atividade física?",
                        "Como você avalia a qualidade da sua alimentação?",
                        "Quanto você se sente confortável no próprio corpo?",
                    ],
                ),
                section(
                    Category::Espiritual,
                    &[
                        "Quanto você sente que sua vida tem propósito?",
                        "Com que frequência você reserva momentos para meditação ou oração?",
                        "Quanto você se sente conectado a algo maior que você?",
                        "Quanto você sente gratidão no seu cotidiano?",
                        "Com que frequência você age de acordo com seus valores?",
                    ],
                ),
            ]
        });
        &SECTIONS
    }
}

/// Question ids are `<category>_<n>`, numbered from 1.
fn section(category: Category, texts: &[&str]) -> Section {
    Section {
        category,
        questions: texts
            .iter()
            .enumerate()
            .map(|(i, text)| Question {
                id: format!("{}_{}", category.key(), i + 1),
                text: text.to_string(),
            })
            .collect(),
        scale: AnswerScale::LIKERT,
    }
}
