use lumina_core::models::answers::AnswerSet;
use lumina_core::models::category::Category;
use lumina_questionnaire::error::QuestionnaireError;
use lumina_questionnaire::questionnaires::quantum::QuantumAnalysis;
use lumina_questionnaire::recommendations::RuleTable;
use lumina_questionnaire::scoring::IssueKind;
use lumina_questionnaire::submission::evaluate;
use lumina_questionnaire::Questionnaire;

fn now() -> jiff::Timestamp {
    "2025-03-10T14:00:00Z".parse().unwrap()
}

fn answers_with(value: i64) -> AnswerSet {
    QuantumAnalysis
        .sections()
        .iter()
        .flat_map(|s| s.questions.iter().map(move |q| (q.id.clone(), value)))
        .collect()
}

#[test]
fn complete_submission_is_scored_and_stamped() {
    let evaluation =
        evaluate(&QuantumAnalysis, RuleTable::builtin(), &answers_with(3), now()).unwrap();

    assert!(evaluation.categories.is_complete());
    assert_eq!(evaluation.categories.get(Category::Energetico), Some(60));
    assert_eq!(evaluation.timestamp, now());
    // 60% sits in every category's medium tier and no single answer is low
    assert_eq!(evaluation.recommendations.len(), 5);
}

#[test]
fn incomplete_submission_is_refused() {
    let mut answers = answers_with(4);
    answers.insert("espiritual_5", "");

    match evaluate(&QuantumAnalysis, RuleTable::builtin(), &answers, now()) {
        Err(QuestionnaireError::InvalidAnswers(issues)) => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].question_id, "espiritual_5");
            assert_eq!(issues[0].kind, IssueKind::Unanswered);
        }
        other => panic!("expected InvalidAnswers, got {other:?}"),
    }
}

#[test]
fn unrecognised_extra_answers_are_tolerated() {
    let mut answers = answers_with(5);
    answers.insert("notes", "sem observações");

    let evaluation = evaluate(&QuantumAnalysis, RuleTable::builtin(), &answers, now()).unwrap();
    assert_eq!(evaluation.categories.average(), Some(100));
}
