use lumina_core::models::answers::AnswerSet;
use lumina_core::models::category::Category;
use lumina_questionnaire::catalog::QuestionCatalog;
use lumina_questionnaire::error::QuestionnaireError;
use lumina_questionnaire::questionnaires::quantum::QuantumAnalysis;
use lumina_questionnaire::scoring::score;
use lumina_questionnaire::{get_questionnaire, Questionnaire};

#[test]
fn builtin_questionnaire_is_registered() {
    let q = get_questionnaire("quantum_analysis").unwrap();
    assert_eq!(q.name(), "Análise Quântica");
    assert_eq!(q.question_count(), 25);
    assert!(get_questionnaire("unknown").is_none());
}

#[test]
fn builtin_questionnaire_passes_catalog_checks() {
    let catalog = QuestionCatalog::from_questionnaire(&QuantumAnalysis);
    catalog.check().unwrap();
    assert_eq!(catalog.sections.len(), 5);
    assert_eq!(QuantumAnalysis.max_score(Category::Mental), 25);
}

#[test]
fn loaded_catalog_scores_against_its_own_questions() {
    let json = r#"{
        "id": "short",
        "name": "Short form",
        "sections": [
            { "category": "fisico", "questions": [
                { "id": "fisico_a", "text": "Sono" },
                { "id": "fisico_b", "text": "Dores" }
            ] }
        ]
    }"#;
    let catalog = QuestionCatalog::from_json(json).unwrap();

    let answers: AnswerSet = [("fisico_a", 5), ("fisico_b", 4)].into_iter().collect();
    let scores = score(&catalog, &answers);

    assert_eq!(scores.get(Category::Fisico), Some(90));
    // categories without questions still appear, at zero
    assert_eq!(scores.get(Category::Espiritual), Some(0));
    assert_eq!(catalog.max_score(Category::Espiritual), 0);
}

#[test]
fn catalog_rejects_mismatched_prefix() {
    let json = r#"{
        "id": "bad", "name": "Bad",
        "sections": [
            { "category": "mental", "questions": [ { "id": "fisico_1", "text": "?" } ] }
        ]
    }"#;
    let err = QuestionCatalog::from_json(json).unwrap_err();
    assert!(matches!(err, QuestionnaireError::InvalidCatalog(_)));
}

#[test]
fn catalog_rejects_duplicates() {
    let json = r#"{
        "id": "dup", "name": "Dup",
        "sections": [
            { "category": "mental", "questions": [
                { "id": "mental_1", "text": "a" },
                { "id": "mental_1", "text": "b" }
            ] }
        ]
    }"#;
    assert!(QuestionCatalog::from_json(json).is_err());

    let json = r#"{
        "id": "dup", "name": "Dup",
        "sections": [
            { "category": "mental", "questions": [] },
            { "category": "mental", "questions": [] }
        ]
    }"#;
    assert!(QuestionCatalog::from_json(json).is_err());
}

#[test]
fn catalog_rejects_unknown_category() {
    let json = r#"{
        "id": "x",
        "name": "X",
        "sections": [{ "category": "astral", "questions": [] }]
    }"#;
    assert!(matches!(
        QuestionCatalog::from_json(json),
        Err(QuestionnaireError::Serialization(_))
    ));
}
