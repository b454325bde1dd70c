use jiff::tz::TimeZone;
use lumina_core::models::analysis::{AnalysisRecord, AnalysisResults};
use lumina_core::models::answers::AnswerSet;
use lumina_core::models::category::{Category, CategoryScores};
use lumina_progress::comparative::{compare_analyses, compare_scores, Comparison, ScoreComparison};
use uuid::Uuid;

fn analysis(id: u128, at: &str, scores: CategoryScores) -> AnalysisRecord {
    AnalysisRecord {
        id: Uuid::from_u128(id),
        patient_id: Uuid::from_u128(900),
        therapist_user_id: Uuid::from_u128(800),
        answers: AnswerSet::new(),
        results: AnalysisResults { categories: scores },
        recommendations: Vec::new(),
        created_at: at.parse().unwrap(),
    }
}

fn only(category: Category, value: u8) -> CategoryScores {
    [(category, value)].into_iter().collect()
}

#[test]
fn missing_previous_is_not_a_zero_series() {
    let current = only(Category::Energetico, 80);

    let without = compare_scores(&current, None);
    let with_zero = compare_scores(&current, Some(&only(Category::Energetico, 0)));

    assert!(matches!(without, ScoreComparison::NoPriorData { .. }));
    match with_zero {
        ScoreComparison::Compared { rows } => {
            assert_eq!(rows[0].category, Category::Energetico);
            assert_eq!(rows[0].previous, 0);
            assert_eq!(rows[0].delta, 80);
        }
        other => panic!("expected Compared, got {other:?}"),
    }
}

#[test]
fn rows_follow_canonical_order_with_deltas() {
    let current = CategoryScores::from_canonical([80, 60, 40, 70, 90]);
    let previous = CategoryScores::from_canonical([60, 65, 40, 50, 100]);

    let ScoreComparison::Compared { rows } = compare_scores(&current, Some(&previous)) else {
        panic!("expected rows");
    };

    let categories: Vec<_> = rows.iter().map(|r| r.category).collect();
    assert_eq!(categories, Category::ALL.to_vec());
    let deltas: Vec<_> = rows.iter().map(|r| r.delta).collect();
    assert_eq!(deltas, vec![20, -5, 0, 20, -10]);
    assert_eq!(rows[3].label, "Físico");
}

#[test]
fn categories_missing_from_previous_read_as_zero() {
    let current = CategoryScores::from_canonical([50; 5]);
    let previous = only(Category::Mental, 30);

    let ScoreComparison::Compared { rows } = compare_scores(&current, Some(&previous)) else {
        panic!("expected rows");
    };
    let previous_values: Vec<_> = rows.iter().map(|r| r.previous).collect();
    assert_eq!(previous_values, vec![0, 0, 30, 0, 0]);
}

#[test]
fn first_analysis_reports_no_prior_data() {
    let current = analysis(1, "2025-05-20T12:00:00Z", CategoryScores::from_canonical([50; 5]));

    match compare_analyses(&current, None, &TimeZone::UTC) {
        Comparison::NoPriorData { current_label, current } => {
            assert_eq!(current_label, "Análise Atual (20/05/2025)");
            assert_eq!(current.len(), 5);
        }
        other => panic!("expected NoPriorData, got {other:?}"),
    }
}

#[test]
fn unscored_previous_is_reported_as_incomplete() {
    let current = analysis(2, "2025-05-20T12:00:00Z", CategoryScores::from_canonical([50; 5]));
    let previous = analysis(1, "2025-04-20T12:00:00Z", CategoryScores::empty());

    assert!(matches!(
        compare_analyses(&current, Some(&previous), &TimeZone::UTC),
        Comparison::PreviousIncomplete { .. }
    ));
}

#[test]
fn unscored_current_is_unavailable() {
    let current = analysis(2, "2025-05-20T12:00:00Z", CategoryScores::empty());
    let previous = analysis(1, "2025-04-20T12:00:00Z", CategoryScores::from_canonical([50; 5]));

    assert_eq!(
        compare_analyses(&current, Some(&previous), &TimeZone::UTC),
        Comparison::CurrentUnavailable
    );
}

#[test]
fn available_view_exposes_parallel_series() {
    let now = CategoryScores::from_canonical([80, 70, 60, 50, 40]);
    let before = CategoryScores::from_canonical([40, 50, 60, 70, 80]);
    let current = analysis(2, "2025-05-20T12:00:00Z", now);
    let previous = analysis(1, "2025-04-20T12:00:00Z", before);

    let comparison = compare_analyses(&current, Some(&previous), &TimeZone::UTC);
    let Comparison::Available(view) = comparison else {
        panic!("expected a comparison");
    };

    assert_eq!(view.previous_label, "Análise Anterior (20/04/2025)");
    assert_eq!(view.labels(), vec!["Energético", "Emocional", "Mental", "Físico", "Espiritual"]);
    assert_eq!(view.current_series(), vec![80, 70, 60, 50, 40]);
    assert_eq!(view.previous_series(), vec![40, 50, 60, 70, 80]);
}

#[test]
fn labels_use_the_configured_zone() {
    let tz = TimeZone::fixed(jiff::tz::offset(-3));
    // 01:00 UTC is still the previous evening at UTC-3
    let current = analysis(1, "2025-05-20T01:00:00Z", CategoryScores::from_canonical([50; 5]));

    let Comparison::NoPriorData { current_label, .. } = compare_analyses(&current, None, &tz) else {
        panic!("expected NoPriorData");
    };
    assert_eq!(current_label, "Análise Atual (19/05/2025)");
}

#[test]
fn partial_current_without_previous_lists_only_recorded_categories() {
    let current = only(Category::Mental, 30);

    let ScoreComparison::NoPriorData { current } = compare_scores(&current, None) else {
        panic!("expected NoPriorData");
    };
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].category, Category::Mental);
    assert_eq!(current[0].value, 30);
}

#[test]
fn partial_current_is_not_padded_with_zero_rows() {
    let mut partial = CategoryScores::empty();
    partial.insert(Category::Fisico, 70);
    partial.insert(Category::Mental, 30);
    let current = analysis(2, "2025-05-20T12:00:00Z", partial);
    let previous = analysis(1, "2025-04-20T12:00:00Z", CategoryScores::from_canonical([50; 5]));

    let comparison = compare_analyses(&current, Some(&previous), &TimeZone::UTC);
    let Comparison::Available(view) = comparison else {
        panic!("expected a comparison");
    };

    assert_eq!(view.labels(), vec!["Mental", "Físico"]);
    assert_eq!(view.current_series(), vec![30, 70]);
    assert_eq!(view.previous_series(), vec![50, 50]);
    let deltas: Vec<_> = view.rows.iter().map(|r| r.delta).collect();
    assert_eq!(deltas, vec![-20, 20]);
}
