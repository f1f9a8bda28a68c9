// Unit tests for TheraMatch

use std::collections::HashMap;

use theramatch::core::{
    normalize, project, score, select_matches, CategoryWeights, DimensionSchema, NormalizeError,
    ProjectionSettings, ScoredCandidate,
};
use theramatch::models::{AnswerValue, TherapistProfile, TherapyType};

fn individual_answers() -> HashMap<String, AnswerValue> {
    let mut answers = HashMap::new();
    answers.insert(
        "main_difficulties".to_string(),
        AnswerValue::FreeText("Soffro di ansia e attacchi di panico".to_string()),
    );
    answers.insert(
        "emotional_state".to_string(),
        AnswerValue::EmotionScale(HashMap::from([
            ("ansioso".to_string(), 9),
            ("triste".to_string(), 4),
            ("stressato".to_string(), 7),
            ("sopraffatto".to_string(), 5),
        ])),
    );
    answers.insert(
        "previous_diagnosis".to_string(),
        AnswerValue::SingleChoice("anxiety".to_string()),
    );
    answers.insert(
        "communication_style".to_string(),
        AnswerValue::SingleChoice("empathic".to_string()),
    );
    answers.insert(
        "thinking_style".to_string(),
        AnswerValue::SingleChoice("talk".to_string()),
    );
    answers.insert(
        "therapy_experience".to_string(),
        AnswerValue::SingleChoice("first_time".to_string()),
    );
    answers.insert(
        "therapy_approach".to_string(),
        AnswerValue::SingleChoice("practical".to_string()),
    );
    answers.insert(
        "specialist_competencies".to_string(),
        AnswerValue::Scale(4),
    );
    answers.insert(
        "therapy_goals".to_string(),
        AnswerValue::MultiChoice(vec![
            "manage_anxiety".to_string(),
            "self_esteem".to_string(),
        ]),
    );
    answers.insert("commitment_level".to_string(), AnswerValue::Scale(8));
    answers.insert(
        "life_areas".to_string(),
        AnswerValue::MultiChoice(vec!["emotional".to_string(), "work".to_string()]),
    );
    answers.insert(
        "time_availability".to_string(),
        AnswerValue::SingleChoice("one_two".to_string()),
    );
    answers.insert(
        "life_changes".to_string(),
        AnswerValue::SingleChoice("stable".to_string()),
    );
    answers.insert(
        "session_format".to_string(),
        AnswerValue::MultiChoice(vec!["online".to_string()]),
    );
    answers
}

fn therapist(id: &str, specializations: Vec<&str>, approach: &str) -> TherapistProfile {
    TherapistProfile {
        therapist_id: id.to_string(),
        name: format!("Dott. {}", id),
        specializations: specializations.into_iter().map(String::from).collect(),
        approach: approach.to_string(),
        languages: vec!["Italiano".to_string()],
        price_cents: 7000,
        location_tag: "Milano Centro".to_string(),
        therapy_types_supported: vec![
            TherapyType::Individual,
            TherapyType::Couple,
            TherapyType::Child,
        ],
        rating_average: 4.5,
        review_count: 20,
    }
}

#[test]
fn test_normalize_produces_schema_length_vector() {
    let vector = normalize(TherapyType::Individual, &individual_answers()).unwrap();
    let schema = DimensionSchema::for_type(TherapyType::Individual);
    assert_eq!(vector.values.len(), schema.len());
    assert_eq!(vector.therapy_type, TherapyType::Individual);
}

#[test]
fn test_normalize_values_in_unit_range() {
    let vector = normalize(TherapyType::Individual, &individual_answers()).unwrap();
    assert!(vector.values.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_normalize_reports_all_missing_keys() {
    let mut answers = individual_answers();
    answers.remove("commitment_level");
    answers.remove("session_format");

    let err = normalize(TherapyType::Individual, &answers).unwrap_err();
    match err {
        NormalizeError::IncompleteAnswers(keys) => {
            assert!(keys.contains(&"commitment_level".to_string()));
            assert!(keys.contains(&"session_format".to_string()));
            assert_eq!(keys.len(), 2);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_normalize_rejects_unknown_option() {
    let mut answers = individual_answers();
    answers.insert(
        "communication_style".to_string(),
        AnswerValue::SingleChoice("telepathic".to_string()),
    );

    let err = normalize(TherapyType::Individual, &answers).unwrap_err();
    assert!(matches!(err, NormalizeError::InvalidAnswer(_)));
}

#[test]
fn test_normalize_is_deterministic() {
    let answers = individual_answers();
    let a = normalize(TherapyType::Individual, &answers).unwrap();
    let b = normalize(TherapyType::Individual, &answers).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_score_is_symmetric_in_repeated_calls() {
    let vector = normalize(TherapyType::Individual, &individual_answers()).unwrap();
    let t = therapist("t1", vec!["Ansia"], "Cognitivo-Comportamentale");
    let weights = CategoryWeights::default();
    let settings = ProjectionSettings::default();

    let a = score(&vector, &t, &weights, &settings);
    let b = score(&vector, &t, &weights, &settings);
    assert_eq!(a, b);
}

#[test]
fn test_score_within_bounds_across_pool() {
    let vector = normalize(TherapyType::Individual, &individual_answers()).unwrap();
    let weights = CategoryWeights::default();
    let settings = ProjectionSettings::default();

    let pool = vec![
        therapist("t1", vec!["Ansia"], "Cognitivo-Comportamentale"),
        therapist("t2", vec!["Terapia di Coppia"], "Sistemico"),
        therapist("t3", vec![], "Umanistico"),
    ];

    for t in &pool {
        let s = score(&vector, t, &weights, &settings);
        assert!(s <= 100);
    }
}

#[test]
fn test_anxiety_answers_prefer_anxiety_specialist() {
    let vector = normalize(TherapyType::Individual, &individual_answers()).unwrap();
    let weights = CategoryWeights::default();
    let settings = ProjectionSettings::default();

    let anxiety = therapist("anx", vec!["Ansia", "Stress Lavorativo"], "Cognitivo-Comportamentale");
    let couple = therapist("cpl", vec!["Terapia di Coppia"], "Sistemico");

    let s_anxiety = score(&vector, &anxiety, &weights, &settings);
    let s_couple = score(&vector, &couple, &weights, &settings);
    assert!(
        s_anxiety > s_couple,
        "anxiety specialist {} should beat couple specialist {}",
        s_anxiety,
        s_couple
    );
}

#[test]
fn test_projection_matches_schema_length() {
    let t = therapist("t1", vec!["Ansia"], "Cognitivo-Comportamentale");
    let schema = DimensionSchema::for_type(TherapyType::Individual);
    let projected = project(schema, &t, &ProjectionSettings::default());
    assert_eq!(projected.len(), schema.len());
    assert!(projected.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_selector_orders_by_score_then_rating() {
    let mut a = therapist("a", vec!["Ansia"], "Cognitivo-Comportamentale");
    a.rating_average = 4.9;
    let mut b = therapist("b", vec!["Depressione"], "Sistemico");
    b.rating_average = 4.1;

    let scored = vec![
        ScoredCandidate {
            therapist: b,
            score: 70,
        },
        ScoredCandidate {
            therapist: a,
            score: 90,
        },
    ];

    let entries = select_matches(scored, 2).unwrap();
    assert_eq!(entries[0].therapist_id, "a");
    assert_eq!(entries[0].rank, 1);
    assert_eq!(entries[1].therapist_id, "b");
    assert_eq!(entries[1].rank, 2);
    assert!(entries[0].score >= entries[1].score);
}

#[test]
fn test_selector_prefers_distinct_specializations() {
    let twin_a = therapist("a", vec!["Ansia"], "Cognitivo-Comportamentale");
    let twin_b = therapist("b", vec!["Ansia"], "Cognitivo-Comportamentale");
    let distinct = therapist("c", vec!["Depressione"], "Sistemico");

    let scored = vec![
        ScoredCandidate {
            therapist: twin_a,
            score: 90,
        },
        ScoredCandidate {
            therapist: twin_b,
            score: 88,
        },
        ScoredCandidate {
            therapist: distinct,
            score: 60,
        },
    ];

    let entries = select_matches(scored, 2).unwrap();
    assert_eq!(entries[0].therapist_id, "a");
    // The lower-scored but differently-specialized therapist displaces the twin.
    assert_eq!(entries[1].therapist_id, "c");
}

#[test]
fn test_selector_relaxes_diversity_when_pool_is_uniform() {
    let twin_a = therapist("a", vec!["Ansia"], "Cognitivo-Comportamentale");
    let twin_b = therapist("b", vec!["Ansia"], "Cognitivo-Comportamentale");

    let scored = vec![
        ScoredCandidate {
            therapist: twin_a,
            score: 90,
        },
        ScoredCandidate {
            therapist: twin_b,
            score: 88,
        },
    ];

    let entries = select_matches(scored, 2).unwrap();
    assert_eq!(entries.len(), 2);
}

#[test]
fn test_schema_dimension_lookup() {
    let schema = DimensionSchema::for_type(TherapyType::Individual);
    assert!(schema.index_of("emotional_state.ansioso").is_some());
    assert!(schema.index_of("profile.language_overlap").is_some());
    assert!(schema.index_of("nonexistent.dimension").is_none());
}
