// Criterion benchmarks for TheraMatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;
use theramatch::core::{normalize, score, CategoryWeights, MatchEngine, ProjectionSettings};
use theramatch::models::{AnswerValue, TherapistProfile, TherapyType};

fn individual_answers() -> HashMap<String, AnswerValue> {
    let mut answers = HashMap::new();
    answers.insert(
        "main_difficulties".to_string(),
        AnswerValue::FreeText("Ansia e stress al lavoro".to_string()),
    );
    answers.insert(
        "emotional_state".to_string(),
        AnswerValue::EmotionScale(HashMap::from([
            ("ansioso".to_string(), 8),
            ("triste".to_string(), 3),
            ("stressato".to_string(), 7),
            ("sopraffatto".to_string(), 4),
        ])),
    );
    answers.insert(
        "previous_diagnosis".to_string(),
        AnswerValue::SingleChoice("none".to_string()),
    );
    answers.insert(
        "communication_style".to_string(),
        AnswerValue::SingleChoice("direct".to_string()),
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
    answers.insert("specialist_competencies".to_string(), AnswerValue::Scale(3));
    answers.insert(
        "therapy_goals".to_string(),
        AnswerValue::MultiChoice(vec!["manage_anxiety".to_string()]),
    );
    answers.insert("commitment_level".to_string(), AnswerValue::Scale(7));
    answers.insert(
        "life_areas".to_string(),
        AnswerValue::MultiChoice(vec!["work".to_string(), "stress".to_string()]),
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

fn candidate(id: usize) -> TherapistProfile {
    let tags: Vec<String> = match id % 4 {
        0 => vec!["Ansia".to_string(), "Stress Lavorativo".to_string()],
        1 => vec!["Depressione".to_string()],
        2 => vec!["Autostima".to_string(), "EMDR".to_string()],
        _ => vec!["Terapia di Coppia".to_string()],
    };
    let approach = match id % 3 {
        0 => "Cognitivo-Comportamentale",
        1 => "Sistemico",
        _ => "Umanistico",
    };

    TherapistProfile {
        therapist_id: format!("t{}", id),
        name: format!("Terapeuta {}", id),
        specializations: tags,
        approach: approach.to_string(),
        languages: vec!["Italiano".to_string()],
        price_cents: 6000 + (id as u32 % 8) * 1000,
        location_tag: "Milano Centro".to_string(),
        therapy_types_supported: vec![TherapyType::Individual],
        rating_average: 4.0 + (id % 10) as f64 / 10.0,
        review_count: (id % 200) as u32,
    }
}

fn bench_normalize(c: &mut Criterion) {
    let answers = individual_answers();
    c.bench_function("normalize_individual", |b| {
        b.iter(|| normalize(TherapyType::Individual, black_box(&answers)));
    });
}

fn bench_score_single(c: &mut Criterion) {
    let answers = individual_answers();
    let vector = normalize(TherapyType::Individual, &answers).unwrap();
    let therapist = candidate(0);
    let weights = CategoryWeights::default();
    let settings = ProjectionSettings::default();

    c.bench_function("score_single_therapist", |b| {
        b.iter(|| {
            score(
                black_box(&vector),
                black_box(&therapist),
                &weights,
                &settings,
            )
        });
    });
}

fn bench_find_matches(c: &mut Criterion) {
    let engine = MatchEngine::with_defaults();
    let answers = individual_answers();

    let mut group = c.benchmark_group("find_matches");
    for pool_size in [10, 100, 500] {
        let pool: Vec<TherapistProfile> = (0..pool_size).map(candidate).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(pool_size),
            &pool,
            |b, pool| {
                b.iter(|| {
                    engine.find_matches(
                        "bench-patient",
                        TherapyType::Individual,
                        black_box(&answers),
                        pool.clone(),
                        Some(3),
                    )
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_score_single, bench_find_matches);
criterion_main!(benches);
