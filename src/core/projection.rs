use crate::core::schema::{DimensionKind, DimensionSchema};
use crate::models::TherapistProfile;

/// Deterministic inputs for the profile dimensions of the projection.
#[derive(Debug, Clone)]
pub struct ProjectionSettings {
    /// Languages the platform expects coverage for; overlap ratio feeds
    /// `profile.language_overlap`.
    pub required_languages: Vec<String>,
    /// Service area tag; a therapist located inside it gets the full
    /// `profile.location_match` bucket.
    pub service_area: String,
    /// Price at or below which `profile.price_bracket` is 1.0 (cents).
    pub price_full_score_cents: u32,
    /// Price at or above which `profile.price_bracket` is 0.0 (cents).
    pub price_zero_score_cents: u32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            required_languages: vec!["Italiano".to_string()],
            service_area: "Milano".to_string(),
            price_full_score_cents: 6_000,
            price_zero_score_cents: 14_000,
        }
    }
}

/// Specialization tag -> (dimension id, weight) affinities.
///
/// A tag may light up dimensions in any questionnaire; ids that do not
/// exist in the requested schema are skipped. Overlapping tags combine
/// by maximum, never by sum.
const TAG_AFFINITY: &[(&str, &[(&str, f64)])] = &[
    (
        "Ansia",
        &[
            ("emotional_state.ansioso", 1.0),
            ("emotional_state.stressato", 0.7),
            ("previous_diagnosis.anxiety", 1.0),
            ("therapy_goals.manage_anxiety", 1.0),
            ("life_areas.stress", 0.6),
            ("previous_diagnosis_child.anxiety", 1.0),
            ("consultation_goals.anxiety", 1.0),
            ("child_temperament.anxious", 0.8),
        ],
    ),
    (
        "Depressione",
        &[
            ("emotional_state.triste", 1.0),
            ("emotional_state.sopraffatto", 0.6),
            ("previous_diagnosis.mood", 1.0),
            ("therapy_goals.overcome_depression", 1.0),
            ("previous_diagnosis_child.mood", 1.0),
        ],
    ),
    (
        "Stress Lavorativo",
        &[
            ("emotional_state.stressato", 1.0),
            ("life_areas.work", 1.0),
            ("life_areas.stress", 1.0),
            ("therapy_goals.resilience", 0.8),
            ("life_changes.job_change", 0.8),
        ],
    ),
    (
        "Terapia di Coppia",
        &[
            ("life_areas.romantic", 1.0),
            ("therapy_goals.improve_relationships", 0.9),
            ("main_problems.communication", 0.9),
            ("main_problems.frequent_conflict", 0.9),
            ("main_problems.emotional_distance", 0.8),
            ("therapy_expectations.improve_communication", 0.9),
            ("therapy_expectations.manage_conflict", 0.9),
            ("therapy_expectations.reconnect", 0.8),
            ("relationship_status.crisis", 0.7),
        ],
    ),
    (
        "Disturbi del Sonno",
        &[
            ("behavioral_changes.sleep", 1.0),
            ("emotional_state.ansioso", 0.4),
        ],
    ),
    (
        "Autostima",
        &[
            ("therapy_goals.self_esteem", 1.0),
            ("life_areas.self_esteem", 1.0),
            ("consultation_goals.self_esteem", 1.0),
        ],
    ),
    (
        "EMDR",
        &[
            ("therapy_goals.process_trauma", 1.0),
            ("therapy_experience.emdr", 1.0),
            ("life_changes.grief", 0.8),
            ("stressful_events.grief", 0.8),
        ],
    ),
    (
        "Disturbi Alimentari",
        &[("previous_diagnosis.eating", 1.0)],
    ),
    (
        "Disturbi di Personalità",
        &[("previous_diagnosis.personality", 1.0)],
    ),
    (
        "Età Evolutiva",
        &[
            ("therapy_format_child.child_only", 0.8),
            ("therapy_format_child.mixed", 0.8),
            ("previous_therapy_child.individual", 0.6),
            ("consultation_goals.emotional_support", 0.8),
            ("emotional_expression.much_difficulty", 0.7),
        ],
    ),
    (
        "DSA",
        &[
            ("previous_diagnosis_child.dsa", 1.0),
            ("consultation_goals.school_support", 1.0),
            ("school_involvement.reported", 0.6),
            ("behavioral_changes.school", 0.8),
        ],
    ),
    (
        "ADHD",
        &[
            ("previous_diagnosis_child.adhd", 1.0),
            ("behavioral_changes.behavior", 0.7),
            ("child_temperament.impulsive", 0.8),
        ],
    ),
];

/// Approach tag fragments -> one-hot dimensions set to 1.0.
///
/// Matched by case-insensitive containment so compound approaches
/// ("EMDR e Umanistico") light up every component.
const APPROACH_AFFINITY: &[(&str, &[&str])] = &[
    (
        "cognitivo-comportamentale",
        &[
            "therapy_experience.cbt",
            "therapy_approach.practical",
            "communication_style.direct",
            "previous_couple_therapy.cbt",
            "therapist_style_preference.direct",
        ],
    ),
    (
        "sistemico",
        &[
            "therapy_experience.systemic",
            "previous_couple_therapy.systemic",
            "therapy_approach.both",
            "previous_therapy_child.family",
        ],
    ),
    (
        "psicodinamic",
        &[
            "therapy_experience.psychodynamic",
            "therapy_approach.depth",
            "communication_style.empathic",
        ],
    ),
    (
        "umanistic",
        &[
            "therapy_experience.humanistic",
            "communication_style.empathic",
            "therapist_style_preference.empathic",
        ],
    ),
    ("emdr", &["therapy_experience.emdr", "therapy_goals.process_trauma"]),
];

/// Project a therapist profile onto a patient schema.
///
/// Dimensions with no therapist-side signal stay at 0 for one-hot groups and
/// at the neutral midpoint 0.5 for scalars; the trailing profile dims are
/// computed from languages, price and location.
pub fn project(
    schema: &DimensionSchema,
    therapist: &TherapistProfile,
    settings: &ProjectionSettings,
) -> Vec<f64> {
    let mut values: Vec<f64> = vec![0.0; schema.len()];

    // Scalar questionnaire dims carry no therapist-side signal.
    for (i, dim) in schema.dims.iter().enumerate() {
        if dim.kind == DimensionKind::Scalar && !dim.id.starts_with("profile.") {
            values[i] = 0.5;
        }
    }

    let approach = therapist.approach.to_lowercase();
    for (fragment, dims) in APPROACH_AFFINITY {
        if approach.contains(fragment) {
            for dim_id in *dims {
                if let Some(idx) = schema.index_of(dim_id) {
                    values[idx] = 1.0;
                }
            }
        }
    }

    for tag in &therapist.specializations {
        if let Some((_, affinities)) = TAG_AFFINITY.iter().find(|(t, _)| t == tag) {
            for (dim_id, weight) in *affinities {
                if let Some(idx) = schema.index_of(dim_id) {
                    values[idx] = values[idx].max(*weight);
                }
            }
        }
    }

    if let Some(idx) = schema.index_of("profile.language_overlap") {
        values[idx] = language_overlap(&therapist.languages, &settings.required_languages);
    }
    if let Some(idx) = schema.index_of("profile.price_bracket") {
        values[idx] = price_bracket(
            therapist.price_cents,
            settings.price_full_score_cents,
            settings.price_zero_score_cents,
        );
    }
    if let Some(idx) = schema.index_of("profile.location_match") {
        values[idx] = location_match(&therapist.location_tag, &settings.service_area);
    }

    values
}

/// Overlap ratio between offered and required languages, in [0, 1].
fn language_overlap(offered: &[String], required: &[String]) -> f64 {
    if required.is_empty() {
        return 1.0;
    }
    let covered = required
        .iter()
        .filter(|lang| offered.iter().any(|o| o.eq_ignore_ascii_case(lang)))
        .count();
    covered as f64 / required.len() as f64
}

/// Quantize a price into five affordability buckets.
fn price_bracket(price_cents: u32, full_cents: u32, zero_cents: u32) -> f64 {
    if price_cents <= full_cents {
        return 1.0;
    }
    if price_cents >= zero_cents || zero_cents <= full_cents {
        return 0.0;
    }
    let fraction =
        (zero_cents - price_cents) as f64 / (zero_cents - full_cents) as f64;
    (fraction * 4.0).round() / 4.0
}

/// Full bucket inside the service area, reduced bucket outside it.
fn location_match(location_tag: &str, service_area: &str) -> f64 {
    if location_tag
        .to_lowercase()
        .contains(&service_area.to_lowercase())
    {
        1.0
    } else {
        0.25
    }
}
