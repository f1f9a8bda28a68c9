use crate::core::catalog::DimensionCategory;
use crate::core::projection::{project, ProjectionSettings};
use crate::core::schema::DimensionSchema;
use crate::models::{FeatureVector, TherapistProfile, TherapyType};

/// Base per-category importance of a dimension.
#[derive(Debug, Clone, Copy)]
pub struct CategoryWeights {
    pub emotional: f64,
    pub relational: f64,
    pub conflict: f64,
    pub development: f64,
    pub preferences: f64,
    pub goals: f64,
    pub context: f64,
    pub profile: f64,
}

impl CategoryWeights {
    pub fn weight(&self, category: DimensionCategory) -> f64 {
        match category {
            DimensionCategory::EmotionalState => self.emotional,
            DimensionCategory::Relational => self.relational,
            DimensionCategory::Conflict => self.conflict,
            DimensionCategory::Development => self.development,
            DimensionCategory::Preferences => self.preferences,
            DimensionCategory::Goals => self.goals,
            DimensionCategory::Context => self.context,
            DimensionCategory::Profile => self.profile,
        }
    }

    /// Apply the per-therapy-type emphasis to the base weights.
    ///
    /// Individual therapy leans on emotional state, couple therapy on
    /// conflict dynamics, child therapy on developmental signals.
    pub fn calibrated(&self, therapy_type: TherapyType) -> CategoryWeights {
        let mut w = *self;
        match therapy_type {
            TherapyType::Individual => {
                w.emotional *= 2.0;
                w.goals *= 1.5;
            }
            TherapyType::Couple => {
                w.conflict *= 2.0;
                w.relational *= 1.5;
            }
            TherapyType::Child => {
                w.development *= 2.0;
                w.relational *= 1.25;
            }
        }
        w
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            emotional: 1.0,
            relational: 1.0,
            conflict: 1.0,
            development: 1.0,
            preferences: 1.0,
            goals: 1.0,
            context: 0.7,
            profile: 0.5,
        }
    }
}

/// Score returned when both vectors carry no signal at all.
const NEUTRAL_SCORE: u8 = 50;

/// Compute a compatibility score (0-100) for one therapist.
///
/// The therapist is projected onto the patient's schema and compared via
/// weighted cosine similarity, with weights calibrated for the therapy type.
/// A one-sided zero-magnitude vector scores 0; if both sides are
/// zero-magnitude the score is the neutral 50. Never divides by zero.
pub fn score(
    patient: &FeatureVector,
    therapist: &TherapistProfile,
    weights: &CategoryWeights,
    projection: &ProjectionSettings,
) -> u8 {
    let schema = DimensionSchema::for_type(patient.therapy_type);
    let therapist_values = project(schema, therapist, projection);
    let calibrated = weights.calibrated(patient.therapy_type);
    weighted_cosine(schema, &patient.values, &therapist_values, &calibrated)
}

fn weighted_cosine(
    schema: &DimensionSchema,
    patient_values: &[f64],
    therapist_values: &[f64],
    calibrated: &CategoryWeights,
) -> u8 {
    let mut dot = 0.0;
    let mut patient_norm = 0.0;
    let mut therapist_norm = 0.0;

    for (i, dim) in schema.dims.iter().enumerate() {
        let p = patient_values.get(i).copied().unwrap_or(0.0);
        let t = therapist_values.get(i).copied().unwrap_or(0.0);
        // Dimensions empty on both sides stay out of the denominators.
        if p == 0.0 && t == 0.0 {
            continue;
        }
        let w = calibrated.weight(dim.category);
        dot += w * p * t;
        patient_norm += w * p * p;
        therapist_norm += w * t * t;
    }

    if patient_norm == 0.0 && therapist_norm == 0.0 {
        return NEUTRAL_SCORE;
    }
    if patient_norm == 0.0 || therapist_norm == 0.0 {
        return 0;
    }

    let similarity = dot / (patient_norm.sqrt() * therapist_norm.sqrt());
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalizer::normalize;
    use crate::models::AnswerValue;
    use std::collections::HashMap;

    fn therapist(tags: &[&str], approach: &str) -> TherapistProfile {
        TherapistProfile {
            therapist_id: "t1".into(),
            name: "Dr.ssa Maria Rossi".into(),
            specializations: tags.iter().map(|s| s.to_string()).collect(),
            approach: approach.into(),
            languages: vec!["Italiano".into()],
            price_cents: 8_000,
            location_tag: "Milano Centro".into(),
            therapy_types_supported: vec![TherapyType::Individual],
            rating_average: 4.9,
            review_count: 127,
        }
    }

    fn anxious_patient_vector() -> FeatureVector {
        let mut answers = HashMap::new();
        answers.insert(
            "main_difficulties".to_string(),
            AnswerValue::FreeText("ansia costante".into()),
        );
        answers.insert(
            "emotional_state".to_string(),
            AnswerValue::EmotionScale(HashMap::from([
                ("Ansioso".to_string(), 9),
                ("Triste".to_string(), 3),
                ("Stressato".to_string(), 9),
                ("Sopraffatto".to_string(), 5),
            ])),
        );
        answers.insert(
            "previous_diagnosis".to_string(),
            AnswerValue::SingleChoice("anxiety".into()),
        );
        answers.insert(
            "communication_style".to_string(),
            AnswerValue::SingleChoice("direct".into()),
        );
        answers.insert(
            "thinking_style".to_string(),
            AnswerValue::SingleChoice("talk".into()),
        );
        answers.insert(
            "therapy_experience".to_string(),
            AnswerValue::SingleChoice("first_time".into()),
        );
        answers.insert(
            "therapy_approach".to_string(),
            AnswerValue::SingleChoice("practical".into()),
        );
        answers.insert("specialist_competencies".to_string(), AnswerValue::Scale(3));
        answers.insert(
            "therapy_goals".to_string(),
            AnswerValue::MultiChoice(vec!["manage_anxiety".into()]),
        );
        answers.insert("commitment_level".to_string(), AnswerValue::Scale(8));
        answers.insert(
            "life_areas".to_string(),
            AnswerValue::MultiChoice(vec!["stress".into()]),
        );
        answers.insert(
            "time_availability".to_string(),
            AnswerValue::SingleChoice("one_hour".into()),
        );
        answers.insert(
            "life_changes".to_string(),
            AnswerValue::SingleChoice("stable".into()),
        );
        answers.insert(
            "session_format".to_string(),
            AnswerValue::MultiChoice(vec!["online".into()]),
        );
        normalize(TherapyType::Individual, &answers).unwrap()
    }

    #[test]
    fn test_score_in_bounds() {
        let patient = anxious_patient_vector();
        let s = score(
            &patient,
            &therapist(&["Ansia"], "Cognitivo-Comportamentale"),
            &CategoryWeights::default(),
            &ProjectionSettings::default(),
        );
        assert!(s <= 100);
    }

    #[test]
    fn test_identical_projection_scores_100() {
        let settings = ProjectionSettings::default();
        let t = therapist(&["Ansia", "Depressione"], "Cognitivo-Comportamentale");
        let schema = DimensionSchema::for_type(TherapyType::Individual);
        let patient = FeatureVector {
            therapy_type: TherapyType::Individual,
            values: project(schema, &t, &settings),
        };

        let s = score(&patient, &t, &CategoryWeights::default(), &settings);
        assert_eq!(s, 100);
    }

    #[test]
    fn test_zero_patient_vector_scores_zero() {
        let patient = FeatureVector {
            therapy_type: TherapyType::Individual,
            values: vec![0.0; DimensionSchema::for_type(TherapyType::Individual).len()],
        };
        let s = score(
            &patient,
            &therapist(&["Ansia"], "Cognitivo-Comportamentale"),
            &CategoryWeights::default(),
            &ProjectionSettings::default(),
        );
        assert_eq!(s, 0);
    }

    #[test]
    fn test_neutral_score_when_both_vectors_empty() {
        let schema = DimensionSchema::for_type(TherapyType::Individual);
        let zeros = vec![0.0; schema.len()];
        let calibrated = CategoryWeights::default().calibrated(TherapyType::Individual);
        assert_eq!(
            weighted_cosine(schema, &zeros, &zeros, &calibrated),
            NEUTRAL_SCORE
        );
    }

    #[test]
    fn test_anxiety_specialist_beats_couple_specialist() {
        let patient = anxious_patient_vector();
        let weights = CategoryWeights::default();
        let settings = ProjectionSettings::default();

        let anxiety_score = score(
            &patient,
            &therapist(&["Ansia", "Terapia Cognitivo-Comportamentale"], "Cognitivo-Comportamentale"),
            &weights,
            &settings,
        );
        let couple_score = score(
            &patient,
            &therapist(&["Terapia di Coppia"], "Sistemico-Familiare"),
            &weights,
            &settings,
        );

        assert!(
            anxiety_score > couple_score,
            "expected anxiety specialist ({}) above couple specialist ({})",
            anxiety_score,
            couple_score
        );
    }

    #[test]
    fn test_calibration_emphasizes_emotional_for_individual() {
        let base = CategoryWeights::default();
        let calibrated = base.calibrated(TherapyType::Individual);
        assert!(calibrated.emotional > base.emotional);
        assert_eq!(calibrated.conflict, base.conflict);

        let couple = base.calibrated(TherapyType::Couple);
        assert!(couple.conflict > base.conflict);
    }
}
