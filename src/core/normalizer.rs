use crate::core::catalog::{self, QuestionKind};
use crate::core::schema::DimensionSchema;
use crate::models::{AnswerValue, FeatureVector, TherapyType};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from questionnaire normalization.
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("missing required answers: {0:?}")]
    IncompleteAnswers(Vec<String>),

    #[error("invalid answer for question '{0}'")]
    InvalidAnswer(String),
}

/// Fixed table mapping free-text fragments to specialization boost tags.
///
/// Matching is substring-based on the lowercased text; unmatched text
/// contributes nothing.
const KEYWORD_TAGS: &[(&str, &str)] = &[
    ("ansia", "Ansia"),
    ("panico", "Ansia"),
    ("depress", "Depressione"),
    ("trauma", "EMDR"),
    ("lutto", "EMDR"),
    ("autostima", "Autostima"),
    ("coppia", "Terapia di Coppia"),
    ("sonno", "Disturbi del Sonno"),
    ("insonnia", "Disturbi del Sonno"),
    ("stress", "Stress Lavorativo"),
    ("lavoro", "Stress Lavorativo"),
];

/// Map raw questionnaire answers onto the therapy type's dimension schema.
///
/// Pure and deterministic: identical input always yields an identical vector.
/// Every `required` question must have a non-empty answer, otherwise the call
/// fails with `IncompleteAnswers` listing every missing key. Answers whose
/// shape or option does not match the catalog fail with `InvalidAnswer`;
/// nothing is silently defaulted. Unknown answer keys are ignored.
pub fn normalize(
    therapy_type: TherapyType,
    answers: &HashMap<String, AnswerValue>,
) -> Result<FeatureVector, NormalizeError> {
    let schema = DimensionSchema::for_type(therapy_type);
    let mut values = vec![0.0; schema.len()];
    let mut missing = Vec::new();

    for question in catalog::questions_for(therapy_type) {
        let answer = match answers.get(question.key) {
            Some(a) if !is_blank(a) => a,
            _ => {
                if question.required {
                    missing.push(question.key.to_string());
                }
                continue;
            }
        };

        match (question.kind, answer) {
            (QuestionKind::Single(options), AnswerValue::SingleChoice(choice)) => {
                if !options.contains(&choice.as_str()) {
                    return Err(NormalizeError::InvalidAnswer(question.key.to_string()));
                }
                let idx = schema
                    .index_of(&format!("{}.{}", question.key, choice))
                    .ok_or_else(|| NormalizeError::InvalidAnswer(question.key.to_string()))?;
                values[idx] = 1.0;
            }
            (QuestionKind::Multi(options), AnswerValue::MultiChoice(selected)) => {
                // Influence is split evenly so picking many options does not
                // outweigh picking one.
                let weight = 1.0 / selected.len() as f64;
                for choice in selected {
                    if !options.contains(&choice.as_str()) {
                        return Err(NormalizeError::InvalidAnswer(question.key.to_string()));
                    }
                    let idx = schema
                        .index_of(&format!("{}.{}", question.key, choice))
                        .ok_or_else(|| NormalizeError::InvalidAnswer(question.key.to_string()))?;
                    values[idx] += weight;
                }
            }
            (QuestionKind::Scale { min, max }, AnswerValue::Scale(v)) => {
                if *v < min || *v > max {
                    return Err(NormalizeError::InvalidAnswer(question.key.to_string()));
                }
                let idx = schema
                    .index_of(question.key)
                    .ok_or_else(|| NormalizeError::InvalidAnswer(question.key.to_string()))?;
                values[idx] = (*v - min) as f64 / (max - min) as f64;
            }
            (QuestionKind::EmotionScale, AnswerValue::EmotionScale(emotions)) => {
                if emotions
                    .values()
                    .any(|v| *v < catalog::EMOTION_MIN || *v > catalog::EMOTION_MAX)
                {
                    return Err(NormalizeError::InvalidAnswer(question.key.to_string()));
                }
                for emotion in catalog::EMOTIONS {
                    let raw = emotions
                        .iter()
                        .find(|(k, _)| k.eq_ignore_ascii_case(emotion))
                        .map(|(_, v)| *v as f64)
                        // Missing emotions are imputed at the midpoint.
                        .unwrap_or((catalog::EMOTION_MIN + catalog::EMOTION_MAX) as f64 / 2.0);
                    let idx = schema
                        .index_of(&format!("{}.{}", question.key, emotion))
                        .ok_or_else(|| NormalizeError::InvalidAnswer(question.key.to_string()))?;
                    values[idx] = (raw - catalog::EMOTION_MIN as f64)
                        / (catalog::EMOTION_MAX - catalog::EMOTION_MIN) as f64;
                }
            }
            // Free text is kept out of the numeric vector entirely.
            (QuestionKind::FreeText, AnswerValue::FreeText(_)) => {}
            _ => return Err(NormalizeError::InvalidAnswer(question.key.to_string())),
        }
    }

    if !missing.is_empty() {
        return Err(NormalizeError::IncompleteAnswers(missing));
    }

    // Patient side of the therapist-profile dims is the ideal 1.0, so the
    // projection rewards language coverage, affordability and locality.
    for profile_dim in crate::core::schema::PROFILE_DIMS {
        if let Some(idx) = schema.index_of(profile_dim) {
            values[idx] = 1.0;
        }
    }

    Ok(FeatureVector {
        therapy_type,
        values,
    })
}

/// Extract specialization boost tags from free-text answers.
///
/// Tags are deduplicated and ordered by first appearance in the keyword table.
pub fn extract_boost_tags(answers: &HashMap<String, AnswerValue>) -> Vec<String> {
    let mut text = String::new();
    for answer in answers.values() {
        if let AnswerValue::FreeText(t) = answer {
            text.push_str(&t.to_lowercase());
            text.push(' ');
        }
    }

    let mut tags = Vec::new();
    for (fragment, tag) in KEYWORD_TAGS {
        if text.contains(fragment) && !tags.iter().any(|t: &String| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

fn is_blank(answer: &AnswerValue) -> bool {
    match answer {
        AnswerValue::FreeText(t) => t.trim().is_empty(),
        AnswerValue::MultiChoice(v) => v.is_empty(),
        AnswerValue::EmotionScale(m) => m.is_empty(),
        _ => false,
    }
}
