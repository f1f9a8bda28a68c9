use crate::core::catalog::{self, DimensionCategory, QuestionKind};
use crate::models::TherapyType;
use std::collections::HashMap;
use std::sync::OnceLock;

/// How a dimension's value is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionKind {
    /// Presence dimension of a choice option or emotion axis (0 or a split weight).
    OneHot,
    /// Rescaled scalar in [0, 1].
    Scalar,
}

/// One axis of the scoring space.
#[derive(Debug, Clone)]
pub struct Dimension {
    /// Stable id: `question_key.option`, `question_key.emotion` or `question_key`.
    pub id: String,
    pub category: DimensionCategory,
    pub kind: DimensionKind,
}

/// Ordered dimension list for one therapy type.
///
/// Patient vectors and therapist projections are always expressed over the
/// same schema instance; indices are positional and never shared across types.
#[derive(Debug)]
pub struct DimensionSchema {
    pub therapy_type: TherapyType,
    pub dims: Vec<Dimension>,
    index: HashMap<String, usize>,
}

/// Trailing dims carrying therapist-profile signal (patient side is fixed at 1.0).
pub const PROFILE_DIMS: [&str; 3] = [
    "profile.language_overlap",
    "profile.price_bracket",
    "profile.location_match",
];

impl DimensionSchema {
    fn build(therapy_type: TherapyType) -> Self {
        let mut dims = Vec::new();

        for question in catalog::questions_for(therapy_type) {
            match question.kind {
                QuestionKind::Single(options) | QuestionKind::Multi(options) => {
                    for option in options {
                        dims.push(Dimension {
                            id: format!("{}.{}", question.key, option),
                            category: question.category,
                            kind: DimensionKind::OneHot,
                        });
                    }
                }
                QuestionKind::Scale { .. } => {
                    dims.push(Dimension {
                        id: question.key.to_string(),
                        category: question.category,
                        kind: DimensionKind::Scalar,
                    });
                }
                QuestionKind::EmotionScale => {
                    for emotion in catalog::EMOTIONS {
                        dims.push(Dimension {
                            id: format!("{}.{}", question.key, emotion),
                            category: question.category,
                            kind: DimensionKind::OneHot,
                        });
                    }
                }
                // Free text never enters the numeric vector.
                QuestionKind::FreeText => {}
            }
        }

        for profile_dim in PROFILE_DIMS {
            dims.push(Dimension {
                id: profile_dim.to_string(),
                category: DimensionCategory::Profile,
                kind: DimensionKind::Scalar,
            });
        }

        let index = dims
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();

        Self {
            therapy_type,
            dims,
            index,
        }
    }

    /// Shared schema for a therapy type (built once).
    pub fn for_type(therapy_type: TherapyType) -> &'static DimensionSchema {
        static INDIVIDUAL: OnceLock<DimensionSchema> = OnceLock::new();
        static COUPLE: OnceLock<DimensionSchema> = OnceLock::new();
        static CHILD: OnceLock<DimensionSchema> = OnceLock::new();

        match therapy_type {
            TherapyType::Individual => {
                INDIVIDUAL.get_or_init(|| Self::build(TherapyType::Individual))
            }
            TherapyType::Couple => COUPLE.get_or_init(|| Self::build(TherapyType::Couple)),
            TherapyType::Child => CHILD.get_or_init(|| Self::build(TherapyType::Child)),
        }
    }

    pub fn len(&self) -> usize {
        self.dims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Positional index of a dimension id, if it exists in this schema.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_differ_across_types() {
        let individual = DimensionSchema::for_type(TherapyType::Individual);
        let couple = DimensionSchema::for_type(TherapyType::Couple);
        let child = DimensionSchema::for_type(TherapyType::Child);

        assert_ne!(individual.len(), 0);
        assert_ne!(couple.len(), 0);
        assert_ne!(child.len(), 0);
        // Distinct questionnaires produce distinct dimension sets.
        assert_ne!(individual.len(), couple.len());
        assert_ne!(couple.len(), child.len());
    }

    #[test]
    fn test_profile_dims_are_trailing() {
        let schema = DimensionSchema::for_type(TherapyType::Individual);
        let n = schema.len();
        assert_eq!(schema.dims[n - 3].id, "profile.language_overlap");
        assert_eq!(schema.dims[n - 2].id, "profile.price_bracket");
        assert_eq!(schema.dims[n - 1].id, "profile.location_match");
    }

    #[test]
    fn test_index_of_roundtrip() {
        let schema = DimensionSchema::for_type(TherapyType::Individual);
        for (i, dim) in schema.dims.iter().enumerate() {
            assert_eq!(schema.index_of(&dim.id), Some(i));
        }
        assert_eq!(schema.index_of("nonexistent"), None);
    }

    #[test]
    fn test_emotion_dims_present() {
        let schema = DimensionSchema::for_type(TherapyType::Individual);
        assert!(schema.index_of("emotional_state.ansioso").is_some());
        assert!(schema.index_of("emotional_state.stressato").is_some());
    }
}
