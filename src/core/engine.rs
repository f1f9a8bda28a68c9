use crate::core::normalizer::{self, NormalizeError};
use crate::core::projection::ProjectionSettings;
use crate::core::scoring::{score, CategoryWeights};
use crate::core::selector::{select_matches, ScoredCandidate, SelectError};
use crate::models::{AnswerValue, MatchResult, PatientProfile, TherapistProfile, TherapyType};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from the full matching pipeline.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Select(#[from] SelectError),
}

/// Per matched boost tag, the score bonus applied on top of similarity.
const BOOST_PER_TAG: u8 = 2;

/// Matching orchestrator: normalize, filter, score, select.
///
/// Pure with respect to scheduling; slot availability is checked
/// independently at booking time, never here.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    weights: CategoryWeights,
    projection: ProjectionSettings,
    default_matches: usize,
}

impl MatchEngine {
    pub fn new(
        weights: CategoryWeights,
        projection: ProjectionSettings,
        default_matches: usize,
    ) -> Self {
        Self {
            weights,
            projection,
            default_matches,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(CategoryWeights::default(), ProjectionSettings::default(), 3)
    }

    pub fn default_matches(&self) -> usize {
        self.default_matches
    }

    /// Normalize answers into a reusable patient profile.
    ///
    /// The feature vector is computed once and the free-text answers are
    /// mined for boost tags; both are frozen on the returned profile.
    pub fn build_profile(
        &self,
        patient_id: &str,
        therapy_type: TherapyType,
        answers: &HashMap<String, AnswerValue>,
    ) -> Result<PatientProfile, NormalizeError> {
        let vector = normalizer::normalize(therapy_type, answers)?;
        let boost_tags = normalizer::extract_boost_tags(answers);

        Ok(PatientProfile {
            patient_id: patient_id.to_string(),
            therapy_type,
            answers: answers.clone(),
            feature_vector: Some(vector),
            boost_tags,
        })
    }

    /// Run the matching pipeline for one questionnaire submission.
    ///
    /// Therapists not supporting the therapy type are dropped before scoring
    /// (a precondition filter, not a zero score). Therapists whose
    /// specializations match a free-text boost tag get a small flat bonus on
    /// top of the similarity score. `n` falls back to the configured default
    /// when absent.
    pub fn find_matches(
        &self,
        patient_id: &str,
        therapy_type: TherapyType,
        answers: &HashMap<String, AnswerValue>,
        candidates: Vec<TherapistProfile>,
        n: Option<usize>,
    ) -> Result<MatchResult, MatchError> {
        let vector = normalizer::normalize(therapy_type, answers)?;
        let boost_tags = normalizer::extract_boost_tags(answers);
        let total_candidates = candidates.len();

        let scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .filter(|t| t.supports(therapy_type))
            .map(|therapist| {
                let mut s = score(&vector, &therapist, &self.weights, &self.projection);
                let matched_tags = boost_tags
                    .iter()
                    .filter(|tag| therapist.specializations.contains(tag))
                    .count() as u8;
                s = s.saturating_add(matched_tags.saturating_mul(BOOST_PER_TAG)).min(100);
                ScoredCandidate {
                    therapist,
                    score: s,
                }
            })
            .collect();

        let entries = select_matches(scored, n.unwrap_or(self.default_matches))?;

        Ok(MatchResult {
            patient_id: patient_id.to_string(),
            therapy_type,
            entries,
            total_candidates,
            created_at: chrono::Utc::now(),
        })
    }
}
