use crate::models::{MatchEntry, TherapistProfile};
use std::cmp::Ordering;
use std::collections::HashSet;
use thiserror::Error;

/// Errors from match selection.
#[derive(Debug, Error, PartialEq)]
pub enum SelectError {
    #[error("no eligible candidates for the requested therapy type")]
    NoEligibleCandidates,
}

/// A candidate with its compatibility score, ready for ranking.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub therapist: TherapistProfile,
    pub score: u8,
}

/// Rank scored candidates and pick the top `n`.
///
/// Order: score desc, then rating desc, review count desc, id asc, so the
/// result is fully deterministic. The diversity rule skips candidates whose specialization
/// set duplicates an already-selected one; if that would return fewer than
/// min(n, |candidates|) entries, the rule is relaxed for the remaining
/// slots and they are filled by score alone.
pub fn select_matches(
    mut candidates: Vec<ScoredCandidate>,
    n: usize,
) -> Result<Vec<MatchEntry>, SelectError> {
    if candidates.is_empty() {
        return Err(SelectError::NoEligibleCandidates);
    }

    candidates.sort_by(compare);

    let target = n.min(candidates.len());
    let mut selected: Vec<ScoredCandidate> = Vec::with_capacity(target);
    let mut skipped: Vec<ScoredCandidate> = Vec::new();
    let mut seen_sets = HashSet::new();

    for candidate in candidates {
        if selected.len() == target {
            break;
        }
        let spec_set = candidate.therapist.specialization_set();
        if seen_sets.contains(&spec_set) {
            skipped.push(candidate);
        } else {
            seen_sets.insert(spec_set);
            selected.push(candidate);
        }
    }

    // Relax the diversity rule for whatever slots are still empty.
    for candidate in skipped {
        if selected.len() == target {
            break;
        }
        selected.push(candidate);
    }

    // Relaxation may have appended out of order.
    selected.sort_by(compare);

    Ok(selected
        .into_iter()
        .enumerate()
        .map(|(i, c)| MatchEntry {
            therapist_id: c.therapist.therapist_id,
            name: c.therapist.name,
            score: c.score,
            rank: (i + 1) as u8,
            specializations: c.therapist.specializations,
            approach: c.therapist.approach,
            rating_average: c.therapist.rating_average,
            review_count: c.therapist.review_count,
            price_cents: c.therapist.price_cents,
        })
        .collect())
}

fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| {
            b.therapist
                .rating_average
                .partial_cmp(&a.therapist.rating_average)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| b.therapist.review_count.cmp(&a.therapist.review_count))
        .then_with(|| a.therapist.therapist_id.cmp(&b.therapist.therapist_id))
}
