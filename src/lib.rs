//! TheraMatch - Therapist matching and booking service
//!
//! This library powers the questionnaire-driven therapist matching flow:
//! answers are normalized into per-therapy-type feature vectors, scored
//! against therapist profiles, and the selected therapists' calendar slots
//! are booked through an exclusive hold protocol.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod scheduler;
pub mod services;

// Re-export commonly used types
pub use core::{CategoryWeights, MatchEngine, ProjectionSettings};
pub use models::{
    AnswerValue, Booking, FindMatchesRequest, FindMatchesResponse, MatchResult, Slot, SlotState,
    TherapistProfile, TherapyType,
};
pub use scheduler::SlotScheduler;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let engine = MatchEngine::with_defaults();
        assert_eq!(engine.default_matches(), 3);
    }
}
