use crate::models::domain::{Booking, MatchEntry, MatchResult, Slot, TherapyType};
use serde::{Deserialize, Serialize};

/// Response for the find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub patient_id: String,
    pub therapy_type: TherapyType,
    pub matches: Vec<MatchEntry>,
    pub total_candidates: usize,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<MatchResult> for FindMatchesResponse {
    fn from(result: MatchResult) -> Self {
        Self {
            patient_id: result.patient_id,
            therapy_type: result.therapy_type,
            total_candidates: result.total_candidates,
            created_at: result.created_at,
            matches: result.entries,
        }
    }
}

/// Response listing a therapist's open slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSlotsResponse {
    pub therapist_id: String,
    pub slots: Vec<Slot>,
}

/// Response for hold and release operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldResponse {
    pub success: bool,
    pub slot: Option<Slot>,
}

/// Response for booking confirmation and cancellation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub success: bool,
    pub booking: Booking,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
