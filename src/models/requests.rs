use crate::models::domain::{AnswerValue, SessionKind, TherapyType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

/// Request to find matching therapists for a completed questionnaire
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "patient_id", rename = "patientId")]
    pub patient_id: String,
    #[serde(alias = "therapy_type", rename = "therapyType")]
    pub therapy_type: TherapyType,
    pub answers: HashMap<String, AnswerValue>,
    #[serde(alias = "max_matches", rename = "maxMatches")]
    pub max_matches: Option<usize>,
}

/// Request to place an exclusive hold on a slot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HoldSlotRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "therapist_id", rename = "therapistId")]
    pub therapist_id: String,
    #[serde(alias = "slot_id", rename = "slotId")]
    pub slot_id: Uuid,
    #[validate(length(min = 1))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
    /// Optional TTL override, capped by the configured hold TTL.
    #[serde(alias = "ttl_seconds", rename = "ttlSeconds")]
    pub ttl_seconds: Option<u64>,
}

/// Request to release a hold before it expires
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReleaseHoldRequest {
    #[serde(alias = "slot_id", rename = "slotId")]
    pub slot_id: Uuid,
    #[validate(length(min = 1))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
}

/// Request to confirm a held slot into a booking
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmBookingRequest {
    #[serde(alias = "slot_id", rename = "slotId")]
    pub slot_id: Uuid,
    #[validate(length(min = 1))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "patient_id", rename = "patientId")]
    pub patient_id: String,
    #[serde(alias = "session_kind", rename = "sessionKind")]
    pub session_kind: SessionKind,
}

/// Request to cancel a confirmed booking
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CancelBookingRequest {
    #[serde(alias = "slot_id", rename = "slotId")]
    pub slot_id: Uuid,
    #[validate(length(min = 1))]
    #[serde(alias = "patient_id", rename = "patientId")]
    pub patient_id: String,
}
