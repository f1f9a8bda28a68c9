use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// Therapy path requested by the patient.
///
/// Each type has its own questionnaire and its own dimension schema;
/// vectors produced for one type are never comparable with another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TherapyType {
    Individual,
    Couple,
    Child,
}

impl TherapyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TherapyType::Individual => "individual",
            TherapyType::Couple => "couple",
            TherapyType::Child => "child",
        }
    }
}

/// A single questionnaire answer, tagged by shape.
///
/// Matching is exhaustive in the normalizer; there is no dynamic probing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum AnswerValue {
    SingleChoice(String),
    MultiChoice(Vec<String>),
    Scale(i64),
    /// Per-emotion intensity, 1..=10.
    EmotionScale(HashMap<String, i64>),
    FreeText(String),
}

/// Patient side of a match request. Immutable once the vector is computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    #[serde(rename = "patientId")]
    pub patient_id: String,
    #[serde(rename = "therapyType")]
    pub therapy_type: TherapyType,
    pub answers: HashMap<String, AnswerValue>,
    #[serde(rename = "featureVector", default)]
    pub feature_vector: Option<FeatureVector>,
    #[serde(rename = "boostTags", default)]
    pub boost_tags: Vec<String>,
}

/// Therapist record as served by the directory. Read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapistProfile {
    #[serde(rename = "therapistId")]
    pub therapist_id: String,
    pub name: String,
    #[serde(default)]
    pub specializations: Vec<String>,
    pub approach: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(rename = "priceCents")]
    pub price_cents: u32,
    #[serde(rename = "locationTag")]
    pub location_tag: String,
    #[serde(rename = "therapyTypesSupported")]
    pub therapy_types_supported: Vec<TherapyType>,
    #[serde(rename = "ratingAverage", default)]
    pub rating_average: f64,
    #[serde(rename = "reviewCount", default)]
    pub review_count: u32,
}

impl TherapistProfile {
    pub fn supports(&self, therapy_type: TherapyType) -> bool {
        self.therapy_types_supported.contains(&therapy_type)
    }

    /// Specialization tags as a canonical set, used by the diversity rule.
    pub fn specialization_set(&self) -> BTreeSet<String> {
        self.specializations.iter().cloned().collect()
    }
}

/// Fixed-length normalized vector over one therapy type's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "therapyType")]
    pub therapy_type: TherapyType,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One scored entry of a match result; rank 1 is the best match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    #[serde(rename = "therapistId")]
    pub therapist_id: String,
    pub name: String,
    pub score: u8,
    pub rank: u8,
    pub specializations: Vec<String>,
    pub approach: String,
    #[serde(rename = "ratingAverage")]
    pub rating_average: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: u32,
    #[serde(rename = "priceCents")]
    pub price_cents: u32,
}

/// Ordered match selection for one patient. Superseded, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "patientId")]
    pub patient_id: String,
    #[serde(rename = "therapyType")]
    pub therapy_type: TherapyType,
    pub entries: Vec<MatchEntry>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Lifecycle state of a bookable slot.
///
/// Transitions are monotonic except Held -> Open on expiry or release.
/// Expired is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    Open,
    Held,
    Booked,
    Expired,
}

/// One bookable interval on a therapist's calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    #[serde(rename = "slotId")]
    pub slot_id: Uuid,
    #[serde(rename = "therapistId")]
    pub therapist_id: String,
    pub start: DateTime<Utc>,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: u32,
    pub state: SlotState,
    #[serde(rename = "heldBy", default)]
    pub held_by: Option<String>,
    #[serde(rename = "holdExpiresAt", default)]
    pub hold_expires_at: Option<DateTime<Utc>>,
}

impl Slot {
    pub fn new(therapist_id: &str, start: DateTime<Utc>, duration_minutes: u32) -> Self {
        Self {
            slot_id: Uuid::new_v4(),
            therapist_id: therapist_id.to_string(),
            start,
            duration_minutes,
            state: SlotState::Open,
            held_by: None,
            hold_expires_at: None,
        }
    }
}

/// Kind of session being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionKind {
    FreeConsultation,
    RegularSession,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::FreeConsultation => "free-consultation",
            SessionKind::RegularSession => "regular-session",
        }
    }
}

/// A confirmed booking. Cancellation sets `cancelled_at`; rows are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "bookingId")]
    pub booking_id: Uuid,
    #[serde(rename = "slotId")]
    pub slot_id: Uuid,
    #[serde(rename = "patientId")]
    pub patient_id: String,
    #[serde(rename = "therapistId")]
    pub therapist_id: String,
    #[serde(rename = "confirmedAt")]
    pub confirmed_at: DateTime<Utc>,
    #[serde(rename = "sessionKind")]
    pub session_kind: SessionKind,
    #[serde(rename = "cancelledAt", default)]
    pub cancelled_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_therapy_type_serde_lowercase() {
        let json = serde_json::to_string(&TherapyType::Individual).unwrap();
        assert_eq!(json, "\"individual\"");
        let back: TherapyType = serde_json::from_str("\"couple\"").unwrap();
        assert_eq!(back, TherapyType::Couple);
    }

    #[test]
    fn test_answer_value_tagged() {
        let answer = AnswerValue::SingleChoice("cbt".to_string());
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["kind"], "singleChoice");
        assert_eq!(json["value"], "cbt");
    }

    #[test]
    fn test_new_slot_is_open() {
        let slot = Slot::new("t1", Utc::now(), 30);
        assert_eq!(slot.state, SlotState::Open);
        assert!(slot.held_by.is_none());
        assert!(slot.hold_expires_at.is_none());
    }

    #[test]
    fn test_specialization_set_ignores_order() {
        let a = TherapistProfile {
            therapist_id: "a".into(),
            name: "A".into(),
            specializations: vec!["Ansia".into(), "EMDR".into()],
            approach: "Cognitivo-Comportamentale".into(),
            languages: vec![],
            price_cents: 8000,
            location_tag: "Milano Centro".into(),
            therapy_types_supported: vec![TherapyType::Individual],
            rating_average: 4.5,
            review_count: 10,
        };
        let mut b = a.clone();
        b.specializations = vec!["EMDR".into(), "Ansia".into()];
        assert_eq!(a.specialization_set(), b.specialization_set());
    }
}
