// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AnswerValue, Booking, FeatureVector, MatchEntry, MatchResult, PatientProfile, SessionKind, Slot, SlotState, TherapistProfile, TherapyType};
pub use requests::{CancelBookingRequest, ConfirmBookingRequest, FindMatchesRequest, HoldSlotRequest, ReleaseHoldRequest};
pub use responses::{BookingResponse, ErrorResponse, FindMatchesResponse, HealthResponse, HoldResponse, OpenSlotsResponse};
