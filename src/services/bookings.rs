use crate::models::{Booking, SessionKind};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with the booking store
#[derive(Debug, Error)]
pub enum BookingStoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// PostgreSQL store for the booking ledger
///
/// The scheduler owns live slot state in memory; this store is the durable
/// record of confirmed and cancelled bookings, so reception can answer
/// "what did this patient book" after a restart.
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    /// Connect to PostgreSQL and ensure the ledger table exists
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, BookingStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookings (
                booking_id UUID PRIMARY KEY,
                slot_id UUID NOT NULL,
                patient_id TEXT NOT NULL,
                therapist_id TEXT NOT NULL,
                session_kind TEXT NOT NULL,
                confirmed_at TIMESTAMPTZ NOT NULL,
                cancelled_at TIMESTAMPTZ
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Persist a confirmed booking
    pub async fn record_booking(&self, booking: &Booking) -> Result<(), BookingStoreError> {
        let query = r#"
            INSERT INTO bookings
                (booking_id, slot_id, patient_id, therapist_id, session_kind, confirmed_at, cancelled_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (booking_id) DO NOTHING
        "#;

        sqlx::query(query)
            .bind(booking.booking_id)
            .bind(booking.slot_id)
            .bind(&booking.patient_id)
            .bind(&booking.therapist_id)
            .bind(booking.session_kind.as_str())
            .bind(booking.confirmed_at)
            .bind(booking.cancelled_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded booking {} for patient {}",
            booking.booking_id,
            booking.patient_id
        );

        Ok(())
    }

    /// Mark a booking cancelled in the ledger
    pub async fn record_cancellation(
        &self,
        booking_id: Uuid,
        cancelled_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), BookingStoreError> {
        let query = r#"
            UPDATE bookings
            SET cancelled_at = $2
            WHERE booking_id = $1 AND cancelled_at IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(booking_id)
            .bind(cancelled_at)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BookingStoreError::NotFound(format!(
                "No active booking {}",
                booking_id
            )));
        }

        tracing::debug!("Recorded cancellation of booking {}", booking_id);
        Ok(())
    }

    /// List a patient's bookings, most recent first
    pub async fn list_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Vec<BookingRecord>, BookingStoreError> {
        let query = r#"
            SELECT booking_id, slot_id, patient_id, therapist_id, session_kind, confirmed_at, cancelled_at
            FROM bookings
            WHERE patient_id = $1
            ORDER BY confirmed_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(patient_id)
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| BookingRecord {
                booking_id: row.get("booking_id"),
                slot_id: row.get("slot_id"),
                patient_id: row.get("patient_id"),
                therapist_id: row.get("therapist_id"),
                session_kind: parse_session_kind(row.get("session_kind")),
                confirmed_at: row.get("confirmed_at"),
                cancelled_at: row.get("cancelled_at"),
            })
            .collect();

        Ok(records)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, BookingStoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn parse_session_kind(raw: String) -> SessionKind {
    match raw.as_str() {
        "free-consultation" => SessionKind::FreeConsultation,
        _ => SessionKind::RegularSession,
    }
}

/// Row from the booking ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub booking_id: Uuid,
    pub slot_id: Uuid,
    pub patient_id: String,
    pub therapist_id: String,
    pub session_kind: SessionKind,
    pub confirmed_at: chrono::DateTime<chrono::Utc>,
    pub cancelled_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_kind() {
        assert_eq!(
            parse_session_kind("free-consultation".to_string()),
            SessionKind::FreeConsultation
        );
        assert_eq!(
            parse_session_kind("regular-session".to_string()),
            SessionKind::RegularSession
        );
    }
}
