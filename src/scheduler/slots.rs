use crate::models::{Booking, SessionKind, Slot, SlotState};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Errors from slot operations. Each is a terminal result the booking UI
/// branches on; none is retried transparently.
#[derive(Debug, Error, PartialEq)]
pub enum SchedulerError {
    #[error("slot is not available (currently {0:?})")]
    SlotUnavailable(SlotState),

    #[error("slot not found")]
    SlotNotFound,

    #[error("hold is not owned by this session")]
    HoldNotOwned,

    #[error("hold expired before confirmation")]
    HoldExpired,

    #[error("no active booking for this slot and patient")]
    BookingNotFound,
}

/// In-memory owner of every therapist calendar.
///
/// Each slot is an independently lockable resource: all transitions happen
/// under that slot's mutex, so per-slot histories are linearizable and
/// operations on different slots never block each other. The outer map is
/// only locked to resolve ids, never across a state transition.
pub struct SlotScheduler {
    slots: RwLock<HashMap<Uuid, Arc<Mutex<Slot>>>>,
    bookings: Mutex<HashMap<Uuid, Booking>>,
}

impl SlotScheduler {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            bookings: Mutex::new(HashMap::new()),
        }
    }

    /// Seed the scheduler with calendar slots (startup or calendar refresh).
    /// Existing slot ids are left untouched so live holds survive a reload.
    pub async fn load_slots(&self, slots: Vec<Slot>) -> usize {
        let mut map = self.slots.write().await;
        let mut inserted = 0;
        for slot in slots {
            map.entry(slot.slot_id).or_insert_with(|| {
                inserted += 1;
                Arc::new(Mutex::new(slot))
            });
        }
        inserted
    }

    /// Take a time-boxed exclusive hold on an open future slot.
    pub async fn hold_slot(
        &self,
        therapist_id: &str,
        slot_id: Uuid,
        session_id: &str,
        ttl_seconds: u64,
    ) -> Result<Slot, SchedulerError> {
        let entry = self.entry(slot_id).await?;
        let mut slot = entry.lock().await;
        if slot.therapist_id != therapist_id {
            return Err(SchedulerError::SlotNotFound);
        }

        let now = Utc::now();
        reclassify(&mut slot, now);

        match slot.state {
            SlotState::Open if slot.start > now => {
                slot.state = SlotState::Held;
                slot.held_by = Some(session_id.to_string());
                slot.hold_expires_at = Some(now + Duration::seconds(ttl_seconds as i64));
                tracing::debug!(
                    "Hold granted: slot {} held by session {} for {}s",
                    slot_id,
                    session_id,
                    ttl_seconds
                );
                Ok(slot.clone())
            }
            state => Err(SchedulerError::SlotUnavailable(state)),
        }
    }

    /// Release a hold owned by the session. Idempotent on already-open slots.
    pub async fn release_hold(
        &self,
        slot_id: Uuid,
        session_id: &str,
    ) -> Result<(), SchedulerError> {
        let entry = self.entry(slot_id).await?;
        let mut slot = entry.lock().await;

        reclassify(&mut slot, Utc::now());

        match slot.state {
            SlotState::Open => Ok(()),
            SlotState::Held if slot.held_by.as_deref() == Some(session_id) => {
                release(&mut slot);
                tracing::debug!("Hold released: slot {} by session {}", slot_id, session_id);
                Ok(())
            }
            _ => Err(SchedulerError::HoldNotOwned),
        }
    }

    /// Turn an unexpired hold into a confirmed booking.
    ///
    /// The expiry check and the Held -> Booked transition happen under the
    /// same slot lock: no other session can slip in between them.
    pub async fn confirm_booking(
        &self,
        slot_id: Uuid,
        session_id: &str,
        patient_id: &str,
        session_kind: SessionKind,
    ) -> Result<Booking, SchedulerError> {
        let entry = self.entry(slot_id).await?;
        let mut slot = entry.lock().await;

        let now = Utc::now();
        // A slot whose start has passed can no longer be booked, whether or
        // not the sweeper got to it first.
        if slot.start <= now {
            reclassify(&mut slot, now);
            return Err(SchedulerError::SlotUnavailable(slot.state));
        }
        if slot.state != SlotState::Held {
            return Err(SchedulerError::HoldNotOwned);
        }
        if slot.held_by.as_deref() != Some(session_id) {
            return Err(SchedulerError::HoldNotOwned);
        }
        if slot.hold_expires_at.map_or(true, |expires| expires < now) {
            // Expired holds are auto-released so the slot is immediately
            // re-offerable.
            release(&mut slot);
            return Err(SchedulerError::HoldExpired);
        }

        slot.state = SlotState::Booked;
        slot.hold_expires_at = None;

        let booking = Booking {
            booking_id: Uuid::new_v4(),
            slot_id,
            patient_id: patient_id.to_string(),
            therapist_id: slot.therapist_id.clone(),
            confirmed_at: now,
            session_kind,
            cancelled_at: None,
        };

        self.bookings
            .lock()
            .await
            .insert(slot_id, booking.clone());

        tracing::info!(
            "Booking confirmed: slot {} patient {} ({})",
            slot_id,
            patient_id,
            session_kind.as_str()
        );
        Ok(booking)
    }

    /// Cancel a confirmed booking. The booking record is marked cancelled
    /// and kept; the slot reopens if its start is still in the future.
    pub async fn cancel_booking(
        &self,
        slot_id: Uuid,
        patient_id: &str,
    ) -> Result<Booking, SchedulerError> {
        let entry = self.entry(slot_id).await?;
        let mut slot = entry.lock().await;

        let mut bookings = self.bookings.lock().await;
        let booking = match bookings.get_mut(&slot_id) {
            Some(b) if b.patient_id == patient_id && b.cancelled_at.is_none() => b,
            _ => return Err(SchedulerError::BookingNotFound),
        };

        let now = Utc::now();
        booking.cancelled_at = Some(now);

        if slot.state == SlotState::Booked {
            if slot.start > now {
                release(&mut slot);
            } else {
                slot.state = SlotState::Expired;
            }
        }

        tracing::info!("Booking cancelled: slot {} patient {}", slot_id, patient_id);
        Ok(booking.clone())
    }

    /// Reclaim expired holds and expire past-start slots.
    ///
    /// Runs from a background task; every operation also reclassifies
    /// lazily on read, so a dead session can never pin a slot.
    pub async fn sweep_expired_holds(&self, now: DateTime<Utc>) -> usize {
        let entries: Vec<Arc<Mutex<Slot>>> =
            self.slots.read().await.values().cloned().collect();

        let mut reclaimed = 0;
        for entry in entries {
            let mut slot = entry.lock().await;
            let before = slot.state;
            reclassify(&mut slot, now);
            if before == SlotState::Held && slot.state == SlotState::Open {
                reclaimed += 1;
            }
        }

        if reclaimed > 0 {
            tracing::info!("Sweep reclaimed {} expired holds", reclaimed);
        }
        reclaimed
    }

    /// Snapshot of a therapist's currently open future slots.
    pub async fn open_slots(&self, therapist_id: &str) -> Vec<Slot> {
        let entries: Vec<Arc<Mutex<Slot>>> =
            self.slots.read().await.values().cloned().collect();

        let now = Utc::now();
        let mut open = Vec::new();
        for entry in entries {
            let mut slot = entry.lock().await;
            if slot.therapist_id != therapist_id {
                continue;
            }
            reclassify(&mut slot, now);
            if slot.state == SlotState::Open {
                open.push(slot.clone());
            }
        }
        open.sort_by_key(|s| s.start);
        open
    }

    /// Current state of one slot, after lazy reclassification.
    pub async fn slot_snapshot(&self, slot_id: Uuid) -> Result<Slot, SchedulerError> {
        let entry = self.entry(slot_id).await?;
        let mut slot = entry.lock().await;
        reclassify(&mut slot, Utc::now());
        Ok(slot.clone())
    }

    async fn entry(&self, slot_id: Uuid) -> Result<Arc<Mutex<Slot>>, SchedulerError> {
        self.slots
            .read()
            .await
            .get(&slot_id)
            .cloned()
            .ok_or(SchedulerError::SlotNotFound)
    }
}

impl Default for SlotScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy expiry on read: expired holds reopen, past-start unbooked slots
/// become terminally Expired. Booked slots are never touched.
fn reclassify(slot: &mut Slot, now: DateTime<Utc>) {
    if slot.state == SlotState::Held
        && slot.hold_expires_at.map_or(true, |expires| expires < now)
    {
        release(slot);
    }
    if matches!(slot.state, SlotState::Open | SlotState::Held) && slot.start <= now {
        slot.state = SlotState::Expired;
        slot.held_by = None;
        slot.hold_expires_at = None;
    }
}

fn release(slot: &mut Slot) {
    slot.state = SlotState::Open;
    slot.held_by = None;
    slot.hold_expires_at = None;
}
