use crate::models::{
    BookingResponse, CancelBookingRequest, ConfirmBookingRequest, ErrorResponse, HoldResponse,
    HoldSlotRequest, OpenSlotsResponse, ReleaseHoldRequest,
};
use crate::routes::AppState;
use crate::scheduler::SchedulerError;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure booking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/therapists/{therapist_id}/slots",
        web::get().to(list_open_slots),
    )
    .route(
        "/patients/{patient_id}/bookings",
        web::get().to(list_patient_bookings),
    )
    .route("/bookings/hold", web::post().to(hold_slot))
    .route("/bookings/release", web::post().to(release_hold))
    .route("/bookings/confirm", web::post().to(confirm_booking))
    .route("/bookings/cancel", web::post().to(cancel_booking));
}

/// List a therapist's currently open slots
///
/// GET /api/v1/therapists/{therapist_id}/slots
///
/// An unknown therapist is a 404; a known therapist with a fully booked
/// calendar is an empty list.
async fn list_open_slots(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let therapist_id = path.into_inner();
    let slots = state.scheduler.open_slots(&therapist_id).await;

    if slots.is_empty() {
        let profile_key = crate::services::CacheKey::therapist(&therapist_id);
        let known = state.cache.get::<crate::models::TherapistProfile>(&profile_key).await.is_ok();
        if !known {
            match state.directory.get_therapist(&therapist_id).await {
                Ok(profile) => {
                    if let Err(e) = state.cache.set(&profile_key, &profile).await {
                        tracing::warn!("Failed to cache therapist profile: {}", e);
                    }
                }
                Err(crate::services::DirectoryError::NotFound(_)) => {
                    return HttpResponse::NotFound().json(ErrorResponse {
                        error: "Not found".to_string(),
                        message: format!("Therapist not found: {}", therapist_id),
                        status_code: 404,
                    });
                }
                Err(e) => {
                    tracing::warn!("Directory lookup failed for {}: {}", therapist_id, e);
                }
            }
        }
    }

    HttpResponse::Ok().json(OpenSlotsResponse {
        therapist_id,
        slots,
    })
}

/// List a patient's booking history from the ledger
///
/// GET /api/v1/patients/{patient_id}/bookings
async fn list_patient_bookings(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let patient_id = path.into_inner();

    match state.bookings.list_for_patient(&patient_id).await {
        Ok(records) => HttpResponse::Ok().json(serde_json::json!({
            "patientId": patient_id,
            "count": records.len(),
            "bookings": records,
        })),
        Err(e) => {
            tracing::error!("Failed to list bookings for {}: {}", patient_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list bookings".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Place an exclusive time-boxed hold on a slot
///
/// POST /api/v1/bookings/hold
async fn hold_slot(
    state: web::Data<AppState>,
    req: web::Json<HoldSlotRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let ttl = req
        .ttl_seconds
        .map(|t| t.min(state.hold_ttl_secs))
        .unwrap_or(state.hold_ttl_secs);

    match state
        .scheduler
        .hold_slot(&req.therapist_id, req.slot_id, &req.session_id, ttl)
        .await
    {
        Ok(slot) => HttpResponse::Ok().json(HoldResponse {
            success: true,
            slot: Some(slot),
        }),
        Err(e) => scheduler_error_response(e),
    }
}

/// Release a hold before it expires
///
/// POST /api/v1/bookings/release
async fn release_hold(
    state: web::Data<AppState>,
    req: web::Json<ReleaseHoldRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    match state
        .scheduler
        .release_hold(req.slot_id, &req.session_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(HoldResponse {
            success: true,
            slot: None,
        }),
        Err(e) => scheduler_error_response(e),
    }
}

/// Confirm a held slot into a booking
///
/// POST /api/v1/bookings/confirm
async fn confirm_booking(
    state: web::Data<AppState>,
    req: web::Json<ConfirmBookingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let booking = match state
        .scheduler
        .confirm_booking(req.slot_id, &req.session_id, &req.patient_id, req.session_kind)
        .await
    {
        Ok(booking) => booking,
        Err(e) => return scheduler_error_response(e),
    };

    // Ledger write is best-effort; the in-memory booking already holds the
    // slot, and a failed write is visible in the logs for reconciliation.
    if let Err(e) = state.bookings.record_booking(&booking).await {
        tracing::error!("Failed to persist booking {}: {}", booking.booking_id, e);
    }

    HttpResponse::Ok().json(BookingResponse {
        success: true,
        booking,
    })
}

/// Cancel a confirmed booking
///
/// POST /api/v1/bookings/cancel
async fn cancel_booking(
    state: web::Data<AppState>,
    req: web::Json<CancelBookingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let booking = match state
        .scheduler
        .cancel_booking(req.slot_id, &req.patient_id)
        .await
    {
        Ok(booking) => booking,
        Err(e) => return scheduler_error_response(e),
    };

    if let Some(cancelled_at) = booking.cancelled_at {
        if let Err(e) = state
            .bookings
            .record_cancellation(booking.booking_id, cancelled_at)
            .await
        {
            tracing::error!(
                "Failed to persist cancellation of {}: {}",
                booking.booking_id,
                e
            );
        }
    }

    HttpResponse::Ok().json(BookingResponse {
        success: true,
        booking,
    })
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn scheduler_error_response(err: SchedulerError) -> HttpResponse {
    let (status_code, error) = match &err {
        SchedulerError::SlotNotFound | SchedulerError::BookingNotFound => (404, "Not found"),
        SchedulerError::SlotUnavailable(_) => (409, "Slot unavailable"),
        SchedulerError::HoldNotOwned => (403, "Hold not owned"),
        SchedulerError::HoldExpired => (409, "Hold expired"),
    };

    let response = ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code,
    };

    match status_code {
        403 => HttpResponse::Forbidden().json(response),
        404 => HttpResponse::NotFound().json(response),
        _ => HttpResponse::Conflict().json(response),
    }
}
