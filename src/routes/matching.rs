use crate::core::{MatchEngine, MatchError, NormalizeError};
use crate::models::{ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse};
use crate::scheduler::SlotScheduler;
use crate::services::{BookingStore, CacheKey, CacheManager, DirectoryClient};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryClient>,
    pub cache: Arc<CacheManager>,
    pub bookings: Arc<BookingStore>,
    pub scheduler: Arc<SlotScheduler>,
    pub engine: MatchEngine,
    pub max_matches: usize,
    pub hold_ttl_secs: u64,
}

/// Configure matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.bookings.health_check().await.unwrap_or(false);
    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "patientId": "string",
///   "therapyType": "individual|couple|child",
///   "answers": { "questionKey": { "kind": "...", "value": ... } },
///   "maxMatches": 3
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let patient_id = &req.patient_id;
    let limit = req.max_matches.map(|n| n.min(state.max_matches));

    tracing::info!(
        "Finding matches for patient: {} ({})",
        patient_id,
        req.therapy_type.as_str()
    );

    // Therapist pool is cached per therapy type; profiles change rarely
    // during a questionnaire session.
    let pool_key = CacheKey::therapist_pool(req.therapy_type);
    let candidates = match state.cache.get(&pool_key).await {
        Ok(pool) => pool,
        Err(_) => match state.directory.list_therapists(req.therapy_type).await {
            Ok(pool) => {
                if let Err(e) = state.cache.set(&pool_key, &pool).await {
                    tracing::warn!("Failed to cache therapist pool: {}", e);
                }
                pool
            }
            Err(e) => {
                tracing::error!("Failed to list therapists: {}", e);
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to query therapists".to_string(),
                    message: e.to_string(),
                    status_code: 500,
                });
            }
        },
    };

    let total_candidates = candidates.len();
    tracing::debug!("Scoring {} candidates for {}", total_candidates, patient_id);

    let result = match state.engine.find_matches(
        patient_id,
        req.therapy_type,
        &req.answers,
        candidates,
        limit,
    ) {
        Ok(result) => result,
        Err(e) => return match_error_response(e),
    };

    let cache_key = CacheKey::matches(patient_id);
    if let Err(e) = state.cache.set(&cache_key, &result).await {
        tracing::warn!("Failed to cache match result: {}", e);
    }

    tracing::info!(
        "Returning {} matches for patient {} (from {} candidates)",
        result.entries.len(),
        patient_id,
        total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse::from(result))
}

fn match_error_response(err: MatchError) -> HttpResponse {
    match err {
        MatchError::Normalize(NormalizeError::IncompleteAnswers(ref keys)) => {
            HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: "Incomplete questionnaire".to_string(),
                message: format!("Missing required answers: {}", keys.join(", ")),
                status_code: 422,
            })
        }
        MatchError::Normalize(e @ NormalizeError::InvalidAnswer(_)) => {
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid answer".to_string(),
                message: e.to_string(),
                status_code: 400,
            })
        }
        MatchError::Select(e) => HttpResponse::NotFound().json(ErrorResponse {
            error: "No eligible therapists".to_string(),
            message: e.to_string(),
            status_code: 404,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
