mod config;
mod core;
mod models;
mod routes;
mod scheduler;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use core::{CategoryWeights, MatchEngine, ProjectionSettings};
use routes::AppState;
use scheduler::SlotScheduler;
use services::{BookingStore, CacheManager, DirectoryClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap_or_default())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting TheraMatch service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize directory client
    let directory = Arc::new(
        DirectoryClient::new(
            settings.directory.endpoint.clone(),
            settings.directory.api_key.clone(),
        )
        .unwrap_or_else(|e| {
            error!("Failed to create directory client: {}", e);
            panic!("Directory client error: {}", e);
        }),
    );

    info!("Directory client initialized");

    // Initialize cache
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let cache_entries = settings.cache.max_entries.unwrap_or(1000);
    let cache = Arc::new(CacheManager::new(cache_entries, cache_ttl));

    info!(
        "Cache initialized ({} entries, TTL: {}s)",
        cache_entries, cache_ttl
    );

    // Initialize booking ledger
    let db_max_conn = settings.database.max_connections.unwrap_or(10);
    let db_min_conn = settings.database.min_connections.unwrap_or(1);

    let bookings = Arc::new(
        BookingStore::new(&settings.database.url, db_max_conn, db_min_conn)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                panic!("PostgreSQL connection error: {}", e);
            }),
    );

    info!("Booking store initialized (max: {} connections)", db_max_conn);

    // Initialize the match engine with configured weights
    let weights = CategoryWeights {
        emotional: settings.scoring.weights.emotional_state,
        relational: settings.scoring.weights.relational,
        conflict: settings.scoring.weights.conflict,
        development: settings.scoring.weights.development,
        preferences: settings.scoring.weights.preferences,
        goals: settings.scoring.weights.goals,
        context: settings.scoring.weights.context,
        profile: settings.scoring.weights.profile,
    };

    let projection = ProjectionSettings {
        required_languages: settings.matching.projection.required_languages.clone(),
        service_area: settings.matching.projection.service_area.clone(),
        price_full_score_cents: settings.matching.projection.price_full_score_cents,
        price_zero_score_cents: settings.matching.projection.price_zero_score_cents,
    };

    let default_matches = settings.matching.default_matches.unwrap_or(3);
    let max_matches = settings.matching.max_matches.unwrap_or(10);
    let engine = MatchEngine::new(weights, projection, default_matches);

    info!("Match engine initialized (default matches: {})", default_matches);

    // Seed the scheduler from published calendars
    let scheduler = Arc::new(SlotScheduler::new());
    match directory.fetch_calendar_slots().await {
        Ok(slots) => {
            let loaded = scheduler.load_slots(slots).await;
            info!("Scheduler seeded with {} calendar slots", loaded);
        }
        Err(e) => {
            warn!("Failed to fetch calendar slots, starting empty: {}", e);
        }
    }

    // Background sweeper reclaims expired holds
    let hold_ttl_secs = settings.scheduling.hold_ttl_secs.unwrap_or(300);
    let sweep_interval = settings.scheduling.sweep_interval_secs.unwrap_or(30);
    {
        let scheduler = scheduler.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(sweep_interval));
            loop {
                interval.tick().await;
                scheduler.sweep_expired_holds(chrono::Utc::now()).await;
            }
        });
    }

    info!(
        "Hold sweeper running (TTL: {}s, interval: {}s)",
        hold_ttl_secs, sweep_interval
    );

    // Build application state
    let app_state = AppState {
        directory,
        cache,
        bookings,
        scheduler,
        engine,
        max_matches,
        hold_ttl_secs,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
