//! # wordgroup HTTP API Module
//!
//! This module implements the JSON HTTP API using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /group` - Group posted records by a field
//! - `GET /rhymes?word=` - Rhymes, sectioned by syllable count
//! - `GET /similar?word=` - Words with a similar meaning
//! - `GET /saved` - Saved words
//! - `POST /saved` - Save a word
//!
//! ## Configuration (Environment Variables)
//!
//! - `WORDGROUP_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `WORDGROUP_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use middleware::{create_rate_limiter, get_rate_limit_from_env, parse_rate_limit};
// Re-export handlers and types for integration tests (via `wordgroup::api::*`)
pub use handlers::{
    group_handler, health_handler, rhymes_handler, save_handler, saved_handler, similar_handler,
};
pub use types::{
    ErrorResponse, GroupJson, GroupRequest, GroupResponse, HealthResponse, LookupQuery,
    SaveRequest, SavedResponse,
};

use crate::{AppError, DatamuseClient};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use wordgroup_core::SavedWords;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the word API client and the saved-words list.
#[derive(Clone)]
pub struct AppState {
    pub client: DatamuseClient,
    pub saved: Arc<RwLock<SavedWords>>,
}

impl AppState {
    /// Create new app state with an empty saved-words list.
    #[must_use]
    pub fn new(client: DatamuseClient) -> Self {
        Self {
            client,
            saved: Arc::new(RwLock::new(SavedWords::new())),
        }
    }
}

// =============================================================================
// CORS
// =============================================================================

/// Browser origins allowed when `WORDGROUP_CORS_ORIGINS` is unset.
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

/// CORS for `WORDGROUP_CORS_ORIGINS`: `*`, a comma-separated origin list,
/// or unset for local origins only.
fn cors_layer(setting: Option<&str>) -> CorsLayer {
    if setting.map(str::trim) == Some("*") {
        tracing::warn!("CORS: allowing all origins");
        return CorsLayer::permissive();
    }

    let mut origins = setting.map(parse_origins).unwrap_or_default();
    if origins.is_empty() {
        if setting.is_some() {
            tracing::warn!("CORS: no usable origin in WORDGROUP_CORS_ORIGINS, using local origins");
        }
        origins = parse_origins(&LOCAL_ORIGINS.join(","));
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Valid origins from a comma-separated list; bad entries are logged and skipped.
fn parse_origins(list: &str) -> Vec<HeaderValue> {
    list.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("CORS: ignoring origin '{}': {}", origin, e);
                None
            }
        })
        .collect()
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the router: trace, CORS and body limit around the optional
/// rate limiter.
pub fn create_router(state: AppState) -> Router {
    let rate_limit = get_rate_limit_from_env();

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/group", post(handlers::group_handler))
        .route("/rhymes", get(handlers::rhymes_handler))
        .route("/similar", get(handlers::similar_handler))
        .route(
            "/saved",
            get(handlers::saved_handler).post(handlers::save_handler),
        );

    if rate_limit > 0 {
        tracing::info!(rate_limit, "Rate limiting enabled");
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(rate_limit),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(
                    std::env::var("WORDGROUP_CORS_ORIGINS").ok().as_deref(),
                ))
                .layer(axum::extract::DefaultBodyLimit::max(2 * 1024 * 1024)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), AppError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("wordgroup HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
