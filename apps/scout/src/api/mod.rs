//! # Scout HTTP API Module
//!
//! HTTP front-end for the deck pipeline, served with axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /status` - Catalog contents per locale
//! - `GET /deck/{code}?locale=` - Decode, resolve and classify a deck code
//! - `GET /cards/{code}?locale=` - Card details (champions with their levels)
//! - `GET /search?q=&locale=` - Card name suggestions
//! - `GET /guilds/{id}/settings` / `PUT /guilds/{id}/settings` - Per-guild settings
//! - `POST /interactions` - Slash-command style invocations (`deck`, `info`, `search`, `config`)
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `SCOUT_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `SCOUT_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `SCOUT_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
pub mod options;
mod types;

pub use auth::get_api_key_from_env;
pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    BucketJson, CardResponse, Choice, DeckResponse, HealthResponse, InteractionKind,
    InteractionRequest, InteractionResponse, LocaleQuery, SearchQuery, SearchResponse,
    SettingsRequest, SettingsResponse, StatusResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use scout_core::{Catalog, Localizer, ScoutError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Request bodies are small JSON documents.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    /// Card catalog and guild settings.
    pub catalog: Arc<RwLock<Catalog>>,
    pub localizer: Arc<Localizer>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog, localizer: Localizer) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            localizer: Arc::new(localizer),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from `SCOUT_CORS_ORIGINS`.
///
/// - `*`: allows all origins
/// - unset: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("SCOUT_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (SCOUT_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in SCOUT_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                with_methods(CorsLayer::new().allow_origin(allowed_origins))
            }
        }
        None => {
            tracing::info!("CORS: No SCOUT_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

fn with_methods(cors: CorsLayer) -> CorsLayer {
    cors.allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    with_methods(CorsLayer::new().allow_origin(origins))
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
/// 5. Authentication (if configured)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let has_auth = get_api_key_from_env().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set SCOUT_API_KEY to enable authentication."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/deck/{code}", get(handlers::deck_handler))
        .route("/cards/{code}", get(handlers::card_handler))
        .route("/search", get(handlers::search_handler))
        .route(
            "/guilds/{id}/settings",
            get(handlers::get_settings_handler).put(handlers::put_settings_handler),
        )
        .route("/interactions", post(handlers::interactions_handler));

    if has_auth {
        router = router.layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(
    addr: &str,
    catalog: Catalog,
    localizer: Localizer,
) -> Result<(), ScoutError> {
    let router = create_router(AppState::new(catalog, localizer));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ScoutError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Scout HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| ScoutError::Io(format!("Server error: {}", e)))
}
