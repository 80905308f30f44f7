//! dreamtell-api library interface
//!
//! Exposes the router and application state for integration testing.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::services::story_client::StoryClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Client for the hosted story-generation LLM
    pub story: Arc<StoryClient>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(db: SqlitePool, story: Arc<StoryClient>) -> Self {
        Self {
            db,
            story,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Record an error for the `/health` diagnostics field
    pub async fn record_error(&self, message: impl Into<String>) {
        *self.last_error.write().await = Some(message.into());
    }
}

/// Build application router
///
/// Service endpoints live under the `/api` prefix; `/health` sits outside it.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(api::root_routes())
        .merge(api::dream_routes())
        .merge(api::status_routes());

    Router::new()
        .nest("/api", api)
        .merge(api::health_routes())
        .with_state(state)
}

/// Build the CORS layer from the configured origin list.
///
/// A `"*"` entry (the default) allows any origin; tower-http forbids
/// credentials with a wildcard, so credentials are only enabled for
/// explicit origin lists.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let parsed: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(AllowOrigin::list(parsed))
    }
}
