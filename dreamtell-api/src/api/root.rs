//! API root endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// GET / (mounted under the /api prefix) response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// GET /
pub async fn api_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Dream Teller API - Transform your dreams into videos and podcasts".to_string(),
    })
}

/// Build root routes
pub fn root_routes() -> Router<AppState> {
    Router::new().route("/", get(api_root))
}
