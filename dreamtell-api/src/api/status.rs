//! Status check API handlers
//!
//! POST /status, GET /status (mounted under the /api prefix).

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::db;
use crate::error::ApiResult;
use crate::models::{StatusCheck, StatusCheckCreate};
use crate::AppState;

/// POST /status
pub async fn create_status_check(
    State(state): State<AppState>,
    Json(input): Json<StatusCheckCreate>,
) -> ApiResult<Json<StatusCheck>> {
    let check = StatusCheck::new(input.client_name);
    db::status::insert_status_check(&state.db, &check).await?;

    Ok(Json(check))
}

/// GET /status
pub async fn get_status_checks(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<StatusCheck>>> {
    let checks = db::status::list_status_checks(&state.db).await?;
    Ok(Json(checks))
}

/// Build status check routes
pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/status", post(create_status_check))
        .route("/status", get(get_status_checks))
}
