//! Dream generation API handlers
//!
//! POST /generate-dream, GET /dream/{id}, GET /dreams/session/{id}
//! (mounted under the /api prefix).

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use dreamtell_common::uuid_utils;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::models::{DreamGeneration, DreamRequest, GenerationStatus};
use crate::services::media;
use crate::AppState;

/// POST /generate-dream
///
/// Rewrites the dream as a short narrative via the story client, persists
/// the record, then attaches placeholder media URLs and persists the
/// completed record.
pub async fn generate_dream(
    State(state): State<AppState>,
    Json(request): Json<DreamRequest>,
) -> ApiResult<Json<DreamGeneration>> {
    if request.dream_text.trim().is_empty() {
        return Err(ApiError::BadRequest("dream_text must not be empty".to_string()));
    }

    // Generate a session ID if not provided
    let session_id = request
        .session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| uuid_utils::generate().to_string());

    tracing::info!(
        session_id = %session_id,
        format_type = ?request.format_type,
        dream_chars = request.dream_text.len(),
        "Generating dream story"
    );

    let story = match state.story.generate_story(&request.dream_text).await {
        Ok(story) => story,
        Err(e) => {
            tracing::error!("Error generating dream content: {}", e);
            state
                .record_error(format!("Failed to generate dream content: {}", e))
                .await;
            return Err(ApiError::Story(e));
        }
    };

    let mut dream = DreamGeneration::new(
        request.dream_text,
        story,
        request.format_type,
        request.include_audio,
        session_id,
    );

    db::dreams::save_dream(&state.db, &dream).await?;

    // Media generation is simulated: attach placeholder URLs and complete
    media::attach_placeholder_media(&mut dream);
    dream.status = GenerationStatus::Completed;

    db::dreams::save_dream(&state.db, &dream).await?;

    Ok(Json(dream))
}

/// GET /dream/{dream_id}
pub async fn get_dream(
    State(state): State<AppState>,
    Path(dream_id): Path<Uuid>,
) -> ApiResult<Json<DreamGeneration>> {
    let dream = db::dreams::get_dream(&state.db, dream_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Dream generation not found".to_string()))?;

    Ok(Json(dream))
}

/// GET /dreams/session/{session_id}
pub async fn get_session_dreams(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<Vec<DreamGeneration>>> {
    let dreams = db::dreams::list_session_dreams(&state.db, &session_id).await?;
    Ok(Json(dreams))
}

/// Build dream generation routes
pub fn dream_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-dream", post(generate_dream))
        .route("/dream/:dream_id", get(get_dream))
        .route("/dreams/session/:session_id", get(get_session_dreams))
}
