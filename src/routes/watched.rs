use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::WatchedEpisode,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct MarkWatchedRequest {
    pub episode_id: i64,
    pub show_id: i64,
}

#[derive(Debug, Serialize)]
pub struct WatchedEpisodesResponse {
    pub show_id: i64,
    pub episode_ids: Vec<i64>,
}

/// Episode ids the user has watched for a show
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<i64>,
) -> AppResult<Json<WatchedEpisodesResponse>> {
    let watched = state.tracking.get_watched_episodes(show_id).await?;
    Ok(Json(WatchedEpisodesResponse {
        show_id,
        episode_ids: watched.into_iter().map(|w| w.episode_id).collect(),
    }))
}

pub async fn mark(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MarkWatchedRequest>,
) -> AppResult<(StatusCode, Json<WatchedEpisode>)> {
    let record = state
        .tracking
        .mark_watched(request.episode_id, request.show_id)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn unmark(
    State(state): State<Arc<AppState>>,
    Path((show_id, episode_id)): Path<(i64, i64)>,
) -> AppResult<StatusCode> {
    if state.tracking.unmark_watched(episode_id, show_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Watched episode not found".to_string()))
    }
}
