use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Comment,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub show_id: i64,
    #[serde(default)]
    pub episode_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

/// Comments on the show itself
pub async fn for_show(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<i64>,
) -> AppResult<Json<CommentsResponse>> {
    let comments = state.comments.get_show_comments(show_id).await?;
    Ok(Json(CommentsResponse { comments }))
}

pub async fn for_episode(
    State(state): State<Arc<AppState>>,
    Path((show_id, episode_id)): Path<(i64, i64)>,
) -> AppResult<Json<CommentsResponse>> {
    let comments = state
        .comments
        .get_episode_comments(show_id, episode_id)
        .await?;
    Ok(Json(CommentsResponse { comments }))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    let comment = state
        .comments
        .add_comment(request.content, request.show_id, request.episode_id)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<i64>,
) -> AppResult<StatusCode> {
    if state.comments.delete_comment(comment_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Comment not found".to_string()))
    }
}
