use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::AiInsight,
    routes::AppState,
};

fn include_comments_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct InsightRequest {
    pub show_id: i64,
    #[serde(default)]
    pub episode_id: Option<i64>,
    #[serde(default = "include_comments_default")]
    pub include_comments: bool,
}

/// Handler for insight generation endpoint
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<InsightRequest>,
) -> AppResult<Json<AiInsight>> {
    tracing::info!(
        request_id = %request_id,
        show_id = request.show_id,
        episode_id = ?request.episode_id,
        include_comments = request.include_comments,
        "Processing insight request"
    );

    let insight = match request.episode_id {
        Some(episode_id) => {
            state
                .insights
                .get_episode_insight(request.show_id, episode_id, request.include_comments)
                .await
        }
        None => {
            state
                .insights
                .get_show_insight(request.show_id, request.include_comments)
                .await
        }
    };

    let insight =
        insight.ok_or_else(|| AppError::NotFound("Show or episode not found".to_string()))?;

    tracing::info!(request_id = %request_id, "Insight ready");

    Ok(Json(insight))
}
