use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Episode, SearchResult, Show},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SeasonEpisodes {
    pub season: i32,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Serialize)]
pub struct ShowDetailResponse {
    pub show: Show,
    pub seasons: Vec<SeasonEpisodes>,
}

/// Handler for show search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let results = state.shows.search_shows(&params.q).await;
    Json(SearchResponse {
        results,
        query: params.q,
    })
}

/// Show details with episodes grouped by season
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<i64>,
) -> AppResult<Json<ShowDetailResponse>> {
    let show = state
        .shows
        .get_show_details(show_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Show with ID {} not found", show_id)))?;

    let seasons = state
        .shows
        .get_episodes_by_season(show_id)
        .await
        .into_iter()
        .map(|(season, episodes)| SeasonEpisodes { season, episodes })
        .collect();

    Ok(Json(ShowDetailResponse { show, seasons }))
}
