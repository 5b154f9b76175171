use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    db::{CommentRepository, WatchedEpisodeRepository},
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{
        CommentService, EpisodeTrackingService, InsightService, ShowCatalog, ShowService,
        TextGenerator,
    },
};

pub mod comments;
pub mod insights;
pub mod shows;
pub mod watched;

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub shows: ShowService,
    pub tracking: EpisodeTrackingService,
    pub comments: CommentService,
    pub insights: InsightService,
}

impl AppState {
    /// Wires the services over one set of collaborators
    pub fn new(
        catalog: Arc<dyn ShowCatalog>,
        comment_repo: Arc<dyn CommentRepository>,
        watched_repo: Arc<dyn WatchedEpisodeRepository>,
        generator: Arc<dyn TextGenerator>,
        fallback_enabled: bool,
    ) -> Self {
        Self {
            shows: ShowService::new(catalog.clone()),
            tracking: EpisodeTrackingService::new(watched_repo),
            comments: CommentService::new(comment_repo.clone()),
            insights: InsightService::new(catalog, comment_repo, generator, fallback_enabled),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api", api_routes())
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/search", get(shows::search))
        .route("/shows/:show_id", get(shows::details))
        .route("/shows/:show_id/watched", get(watched::list))
        .route("/watched", post(watched::mark))
        .route("/watched/:show_id/:episode_id", delete(watched::unmark))
        .route("/shows/:show_id/comments", get(comments::for_show))
        .route(
            "/shows/:show_id/episodes/:episode_id/comments",
            get(comments::for_episode),
        )
        .route("/comments", post(comments::create))
        .route("/comments/:comment_id", delete(comments::remove))
        .route("/insights", post(insights::generate))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "TV Series Tracker API",
        "health": "/api/health",
    }))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
