/// TVMaze catalog client
///
/// Endpoints used:
/// 1. Search: /search/shows?q= → scored show matches
/// 2. Show: /shows/{id} → show details, 404 for unknown ids
/// 3. Episodes: /shows/{id}/episodes → every episode across seasons
///
/// Responses are read through the optional Redis cache. Upstream failures are
/// logged here and reported to callers as empty results.
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{
        tvmaze::{TvMazeEpisode, TvMazeSearchHit, TvMazeShow},
        Episode, SearchResult, Show,
    },
    services::catalog::ShowCatalog,
};
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;

const SEARCH_CACHE_TTL: u64 = 3600; // 1 hour
const SHOW_CACHE_TTL: u64 = 21600; // 6 hours
const EPISODES_CACHE_TTL: u64 = 21600; // 6 hours

#[derive(Clone)]
pub struct TvMazeCatalog {
    http_client: HttpClient,
    api_url: String,
    cache: Option<Cache>,
}

impl TvMazeCatalog {
    pub fn new(cache: Option<Cache>, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    async fn fetch_search(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        cached!(
            self.cache.as_ref(),
            CacheKey::ShowSearch(query.to_string()),
            SEARCH_CACHE_TTL,
            async move {
                let url = format!("{}/search/shows", self.api_url);
                let response = self
                    .http_client
                    .get(&url)
                    .query(&[("q", query)])
                    .send()
                    .await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::ExternalApi(format!(
                        "TVMaze returned status {}: {}",
                        status, body
                    )));
                }

                let hits: Vec<TvMazeSearchHit> = response.json().await?;
                let results: Vec<SearchResult> =
                    hits.into_iter().map(SearchResult::from).collect();

                tracing::info!(
                    query = %query,
                    results = results.len(),
                    catalog = "tvmaze",
                    "Show search completed"
                );

                Ok(results)
            }
        )
    }

    /// `Ok(None)` for ids TVMaze doesn't know
    async fn fetch_show(&self, show_id: i64) -> AppResult<Option<Show>> {
        cached!(
            self.cache.as_ref(),
            CacheKey::Show(show_id),
            SHOW_CACHE_TTL,
            async move {
                let url = format!("{}/shows/{}", self.api_url, show_id);
                let response = self.http_client.get(&url).send().await?;

                if response.status() == StatusCode::NOT_FOUND {
                    tracing::debug!(show_id, "Show not found in TVMaze");
                    return Ok(None);
                }

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::ExternalApi(format!(
                        "TVMaze returned status {}: {}",
                        status, body
                    )));
                }

                let raw: TvMazeShow = response.json().await?;
                Ok(Some(Show::from(raw)))
            }
        )
    }

    async fn fetch_episodes(&self, show_id: i64) -> AppResult<Vec<Episode>> {
        cached!(
            self.cache.as_ref(),
            CacheKey::Episodes(show_id),
            EPISODES_CACHE_TTL,
            async move {
                let url = format!("{}/shows/{}/episodes", self.api_url, show_id);
                let response = self.http_client.get(&url).send().await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::ExternalApi(format!(
                        "TVMaze returned status {}: {}",
                        status, body
                    )));
                }

                let raw: Vec<TvMazeEpisode> = response.json().await?;
                let episodes: Vec<Episode> = raw
                    .into_iter()
                    .map(|ep| ep.into_episode(show_id))
                    .collect();

                tracing::info!(
                    show_id,
                    episodes = episodes.len(),
                    catalog = "tvmaze",
                    "Episodes fetched"
                );

                Ok(episodes)
            }
        )
    }
}

#[async_trait::async_trait]
impl ShowCatalog for TvMazeCatalog {
    async fn search_shows(&self, query: &str) -> Vec<SearchResult> {
        match self.fetch_search(query).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(error = %e, query = %query, "Error searching shows");
                Vec::new()
            }
        }
    }

    async fn get_show(&self, show_id: i64) -> Option<Show> {
        match self.fetch_show(show_id).await {
            Ok(show) => show,
            Err(e) => {
                tracing::error!(error = %e, show_id, "Error fetching show");
                None
            }
        }
    }

    async fn get_episodes(&self, show_id: i64) -> Vec<Episode> {
        match self.fetch_episodes(show_id).await {
            Ok(episodes) => episodes,
            Err(e) => {
                tracing::error!(error = %e, show_id, "Error fetching episodes");
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tvmaze"
    }
}
