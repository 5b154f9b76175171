use serde::Deserialize;

use super::{Episode, SearchResult, Show};

// ============================================================================
// TVMaze API Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeImage {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

impl TvMazeImage {
    fn best_url(self) -> Option<String> {
        self.medium.or(self.original)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeRating {
    #[serde(default)]
    pub average: Option<f64>,
}

/// Raw show payload from GET /shows/{id}
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvMazeShow {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<TvMazeImage>,
    #[serde(default)]
    pub premiered: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: Option<TvMazeRating>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub official_site: Option<String>,
}

impl From<TvMazeShow> for Show {
    fn from(raw: TvMazeShow) -> Self {
        Show {
            id: raw.id,
            name: raw.name,
            summary: raw.summary,
            image_url: raw.image.and_then(TvMazeImage::best_url),
            premiered: raw.premiered,
            genres: raw.genres,
            rating: raw.rating.and_then(|r| r.average),
            status: raw.status,
            official_site: raw.official_site,
        }
    }
}

/// Raw episode payload from GET /shows/{id}/episodes
#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeEpisode {
    pub id: i64,
    pub name: String,
    pub season: i32,
    #[serde(default)]
    pub number: Option<i32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub airdate: Option<String>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub image: Option<TvMazeImage>,
}

impl TvMazeEpisode {
    /// TVMaze episode payloads don't carry the show id, so the caller supplies it
    pub fn into_episode(self, show_id: i64) -> Episode {
        Episode {
            id: self.id,
            show_id,
            name: self.name,
            season: self.season,
            number: self.number.unwrap_or(0),
            summary: self.summary,
            airdate: self.airdate,
            runtime: self.runtime,
            image_url: self.image.and_then(TvMazeImage::best_url),
        }
    }
}

/// One hit from GET /search/shows
#[derive(Debug, Clone, Deserialize)]
pub struct TvMazeSearchHit {
    #[serde(default)]
    pub score: f64,
    pub show: TvMazeShow,
}

impl From<TvMazeSearchHit> for SearchResult {
    fn from(hit: TvMazeSearchHit) -> Self {
        SearchResult {
            score: hit.score,
            show: hit.show.into(),
        }
    }
}
