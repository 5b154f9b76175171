use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod tvmaze;

/// A TV show as returned by the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Show {
    pub id: i64,
    pub name: String,
    /// HTML-bearing summary straight from the catalog
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub premiered: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub rating: Option<f64>,
    pub status: Option<String>,
    pub official_site: Option<String>,
}

impl Show {
    /// Creates a show with just a name, leaving every optional field empty
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            summary: None,
            image_url: None,
            premiered: None,
            genres: Vec::new(),
            rating: None,
            status: None,
            official_site: None,
        }
    }
}

/// A single episode of a show
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    pub id: i64,
    pub show_id: i64,
    pub name: String,
    pub season: i32,
    /// Number within the season, 0 for specials or unknown
    pub number: i32,
    pub summary: Option<String>,
    pub airdate: Option<String>,
    pub runtime: Option<i32>,
    pub image_url: Option<String>,
}

impl Episode {
    pub fn new(id: i64, show_id: i64, name: impl Into<String>, season: i32, number: i32) -> Self {
        Self {
            id,
            show_id,
            name: name.into(),
            season,
            number,
            summary: None,
            airdate: None,
            runtime: None,
            image_url: None,
        }
    }
}

/// Scored show match from a catalog search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub score: f64,
    pub show: Show,
}

/// User comment on a show, or on one of its episodes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub show_id: i64,
    /// `None` means the comment is on the show itself
    pub episode_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// True when the comment belongs to the show as a whole
    pub fn is_show_level(&self) -> bool {
        self.episode_id.is_none()
    }
}

/// Comment that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub content: String,
    pub show_id: i64,
    pub episode_id: Option<i64>,
}

/// Record of an episode the user has watched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct WatchedEpisode {
    pub id: i64,
    pub episode_id: i64,
    pub show_id: i64,
    pub watched_at: DateTime<Utc>,
}

/// Generated or templated commentary about a show or episode.
///
/// Never persisted. When `episode_id` is set, `show_id` is the show that owns
/// that episode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiInsight {
    pub content: String,
    pub show_id: i64,
    pub episode_id: Option<i64>,
    pub generated_at: DateTime<Utc>,
}

impl AiInsight {
    pub fn for_show(show: &Show, content: String) -> Self {
        Self {
            content,
            show_id: show.id,
            episode_id: None,
            generated_at: Utc::now(),
        }
    }

    pub fn for_episode(show: &Show, episode: &Episode, content: String) -> Self {
        Self {
            content,
            show_id: show.id,
            episode_id: Some(episode.id),
            generated_at: Utc::now(),
        }
    }
}
