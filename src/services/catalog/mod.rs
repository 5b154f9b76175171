/// TV show catalog abstraction
///
/// The catalog is the source of truth for shows and episodes. Lookups never
/// fail the caller: implementations log upstream problems and degrade to
/// "nothing found", which keeps the not-found path the only one handlers
/// need to deal with.
use crate::models::{Episode, SearchResult, Show};

pub mod tvmaze;

pub use tvmaze::TvMazeCatalog;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ShowCatalog: Send + Sync {
    /// Search for shows by name, best matches first
    async fn search_shows(&self, query: &str) -> Vec<SearchResult>;

    /// Fetch a show by its catalog id
    async fn get_show(&self, show_id: i64) -> Option<Show>;

    /// All episodes of a show in catalog order, empty if unknown
    async fn get_episodes(&self, show_id: i64) -> Vec<Episode>;

    /// Catalog name for logging and debugging
    fn name(&self) -> &'static str;
}
