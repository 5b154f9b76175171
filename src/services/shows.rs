use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    models::{Episode, SearchResult, Show},
    services::catalog::ShowCatalog,
};

/// Show search and details on top of the catalog
#[derive(Clone)]
pub struct ShowService {
    catalog: Arc<dyn ShowCatalog>,
}

impl ShowService {
    pub fn new(catalog: Arc<dyn ShowCatalog>) -> Self {
        Self { catalog }
    }

    /// Blank queries return nothing without calling the catalog
    pub async fn search_shows(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        self.catalog.search_shows(query).await
    }

    pub async fn get_show_details(&self, show_id: i64) -> Option<Show> {
        self.catalog.get_show(show_id).await
    }

    /// Episodes keyed by season in ascending order, each season sorted by episode number
    pub async fn get_episodes_by_season(&self, show_id: i64) -> BTreeMap<i32, Vec<Episode>> {
        group_by_season(self.catalog.get_episodes(show_id).await)
    }
}

fn group_by_season(episodes: Vec<Episode>) -> BTreeMap<i32, Vec<Episode>> {
    let mut seasons: BTreeMap<i32, Vec<Episode>> = BTreeMap::new();
    for episode in episodes {
        seasons.entry(episode.season).or_default().push(episode);
    }
    for season_episodes in seasons.values_mut() {
        season_episodes.sort_by_key(|ep| ep.number);
    }
    seasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::MockShowCatalog;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_blank_search_skips_catalog() {
        let mut catalog = MockShowCatalog::new();
        catalog.expect_search_shows().never();

        let service = ShowService::new(Arc::new(catalog));
        assert!(service.search_shows("   ").await.is_empty());
    }

    #[tokio::test]
    async fn test_search_trims_query() {
        let mut catalog = MockShowCatalog::new();
        catalog
            .expect_search_shows()
            .withf(|query: &str| query == "lost")
            .times(1)
            .returning(|_| {
                vec![SearchResult {
                    score: 0.8,
                    show: Show::new(123, "Lost"),
                }]
            });

        let service = ShowService::new(Arc::new(catalog));
        let results = service.search_shows("  lost ").await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].show.name, "Lost");
    }

    #[tokio::test]
    async fn test_episodes_grouped_and_sorted_by_season() {
        let mut catalog = MockShowCatalog::new();
        catalog.expect_get_episodes().with(eq(1)).returning(|_| {
            vec![
                Episode::new(203, 1, "S2E2", 2, 2),
                Episode::new(102, 1, "S1E2", 1, 2),
                Episode::new(201, 1, "S2E1", 2, 1),
                Episode::new(101, 1, "S1E1", 1, 1),
                Episode::new(100, 1, "S1 special", 1, 0),
            ]
        });

        let service = ShowService::new(Arc::new(catalog));
        let seasons = service.get_episodes_by_season(1).await;

        assert_eq!(seasons.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        let season_one: Vec<i64> = seasons[&1].iter().map(|ep| ep.id).collect();
        assert_eq!(season_one, vec![100, 101, 102]);
        let season_two: Vec<i64> = seasons[&2].iter().map(|ep| ep.id).collect();
        assert_eq!(season_two, vec![201, 203]);
    }

    #[tokio::test]
    async fn test_no_episodes_yields_no_seasons() {
        let mut catalog = MockShowCatalog::new();
        catalog.expect_get_episodes().returning(|_| Vec::new());

        let service = ShowService::new(Arc::new(catalog));
        assert!(service.get_episodes_by_season(1).await.is_empty());
    }
}
