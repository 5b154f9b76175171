use std::sync::Arc;

use crate::{db::WatchedEpisodeRepository, error::AppResult, models::WatchedEpisode};

/// Watched-episode bookkeeping
#[derive(Clone)]
pub struct EpisodeTrackingService {
    repo: Arc<dyn WatchedEpisodeRepository>,
}

impl EpisodeTrackingService {
    pub fn new(repo: Arc<dyn WatchedEpisodeRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_watched_episodes(&self, show_id: i64) -> AppResult<Vec<WatchedEpisode>> {
        self.repo.get_watched_episodes(show_id).await
    }

    pub async fn mark_watched(&self, episode_id: i64, show_id: i64) -> AppResult<WatchedEpisode> {
        let record = self.repo.mark_episode_watched(episode_id, show_id).await?;
        tracing::info!(show_id, episode_id, "Episode marked as watched");
        Ok(record)
    }

    pub async fn unmark_watched(&self, episode_id: i64, show_id: i64) -> AppResult<bool> {
        self.repo.unmark_episode_watched(episode_id, show_id).await
    }

    pub async fn is_watched(&self, episode_id: i64, show_id: i64) -> AppResult<bool> {
        self.repo.is_episode_watched(episode_id, show_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::MockWatchedEpisodeRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_mark_watched_forwards_ids_in_order() {
        let mut repo = MockWatchedEpisodeRepository::new();
        repo.expect_mark_episode_watched()
            .with(eq(101), eq(1))
            .times(1)
            .returning(|episode_id, show_id| {
                Ok(WatchedEpisode {
                    id: 1,
                    episode_id,
                    show_id,
                    watched_at: Utc::now(),
                })
            });

        let service = EpisodeTrackingService::new(Arc::new(repo));
        let record = service.mark_watched(101, 1).await.unwrap();

        assert_eq!(record.episode_id, 101);
        assert_eq!(record.show_id, 1);
    }

    #[tokio::test]
    async fn test_unmark_reports_missing_record() {
        let mut repo = MockWatchedEpisodeRepository::new();
        repo.expect_unmark_episode_watched()
            .returning(|_, _| Ok(false));

        let service = EpisodeTrackingService::new(Arc::new(repo));
        assert!(!service.unmark_watched(101, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_watched() {
        let mut repo = MockWatchedEpisodeRepository::new();
        repo.expect_is_episode_watched()
            .with(eq(101), eq(1))
            .returning(|_, _| Ok(true));

        let service = EpisodeTrackingService::new(Arc::new(repo));
        assert!(service.is_watched(101, 1).await.unwrap());
    }
}
