/// Storage abstractions for user-owned data
///
/// Both the Postgres store and the in-memory store implement these traits, so
/// services and handlers only ever hold `Arc<dyn ...>` handles.
use crate::{
    error::AppResult,
    models::{Comment, NewComment, WatchedEpisode},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CommentRepository: Send + Sync {
    /// All comments for a show, episode-scoped ones included, newest first
    async fn get_comments_for_show(&self, show_id: i64) -> AppResult<Vec<Comment>>;

    /// Comments attached to one episode of a show, newest first
    async fn get_comments_for_episode(
        &self,
        show_id: i64,
        episode_id: i64,
    ) -> AppResult<Vec<Comment>>;

    async fn add_comment(&self, comment: NewComment) -> AppResult<Comment>;

    /// Returns `true` if a comment was found and deleted
    async fn delete_comment(&self, comment_id: i64) -> AppResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WatchedEpisodeRepository: Send + Sync {
    async fn get_watched_episodes(&self, show_id: i64) -> AppResult<Vec<WatchedEpisode>>;

    /// Marks an episode as watched. Marking twice returns the original record.
    async fn mark_episode_watched(&self, episode_id: i64, show_id: i64)
        -> AppResult<WatchedEpisode>;

    /// Returns `true` if a record was found and deleted
    async fn unmark_episode_watched(&self, episode_id: i64, show_id: i64) -> AppResult<bool>;

    async fn is_episode_watched(&self, episode_id: i64, show_id: i64) -> AppResult<bool>;
}
