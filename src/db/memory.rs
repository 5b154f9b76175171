use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    db::repositories::{CommentRepository, WatchedEpisodeRepository},
    error::AppResult,
    models::{Comment, NewComment, WatchedEpisode},
};

/// Process-local storage used when no database is configured
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<InMemoryStoreInner>>,
}

#[derive(Default)]
struct InMemoryStoreInner {
    comments: Vec<Comment>,
    watched: Vec<WatchedEpisode>,
    next_comment_id: i64,
    next_watched_id: i64,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first, matching the ordering of the Postgres queries
fn newest_first(mut comments: Vec<Comment>) -> Vec<Comment> {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    comments
}

#[async_trait::async_trait]
impl CommentRepository for InMemoryStore {
    async fn get_comments_for_show(&self, show_id: i64) -> AppResult<Vec<Comment>> {
        let inner = self.inner.read().await;
        let comments = inner
            .comments
            .iter()
            .filter(|c| c.show_id == show_id)
            .cloned()
            .collect();
        Ok(newest_first(comments))
    }

    async fn get_comments_for_episode(
        &self,
        show_id: i64,
        episode_id: i64,
    ) -> AppResult<Vec<Comment>> {
        let inner = self.inner.read().await;
        let comments = inner
            .comments
            .iter()
            .filter(|c| c.show_id == show_id && c.episode_id == Some(episode_id))
            .cloned()
            .collect();
        Ok(newest_first(comments))
    }

    async fn add_comment(&self, comment: NewComment) -> AppResult<Comment> {
        let mut inner = self.inner.write().await;
        inner.next_comment_id += 1;

        let created = Comment {
            id: inner.next_comment_id,
            content: comment.content,
            show_id: comment.show_id,
            episode_id: comment.episode_id,
            created_at: Utc::now(),
        };
        inner.comments.push(created.clone());

        Ok(created)
    }

    async fn delete_comment(&self, comment_id: i64) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.comments.len();
        inner.comments.retain(|c| c.id != comment_id);
        Ok(inner.comments.len() < before)
    }
}

#[async_trait::async_trait]
impl WatchedEpisodeRepository for InMemoryStore {
    async fn get_watched_episodes(&self, show_id: i64) -> AppResult<Vec<WatchedEpisode>> {
        let inner = self.inner.read().await;
        Ok(inner
            .watched
            .iter()
            .filter(|w| w.show_id == show_id)
            .cloned()
            .collect())
    }

    async fn mark_episode_watched(
        &self,
        episode_id: i64,
        show_id: i64,
    ) -> AppResult<WatchedEpisode> {
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner
            .watched
            .iter()
            .find(|w| w.show_id == show_id && w.episode_id == episode_id)
        {
            return Ok(existing.clone());
        }

        inner.next_watched_id += 1;
        let record = WatchedEpisode {
            id: inner.next_watched_id,
            episode_id,
            show_id,
            watched_at: Utc::now(),
        };
        inner.watched.push(record.clone());

        Ok(record)
    }

    async fn unmark_episode_watched(&self, episode_id: i64, show_id: i64) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.watched.len();
        inner
            .watched
            .retain(|w| !(w.show_id == show_id && w.episode_id == episode_id));
        Ok(inner.watched.len() < before)
    }

    async fn is_episode_watched(&self, episode_id: i64, show_id: i64) -> AppResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .watched
            .iter()
            .any(|w| w.show_id == show_id && w.episode_id == episode_id))
    }
}
