use std::sync::Arc;

use crate::{
    db::CommentRepository,
    error::{AppError, AppResult},
    models::{Comment, NewComment},
};

/// Longest comment accepted, in characters
pub const MAX_COMMENT_LENGTH: usize = 2000;

#[derive(Clone)]
pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn CommentRepository>) -> Self {
        Self { repo }
    }

    /// Comments on the show itself, episode comments excluded
    pub async fn get_show_comments(&self, show_id: i64) -> AppResult<Vec<Comment>> {
        let comments = self.repo.get_comments_for_show(show_id).await?;
        Ok(comments.into_iter().filter(Comment::is_show_level).collect())
    }

    pub async fn get_episode_comments(
        &self,
        show_id: i64,
        episode_id: i64,
    ) -> AppResult<Vec<Comment>> {
        self.repo.get_comments_for_episode(show_id, episode_id).await
    }

    /// Every comment for the show, episode comments included
    pub async fn get_all_show_comments(&self, show_id: i64) -> AppResult<Vec<Comment>> {
        self.repo.get_comments_for_show(show_id).await
    }

    pub async fn add_comment(
        &self,
        content: String,
        show_id: i64,
        episode_id: Option<i64>,
    ) -> AppResult<Comment> {
        let length = content.chars().count();
        if length == 0 || length > MAX_COMMENT_LENGTH {
            return Err(AppError::InvalidInput(format!(
                "Comment content must be between 1 and {} characters",
                MAX_COMMENT_LENGTH
            )));
        }

        self.repo
            .add_comment(NewComment {
                content,
                show_id,
                episode_id,
            })
            .await
    }

    pub async fn delete_comment(&self, comment_id: i64) -> AppResult<bool> {
        self.repo.delete_comment(comment_id).await
    }
}
