use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::repositories::{CommentRepository, WatchedEpisodeRepository},
    error::AppResult,
    models::{Comment, NewComment, WatchedEpisode},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded migrations in `migrations/`
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Postgres-backed comment and watched-episode storage
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CommentRepository for PgStore {
    async fn get_comments_for_show(&self, show_id: i64) -> AppResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, show_id, episode_id, created_at
            FROM comments
            WHERE show_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(show_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn get_comments_for_episode(
        &self,
        show_id: i64,
        episode_id: i64,
    ) -> AppResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, show_id, episode_id, created_at
            FROM comments
            WHERE show_id = $1 AND episode_id = $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(show_id)
        .bind(episode_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn add_comment(&self, comment: NewComment) -> AppResult<Comment> {
        let created = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, show_id, episode_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, show_id, episode_id, created_at
            "#,
        )
        .bind(&comment.content)
        .bind(comment.show_id)
        .bind(comment.episode_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            comment_id = created.id,
            show_id = created.show_id,
            episode_id = ?created.episode_id,
            "Comment stored"
        );

        Ok(created)
    }

    async fn delete_comment(&self, comment_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl WatchedEpisodeRepository for PgStore {
    async fn get_watched_episodes(&self, show_id: i64) -> AppResult<Vec<WatchedEpisode>> {
        let watched = sqlx::query_as::<_, WatchedEpisode>(
            r#"
            SELECT id, episode_id, show_id, watched_at
            FROM watched_episodes
            WHERE show_id = $1
            ORDER BY watched_at
            "#,
        )
        .bind(show_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(watched)
    }

    async fn mark_episode_watched(
        &self,
        episode_id: i64,
        show_id: i64,
    ) -> AppResult<WatchedEpisode> {
        // The unique index on (show_id, episode_id) turns a repeat mark into a no-op
        let inserted = sqlx::query_as::<_, WatchedEpisode>(
            r#"
            INSERT INTO watched_episodes (episode_id, show_id)
            VALUES ($1, $2)
            ON CONFLICT (show_id, episode_id) DO NOTHING
            RETURNING id, episode_id, show_id, watched_at
            "#,
        )
        .bind(episode_id)
        .bind(show_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(record) = inserted {
            return Ok(record);
        }

        let existing = sqlx::query_as::<_, WatchedEpisode>(
            r#"
            SELECT id, episode_id, show_id, watched_at
            FROM watched_episodes
            WHERE show_id = $1 AND episode_id = $2
            "#,
        )
        .bind(show_id)
        .bind(episode_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(existing)
    }

    async fn unmark_episode_watched(&self, episode_id: i64, show_id: i64) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM watched_episodes WHERE show_id = $1 AND episode_id = $2")
                .bind(show_id)
                .bind(episode_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_episode_watched(&self, episode_id: i64, show_id: i64) -> AppResult<bool> {
        let watched: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM watched_episodes WHERE show_id = $1 AND episode_id = $2
            )
            "#,
        )
        .bind(show_id)
        .bind(episode_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(watched)
    }
}
