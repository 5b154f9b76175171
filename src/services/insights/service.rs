use std::sync::Arc;

use crate::{
    db::CommentRepository,
    models::{AiInsight, Comment, Episode, Show},
    services::{catalog::ShowCatalog, insights::TextGenerator},
};

use super::{fallback, prompt};

/// Content used when neither generation nor fallback produced text
pub const INSIGHT_UNAVAILABLE: &str = "Unable to generate insight at this time.";

/// Resolves shows and episodes, then produces an insight for them.
///
/// A resolvable show or episode always gets an insight with non-empty content.
/// Only an unknown show or episode yields `None`.
#[derive(Clone)]
pub struct InsightService {
    catalog: Arc<dyn ShowCatalog>,
    comments: Arc<dyn CommentRepository>,
    generator: Arc<dyn TextGenerator>,
    fallback_enabled: bool,
}

impl InsightService {
    pub fn new(
        catalog: Arc<dyn ShowCatalog>,
        comments: Arc<dyn CommentRepository>,
        generator: Arc<dyn TextGenerator>,
        fallback_enabled: bool,
    ) -> Self {
        Self {
            catalog,
            comments,
            generator,
            fallback_enabled,
        }
    }

    /// Generate an insight for a whole show
    pub async fn get_show_insight(&self, show_id: i64, include_comments: bool) -> Option<AiInsight> {
        let show = self.catalog.get_show(show_id).await?;

        let comments = if include_comments {
            Some(self.show_level_comments(show_id).await)
        } else {
            None
        };

        let prompt = prompt::build_show_prompt(&show, comments.as_deref());
        let content = self
            .complete(&prompt, || {
                tracing::info!(show_id, "Using fallback insight for show");
                fallback::fallback_show_insight(&show)
            })
            .await;

        Some(AiInsight::for_show(&show, content))
    }

    /// Generate an insight for one episode of a show
    pub async fn get_episode_insight(
        &self,
        show_id: i64,
        episode_id: i64,
        include_comments: bool,
    ) -> Option<AiInsight> {
        let show = self.catalog.get_show(show_id).await?;
        let episode = self.find_episode(&show, episode_id).await?;

        let comments = if include_comments {
            Some(self.episode_comments(show_id, episode_id).await)
        } else {
            None
        };

        let prompt = prompt::build_episode_prompt(&episode, &show, comments.as_deref());
        let content = self
            .complete(&prompt, || {
                tracing::info!(show_id, episode_id, "Using fallback insight for episode");
                fallback::fallback_episode_insight(&episode, &show)
            })
            .await;

        Some(AiInsight::for_episode(&show, &episode, content))
    }

    async fn find_episode(&self, show: &Show, episode_id: i64) -> Option<Episode> {
        let episode = self
            .catalog
            .get_episodes(show.id)
            .await
            .into_iter()
            .find(|ep| ep.id == episode_id);

        if episode.is_none() {
            tracing::debug!(show_id = show.id, episode_id, "Episode not found for show");
        }

        episode
    }

    /// One generation attempt, then the fallback, then the static message
    async fn complete(&self, prompt: &str, fallback: impl FnOnce() -> String) -> String {
        let generated = self
            .generator
            .generate(prompt)
            .await
            .filter(|text| !text.is_empty());

        if let Some(text) = generated {
            tracing::info!(generator = self.generator.name(), "Insight generated");
            return text;
        }

        if self.fallback_enabled {
            return fallback();
        }

        tracing::warn!(
            generator = self.generator.name(),
            "Generation unavailable and fallback disabled"
        );
        INSIGHT_UNAVAILABLE.to_string()
    }

    async fn show_level_comments(&self, show_id: i64) -> Vec<Comment> {
        match self.comments.get_comments_for_show(show_id).await {
            Ok(comments) => comments.into_iter().filter(Comment::is_show_level).collect(),
            Err(e) => {
                tracing::warn!(error = %e, show_id, "Failed to load show comments for insight");
                Vec::new()
            }
        }
    }

    async fn episode_comments(&self, show_id: i64, episode_id: i64) -> Vec<Comment> {
        match self.comments.get_comments_for_episode(show_id, episode_id).await {
            Ok(comments) => comments,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    show_id,
                    episode_id,
                    "Failed to load episode comments for insight"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::repositories::MockCommentRepository,
        error::AppError,
        services::{catalog::MockShowCatalog, insights::MockTextGenerator},
    };
    use chrono::Utc;
    use mockall::predicate::eq;

    fn breaking_bad() -> Show {
        Show {
            genres: vec!["Drama".to_string(), "Crime".to_string()],
            ..Show::new(1, "Breaking Bad")
        }
    }

    fn pilot() -> Episode {
        Episode::new(101, 1, "Pilot", 1, 1)
    }

    fn comment(id: i64, content: &str, episode_id: Option<i64>) -> Comment {
        Comment {
            id,
            content: content.to_string(),
            show_id: 1,
            episode_id,
            created_at: Utc::now(),
        }
    }

    fn catalog_with_breaking_bad() -> MockShowCatalog {
        let mut catalog = MockShowCatalog::new();
        catalog
            .expect_get_show()
            .with(eq(1))
            .returning(|_| Some(breaking_bad()));
        catalog
            .expect_get_episodes()
            .with(eq(1))
            .returning(|_| vec![pilot(), Episode::new(102, 1, "Cat's in the Bag...", 1, 2)]);
        catalog.expect_name().return_const("mock");
        catalog
    }

    fn unavailable_generator() -> MockTextGenerator {
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().returning(|_| None);
        generator.expect_name().return_const("mock");
        generator
    }

    fn service(
        catalog: MockShowCatalog,
        comments: MockCommentRepository,
        generator: MockTextGenerator,
        fallback_enabled: bool,
    ) -> InsightService {
        InsightService::new(
            Arc::new(catalog),
            Arc::new(comments),
            Arc::new(generator),
            fallback_enabled,
        )
    }

    #[tokio::test]
    async fn test_unknown_show_returns_none_without_generation() {
        let mut catalog = MockShowCatalog::new();
        catalog.expect_get_show().returning(|_| None);

        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();
        let mut comments = MockCommentRepository::new();
        comments.expect_get_comments_for_show().never();

        let service = service(catalog, comments, generator, true);
        assert!(service.get_show_insight(42, true).await.is_none());
    }

    #[tokio::test]
    async fn test_show_insight_falls_back_to_template() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_get_comments_for_show()
            .returning(|_| Ok(vec![]));

        let service = service(
            catalog_with_breaking_bad(),
            comments,
            unavailable_generator(),
            true,
        );

        let insight = service.get_show_insight(1, true).await.unwrap();

        assert_eq!(insight.show_id, 1);
        assert_eq!(insight.episode_id, None);
        assert_eq!(insight.content, fallback::fallback_show_insight(&breaking_bad()));
        assert_eq!(
            insight.content,
            "This Drama and Crime series explores complex themes through its storytelling and character dynamics."
        );
    }

    #[tokio::test]
    async fn test_show_insight_without_fallback_uses_static_message() {
        let service = service(
            catalog_with_breaking_bad(),
            MockCommentRepository::new(),
            unavailable_generator(),
            false,
        );

        let insight = service.get_show_insight(1, false).await.unwrap();
        assert_eq!(insight.content, INSIGHT_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_empty_generation_is_treated_as_unavailable() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Some(String::new()));
        generator.expect_name().return_const("mock");

        let service = service(
            catalog_with_breaking_bad(),
            MockCommentRepository::new(),
            generator,
            false,
        );

        let insight = service.get_show_insight(1, false).await.unwrap();
        assert_eq!(insight.content, INSIGHT_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_show_insight_uses_generated_text_and_only_show_level_comments() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_get_comments_for_show()
            .with(eq(1))
            .returning(|_| {
                Ok(vec![
                    comment(1, "Loved the slow burn", None),
                    comment(2, "Pilot was great", Some(101)),
                ])
            });

        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt: &str| {
                prompt.contains("User Comments: Loved the slow burn\n")
                    && !prompt.contains("Pilot was great")
            })
            .times(1)
            .returning(|_| Some("A slow-burn crime epic.".to_string()));
        generator.expect_name().return_const("mock");

        let service = service(catalog_with_breaking_bad(), comments, generator, true);
        let insight = service.get_show_insight(1, true).await.unwrap();

        assert_eq!(insight.content, "A slow-burn crime epic.");
    }

    #[tokio::test]
    async fn test_excluded_comments_are_not_fetched() {
        let mut comments = MockCommentRepository::new();
        comments.expect_get_comments_for_show().never();

        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt: &str| !prompt.contains("User Comments"))
            .returning(|_| Some("Insight".to_string()));
        generator.expect_name().return_const("mock");

        let service = service(catalog_with_breaking_bad(), comments, generator, true);
        assert!(service.get_show_insight(1, false).await.is_some());
    }

    #[tokio::test]
    async fn test_comment_store_failure_still_produces_insight() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_get_comments_for_show()
            .returning(|_| Err(AppError::Internal("store offline".to_string())));

        let service = service(
            catalog_with_breaking_bad(),
            comments,
            unavailable_generator(),
            true,
        );

        let insight = service.get_show_insight(1, true).await.unwrap();
        assert_eq!(insight.content, fallback::fallback_show_insight(&breaking_bad()));
    }

    #[tokio::test]
    async fn test_episode_insight_falls_back_to_template() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_get_comments_for_episode()
            .with(eq(1), eq(101))
            .returning(|_, _| Ok(vec![comment(3, "What an opener", Some(101))]));

        let service = service(
            catalog_with_breaking_bad(),
            comments,
            unavailable_generator(),
            true,
        );

        let insight = service.get_episode_insight(1, 101, true).await.unwrap();

        assert_eq!(insight.show_id, 1);
        assert_eq!(insight.episode_id, Some(101));
        assert_eq!(
            insight.content,
            "Episode 1 of Season 1 continues the narrative of 'Breaking Bad', advancing the story while developing its characters. This episode contributes to the overall arc of the series."
        );
    }

    #[tokio::test]
    async fn test_episode_insight_passes_episode_comments_to_prompt() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_get_comments_for_episode()
            .returning(|_, _| Ok(vec![comment(3, "What an opener", Some(101))]));

        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt: &str| {
                prompt.contains("Episode: S01E01 - Pilot\n")
                    && prompt.contains("User Comments: What an opener\n")
            })
            .times(1)
            .returning(|_| Some("A gripping start.".to_string()));
        generator.expect_name().return_const("mock");

        let service = service(catalog_with_breaking_bad(), comments, generator, true);
        let insight = service.get_episode_insight(1, 101, true).await.unwrap();

        assert_eq!(insight.content, "A gripping start.");
    }

    #[tokio::test]
    async fn test_unknown_episode_returns_none() {
        let mut generator = MockTextGenerator::new();
        generator.expect_generate().never();

        let service = service(
            catalog_with_breaking_bad(),
            MockCommentRepository::new(),
            generator,
            true,
        );

        assert!(service.get_episode_insight(1, 999, true).await.is_none());
    }

    #[tokio::test]
    async fn test_episode_of_unknown_show_returns_none() {
        let mut catalog = MockShowCatalog::new();
        catalog.expect_get_show().returning(|_| None);
        catalog.expect_get_episodes().never();

        let service = service(
            catalog,
            MockCommentRepository::new(),
            MockTextGenerator::new(),
            true,
        );

        assert!(service.get_episode_insight(7, 101, true).await.is_none());
    }
}
