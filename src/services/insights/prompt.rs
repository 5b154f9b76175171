use crate::models::{Comment, Episode, Show};

use super::sanitize::strip_html_tags;

/// Comments beyond this many are left out of the prompt
pub const MAX_PROMPT_COMMENTS: usize = 5;

const NO_SUMMARY: &str = "No summary available";
const UNKNOWN_GENRES: &str = "Unknown";
const RESPOND_ONLY: &str = "Respond with ONLY the insight, no additional text. [/INST]";

fn summary_text(summary: Option<&str>) -> String {
    match summary {
        Some(s) if !s.is_empty() => strip_html_tags(Some(s)),
        _ => NO_SUMMARY.to_string(),
    }
}

fn genre_list(show: &Show) -> String {
    if show.genres.is_empty() {
        UNKNOWN_GENRES.to_string()
    } else {
        show.genres.join(", ")
    }
}

/// Appends the comment section. Only the first `MAX_PROMPT_COMMENTS` in caller order are used.
fn push_comments(prompt: &mut String, comments: Option<&[Comment]>) {
    let Some(comments) = comments.filter(|c| !c.is_empty()) else {
        return;
    };

    let texts: Vec<&str> = comments
        .iter()
        .take(MAX_PROMPT_COMMENTS)
        .map(|c| c.content.as_str())
        .collect();

    prompt.push_str("\nUser Comments: ");
    prompt.push_str(&texts.join("; "));
    prompt.push('\n');
}

/// Renders the instruction prompt for a show-level insight
pub fn build_show_prompt(show: &Show, comments: Option<&[Comment]>) -> String {
    let mut prompt = format!(
        "<s>[INST] Generate a brief, insightful analysis (2-3 sentences) for this TV series.\n\
         \n\
         Series: {}\n\
         Genres: {}\n\
         Summary: {}\n",
        show.name,
        genre_list(show),
        summary_text(show.summary.as_deref()),
    );

    push_comments(&mut prompt, comments);

    prompt.push_str(
        "\nFocus on themes, appeal to specific audiences, and what makes it interesting.\n",
    );
    prompt.push_str(RESPOND_ONLY);
    prompt
}

/// Renders the instruction prompt for an episode insight, with its show as context
pub fn build_episode_prompt(episode: &Episode, show: &Show, comments: Option<&[Comment]>) -> String {
    let mut prompt = format!(
        "<s>[INST] Generate a brief, insightful analysis (2-3 sentences) for this TV episode.\n\
         \n\
         Series: {}\n\
         Series Genres: {}\n\
         Series Summary: {}\n\
         \n\
         Episode: S{:02}E{:02} - {}\n\
         Episode Summary: {}\n",
        show.name,
        genre_list(show),
        summary_text(show.summary.as_deref()),
        episode.season,
        episode.number,
        episode.name,
        summary_text(episode.summary.as_deref()),
    );

    push_comments(&mut prompt, comments);

    prompt.push_str(
        "\nFocus on themes, character development, and how it fits within the series.\n",
    );
    prompt.push_str(RESPOND_ONLY);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn breaking_bad() -> Show {
        Show {
            summary: Some("<p>A chemistry teacher <b>turns</b> to crime.</p>".to_string()),
            genres: vec!["Drama".to_string(), "Crime".to_string()],
            ..Show::new(1, "Breaking Bad")
        }
    }

    fn comments(count: usize) -> Vec<Comment> {
        (1..=count)
            .map(|i| Comment {
                id: i as i64,
                content: format!("comment {}", i),
                show_id: 1,
                episode_id: None,
                created_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_show_prompt_layout() {
        let prompt = build_show_prompt(&breaking_bad(), None);

        let expected = "<s>[INST] Generate a brief, insightful analysis (2-3 sentences) for this TV series.\n\
                        \n\
                        Series: Breaking Bad\n\
                        Genres: Drama, Crime\n\
                        Summary: A chemistry teacher turns to crime.\n\
                        \n\
                        Focus on themes, appeal to specific audiences, and what makes it interesting.\n\
                        Respond with ONLY the insight, no additional text. [/INST]";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_show_prompt_placeholders() {
        let prompt = build_show_prompt(&Show::new(2, "Mystery"), None);

        assert!(prompt.contains("Genres: Unknown\n"));
        assert!(prompt.contains("Summary: No summary available\n"));
    }

    #[test]
    fn test_empty_summary_uses_placeholder() {
        let show = Show {
            summary: Some(String::new()),
            ..Show::new(2, "Mystery")
        };
        assert!(build_show_prompt(&show, None).contains("Summary: No summary available\n"));
    }

    #[test]
    fn test_show_prompt_caps_comments_at_five() {
        let prompt = build_show_prompt(&breaking_bad(), Some(comments(7).as_slice()));

        assert!(prompt.contains(
            "\nUser Comments: comment 1; comment 2; comment 3; comment 4; comment 5\n"
        ));
        assert!(!prompt.contains("comment 6"));
        assert!(!prompt.contains("comment 7"));
    }

    #[test]
    fn test_empty_comment_list_renders_like_absent() {
        let show = breaking_bad();
        assert_eq!(
            build_show_prompt(&show, Some(&[][..])),
            build_show_prompt(&show, None)
        );
        assert!(!build_show_prompt(&show, Some(&[][..])).contains("User Comments"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let show = breaking_bad();
        let comments = comments(3);
        assert_eq!(
            build_show_prompt(&show, Some(comments.as_slice())),
            build_show_prompt(&show, Some(comments.as_slice()))
        );
    }

    #[test]
    fn test_episode_prompt_layout() {
        let episode = Episode {
            summary: Some("<p>Walter gets a diagnosis.</p>".to_string()),
            ..Episode::new(101, 1, "Pilot", 1, 3)
        };

        let prompt = build_episode_prompt(&episode, &breaking_bad(), Some(comments(1).as_slice()));

        let expected = "<s>[INST] Generate a brief, insightful analysis (2-3 sentences) for this TV episode.\n\
                        \n\
                        Series: Breaking Bad\n\
                        Series Genres: Drama, Crime\n\
                        Series Summary: A chemistry teacher turns to crime.\n\
                        \n\
                        Episode: S01E03 - Pilot\n\
                        Episode Summary: Walter gets a diagnosis.\n\
                        \n\
                        User Comments: comment 1\n\
                        \n\
                        Focus on themes, character development, and how it fits within the series.\n\
                        Respond with ONLY the insight, no additional text. [/INST]";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_episode_prompt_without_summaries() {
        let episode = Episode::new(500, 2, "Special", 12, 0);
        let prompt = build_episode_prompt(&episode, &Show::new(2, "Mystery"), None);

        assert!(prompt.contains("Episode: S12E00 - Special\n"));
        assert!(prompt.contains("Series Summary: No summary available\n"));
        assert!(prompt.contains("Episode Summary: No summary available\n"));
    }
}
