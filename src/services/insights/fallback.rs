use crate::models::{Episode, Show};

const DEFAULT_GENRE: &str = "drama";
const MAX_FALLBACK_GENRES: usize = 3;

/// "a", "a and b", or "a, b, and c"
fn genre_phrase(show: &Show) -> String {
    let genres: Vec<&str> = if show.genres.is_empty() {
        vec![DEFAULT_GENRE]
    } else {
        show.genres
            .iter()
            .take(MAX_FALLBACK_GENRES)
            .map(String::as_str)
            .collect()
    };

    match genres.split_last() {
        Some((last, rest)) if rest.len() >= 2 => format!("{}, and {}", rest.join(", "), last),
        _ => genres.join(" and "),
    }
}

/// Templated show insight, used when generation is unavailable.
///
/// The template is picked by `show.id mod 3`, so a show always gets the same text.
pub fn fallback_show_insight(show: &Show) -> String {
    let genres = genre_phrase(show);

    match show.id.rem_euclid(3) {
        0 => format!(
            "'{}' is a compelling {} series that offers viewers an engaging narrative experience.",
            show.name, genres
        ),
        1 => format!(
            "This {} series explores complex themes through its storytelling and character dynamics.",
            genres
        ),
        _ => format!(
            "Fans of {} will find '{}' to be a captivating watch with its unique perspective.",
            genres, show.name
        ),
    }
}

/// Templated episode insight, used when generation is unavailable
pub fn fallback_episode_insight(episode: &Episode, show: &Show) -> String {
    format!(
        "Episode {} of Season {} continues the narrative of '{}', advancing the story while \
         developing its characters. This episode contributes to the overall arc of the series.",
        episode.number, episode.season, show.name
    )
}
