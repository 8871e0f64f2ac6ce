use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::sleep;

use crate::{
    Error, Res,
    spotify::{
        SpotifyClient,
        library::{self, CONTAINS_LIMIT, SEARCH_LIMIT},
    },
    utils, warning,
    words::SEARCH_TERMS,
};

/// Attempts before the search gives up.
pub const MAX_ATTEMPTS: u32 = 30;

/// Pause between attempts, to stay clear of rate limits.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct SelectionOptions {
    pub max_attempts: u32,
    pub page_size: u32,
    pub retry_delay: Duration,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        SelectionOptions {
            max_attempts: MAX_ATTEMPTS,
            page_size: SEARCH_LIMIT,
            retry_delay: RETRY_DELAY,
        }
    }
}

/// Finds a track that is streamable in `market`, is not a local file and is
/// not in the user's Liked Songs yet.
///
/// Every attempt searches the catalogue for a random keyword, filters the
/// hits and checks the survivors against the library in one batch. The first
/// candidate reported as not liked wins.
///
/// # Errors
///
/// - `Error::Exhausted` after `options.max_attempts` attempts without a hit;
///   no request is made after the last attempt
/// - `Error::Transport` as soon as any request fails to complete
/// - `Error::Status` for `401`/`403`, which retrying cannot fix. Other
///   non-2xx answers only cost the current attempt.
pub async fn find_unliked_track(
    client: &SpotifyClient,
    token: &str,
    market: &str,
    options: &SelectionOptions,
) -> Res<String> {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = search_loop(client, token, market, options, &pb).await;
    pb.finish_and_clear();
    result
}

async fn search_loop(
    client: &SpotifyClient,
    token: &str,
    market: &str,
    options: &SelectionOptions,
    pb: &ProgressBar,
) -> Res<String> {
    for attempt in 1..=options.max_attempts {
        let keyword = utils::pick_keyword(SEARCH_TERMS).unwrap_or("love");
        pb.set_message(format!(
            "Looking for a suitable ghost track... \"{}\" ({}/{})",
            keyword, attempt, options.max_attempts
        ));

        match attempt_once(client, token, market, keyword, options.page_size).await {
            Ok(Some(track_id)) => return Ok(track_id),
            Ok(None) => {}
            Err(e) if e.is_retryable() => {
                pb.suspend(|| warning!("Attempt {} failed: {}", attempt, e));
            }
            Err(e) => return Err(e),
        }

        if attempt < options.max_attempts {
            sleep(options.retry_delay).await;
        }
    }

    Err(Error::Exhausted(options.max_attempts))
}

async fn attempt_once(
    client: &SpotifyClient,
    token: &str,
    market: &str,
    keyword: &str,
    page_size: u32,
) -> Res<Option<String>> {
    let tracks = library::search_tracks(client, token, keyword, page_size).await?;

    let candidates: Vec<&str> = tracks
        .iter()
        .filter_map(|track| track.candidate_id(market))
        .take(CONTAINS_LIMIT)
        .collect();

    if candidates.is_empty() {
        return Ok(None);
    }

    let uris: Vec<String> = candidates.iter().map(|id| utils::track_uri(id)).collect();
    let liked = library::library_contains(client, token, &uris).await?;

    Ok(candidates
        .into_iter()
        .zip(liked)
        .find(|(_, liked)| !liked)
        .map(|(id, _)| id.to_string()))
}
