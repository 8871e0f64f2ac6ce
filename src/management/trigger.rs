use std::time::Duration;

use tokio::time::sleep;

use crate::{Error, Res, info, spotify::{SpotifyClient, library}, utils};

/// Pause between adding and removing the trigger track.
pub const PULSE_INTERVAL: Duration = Duration::from_secs(4);

/// Adds `track_id` to Liked Songs, waits `interval`, then removes it again.
///
/// Neither request is retried. A failed removal leaves the track in the
/// user's library, and the returned `Error::RemoveFailed` says so.
pub async fn pulse(
    client: &SpotifyClient,
    token: &str,
    track_id: &str,
    interval: Duration,
) -> Res<()> {
    let uri = utils::track_uri(track_id);

    library::save_to_library(client, token, &uri)
        .await
        .map_err(|e| Error::AddFailed {
            uri: uri.clone(),
            source: Box::new(e),
        })?;
    info!("Added track   | URI: {}", uri);

    sleep(interval).await;

    library::remove_from_library(client, token, &uri)
        .await
        .map_err(|e| Error::RemoveFailed {
            uri: uri.clone(),
            source: Box::new(e),
        })?;
    info!("Removed track | URI: {}", uri);

    Ok(())
}
