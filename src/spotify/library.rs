use crate::{
    Error, Res,
    spotify::{SpotifyClient, send},
    types::{SearchResponse, Track},
};

/// Page size requested from the search endpoint.
pub const SEARCH_LIMIT: u32 = 10;

/// Maximum number of URIs the membership check accepts per request.
pub const CONTAINS_LIMIT: usize = 40;

/// Searches the Spotify catalogue for tracks matching `keyword`.
///
/// # Arguments
///
/// * `client` - Shared Spotify client
/// * `token` - Valid access token for Spotify API authentication
/// * `keyword` - Free-text search query
/// * `limit` - Maximum number of tracks to return (1-50)
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<Track>)` - The tracks on the first result page, possibly empty
/// - `Err(Error::Transport)` - Network failure or an undecodable body
/// - `Err(Error::Status)` - Spotify answered with a non-2xx status
///
/// # API Endpoint
///
/// Uses `GET /search` with `q`, `type=track` and `limit`.
///
/// # Example
///
/// ```
/// let tracks = search_tracks(&client, token, "midnight", SEARCH_LIMIT).await?;
/// for track in &tracks {
///     println!("{:?} local={}", track.id, track.is_local);
/// }
/// ```
pub async fn search_tracks(
    client: &SpotifyClient,
    token: &str,
    keyword: &str,
    limit: u32,
) -> Res<Vec<Track>> {
    let limit = limit.to_string();
    let request = client
        .http()
        .get(client.api("/search"))
        .bearer_auth(token)
        .query(&[("q", keyword), ("type", "track"), ("limit", limit.as_str())]);

    let response = send("search", request).await?;
    let res = response
        .json::<SearchResponse>()
        .await
        .map_err(|source| Error::Transport {
            endpoint: "search",
            source,
        })?;

    Ok(res.tracks.items)
}

/// Checks which of the given track URIs are already in the user's Liked
/// Songs.
///
/// # Arguments
///
/// * `client` - Shared Spotify client
/// * `token` - Valid access token with the `user-library-read` scope
/// * `uris` - Up to [`CONTAINS_LIMIT`] `spotify:track:` URIs
///
/// # Returns
///
/// One boolean per URI, in the order the URIs were given. An empty `uris`
/// slice returns an empty vector without calling Spotify.
///
/// # API Endpoint
///
/// Uses `GET /me/library/contains?uris=<uri,uri,...>`.
pub async fn library_contains(
    client: &SpotifyClient,
    token: &str,
    uris: &[String],
) -> Res<Vec<bool>> {
    if uris.is_empty() {
        return Ok(Vec::new());
    }

    let request = client
        .http()
        .get(client.api("/me/library/contains"))
        .bearer_auth(token)
        .query(&[("uris", uris.join(","))]);

    let response = send("library/contains", request).await?;
    response
        .json::<Vec<bool>>()
        .await
        .map_err(|source| Error::Transport {
            endpoint: "library/contains",
            source,
        })
}

/// Saves a track to the user's Liked Songs.
///
/// Uses `PUT /me/library?uris=<uri>`. Requires the `user-library-modify`
/// scope.
pub async fn save_to_library(client: &SpotifyClient, token: &str, uri: &str) -> Res<()> {
    let request = client
        .http()
        .put(client.api("/me/library"))
        .bearer_auth(token)
        .query(&[("uris", uri)]);

    send("library", request).await?;
    Ok(())
}

/// Removes a track from the user's Liked Songs.
///
/// Uses `DELETE /me/library?uris=<uri>`. Requires the `user-library-modify`
/// scope.
pub async fn remove_from_library(client: &SpotifyClient, token: &str, uri: &str) -> Res<()> {
    let request = client
        .http()
        .delete(client.api("/me/library"))
        .bearer_auth(token)
        .query(&[("uris", uri)]);

    send("library", request).await?;
    Ok(())
}
