//! # Spotify Integration Module
//!
//! Thin wrappers around the handful of Spotify endpoints a sync run touches.
//! Each function performs exactly one HTTP request and maps the outcome onto
//! [`crate::Error`]; deciding what to do with a failure is left to the
//! `management` layer.
//!
//! ## Architecture
//!
//! ```text
//! Management Layer (TokenManager, track selection, pulse)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorize URL, token grants, browser sign-in)
//!     └── Library (search, membership check, save, remove)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Accounts service / Web API
//! ```
//!
//! ## API Coverage
//!
//! ### Authentication
//! - `GET /authorize` - Browser sign-in (opened, never called directly)
//! - `POST /api/token` - `refresh_token` and `authorization_code` grants
//!
//! ### Library
//! - `GET /search` - Track search by keyword
//! - `GET /me/library/contains` - Batch Liked Songs membership check by URI
//! - `PUT /me/library` - Save a track by URI
//! - `DELETE /me/library` - Remove a track by URI
//!
//! ## Timeouts
//!
//! Every request goes through one shared [`SpotifyClient`] whose underlying
//! `reqwest::Client` carries a 30 second timeout, so an unresponsive endpoint
//! surfaces as a transport error instead of hanging the run.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};

use crate::{Error, Res};

pub mod auth;
pub mod library;

pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Upper bound for any single outbound request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URLs of the services the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub authorize_url: String,
    pub token_url: String,
    /// Web API root without a trailing slash.
    pub api_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            authorize_url: SPOTIFY_AUTH_URL.to_string(),
            token_url: SPOTIFY_TOKEN_URL.to_string(),
            api_url: SPOTIFY_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    endpoints: Endpoints,
}

impl SpotifyClient {
    pub fn new(endpoints: Endpoints) -> Res<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| Error::Transport {
                endpoint: "client",
                source,
            })?;

        Ok(SpotifyClient { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn api(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.api_url, path)
    }
}

/// Sends `request` and turns transport failures and non-2xx answers into
/// errors tagged with `endpoint`.
pub(crate) async fn send(endpoint: &'static str, request: RequestBuilder) -> Res<Response> {
    let response = request
        .send()
        .await
        .map_err(|source| Error::Transport { endpoint, source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status { endpoint, status });
    }

    Ok(response)
}
