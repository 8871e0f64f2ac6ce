use std::time::Duration;

use reqwest::StatusCode;

/// Every way a sync run can fail.
///
/// `main` is the only place that turns an `Error` into a non-zero exit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request to the {endpoint} endpoint failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("the {endpoint} endpoint responded with {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    #[error("unable to obtain a new access token")]
    NoAccessToken,

    #[error("authorization state mismatch (received {received:?}); the sign-in link is stale or forged")]
    StateMismatch { received: String },

    #[error("authorization was denied: {0}")]
    AuthorizationDenied(String),

    #[error("the authorization callback did not carry a code")]
    MissingCode,

    #[error("timed out after {}s waiting for the authorization callback", .0.as_secs())]
    AuthorizationTimeout(Duration),

    #[error("callback listener on {addr} failed: {source}")]
    Listener {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("secure random source unavailable: {0}")]
    Entropy(String),

    #[error("exceeded maximum limit of {0} attempts, no suitable track found")]
    Exhausted(u32),

    #[error("failed to add {uri} to Liked Songs, library left unchanged: {source}")]
    AddFailed {
        uri: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{uri} was added to Liked Songs but could not be removed, remove it manually: {source}")]
    RemoveFailed {
        uri: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Whether the search loop may spend another attempt after this error.
    ///
    /// Only non-2xx answers count, and not the ones that mean the access
    /// token itself is bad.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Status { status, .. } => {
                *status != StatusCode::UNAUTHORIZED && *status != StatusCode::FORBIDDEN
            }
            _ => false,
        }
    }
}
