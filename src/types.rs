use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Raw answer of the accounts token endpoint.
///
/// Every field is optional: a rejected grant comes back as
/// `{"error": "invalid_grant", ...}` with none of the token fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl TokenResponse {
    /// Turns the response into a usable pair, or `None` when no access token
    /// was issued. A missing refresh token falls back to `previous`, since
    /// the provider does not rotate it on every exchange.
    pub fn into_pair(self, previous: Option<&str>) -> Option<TokenPair> {
        let access_token = self.access_token.filter(|t| !t.is_empty())?;
        let refresh_token = self
            .refresh_token
            .filter(|t| !t.is_empty())
            .or_else(|| previous.filter(|t| !t.is_empty()).map(str::to_string));

        Some(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp(),
        })
    }

    /// Human readable reason for a rejected grant, if the provider gave one.
    pub fn rejection(&self) -> Option<String> {
        match (&self.error, &self.error_description) {
            (Some(error), Some(description)) => Some(format!("{}: {}", error, description)),
            (Some(error), None) => Some(error.clone()),
            (None, Some(description)) => Some(description.clone()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub obtained_at: i64,
}

impl TokenPair {
    /// `None` when the lifetime reported by the provider does not fit a
    /// timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let lifetime = i64::try_from(self.expires_in)
            .ok()
            .and_then(Duration::try_seconds)?;
        DateTime::from_timestamp(self.obtained_at, 0)?.checked_add_signed(lifetime)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<Track>,
}

/// A search hit. Local files carry no id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub is_local: bool,
}

impl Track {
    /// The id of this track if it can stand in as the sync trigger in
    /// `market`: not a local file and streamable there.
    pub fn candidate_id(&self, market: &str) -> Option<&str> {
        if self.is_local || !self.available_markets.iter().any(|m| m == market) {
            return None;
        }
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}
