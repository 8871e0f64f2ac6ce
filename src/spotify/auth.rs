use std::time::Duration;

use reqwest::Url;

use crate::{
    Error, Res,
    config::Credentials,
    info,
    management::Authorizer,
    server::CallbackListener,
    spotify::{Endpoints, SpotifyClient},
    types::TokenResponse,
    utils, warning,
};

/// Permissions needed to check, add and remove Liked Songs.
pub const SCOPE: &str = "user-library-read user-library-modify";

/// How long the browser sign-in waits for the redirect by default.
pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(300);

/// Builds the URL of the Spotify sign-in page for one authorization attempt.
///
/// # Arguments
///
/// * `endpoints` - Provides the authorization endpoint
/// * `credentials` - Supplies the client id and the redirect host
/// * `state` - Anti-forgery value the callback must echo back
///
/// # Query Parameters
///
/// - `response_type=code`
/// - `client_id`
/// - `scope` - see [`SCOPE`]
/// - `redirect_uri` - `http://<redirect_host>/callback`
/// - `state`
///
/// # Errors
///
/// Returns `Error::Config` when the configured authorization URL is not a
/// valid absolute URL.
pub fn authorize_url(endpoints: &Endpoints, credentials: &Credentials, state: &str) -> Res<Url> {
    let redirect_uri = utils::redirect_uri(&credentials.redirect_host);
    Url::parse_with_params(
        &endpoints.authorize_url,
        &[
            ("response_type", "code"),
            ("client_id", credentials.client_id.as_str()),
            ("scope", SCOPE),
            ("redirect_uri", redirect_uri.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| {
        Error::Config(format!(
            "Invalid authorization URL {}: {}",
            endpoints.authorize_url, e
        ))
    })
}

/// Exchanges a stored refresh token for a new access token.
///
/// The response is returned as-is, including rejections: Spotify answers a
/// revoked or expired refresh token with `400 {"error": "invalid_grant"}`,
/// which the caller treats as "sign in again" rather than as a failure. A
/// body that is not a token response at all is treated the same way.
///
/// # Arguments
///
/// * `client` - Shared Spotify client
/// * `credentials` - Client id and secret sent in the form body
/// * `refresh_token` - Refresh token from the previous run
///
/// # Errors
///
/// Only transport failures (connection, DNS, timeout) are errors.
pub async fn request_tokens_with_refresh_token(
    client: &SpotifyClient,
    credentials: &Credentials,
    refresh_token: &str,
) -> Res<TokenResponse> {
    post_token_form(
        client,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ],
    )
    .await
}

/// Exchanges a one-time authorization code for a token pair.
///
/// The `redirect_uri` sent here must match the one used to build the sign-in
/// URL, which is why both are derived from `credentials.redirect_host`.
///
/// # Errors
///
/// Only transport failures are errors; a rejected code comes back as a
/// response without an access token.
pub async fn request_tokens_with_code(
    client: &SpotifyClient,
    credentials: &Credentials,
    code: &str,
) -> Res<TokenResponse> {
    let redirect_uri = utils::redirect_uri(&credentials.redirect_host);
    post_token_form(
        client,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ],
    )
    .await
}

async fn post_token_form(client: &SpotifyClient, form: &[(&str, &str)]) -> Res<TokenResponse> {
    let res = client
        .http()
        .post(&client.endpoints().token_url)
        .form(form)
        .send()
        .await
        .map_err(|source| Error::Transport {
            endpoint: "token",
            source,
        })?;

    let status = res.status();
    let body = res.text().await.map_err(|source| Error::Transport {
        endpoint: "token",
        source,
    })?;

    match serde_json::from_str::<TokenResponse>(&body) {
        Ok(token) => Ok(token),
        Err(_) => Ok(TokenResponse {
            error: Some(format!("unexpected token response ({})", status)),
            ..TokenResponse::default()
        }),
    }
}

/// Interactive sign-in through the user's web browser.
///
/// Each call generates a fresh state value, binds the callback listener on
/// the redirect host, opens the Spotify sign-in page and waits for the
/// redirect carrying the authorization code.
pub struct BrowserSignIn<'a> {
    endpoints: &'a Endpoints,
    credentials: &'a Credentials,
    timeout: Duration,
}

impl<'a> BrowserSignIn<'a> {
    pub fn new(endpoints: &'a Endpoints, credentials: &'a Credentials) -> Self {
        BrowserSignIn {
            endpoints,
            credentials,
            timeout: CALLBACK_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Authorizer for BrowserSignIn<'_> {
    async fn authorize(&self) -> Res<String> {
        let state = utils::generate_state()?;

        // Listen before the browser opens so the redirect cannot arrive first.
        let listener = CallbackListener::bind(&self.credentials.redirect_host).await?;
        let url = authorize_url(self.endpoints, self.credentials, &state)?;

        info!("Opening Spotify sign-in page...");
        info!(
            "If your browser did not open automatically, copy and paste the following link into your web browser's address bar:\n\n{}\n",
            url
        );

        if webbrowser::open(url.as_str()).is_err() {
            warning!("Failed to open browser. Please navigate to the link above manually.");
        }

        listener.await_authorization(&state, self.timeout).await
    }
}
