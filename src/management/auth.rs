use std::future::Future;

use crate::{
    Error, Res,
    config::Credentials,
    info,
    spotify::{SpotifyClient, auth},
    types::TokenPair,
    warning,
};

/// Interactive half of the authorization code flow.
///
/// Implementations send the user to the sign-in page and resolve to the
/// one-time authorization code delivered by the redirect.
pub trait Authorizer {
    fn authorize(&self) -> impl Future<Output = Res<String>>;
}

pub struct TokenManager<'a, A: Authorizer> {
    client: &'a SpotifyClient,
    credentials: &'a Credentials,
    authorizer: A,
}

impl<'a, A: Authorizer> TokenManager<'a, A> {
    pub fn new(client: &'a SpotifyClient, credentials: &'a Credentials, authorizer: A) -> Self {
        TokenManager {
            client,
            credentials,
            authorizer,
        }
    }

    /// Returns a fresh token pair, redeeming `stored_refresh_token` when it is
    /// still accepted and signing in interactively otherwise.
    pub async fn obtain(&self, stored_refresh_token: Option<&str>) -> Res<TokenPair> {
        let stored = stored_refresh_token.filter(|t| !t.is_empty());

        match stored {
            Some(refresh_token) => {
                let res =
                    auth::request_tokens_with_refresh_token(self.client, self.credentials, refresh_token)
                        .await?;
                let rejection = res.rejection();

                if let Some(pair) = res.into_pair(Some(refresh_token)) {
                    info!("Refreshed access token");
                    return Ok(pair);
                }

                warning!(
                    "Stored refresh token was rejected ({}). Signing in again.",
                    rejection.unwrap_or_else(|| "no access token issued".to_string())
                );
            }
            None => info!("No stored refresh token. Signing in."),
        }

        self.exchange_code().await
    }

    /// Runs the interactive flow regardless of any stored refresh token.
    pub async fn sign_in(&self) -> Res<TokenPair> {
        self.exchange_code().await
    }

    /// The stored refresh token is never carried over here: it is either
    /// absent or was just rejected.
    async fn exchange_code(&self) -> Res<TokenPair> {
        let code = self.authorizer.authorize().await?;
        let res = auth::request_tokens_with_code(self.client, self.credentials, &code).await?;

        if let Some(rejection) = res.rejection() {
            warning!("Authorization code was rejected ({})", rejection);
        }

        res.into_pair(None)
            .ok_or(Error::NoAccessToken)
    }
}
