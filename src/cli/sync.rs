use std::{path::Path, time::Duration};

use crate::{
    Res,
    config::{self, Config},
    info,
    management::{self, Authorizer, SelectionOptions, TokenManager},
    spotify::{SpotifyClient, auth::BrowserSignIn},
    success,
    types::TokenPair,
    utils, warning,
};

/// Timing knobs of a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub selection: SelectionOptions,
    pub pulse_interval: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            selection: SelectionOptions::default(),
            pulse_interval: management::PULSE_INTERVAL,
        }
    }
}

pub async fn sync(env_file: &Path, market: Option<String>) -> Res<()> {
    let mut config = Config::load(env_file).await?;
    if let Some(market) = market {
        config.market = market;
    }

    let client = SpotifyClient::new(config.endpoints.clone())?;
    let sign_in = BrowserSignIn::new(&config.endpoints, &config.credentials);

    run(&client, &config, env_file, sign_in, &SyncOptions::default()).await?;
    Ok(())
}

/// One complete sync: tokens, refresh token write-back, track selection and
/// the add/remove pulse. Returns the id of the track used as the trigger.
pub async fn run<A: Authorizer>(
    client: &SpotifyClient,
    config: &Config,
    env_file: &Path,
    authorizer: A,
    options: &SyncOptions,
) -> Res<String> {
    let tokens = TokenManager::new(client, &config.credentials, authorizer)
        .obtain(config.refresh_token.as_deref())
        .await?;
    store_refresh_token(env_file, config.refresh_token.as_deref(), &tokens).await?;

    let track_id =
        management::find_unliked_track(client, &tokens.access_token, &config.market, &options.selection)
            .await?;
    info!("Found track   | URI: {}", utils::track_uri(&track_id));

    management::pulse(client, &tokens.access_token, &track_id, options.pulse_interval).await?;
    success!("Boo! Your \"Liked Songs\" should be synced up now across all devices.");

    Ok(track_id)
}

/// Writes the refresh token back when the exchange produced a different one.
pub(crate) async fn store_refresh_token(
    env_file: &Path,
    stored: Option<&str>,
    tokens: &TokenPair,
) -> Res<()> {
    if let Some(expires_at) = tokens.expires_at() {
        info!("Access token valid until {}", expires_at.format("%H:%M:%S %Z"));
    }

    match tokens.refresh_token.as_deref() {
        Some(refresh_token) if Some(refresh_token) != stored => {
            config::update_env_var(env_file, config::REFRESH_TOKEN_KEY, refresh_token).await?;
            info!("Stored new refresh token in {}", env_file.display());
        }
        Some(_) => {}
        None => warning!(
            "Spotify did not issue a refresh token; the next run will ask you to sign in again."
        ),
    }
    Ok(())
}
