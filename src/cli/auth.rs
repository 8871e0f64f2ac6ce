use std::path::Path;

use crate::{
    Res,
    config::Config,
    management::TokenManager,
    spotify::{SpotifyClient, auth::BrowserSignIn},
    success,
};

use super::sync::store_refresh_token;

pub async fn auth(env_file: &Path) -> Res<()> {
    let config = Config::load(env_file).await?;
    let client = SpotifyClient::new(config.endpoints.clone())?;
    let sign_in = BrowserSignIn::new(&config.endpoints, &config.credentials);

    let tokens = TokenManager::new(&client, &config.credentials, sign_in)
        .sign_in()
        .await?;
    store_refresh_token(env_file, config.refresh_token.as_deref(), &tokens).await?;

    success!("Authentication successful!");
    Ok(())
}
