//! Configuration management for ghostsync.
//!
//! All settings live in a flat `KEY=value` file (the `.env` format). The file
//! is parsed into an explicit [`Config`] value that is handed to each
//! component; the process environment is never read or modified.
//!
//! Exactly one key is ever written back: `REFRESH_TOKEN`, after each
//! successful token exchange.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{Error, Res, spotify::Endpoints};

pub const CLIENT_ID_KEY: &str = "CLIENT_ID";
pub const CLIENT_SECRET_KEY: &str = "CLIENT_SECRET";
pub const REDIRECT_HOST_KEY: &str = "REDIRECT_HOST";
pub const REFRESH_TOKEN_KEY: &str = "REFRESH_TOKEN";
pub const MARKET_KEY: &str = "MARKET";
pub const AUTH_URL_KEY: &str = "SPOTIFY_AUTH_URL";
pub const TOKEN_URL_KEY: &str = "SPOTIFY_TOKEN_URL";
pub const API_URL_KEY: &str = "SPOTIFY_API_URL";

/// Application credentials registered with the Spotify developer dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    /// `host:port` of the local callback listener, e.g. `127.0.0.1:8888`.
    pub redirect_host: String,
}

/// Everything a sync run needs, read from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub credentials: Credentials,
    pub refresh_token: Option<String>,
    pub market: String,
    pub endpoints: Endpoints,
}

impl Config {
    /// Loads and validates the configuration file at `path`.
    ///
    /// Values may be bare, single-quoted or double-quoted. Blank lines and
    /// `#` comments are ignored.
    ///
    /// # Errors
    ///
    /// - The file cannot be read
    /// - A line cannot be parsed
    /// - One of `CLIENT_ID`, `CLIENT_SECRET`, `REDIRECT_HOST` or `MARKET`
    ///   is missing or empty
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::load(&config::default_env_path()).await?;
    /// println!("Syncing for market {}", config.market);
    /// ```
    pub async fn load(path: &Path) -> Res<Self> {
        let values = parse_env(path)?;
        Self::from_values(&values, path)
    }

    /// Builds a configuration from already parsed key/value pairs.
    ///
    /// `origin` only appears in error messages.
    pub fn from_values(values: &HashMap<String, String>, origin: &Path) -> Res<Self> {
        let get = |key: &str| {
            values
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let require = |key: &str| {
            get(key).ok_or_else(|| {
                Error::Config(format!("{} must be set in {}", key, origin.display()))
            })
        };

        let defaults = Endpoints::default();

        Ok(Config {
            credentials: Credentials {
                client_id: require(CLIENT_ID_KEY)?,
                client_secret: require(CLIENT_SECRET_KEY)?,
                redirect_host: require(REDIRECT_HOST_KEY)?,
            },
            refresh_token: get(REFRESH_TOKEN_KEY),
            market: require(MARKET_KEY)?,
            endpoints: Endpoints {
                authorize_url: get(AUTH_URL_KEY).unwrap_or(defaults.authorize_url),
                token_url: get(TOKEN_URL_KEY).unwrap_or(defaults.token_url),
                api_url: get(API_URL_KEY)
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.api_url),
            },
        })
    }
}

/// Parses the `.env` file at `path` into a map without touching the process
/// environment.
pub fn parse_env(path: &Path) -> Res<HashMap<String, String>> {
    let lines = dotenv::from_path_iter(path).map_err(|e| {
        Error::Config(format!(
            "Cannot read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    lines.collect::<Result<_, _>>().map_err(|e| {
        Error::Config(format!(
            "Invalid configuration file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Returns the default location of the configuration file.
///
/// The file lives in the platform-specific local data directory:
/// - Linux: `~/.local/share/ghostsync/.env`
/// - macOS: `~/Library/Application Support/ghostsync/.env`
/// - Windows: `%LOCALAPPDATA%/ghostsync/.env`
pub fn default_env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("ghostsync/.env");
    path
}

/// Replaces or appends a `key='value'` line in the configuration file.
///
/// The first line assigning `key` is rewritten in place, every other line is
/// kept byte for byte. When `key` is absent the assignment is appended. The
/// new contents are written to a sibling `<path>.tmp` file which is then
/// renamed over `path`.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read, written or renamed.
pub async fn update_env_var(path: &Path, key: &str, value: &str) -> Res<()> {
    let contents = async_fs::read_to_string(path).await?;
    let updated = replace_env_line(&contents, key, value);

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    async_fs::write(&tmp, updated).await?;
    async_fs::rename(&tmp, path).await?;
    Ok(())
}

/// Pure text transformation behind [`update_env_var`].
pub fn replace_env_line(contents: &str, key: &str, value: &str) -> String {
    let assignment = format!("{}='{}'", key, value);
    let mut found = false;

    let mut lines: Vec<String> = contents
        .lines()
        .map(|line| {
            if !found && assigns_key(line, key) {
                found = true;
                assignment.clone()
            } else {
                line.to_string()
            }
        })
        .collect();

    if !found {
        lines.push(assignment);
    }

    let mut updated = lines.join("\n");
    updated.push('\n');
    updated
}

fn assigns_key(line: &str, key: &str) -> bool {
    let line = line.trim_start();
    let line = line.strip_prefix("export ").unwrap_or(line);
    match line.split_once('=') {
        Some((name, _)) => name.trim() == key,
        None => false,
    }
}
