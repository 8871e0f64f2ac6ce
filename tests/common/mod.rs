//! In-process stand-in for the Spotify accounts service and Web API.
#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use ghostsync::{
    Res,
    config::{Config, Credentials},
    management::Authorizer,
    spotify::{Endpoints, SpotifyClient},
};
use serde_json::{Value, json};

pub const ACCESS_TOKEN: &str = "access-fake";
pub const GOOD_CODE: &str = "code-ok";

pub struct FakeSpotify {
    /// The only refresh token the token endpoint accepts.
    pub valid_refresh: String,
    /// Refresh token handed out on a successful refresh grant.
    pub rotate_to: Option<String>,
    /// Refresh token handed out on a successful code grant.
    pub issued_refresh: String,
    pub catalogue: Vec<Value>,
    pub liked: HashSet<String>,
    /// Library writes in arrival order, e.g. `PUT spotify:track:abc`.
    pub events: Vec<String>,
    pub fail_remove: bool,
}

impl Default for FakeSpotify {
    fn default() -> Self {
        FakeSpotify {
            valid_refresh: "refresh-old".to_string(),
            rotate_to: None,
            issued_refresh: "refresh-new".to_string(),
            catalogue: Vec::new(),
            liked: HashSet::new(),
            events: Vec::new(),
            fail_remove: false,
        }
    }
}

type Shared = Arc<Mutex<FakeSpotify>>;

pub fn track(id: &str, markets: &[&str]) -> Value {
    json!({ "id": id, "available_markets": markets, "is_local": false })
}

/// Serves `fake` on an ephemeral port and returns matching endpoints.
pub async fn spawn(fake: FakeSpotify) -> (Endpoints, Shared) {
    let shared: Shared = Arc::new(Mutex::new(fake));

    let app = Router::new()
        .route("/api/token", post(token))
        .route("/search", get(search))
        .route("/me/library/contains", get(contains))
        .route("/me/library", put(save).delete(remove))
        .with_state(Arc::clone(&shared));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let endpoints = Endpoints {
        authorize_url: format!("{}/authorize", base),
        token_url: format!("{}/api/token", base),
        api_url: base,
    };
    (endpoints, shared)
}

async fn token(
    State(shared): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let fake = shared.lock().unwrap();

    let granted = match field(&form, "grant_type") {
        "refresh_token" if field(&form, "refresh_token") == fake.valid_refresh => {
            Some(fake.rotate_to.clone())
        }
        "authorization_code" if field(&form, "code") == GOOD_CODE => {
            Some(Some(fake.issued_refresh.clone()))
        }
        _ => None,
    };

    match granted {
        Some(refresh_token) => (
            StatusCode::OK,
            Json(json!({
                "access_token": ACCESS_TOKEN,
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": refresh_token,
            })),
        ),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Invalid grant" })),
        ),
    }
}

fn field<'a>(form: &'a HashMap<String, String>, key: &str) -> &'a str {
    form.get(key).map(String::as_str).unwrap_or_default()
}

async fn search(State(shared): State<Shared>) -> Json<Value> {
    let fake = shared.lock().unwrap();
    Json(json!({ "tracks": { "items": fake.catalogue } }))
}

async fn contains(
    State(shared): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<bool>> {
    let fake = shared.lock().unwrap();
    let uris = query.get("uris").map(String::as_str).unwrap_or_default();
    Json(uris.split(',').map(|uri| fake.liked.contains(uri)).collect())
}

async fn save(
    State(shared): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    let mut fake = shared.lock().unwrap();
    let uri = query.get("uris").cloned().unwrap_or_default();
    fake.events.push(format!("PUT {}", uri));
    fake.liked.insert(uri);
    StatusCode::OK
}

async fn remove(
    State(shared): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    let mut fake = shared.lock().unwrap();
    let uri = query.get("uris").cloned().unwrap_or_default();
    if fake.fail_remove {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    fake.events.push(format!("DELETE {}", uri));
    fake.liked.remove(&uri);
    StatusCode::OK
}

/// Hands out a fixed code instead of opening a browser.
#[derive(Clone)]
pub struct FakeAuthorizer {
    code: &'static str,
    calls: Arc<AtomicUsize>,
}

impl FakeAuthorizer {
    pub fn new(code: &'static str) -> Self {
        FakeAuthorizer {
            code,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Authorizer for FakeAuthorizer {
    async fn authorize(&self) -> Res<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.code.to_string())
    }
}

pub fn client(endpoints: &Endpoints) -> SpotifyClient {
    SpotifyClient::new(endpoints.clone()).unwrap()
}

/// Writes a configuration file for `endpoints` and returns it parsed.
pub async fn config_file(
    dir: &tempfile::TempDir,
    endpoints: &Endpoints,
    market: &str,
    refresh_token: Option<&str>,
) -> (PathBuf, Config) {
    let path = dir.path().join(".env");
    let mut contents = format!(
        "CLIENT_ID=client-123\nCLIENT_SECRET=secret-456\nREDIRECT_HOST=127.0.0.1:8888\nMARKET={}\n\
         SPOTIFY_AUTH_URL={}\nSPOTIFY_TOKEN_URL={}\nSPOTIFY_API_URL={}\n",
        market, endpoints.authorize_url, endpoints.token_url, endpoints.api_url
    );
    if let Some(token) = refresh_token {
        contents.push_str(&format!("REFRESH_TOKEN='{}'\n", token));
    }
    async_fs::write(&path, contents).await.unwrap();

    let config = Config::load(&path).await.unwrap();
    (path, config)
}

pub fn credentials() -> Credentials {
    Credentials {
        client_id: "client-123".to_string(),
        client_secret: "secret-456".to_string(),
        redirect_host: "127.0.0.1:8888".to_string(),
    }
}

pub async fn stored_refresh_token(path: &Path) -> Option<String> {
    Config::load(path).await.unwrap().refresh_token
}
