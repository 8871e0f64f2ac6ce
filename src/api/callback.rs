use std::sync::Arc;

use axum::{Extension, extract::Query, http::StatusCode};
use serde::Deserialize;
use tokio::sync::{Mutex, oneshot};

use crate::{Error, Res, warning};

/// Query parameters Spotify appends to the redirect URI.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Shared between the callback handler and the flow waiting for it.
///
/// The sender is taken by the first request, so exactly one outcome is ever
/// delivered.
pub struct CallbackState {
    expected_state: String,
    outcome: Mutex<Option<oneshot::Sender<Res<String>>>>,
}

impl CallbackState {
    pub fn new(expected_state: &str, outcome: oneshot::Sender<Res<String>>) -> Self {
        CallbackState {
            expected_state: expected_state.to_string(),
            outcome: Mutex::new(Some(outcome)),
        }
    }
}

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(shared_state): Extension<Arc<CallbackState>>,
) -> (StatusCode, &'static str) {
    let Some(sender) = shared_state.outcome.lock().await.take() else {
        return (
            StatusCode::GONE,
            "Authorization already handled. You may close this window.",
        );
    };

    let (outcome, response) = evaluate(&shared_state.expected_state, params);
    if sender.send(outcome).is_err() {
        warning!("Sign-in flow stopped waiting before the callback arrived");
    }
    response
}

fn evaluate(expected_state: &str, params: CallbackParams) -> (Res<String>, (StatusCode, &'static str)) {
    let received = params.state.unwrap_or_default();
    if received != expected_state {
        return (
            Err(Error::StateMismatch { received }),
            (StatusCode::BAD_REQUEST, "Invalid state"),
        );
    }

    if let Some(error) = params.error {
        return (
            Err(Error::AuthorizationDenied(error)),
            (
                StatusCode::BAD_REQUEST,
                "Authorization was denied. You may close this window.",
            ),
        );
    }

    match params.code.filter(|code| !code.is_empty()) {
        Some(code) => (
            Ok(code),
            (
                StatusCode::OK,
                "Authenticated with Spotify. You may now close this window.",
            ),
        ),
        None => (
            Err(Error::MissingCode),
            (StatusCode::BAD_REQUEST, "Missing authorization code"),
        ),
    }
}
