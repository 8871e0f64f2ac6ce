//! # API Module
//!
//! HTTP handlers served by the local callback listener during sign-in.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives Spotify's redirect after the user grants access.
//!   Checks the anti-forgery `state`, extracts the one-time `code` and hands
//!   the outcome to the waiting sign-in flow. Only the first request counts;
//!   later ones are answered with `410 Gone`.
//!
//! ## Responses
//!
//! | Situation                 | Status | Outcome delivered            |
//! |---------------------------|--------|------------------------------|
//! | state matches, code given | 200    | the code                     |
//! | state mismatch            | 400    | `Error::StateMismatch`       |
//! | `error` parameter present | 400    | `Error::AuthorizationDenied` |
//! | code missing              | 400    | `Error::MissingCode`         |
//! | any later request         | 410    | nothing                      |
//!
//! ## Related Modules
//!
//! - [`crate::server`] - Binds the listener and waits for the outcome

mod callback;

pub use callback::{CallbackParams, CallbackState, callback};
