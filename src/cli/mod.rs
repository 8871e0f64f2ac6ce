//! # CLI Module
//!
//! User-facing commands of ghostsync. Each command loads the configuration
//! file, wires the Spotify client to the management layer and reports
//! progress with the crate's status macros. Failures are returned to `main`,
//! which prints them and exits non-zero.
//!
//! ## Commands
//!
//! - [`sync`] - One resync: obtain tokens, store the refresh token, pick a
//!   track that is not liked yet, add it and remove it again
//! - [`auth`] - Force the browser sign-in and store the new refresh token
//!
//! ## Run Sequence
//!
//! ```text
//! Idle → AcquiringToken → {SigningIn} → Searching → Selecting → Adding → Removing → Done
//!                                 any stage ─────────────────────────────────→ Failed
//! ```
//!
//! `SigningIn` only happens when the stored refresh token is missing or
//! rejected.
//!
//! ## Usage Patterns
//!
//! ```bash
//! ghostsync                        # resync using the default config file
//! ghostsync --env-file ./my.env    # use another config file
//! ghostsync sync --market GB       # override the configured market
//! ghostsync auth                   # sign in again
//! ```

mod auth;
mod sync;

pub use auth::auth;
pub use sync::SyncOptions;
pub use sync::run;
pub use sync::sync;
