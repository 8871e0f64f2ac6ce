//! Spotify Liked Songs Resync Library
//!
//! Spotify clients cache the "Liked Songs" library and do not always notice
//! changes made on other devices. This library forces a resync by adding one
//! track the user has not liked yet and removing it again a few seconds later.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration file loading and refresh token write-back
//! - `error` - The crate-wide error type
//! - `management` - Token acquisition, track selection and the sync trigger
//! - `server` - Single-request callback listener for the sign-in flow
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Random state, keyword picking and URI helpers
//! - `words` - Built-in search keywords
//!
//! # Example
//!
//! ```
//! use ghostsync::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> ghostsync::Res<()> {
//!     cli::sync(&config::default_env_path(), None).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod words;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports one of the [`Error`]
/// variants so the binary can print a precise message before exiting.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Opening Spotify sign-in page...");
/// info!("Found track | URI: {}", uri);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to provide positive feedback when a stage of the run completes.
///
/// # Example
///
/// ```
/// success!("Removed track | URI: {}", uri);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Writes to stderr and terminates the process with exit code 1. Library
/// code never calls this; it is reserved for the top-level handler in
/// `main`, which receives every failure as an [`Error`].
///
/// # Example
///
/// ```
/// error!("{}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues that the user should notice, such as a
/// rejected refresh token or a search attempt that came back empty-handed.
///
/// # Example
///
/// ```
/// warning!("Stored refresh token was rejected, signing in again.");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
