//! Spotify Web API backend with a shared party queue.
//!
//! This library authenticates users against Spotify (authorization code flow
//! with refresh), exposes a fixed set of HTTP endpoints on top of the Web API,
//! reshapes Spotify's responses into a compact schema and runs a party queue on
//! top of a regular playlist.
//!
//! # Modules
//!
//! - `api` - HTTP handlers and credential header handling
//! - `config` - Configuration management and environment variables
//! - `error` - Error types and their HTTP status mapping
//! - `management` - Workflows built from one or more Spotify calls
//! - `normalize` - Mapping of Spotify responses onto the served schema
//! - `server` - Router and HTTP server
//! - `spotify` - Spotify Web API client with retry and token refresh
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotiweb::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotiweb::Res<()> {
//!     config::load_env().await?;
//!     let state = server::AppState::new(config::SpotifyConfig::from_env()?);
//!     server::start_api_server(state, &config::server_addr()).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod normalize;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// A convenient Result type alias for application plumbing.
///
/// Used where unrelated error types meet, such as server startup. Operations
/// of the library return [`Result`] instead.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for progress of multi-step
/// workflows and token refreshes.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Refreshing access token...");
/// info!("Clearing {} tracks from the party queue", count);
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
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Access token refreshed");
/// success!("Party started with {} tracks", count);
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
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Cannot load environment. Err: {}", e);
/// error!("Server stopped: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// issues that don't require program termination, such as a failed Spotify
/// call that is about to be retried or a request answered with an error.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("{} failed (attempt {}/{}): {}", operation, attempt, max, failure);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
