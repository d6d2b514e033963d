//! Spotify Playlist Splitter Library
//!
//! This library reads a playlist from the Spotify Web API, rebuilds its tracks
//! and performing artists, and groups the tracks by artist. The grouping can be
//! printed, exported to a JSON file, or replicated on Spotify as one playlist
//! per artist.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading from the environment and `.env` files
//! - `errors` - Error taxonomy shared by every operation
//! - `playlist` - Parsing, grouping, export and replication of playlists
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use playsplit::{config, playlist};
//!
//! #[tokio::main]
//! async fn main() -> playsplit::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     // Authenticate, fetch and group...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod playlist;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use errors::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports one of the variants of
/// [`Error`], so callers can tell a malformed remote payload apart from a
/// network failure or a bad user-supplied attribute.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use playsplit::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
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
/// info!("Fetching playlist {}", playlist_id);
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
/// # Example
///
/// ```
/// success!("Created {} playlists", count);
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
/// terminates the program with exit code 1. Only the binary uses this macro;
/// library code returns [`Error`] values instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
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
/// Used for recoverable issues that users should notice, such as a playlist
/// whose reported track total exceeds the tracks actually returned.
///
/// # Example
///
/// ```
/// warning!("Only {} of {} tracks were returned", fetched, total);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
