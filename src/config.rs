//! Configuration management for the playlist splitter.
//!
//! This module loads `.env` files into the process environment once at startup
//! and turns the environment into an explicit [`Config`] value. The `Config` is
//! then handed to the auth client and every remote call, so nothing reads the
//! environment after startup.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{Res, errors::Error};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SCOPE: &str = "playlist-modify-public playlist-modify-private";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

/// Loads environment variables from `.env` files.
///
/// Reads `playsplit/.env` in the platform-specific local data directory and
/// then a `.env` in the working directory. Missing files are skipped; values
/// already present in the environment are never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/playsplit/.env`
/// - macOS: `~/Library/Application Support/playsplit/.env`
/// - Windows: `%LOCALAPPDATA%/playsplit/.env`
///
/// Nothing is created on disk.
///
/// # Errors
///
/// Returns an error if an existing `.env` file cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if async_fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
        dotenv::from_path(&path)
            .map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::Configuration(e.to_string())),
    }
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playsplit/.env");
    path
}

/// Application credentials registered with Spotify's developer platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// Runtime configuration, built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub credentials: Credentials,
    /// Playlist used when a command is not given one explicitly.
    pub playlist_id: Option<String>,
    /// Base URL of the Web API, e.g. `https://api.spotify.com/v1`.
    pub api_url: String,
    pub token_url: String,
    pub auth_url: String,
    /// Must match a redirect URI registered for the application.
    pub redirect_uri: String,
    pub scope: String,
    /// Bind address of the local OAuth callback server.
    pub server_address: String,
}

impl Config {
    /// Builds a configuration with the public Spotify endpoints.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            playlist_id: None,
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// `CLIENT_ID` and `CLIENT_SECRET` are required. `PLAYLIST_ID` and the
    /// endpoint overrides (`SPOTIFY_API_URL`, `SPOTIFY_API_TOKEN_URL`,
    /// `SPOTIFY_API_AUTH_URL`, `SPOTIFY_API_REDIRECT_URI`,
    /// `SPOTIFY_API_AUTH_SCOPE`, `SERVER_ADDRESS`) are optional.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when a required variable is missing.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to
    /// its value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            optional(key).ok_or_else(|| Error::Configuration(format!("{} must be set", key)))
        };
        let or_default =
            |key: &str, default: &str| optional(key).unwrap_or_else(|| default.to_string());

        let credentials = Credentials::new(required("CLIENT_ID")?, required("CLIENT_SECRET")?);

        Ok(Self {
            credentials,
            playlist_id: optional("PLAYLIST_ID"),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL),
            token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            redirect_uri: or_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            server_address: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        })
    }

    /// Picks the explicitly requested playlist, falling back to `PLAYLIST_ID`.
    pub fn resolve_playlist_id(&self, explicit: Option<String>) -> Res<String> {
        explicit
            .or_else(|| self.playlist_id.clone())
            .ok_or_else(|| {
                Error::Configuration(
                    "No playlist id given. Pass --playlist-id or set PLAYLIST_ID.".to_string(),
                )
            })
    }
}
