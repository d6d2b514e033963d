//! # Spotify Integration Module
//!
//! This module is the thin client over the Spotify Web API. It obtains access
//! tokens, reads a playlist resource, and creates and fills playlists. Every
//! call is a single request awaited in sequence: there is no pagination,
//! retry, back-off or timeout handling.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, playlist transforms)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (client credentials, authorization code + PKCE)
//!     └── Playlist Operations (read, create, add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! [`auth`] - The [`auth::AuthClient`] state machine and the
//! [`auth::AuthorizationCodeProvider`] seam through which the user-consent
//! step is supplied (console prompt, local callback server, or a code passed
//! in out of band).
//!
//! [`playlist`] - Playlist endpoints:
//! - `GET /playlists/{playlist_id}` - Playlist resource with its first page of items
//! - `POST /users/{user_id}/playlists` - Create a new playlist
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks to a playlist
//!
//! ## Error Mapping
//!
//! - Transport failures become [`Error::NetworkFailure`]
//! - Non-success statuses become [`Error::Api`], carrying Spotify's error message
//! - Bodies that are not the JSON we expect become [`Error::MalformedResponse`]

use reqwest::Response;
use serde_json::Value;

use crate::{Res, errors::Error};

pub mod auth;
pub mod playlist;

/// Reads a response body as JSON, mapping failures onto the crate taxonomy.
pub(crate) async fn read_json(response: Response) -> Res<Value> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| Error::MalformedResponse(format!("body is not valid JSON: {}", e)))
}

/// Extracts a readable message from a Spotify error body.
///
/// The Web API answers `{"error": {"status": .., "message": ..}}` while the
/// accounts service answers `{"error": "..", "error_description": ".."}`.
fn api_error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    json.pointer("/error/message")
        .or_else(|| json.get("error_description"))
        .or_else(|| json.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::api_error_message;

    #[test]
    fn web_api_error_message() {
        let body = r#"{"error":{"status":404,"message":"Resource not found"}}"#;
        assert_eq!(api_error_message(body), "Resource not found");
    }

    #[test]
    fn accounts_error_message() {
        let body = r#"{"error":"invalid_client","error_description":"Invalid client secret"}"#;
        assert_eq!(api_error_message(body), "Invalid client secret");
    }

    #[test]
    fn plain_text_error_message() {
        assert_eq!(api_error_message(" Bad Gateway \n"), "Bad Gateway");
    }
}
