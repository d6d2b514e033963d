use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;
use sha2::{Digest, Sha256};

use crate::{Res, errors::Error};

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque value echoed back by the authorization redirect.
pub fn generate_state() -> String {
    random_alphanumeric(16)
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn build_authorize_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    scope: &str,
    code_challenge: &str,
    state: &str,
) -> Res<String> {
    let url = Url::parse_with_params(
        auth_url,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
            ("scope", scope),
            ("state", state),
        ],
    )
    .map_err(|e| Error::Configuration(format!("invalid authorization URL '{}': {}", auth_url, e)))?;

    Ok(url.into())
}

/// Pulls the authorization code out of what the user pasted.
///
/// Accepts either the bare code or the full redirect URL. A URL must carry
/// the expected `state` and no `error` parameter.
pub fn extract_authorization_code(input: &str, expected_state: &str) -> Res<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::Authorization("no authorization code given".to_string()));
    }

    let Ok(url) = Url::parse(input) else {
        return Ok(input.to_string());
    };

    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    if let Some(error) = param("error") {
        return Err(Error::Authorization(format!("authorization denied: {}", error)));
    }
    if param("state").as_deref() != Some(expected_state) {
        return Err(Error::Authorization(
            "state parameter does not match the request".to_string(),
        ));
    }

    param("code")
        .ok_or_else(|| Error::Authorization("redirect URL carries no code".to_string()))
}

/// Name of the playlist created for `artist` out of `source`.
pub fn artist_playlist_name(artist: &str, source: &str) -> String {
    format!("{} - {}", artist, source)
}

pub fn artist_playlist_description(artist: &str, source: &str) -> String {
    format!("Tracks by {} from the playlist {}", artist, source)
}
