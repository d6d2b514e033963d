use reqwest::Client;
use serde_json::Value;

use crate::{
    Res,
    config::Config,
    errors::Error,
    spotify::read_json,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse,
    },
};

/// Spotify accepts at most this many URIs per add-tracks request.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Retrieves the raw playlist resource.
///
/// Issues one `GET /playlists/{playlist_id}`. Only the first page of items is
/// part of the response; further pages are not requested.
pub async fn get(config: &Config, token: &str, playlist_id: &str) -> Res<Value> {
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = config.api_url,
        id = playlist_id
    );

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;
    read_json(response).await
}

/// Creates a private playlist in the account of `user_id`.
pub async fn create(
    config: &Config,
    token: &str,
    user_id: &str,
    request: &CreatePlaylistRequest,
) -> Res<CreatePlaylistResponse> {
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = config.api_url,
        user_id = user_id
    );

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(request)
        .send()
        .await?;

    let json = read_json(response).await?;
    serde_json::from_value(json).map_err(|e| {
        Error::MalformedResponse(format!("create playlist response lacks 'id': {}", e))
    })
}

/// Appends `uris` to the playlist, one request per batch of 100.
///
/// Returns the snapshot id of the last batch. Batches already sent stay in
/// the playlist when a later one fails.
pub async fn add_tracks(
    config: &Config,
    token: &str,
    playlist_id: &str,
    uris: &[String],
) -> Res<Option<String>> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = config.api_url,
        id = playlist_id
    );

    let client = Client::new();
    let mut snapshot_id = None;

    for chunk in uris.chunks(MAX_TRACKS_PER_REQUEST) {
        let request = AddTrackToPlaylistRequest {
            uris: chunk.to_vec(),
        };
        let response = client
            .post(&api_url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let json = read_json(response).await?;
        let added: AddTrackToPlaylistResponse = serde_json::from_value(json).map_err(|e| {
            Error::MalformedResponse(format!("add tracks response lacks 'snapshot_id': {}", e))
        })?;
        snapshot_id = Some(added.snapshot_id);
    }

    Ok(snapshot_id)
}
