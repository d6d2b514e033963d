use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A performing artist as listed on a track.
///
/// Identity is the Spotify `id`: two values with the same id are the same
/// artist even if their other fields differ between fetches.
#[derive(Debug, Clone)]
pub struct Artist {
    pub name: String,
    pub id: String,
    pub uri: String,
    pub external_url: String,
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Artist {}

impl Hash for Artist {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub id: String,
    pub uri: String,
    pub artists: Vec<Artist>,
}

impl Track {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub display_name: String,
    pub id: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub name: String,
    /// Total reported by the remote service; may exceed `tracks.len()`.
    pub total_tracks: u64,
    pub tracks: Vec<Track>,
    pub owner: Owner,
}

impl Playlist {
    /// True when the service reported more tracks than it returned.
    pub fn is_truncated(&self) -> bool {
        self.total_tracks > self.tracks.len() as u64
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub track: String,
    pub artists: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub expires_in: u64,
}

/// Shared between the callback handler and the code provider waiting on it.
#[derive(Debug, Clone)]
pub struct PendingAuthorization {
    /// Value the redirect must echo back in its `state` parameter.
    pub expected_state: String,
    /// `Ok(code)` or `Err(reason)` once the callback has been hit.
    pub outcome: Option<Result<String, String>>,
}

impl PendingAuthorization {
    pub fn new(expected_state: impl Into<String>) -> Self {
        Self {
            expected_state: expected_state.into(),
            outcome: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

/// Outcome of replicating one artist's bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicatedPlaylist {
    pub artist: String,
    pub playlist_id: String,
    pub tracks: usize,
}
