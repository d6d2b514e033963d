//! # Playlist Module
//!
//! The data-model side of the tool: turn a raw playlist resource into typed
//! entities, bucket its tracks by performing artist, and hand the buckets to
//! a file export or to Spotify.
//!
//! ```text
//! raw JSON ──parse_playlist──▶ Playlist ──group_by_artist──▶ ArtistGrouping
//!                                                              ├── export
//!                                                              └── replicate_per_artist
//! ```

mod export;
mod grouping;
mod parser;
mod replicate;

pub use export::{Attribute, export, export_document};
pub use grouping::{ArtistGrouping, group_by_artist};
pub use parser::parse_playlist;
pub use replicate::replicate_per_artist;

use crate::{Res, config::Config, spotify, types::Playlist};

/// Fetches and parses a playlist in one go.
///
/// Only the first page of tracks is read; see [`Playlist::is_truncated`].
pub async fn fetch_playlist(config: &Config, token: &str, playlist_id: &str) -> Res<Playlist> {
    let raw = spotify::playlist::get(config, token, playlist_id).await?;
    parse_playlist(&raw)
}
