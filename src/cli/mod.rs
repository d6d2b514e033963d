//! # CLI Module
//!
//! Command implementations for `playsplit`. Each command resolves the
//! playlist id, authenticates, fetches and parses the playlist, then hands the
//! result to the playlist transforms.
//!
//! ## Commands
//!
//! - [`tracks`] - Prints the tracks of a playlist with their artists
//! - [`export`] - Writes the artist grouping to a JSON file
//! - [`replicate`] - Recreates the grouping on Spotify as one playlist per artist
//!
//! ## Authentication
//!
//! `tracks` and `export` only read public data and use the client-credentials
//! grant. `replicate` creates playlists in a user's account and needs the
//! authorization-code grant; see [`CodeSource`] for how the code is obtained.
//!
//! ## Usage Patterns
//!
//! ```bash
//! playsplit tracks --playlist-id 37i9dQZF1DXcBWIGoYBM5M
//! playsplit export --output grouping.json --attribute id
//! playsplit replicate --manual
//! ```
//!
//! ## Error Handling
//!
//! Commands return the first error they meet; the binary prints it and exits
//! with status 1. There is no retry and no partial recovery.

mod export;
mod replicate;
mod tracks;

use std::{future::Future, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{types::Playlist, warning};

pub use export::export;
pub use replicate::{CodeSource, replicate};
pub use tracks::tracks;

/// Drives `fut` to completion behind a spinner.
async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let output = fut.await;
    pb.finish_and_clear();
    output
}

/// Warns when Spotify reported more tracks than the single page it returned.
fn warn_if_truncated(playlist: &Playlist) {
    if playlist.is_truncated() {
        warning!(
            "Playlist {} reports {} tracks but only the first {} were returned",
            playlist.name,
            playlist.total_tracks,
            playlist.tracks.len()
        );
    }
}
