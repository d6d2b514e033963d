use tabled::Table;

use crate::{
    Res,
    config::Config,
    info,
    playlist::fetch_playlist,
    spotify::auth::AuthClient,
    types::TrackTableRow,
};

use super::{warn_if_truncated, with_spinner};

pub async fn tracks(config: &Config, playlist_id: Option<String>) -> Res<()> {
    let playlist_id = config.resolve_playlist_id(playlist_id)?;

    let mut auth = AuthClient::new(config);
    let token = auth.client_credentials().await?;

    let playlist = with_spinner(
        "Fetching playlist...",
        fetch_playlist(config, &token.access_token, &playlist_id),
    )
    .await?;
    warn_if_truncated(&playlist);

    info!("Playlist Name: {}", playlist.name);
    info!("Total Tracks: {}", playlist.total_tracks);
    info!("Owner: {}", playlist.owner.display_name);

    let rows: Vec<TrackTableRow> = playlist
        .tracks
        .iter()
        .enumerate()
        .map(|(idx, track)| TrackTableRow {
            position: idx + 1,
            track: track.name.clone(),
            artists: track.artist_names(),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
    Ok(())
}
