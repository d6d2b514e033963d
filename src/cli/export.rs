use std::path::Path;

use crate::{
    Res,
    config::Config,
    info,
    playlist::{self, Attribute, fetch_playlist, group_by_artist},
    spotify::auth::AuthClient,
    success,
};

use super::{warn_if_truncated, with_spinner};

pub async fn export(
    config: &Config,
    playlist_id: Option<String>,
    output: &Path,
    attribute: Option<String>,
) -> Res<()> {
    // reject a bad attribute before any request or write
    let attribute = attribute
        .as_deref()
        .map(str::parse::<Attribute>)
        .transpose()?;
    let playlist_id = config.resolve_playlist_id(playlist_id)?;

    let mut auth = AuthClient::new(config);
    let token = auth.client_credentials().await?;

    let playlist = with_spinner(
        "Fetching playlist...",
        fetch_playlist(config, &token.access_token, &playlist_id),
    )
    .await?;
    warn_if_truncated(&playlist);

    let grouping = group_by_artist(&playlist);
    info!(
        "Grouped {} tracks under {} artists",
        playlist.tracks.len(),
        grouping.len()
    );

    playlist::export(
        &grouping,
        &playlist.owner.id,
        output,
        attribute.as_ref().map(Attribute::as_str),
    )
    .await?;

    success!("Artist grouping written to {}", output.display());
    Ok(())
}
