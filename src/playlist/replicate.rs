use crate::{
    Res,
    config::Config,
    info,
    playlist::ArtistGrouping,
    spotify, success,
    types::{CreatePlaylistRequest, ReplicatedPlaylist},
    utils,
};

/// Recreates the grouping on Spotify as one playlist per artist.
///
/// Artists are handled one after another in grouping order: create the
/// playlist in `owner_id`'s account, then add the artist's track URIs to it.
/// The first failure stops the run. Nothing is rolled back, so a playlist
/// whose tracks could not be added stays behind empty, as do the playlists of
/// the artists already processed.
pub async fn replicate_per_artist(
    config: &Config,
    grouping: &ArtistGrouping,
    owner_id: &str,
    token: &str,
) -> Res<Vec<ReplicatedPlaylist>> {
    let mut replicated = Vec::with_capacity(grouping.len());

    for (artist, tracks) in grouping.iter() {
        let request = CreatePlaylistRequest {
            name: utils::artist_playlist_name(&artist.name, grouping.source_name()),
            description: utils::artist_playlist_description(
                &artist.name,
                grouping.source_name(),
            ),
            public: false,
        };

        info!("Create playlist {}", request.name);
        let created = spotify::playlist::create(config, token, owner_id, &request).await?;

        let uris: Vec<String> = tracks.iter().map(|t| t.uri.clone()).collect();
        spotify::playlist::add_tracks(config, token, &created.id, &uris).await?;
        success!("Added {} tracks to {}", uris.len(), request.name);

        replicated.push(ReplicatedPlaylist {
            artist: artist.name.clone(),
            playlist_id: created.id,
            tracks: uris.len(),
        });
    }

    Ok(replicated)
}
