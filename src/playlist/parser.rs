use serde_json::Value;

use crate::{
    Res,
    errors::Error,
    types::{Artist, Owner, Playlist, Track},
};

/// Turns a raw playlist resource into a [`Playlist`].
///
/// The object must carry `tracks.items`; every item must carry a `track`
/// object with `name`, `id`, `uri` and `artists`, and every artist must carry
/// `name`, `id`, `uri` and `external_urls.spotify`. Nothing is defaulted except
/// the owner's display name, which Spotify reports as `null` for some accounts
/// and which then falls back to the owner id.
///
/// Parsing either yields a whole playlist or fails with
/// [`Error::MalformedResponse`]; it never returns a partial value.
pub fn parse_playlist(raw: &Value) -> Res<Playlist> {
    let items = raw
        .get("tracks")
        .and_then(|t| t.get("items"))
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("tracks.items"))?;

    let tracks = items
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_track(item, idx))
        .collect::<Res<Vec<Track>>>()?;

    Ok(Playlist {
        name: string_at(raw, &["name"], "name")?,
        total_tracks: raw
            .pointer("/tracks/total")
            .and_then(Value::as_u64)
            .ok_or_else(|| malformed("tracks.total"))?,
        tracks,
        owner: parse_owner(raw)?,
    })
}

fn parse_track(item: &Value, idx: usize) -> Res<Track> {
    let track = item
        .get("track")
        .filter(|t| t.is_object())
        .ok_or_else(|| malformed(&format!("tracks.items[{}].track", idx)))?;
    let at = |field: &str| format!("tracks.items[{}].track.{}", idx, field);

    let artists = track
        .get("artists")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(&at("artists")))?
        .iter()
        .enumerate()
        .map(|(a_idx, artist)| parse_artist(artist, &at(&format!("artists[{}]", a_idx))))
        .collect::<Res<Vec<Artist>>>()?;

    Ok(Track {
        name: string_at(track, &["name"], &at("name"))?,
        id: string_at(track, &["id"], &at("id"))?,
        uri: string_at(track, &["uri"], &at("uri"))?,
        artists,
    })
}

fn parse_artist(artist: &Value, path: &str) -> Res<Artist> {
    let at = |field: &str| format!("{}.{}", path, field);

    Ok(Artist {
        name: string_at(artist, &["name"], &at("name"))?,
        id: string_at(artist, &["id"], &at("id"))?,
        uri: string_at(artist, &["uri"], &at("uri"))?,
        external_url: string_at(
            artist,
            &["external_urls", "spotify"],
            &at("external_urls.spotify"),
        )?,
    })
}

fn parse_owner(raw: &Value) -> Res<Owner> {
    let owner = raw
        .get("owner")
        .filter(|o| o.is_object())
        .ok_or_else(|| malformed("owner"))?;
    let id = string_at(owner, &["id"], "owner.id")?;

    Ok(Owner {
        display_name: owner
            .get("display_name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| id.clone()),
        uri: string_at(owner, &["uri"], "owner.uri")?,
        id,
    })
}

fn string_at(value: &Value, keys: &[&str], path: &str) -> Res<String> {
    keys.iter()
        .try_fold(value, |v, key| v.get(*key))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| malformed(path))
}

fn malformed(path: &str) -> Error {
    Error::MalformedResponse(format!("missing or invalid field '{}'", path))
}
