use indexmap::IndexMap;

use crate::types::{Artist, Playlist, Track};

/// Tracks of a playlist bucketed by performing artist.
///
/// Buckets iterate in order of the artist's first appearance in the playlist.
/// A track with several artists sits in each of their buckets.
#[derive(Debug, Clone, Default)]
pub struct ArtistGrouping {
    source_name: String,
    buckets: IndexMap<Artist, Vec<Track>>,
}

impl ArtistGrouping {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            ..Default::default()
        }
    }

    /// Appends `track` to the bucket of `artist`, creating it on first encounter.
    pub fn push(&mut self, artist: &Artist, track: &Track) {
        match self.buckets.get_mut(artist) {
            Some(tracks) => tracks.push(track.clone()),
            None => {
                self.buckets.insert(artist.clone(), vec![track.clone()]);
            }
        }
    }

    /// Name of the playlist the grouping was built from.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn get(&self, artist: &Artist) -> Option<&[Track]> {
        self.buckets.get(artist).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Artist, &[Track])> {
        self.buckets
            .iter()
            .map(|(artist, tracks)| (artist, tracks.as_slice()))
    }

    pub fn artists(&self) -> impl Iterator<Item = &Artist> {
        self.buckets.keys()
    }

    /// Number of artists.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum of bucket sizes, i.e. the number of (track, artist) pairs.
    pub fn total_entries(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Groups the tracks of `playlist` by artist.
///
/// Tracks are visited in playlist order and artists in listing order. Tracks
/// without artists contribute nothing.
pub fn group_by_artist(playlist: &Playlist) -> ArtistGrouping {
    let mut grouping = ArtistGrouping::new(playlist.name.clone());
    for track in &playlist.tracks {
        for (pos, artist) in track.artists.iter().enumerate() {
            // an artist credited twice on one track still gets a single entry
            if track.artists[..pos].contains(artist) {
                continue;
            }
            grouping.push(artist, track);
        }
    }
    grouping
}
