use std::{fmt, path::Path, str::FromStr};

use serde_json::{Map, Value, json};

use crate::{
    Res,
    errors::Error,
    playlist::ArtistGrouping,
    types::{Artist, Track},
};

/// Scalar field shared by [`Artist`] and [`Track`], used to label export output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Name,
    Id,
    Uri,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Name, Attribute::Id, Attribute::Uri];

    pub fn of_artist<'a>(&self, artist: &'a Artist) -> &'a str {
        match self {
            Attribute::Name => &artist.name,
            Attribute::Id => &artist.id,
            Attribute::Uri => &artist.uri,
        }
    }

    pub fn of_track<'a>(&self, track: &'a Track) -> &'a str {
        match self {
            Attribute::Name => &track.name,
            Attribute::Id => &track.id,
            Attribute::Uri => &track.uri,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Name => "name",
            Attribute::Id => "id",
            Attribute::Uri => "uri",
        }
    }
}

impl FromStr for Attribute {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .into_iter()
            .find(|attr| attr.as_str() == s)
            .ok_or_else(|| Error::InvalidAttribute(s.to_string()))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the export document for `grouping`.
///
/// With no attribute, keys are artist names and values track ids. With an
/// attribute, both keys and values use it. Artists that share a key have
/// their track lists merged in grouping order.
pub fn export_document(
    grouping: &ArtistGrouping,
    owner_id: &str,
    attribute: Option<Attribute>,
) -> Value {
    let (key_attr, value_attr) = match attribute {
        Some(attr) => (attr, attr),
        None => (Attribute::Name, Attribute::Id),
    };

    let mut buckets = Map::new();
    for (artist, tracks) in grouping.iter() {
        let entry = buckets
            .entry(key_attr.of_artist(artist).to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(values) = entry {
            values.extend(
                tracks
                    .iter()
                    .map(|t| Value::String(value_attr.of_track(t).to_string())),
            );
        }
    }

    json!({
        "playlist": buckets,
        "owner": owner_id,
    })
}

/// Writes the grouping to `output_path` as a single JSON document.
///
/// `attribute` is validated before anything touches the file system, so an
/// unknown name fails with [`Error::InvalidAttribute`] and leaves no file
/// behind. An existing file is overwritten.
pub async fn export(
    grouping: &ArtistGrouping,
    owner_id: &str,
    output_path: &Path,
    attribute: Option<&str>,
) -> Res<()> {
    let attribute = attribute.map(str::parse::<Attribute>).transpose()?;
    let document = export_document(grouping, owner_id, attribute);
    let json = serde_json::to_string_pretty(&document)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent).await?;
    }
    async_fs::write(output_path, json).await?;
    Ok(())
}
