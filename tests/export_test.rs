mod common;

use common::mix_playlist;
use playsplit::{
    Error,
    playlist::{Attribute, export, group_by_artist},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

async fn read_json(path: &std::path::Path) -> Value {
    let content = async_fs::read_to_string(path).await.unwrap();
    serde_json::from_str(&content).unwrap()
}

#[tokio::test]
async fn test_export_by_id_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grouping.json");
    let playlist = mix_playlist();
    let grouping = group_by_artist(&playlist);

    export(&grouping, &playlist.owner.id, &path, Some("id"))
        .await
        .unwrap();

    let doc = read_json(&path).await;
    let keys: Vec<&str> = doc["playlist"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["a1", "a2"]);
    assert_eq!(doc["owner"], json!("owner1"));
    assert_eq!(doc["playlist"]["a1"], json!(["t1", "t2"]));
    assert_eq!(doc["playlist"]["a2"], json!(["t2"]));
}

#[tokio::test]
async fn test_export_defaults_to_names_and_track_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grouping.json");
    let grouping = group_by_artist(&mix_playlist());

    export(&grouping, "owner1", &path, None).await.unwrap();

    assert_eq!(
        read_json(&path).await,
        json!({
            "playlist": { "Alice": ["t1", "t2"], "Bob": ["t2"] },
            "owner": "owner1"
        })
    );
}

#[tokio::test]
async fn test_export_by_uri() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grouping.json");
    let grouping = group_by_artist(&mix_playlist());

    export(&grouping, "owner1", &path, Some("uri")).await.unwrap();

    let doc = read_json(&path).await;
    assert_eq!(
        doc["playlist"]["spotify:artist:a2"],
        json!(["spotify:track:t2"])
    );
}

#[tokio::test]
async fn test_invalid_attribute_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("grouping.json");
    let grouping = group_by_artist(&mix_playlist());

    let result = export(&grouping, "owner1", &path, Some("popularity")).await;

    assert!(matches!(result, Err(Error::InvalidAttribute(ref a)) if a == "popularity"));
    assert!(!path.exists());
    assert!(!dir.path().join("nested").exists());
}

#[tokio::test]
async fn test_export_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grouping.json");
    async_fs::write(&path, "stale content that is not json")
        .await
        .unwrap();
    let grouping = group_by_artist(&mix_playlist());

    export(&grouping, "owner1", &path, Some("name")).await.unwrap();

    assert_eq!(read_json(&path).await["owner"], json!("owner1"));
}

#[test]
fn test_attribute_parsing() {
    assert_eq!("name".parse::<Attribute>().unwrap(), Attribute::Name);
    assert_eq!("id".parse::<Attribute>().unwrap(), Attribute::Id);
    assert_eq!("uri".parse::<Attribute>().unwrap(), Attribute::Uri);

    for invalid in ["popularity", "artists", "external_url", "ID", ""] {
        assert!(
            matches!(invalid.parse::<Attribute>(), Err(Error::InvalidAttribute(_))),
            "{} should be rejected",
            invalid
        );
    }
}

#[test]
fn test_artists_sharing_a_name_merge() {
    let twin_a = common::artist("x1", "Twins");
    let twin_b = common::artist("x2", "Twins");
    let grouping = group_by_artist(&common::playlist(
        "Twins",
        vec![
            common::track("1", &[twin_a]),
            common::track("2", &[twin_b]),
        ],
    ));

    let doc = playsplit::playlist::export_document(&grouping, "owner1", None);

    assert_eq!(grouping.len(), 2);
    assert_eq!(doc["playlist"], json!({ "Twins": ["1", "2"] }));
}
