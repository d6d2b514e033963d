#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use playsplit::{
    config::{Config, Credentials},
    types::{Artist, Owner, Playlist, Track},
};
use serde_json::{Value, json};

pub fn artist(id: &str, name: &str) -> Artist {
    Artist {
        name: name.to_string(),
        id: id.to_string(),
        uri: format!("spotify:artist:{}", id),
        external_url: format!("https://open.spotify.com/artist/{}", id),
    }
}

pub fn track(id: &str, artists: &[Artist]) -> Track {
    Track {
        name: format!("Track {}", id),
        id: id.to_string(),
        uri: format!("spotify:track:{}", id),
        artists: artists.to_vec(),
    }
}

pub fn playlist(name: &str, tracks: Vec<Track>) -> Playlist {
    Playlist {
        name: name.to_string(),
        total_tracks: tracks.len() as u64,
        tracks,
        owner: Owner {
            display_name: "Owner".to_string(),
            id: "owner1".to_string(),
            uri: "spotify:user:owner1".to_string(),
        },
    }
}

/// `{Alice: [t1, t2], Bob: [t2]}` once grouped.
pub fn mix_playlist() -> Playlist {
    let alice = artist("a1", "Alice");
    let bob = artist("a2", "Bob");
    playlist(
        "Mix",
        vec![
            track("t1", std::slice::from_ref(&alice)),
            track("t2", &[alice, bob]),
        ],
    )
}

pub fn artist_json(id: &str, name: &str) -> Value {
    json!({
        "external_urls": { "spotify": format!("https://open.spotify.com/artist/{}", id) },
        "href": format!("https://api.spotify.com/v1/artists/{}", id),
        "id": id,
        "name": name,
        "type": "artist",
        "uri": format!("spotify:artist:{}", id)
    })
}

pub fn item_json(id: &str, name: &str, artists: Vec<Value>) -> Value {
    json!({
        "added_at": "2024-02-05T15:10:28Z",
        "track": {
            "artists": artists,
            "duration_ms": 250373,
            "id": id,
            "name": name,
            "popularity": 87,
            "type": "track",
            "uri": format!("spotify:track:{}", id)
        }
    })
}

pub fn playlist_json(name: &str, total: u64, items: Vec<Value>) -> Value {
    json!({
        "id": "mix",
        "name": name,
        "owner": {
            "display_name": "Owner",
            "id": "owner1",
            "type": "user",
            "uri": "spotify:user:owner1"
        },
        "tracks": {
            "href": "https://api.spotify.com/v1/playlists/mix/tracks",
            "items": items,
            "limit": 100,
            "next": null,
            "offset": 0,
            "total": total
        }
    })
}

pub fn mix_playlist_json() -> Value {
    playlist_json(
        "Mix",
        2,
        vec![
            item_json("t1", "First", vec![artist_json("a1", "Alice")]),
            item_json(
                "t2",
                "Second",
                vec![artist_json("a1", "Alice"), artist_json("a2", "Bob")],
            ),
        ],
    )
}

/// Everything the mock saw, in arrival order.
#[derive(Debug, Default)]
pub struct Recorded {
    pub token_forms: Vec<HashMap<String, String>>,
    pub bearer_tokens: Vec<String>,
    pub created: Vec<(String, Value)>,
    pub added: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Clone)]
pub struct Behaviour {
    pub playlist: Value,
    pub token_response: (StatusCode, Value),
    /// Zero-based index of the add-tracks call that answers 502.
    pub fail_add_call: Option<usize>,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            playlist: mix_playlist_json(),
            token_response: (
                StatusCode::OK,
                json!({ "access_token": "token-123", "token_type": "Bearer", "expires_in": 3600 }),
            ),
            fail_add_call: None,
        }
    }
}

#[derive(Clone)]
struct MockState {
    behaviour: Behaviour,
    recorded: Arc<Mutex<Recorded>>,
}

pub struct MockSpotify {
    pub addr: SocketAddr,
    pub recorded: Arc<Mutex<Recorded>>,
}

impl MockSpotify {
    pub async fn start(behaviour: Behaviour) -> Self {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let state = MockState {
            behaviour,
            recorded: Arc::clone(&recorded),
        };

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/playlists/{id}", get(get_playlist))
            .route("/v1/users/{user}/playlists", post(create_playlist))
            .route("/v1/playlists/{id}/tracks", post(add_tracks))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, recorded }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::new(Credentials::new("client-id", "client-secret"));
        config.api_url = format!("http://{}/v1", self.addr);
        config.token_url = format!("http://{}/api/token", self.addr);
        config.auth_url = format!("http://{}/authorize", self.addr);
        config
    }
}

fn record_bearer(state: &MockState, headers: &HeaderMap) {
    if let Some(value) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state
            .recorded
            .lock()
            .unwrap()
            .bearer_tokens
            .push(value.trim_start_matches("Bearer ").to_string());
    }
}

async fn token(
    State(state): State<MockState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.recorded.lock().unwrap().token_forms.push(form);
    let (status, body) = state.behaviour.token_response.clone();
    (status, Json(body)).into_response()
}

async fn get_playlist(
    State(state): State<MockState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    record_bearer(&state, &headers);
    if id != "mix" {
        let body = json!({ "error": { "status": 404, "message": "Resource not found" } });
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }
    Json(state.behaviour.playlist.clone()).into_response()
}

async fn create_playlist(
    State(state): State<MockState>,
    Path(user): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_bearer(&state, &headers);
    let mut recorded = state.recorded.lock().unwrap();
    recorded.created.push((user, body.clone()));
    let id = format!("pl{}", recorded.created.len());
    (
        StatusCode::CREATED,
        Json(json!({ "id": id, "name": body["name"] })),
    )
        .into_response()
}

async fn add_tracks(
    State(state): State<MockState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_bearer(&state, &headers);
    let mut recorded = state.recorded.lock().unwrap();
    let call = recorded.added.len();
    let uris = body["uris"]
        .as_array()
        .map(|uris| {
            uris.iter()
                .filter_map(|u| u.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    recorded.added.push((id, uris));

    if state.behaviour.fail_add_call == Some(call) {
        let body = json!({ "error": { "status": 502, "message": "Bad gateway" } });
        return (StatusCode::BAD_GATEWAY, Json(body)).into_response();
    }
    (StatusCode::CREATED, Json(json!({ "snapshot_id": "snap" }))).into_response()
}
