#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use serde_json::{Value, json};
use spotiweb::{
    config::{PartyTiming, SpotifyConfig},
    server::AppState,
    spotify::SpotifyClient,
    types::Credentials,
};
use wiremock::MockServer;

pub const PARTY_PLAYLIST: &str = "party";
pub const PARTY_DEVICE: &str = "party-device";

// Helper function to create a config pointing at the mock server
pub fn test_config(server: &MockServer) -> SpotifyConfig {
    SpotifyConfig {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        redirect_uri: "http://localhost:3100/api/v1/callback".to_string(),
        scope: "user-read-private streaming".to_string(),
        auth_url: "https://accounts.example.com/authorize".to_string(),
        token_url: format!("{}/api/token", server.uri()),
        api_url: server.uri(),
        party_playlist_id: PARTY_PLAYLIST.to_string(),
        party_device_id: PARTY_DEVICE.to_string(),
        party_timing: PartyTiming {
            drain_delay: Duration::ZERO,
            settle_delay: Duration::ZERO,
        },
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("old-access", "refresh-me")
}

pub fn test_client(server: &MockServer) -> SpotifyClient {
    SpotifyClient::new(
        reqwest::Client::new(),
        Arc::new(test_config(server)),
        credentials(),
    )
}

pub fn test_state(server: &MockServer) -> AppState {
    AppState::new(test_config(server))
}

// Helper function to create a Spotify track object
pub fn track_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{id}"),
        "href": format!("https://api.spotify.com/v1/tracks/{id}"),
        "duration_ms": 180000,
        "track_number": 2,
        "is_local": false,
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{id}") },
        "artists": [{
            "id": "artist",
            "name": "Artist",
            "href": "https://api.spotify.com/v1/artists/artist"
        }],
        "album": {
            "id": "album",
            "name": "Album",
            "images": [{ "url": "https://i.scdn.co/image/album", "height": 640, "width": 640 }]
        }
    })
}

// Helper function to create a playlist item wrapping a track
pub fn item_json(id: &str) -> Value {
    json!({
        "added_at": "2024-05-01T10:00:00Z",
        "is_local": false,
        "track": track_json(id, &format!("Track {id}"))
    })
}

pub fn page_json(ids: &[String], total: usize) -> Value {
    let items: Vec<Value> = ids.iter().map(|id| item_json(id)).collect();
    json!({ "items": items, "total": total })
}

pub fn ids(prefix: &str, range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("{prefix}{i}")).collect()
}

pub fn expired_token_body() -> Value {
    json!({ "error": { "status": 401, "message": "The access token expired" } })
}
