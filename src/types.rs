use serde::{Deserialize, Serialize};

/// Access/refresh token pair identifying the Spotify session of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Result of an operation together with the credentials to use next time.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<T> {
    #[serde(rename = "cacheAuth")]
    pub credentials: Credentials,
    pub data: T,
}

// Spotify Web API response shapes. Every field the API documents as nullable,
// or omits for local files, is optional here.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Image {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Owner {
    pub display_name: Option<String>,
}

/// One page of an offset-paginated listing.
///
/// Spotify occasionally returns `null` in place of an item (deleted or
/// unavailable entries). Those stay in `items` as `None` so offsets keep
/// counting every raw entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<Option<T>>,
    pub total: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Playlist {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub uri: Option<String>,
    pub snapshot_id: Option<String>,
    pub images: Option<Vec<Image>>,
    pub owner: Option<Owner>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimpleArtist {
    pub id: Option<String>,
    pub name: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Album {
    pub id: Option<String>,
    pub name: Option<String>,
    pub images: Option<Vec<Image>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: Option<String>,
    pub uri: Option<String>,
    pub href: Option<String>,
    pub artists: Option<Vec<SimpleArtist>>,
    pub album: Option<Album>,
    pub external_urls: Option<ExternalUrls>,
    pub duration_ms: Option<u64>,
    pub track_number: Option<u32>,
    pub is_local: Option<bool>,
}

/// Entry of a playlist, the saved-tracks library or the play history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackItem {
    pub added_at: Option<String>,
    pub played_at: Option<String>,
    pub is_local: Option<bool>,
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<Paging<Track>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueResponse {
    pub currently_playing: Option<Track>,
    #[serde(default)]
    pub queue: Vec<Track>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentPlayback {
    pub device: Option<Device>,
    pub repeat_state: Option<String>,
    pub shuffle_state: Option<bool>,
    #[serde(default)]
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub currently_playing_type: Option<String>,
    pub item: Option<Track>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub volume_percent: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub product: Option<String>,
    pub uri: Option<String>,
    #[serde(default)]
    pub images: Vec<ProfileImage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileImage {
    pub url: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: Option<String>,
}

/// Body of a play command. `device_id` travels as query parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uris: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<PlayOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_ms: Option<u64>,
    #[serde(skip_serializing)]
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayOffset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

// Normalized records handed to the HTTP layer.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPlaylist {
    pub name: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub uri: Option<String>,
    pub owner: Option<String>,
    pub snapshot_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackOffset {
    pub position: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayContext {
    pub context_uri: Option<String>,
    pub offset: TrackOffset,
    pub position_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTrack {
    pub local: bool,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub album: AlbumRef,
    pub id: String,
    pub uri: String,
    pub date_added: Option<String>,
    pub href: Option<String>,
    pub url: Option<String>,
    pub play_context: PlayContext,
    pub duration_ms: Option<u64>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_type: Option<String>,
    pub device: Option<Device>,
    pub is_playing: bool,
    pub item: NormalizedTrack,
    pub repeat: Option<String>,
    pub shuffle: Option<bool>,
    pub image: Option<String>,
    pub progress_ms: u64,
}
