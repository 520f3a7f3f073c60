use serde_json::json;

use crate::{
    error::Result,
    types::{Paging, Playlist, SnapshotResponse, TrackItem},
};

use super::{ApiRequest, SpotifyClient};

/// Maximum number of tracks Spotify accepts per add/remove call.
pub const TRACK_BATCH_LIMIT: usize = 100;

impl SpotifyClient {
    /// Retrieves one page of the current user's playlists.
    pub async fn user_playlists_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Paging<Playlist>> {
        let request = ApiRequest::get("/me/playlists")
            .query("offset", offset)
            .query("limit", limit);
        self.fetch("getUserPlaylists", request).await
    }

    pub async fn playlist(&self, playlist_id: &str) -> Result<Option<Playlist>> {
        let request = ApiRequest::get(format!("/playlists/{playlist_id}"));
        self.request("getPlaylist", request).await
    }

    /// Retrieves one page of a playlist's items.
    pub async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Paging<TrackItem>> {
        let request = ApiRequest::get(format!("/playlists/{playlist_id}/tracks"))
            .query("offset", offset)
            .query("limit", limit);
        self.fetch("getPlaylistTracks", request).await
    }

    /// Adds track URIs to a playlist, appending unless `position` is given.
    pub async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
        position: Option<usize>,
    ) -> Result<Option<SnapshotResponse>> {
        let mut body = json!({ "uris": uris });
        if let Some(position) = position {
            body["position"] = json!(position);
        }

        let request = ApiRequest::post(format!("/playlists/{playlist_id}/tracks")).json(body);
        self.request("addTracksToPlaylist", request).await
    }

    /// Removes every occurrence of the given track URIs from a playlist.
    pub async fn remove_tracks_from_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<Option<SnapshotResponse>> {
        let tracks: Vec<_> = uris.iter().map(|uri| json!({ "uri": uri })).collect();
        let request = ApiRequest::delete(format!("/playlists/{playlist_id}/tracks"))
            .json(json!({ "tracks": tracks }));
        self.request("removeTracksFromPlaylist", request).await
    }

    /// Replaces the whole content of a playlist with `uris`.
    pub async fn replace_playlist_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<Option<SnapshotResponse>> {
        let request = ApiRequest::put(format!("/playlists/{playlist_id}/tracks"))
            .json(json!({ "uris": uris }));
        self.request("replaceTracksInPlaylist", request).await
    }
}
