use crate::{
    error::Result,
    types::{Paging, SearchResponse, Track, TrackItem, UserProfile},
};

use super::{ApiRequest, SpotifyClient};

impl SpotifyClient {
    pub async fn me(&self) -> Result<Option<UserProfile>> {
        self.request("getMe", ApiRequest::get("/me")).await
    }

    /// Retrieves one page of the user's saved tracks.
    pub async fn saved_tracks_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Paging<TrackItem>> {
        let request = ApiRequest::get("/me/tracks")
            .query("offset", offset)
            .query("limit", limit);
        self.fetch("getMySavedTracks", request).await
    }

    /// Retrieves the most recently played tracks, newest first. Unavailable
    /// entries come back as `None`.
    pub async fn recently_played(&self, limit: usize) -> Result<Vec<Option<TrackItem>>> {
        let request = ApiRequest::get("/me/player/recently-played").query("limit", limit);
        let page: Option<Paging<TrackItem>> =
            self.request("getMyRecentlyPlayedTracks", request).await?;
        Ok(page.map(|p| p.items).unwrap_or_default())
    }

    pub async fn search_tracks(&self, query: &str) -> Result<Vec<Track>> {
        let request = ApiRequest::get("/search")
            .query("q", query)
            .query("type", "track");
        let response: Option<SearchResponse> = self.request("searchTracks", request).await?;
        Ok(response
            .and_then(|r| r.tracks)
            .map(|tracks| tracks.items.into_iter().flatten().collect())
            .unwrap_or_default())
    }
}
