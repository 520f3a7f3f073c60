use serde_json::json;

use crate::{
    error::{Error, Result},
    types::{CurrentPlayback, Device, DevicesResponse, PlayRequest, QueueResponse},
};

use super::{ApiRequest, SpotifyClient};

impl SpotifyClient {
    /// Current playback, or `None` when nothing is active.
    pub async fn current_playback(&self) -> Result<Option<CurrentPlayback>> {
        self.request("getMyCurrentPlaybackState", ApiRequest::get("/me/player"))
            .await
    }

    /// Starts or resumes playback.
    ///
    /// Without a request, playback resumes where it was paused. The device id
    /// of the request is sent as query parameter; the remaining fields form
    /// the body.
    pub async fn play(&self, play: Option<&PlayRequest>) -> Result<()> {
        let mut request = ApiRequest::put("/me/player/play");
        if let Some(play) = play {
            if let Some(device_id) = &play.device_id {
                request = request.query("device_id", device_id);
            }
            let body = serde_json::to_value(play)
                .map_err(|e| Error::Validation(format!("Error: Invalid play request: {e}")))?;
            request = request.json(body);
        }
        self.command("play", request).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.command("pause", ApiRequest::put("/me/player/pause"))
            .await
    }

    pub async fn skip_to_next(&self) -> Result<()> {
        self.command("skipToNext", ApiRequest::post("/me/player/next"))
            .await
    }

    pub async fn skip_to_previous(&self) -> Result<()> {
        self.command("skipToPrevious", ApiRequest::post("/me/player/previous"))
            .await
    }

    pub async fn set_shuffle(&self, state: bool) -> Result<()> {
        let request = ApiRequest::put("/me/player/shuffle").query("state", state);
        self.command("setShuffle", request).await
    }

    /// Moves playback to another device without starting it.
    pub async fn transfer_playback(&self, device_id: &str) -> Result<()> {
        let request = ApiRequest::put("/me/player").json(json!({ "device_ids": [device_id] }));
        self.command("transferMyPlayback", request).await
    }

    pub async fn devices(&self) -> Result<Vec<Device>> {
        let response: Option<DevicesResponse> = self
            .request("getMyDevices", ApiRequest::get("/me/player/devices"))
            .await?;
        Ok(response.map(|r| r.devices).unwrap_or_default())
    }

    pub async fn queue(&self) -> Result<QueueResponse> {
        let response = self
            .request("getQueue", ApiRequest::get("/me/player/queue"))
            .await?;
        Ok(response.unwrap_or_default())
    }

    /// Appends a track URI to the player queue of `device_id`.
    pub async fn add_to_queue(&self, uri: &str, device_id: Option<&str>) -> Result<()> {
        let mut request = ApiRequest::post("/me/player/queue").query("uri", uri);
        if let Some(device_id) = device_id {
            request = request.query("device_id", device_id);
        }
        self.command("addToQueue", request).await
    }
}
