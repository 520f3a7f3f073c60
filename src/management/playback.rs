use crate::{
    error::{Error, Result},
    normalize,
    spotify::SpotifyClient,
    types::{Device, NormalizedTrack, Outcome, PlayRequest, PlaybackState},
};

pub async fn playback_state(client: &SpotifyClient) -> Result<Outcome<PlaybackState>> {
    let playback = client.current_playback().await?;
    Ok(client.outcome(normalize::playback_state(playback.as_ref())))
}

/// Pauses when something is playing, resumes otherwise.
pub async fn toggle_play(client: &SpotifyClient) -> Result<Outcome<()>> {
    let playing = client
        .current_playback()
        .await?
        .is_some_and(|playback| playback.is_playing);

    if playing {
        client.pause().await?;
    } else {
        client.play(None).await?;
    }
    Ok(client.outcome(()))
}

/// Parses a serialized play context, e.g.
/// `{"context_uri": "spotify:album:...", "offset": {"position": 3}, "device_id": "..."}`.
pub fn parse_play_context(raw: &str) -> Result<PlayRequest> {
    serde_json::from_str(raw)
        .map_err(|e| Error::Validation(format!("Error: Invalid play context: {e}")))
}

/// Starts playback, optionally within a serialized play context.
pub async fn play(client: &SpotifyClient, context: Option<&str>) -> Result<Outcome<()>> {
    let request = context
        .filter(|raw| !raw.trim().is_empty())
        .map(parse_play_context)
        .transpose()?;

    client.play(request.as_ref()).await?;
    Ok(client.outcome(()))
}

pub async fn pause(client: &SpotifyClient) -> Result<Outcome<()>> {
    client.pause().await?;
    Ok(client.outcome(()))
}

pub async fn next(client: &SpotifyClient) -> Result<Outcome<()>> {
    client.skip_to_next().await?;
    Ok(client.outcome(()))
}

pub async fn prev(client: &SpotifyClient) -> Result<Outcome<()>> {
    client.skip_to_previous().await?;
    Ok(client.outcome(()))
}

pub async fn set_shuffle(client: &SpotifyClient, state: bool) -> Result<Outcome<()>> {
    client.set_shuffle(state).await?;
    Ok(client.outcome(()))
}

pub async fn change_device(client: &SpotifyClient, device_id: &str) -> Result<Outcome<()>> {
    client.transfer_playback(device_id).await?;
    Ok(client.outcome(()))
}

pub async fn devices(client: &SpotifyClient) -> Result<Outcome<Vec<Device>>> {
    let devices = client.devices().await?;
    Ok(client.outcome(devices))
}

/// Upcoming playable tracks of the player queue.
pub async fn queue(client: &SpotifyClient) -> Result<Outcome<Vec<NormalizedTrack>>> {
    let queue = client.queue().await?;
    let tracks = queue.queue.iter().map(normalize::album_track).collect();
    Ok(client.outcome(normalize::retain_playable(tracks)))
}
