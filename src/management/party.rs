//! Party queue workflows.
//!
//! The party queue is a regular playlist (see
//! [`SpotifyConfig::party_playlist_id`](crate::config::SpotifyConfig)) whose
//! track order is the play order. Playback runs in the context of that playlist,
//! so a track's absolute position in it doubles as the offset to start at.
//!
//! None of the workflows roll back: when a step fails, the playlist stays as the
//! previous steps left it and the error of the failing step is returned.

use tokio::time::sleep;

use crate::{
    error::{Error, Result},
    info,
    spotify::{SpotifyClient, playlists::TRACK_BATCH_LIMIT},
    success,
    types::{NormalizedTrack, Outcome, PlayOffset, PlayRequest},
    utils,
};

use super::library::{fetch_all_playlist_tracks, fetch_playlist_tracks};

/// Position right after `current_uri` in `queue`, or 0 if it is not there.
pub fn next_position(queue: &[NormalizedTrack], current_uri: &str) -> usize {
    queue
        .iter()
        .find(|track| track.uri == current_uri)
        .and_then(|track| track.play_context.offset.position)
        .map_or(0, |position| position + 1)
}

/// Adds a track to the party queue.
///
/// With `next` unset the track is appended. With `next` set it is inserted
/// right after the track currently playing, located by URI in the queue; if
/// the current track is not part of the queue it goes to the front.
pub async fn enqueue(
    client: &SpotifyClient,
    track_id: &str,
    next: bool,
) -> Result<Outcome<()>> {
    let party_id = client.config().party_playlist_id.clone();
    let uris = [utils::track_uri(track_id)];

    let position = if next {
        let current_uri = client
            .current_playback()
            .await?
            .and_then(|playback| playback.item)
            .and_then(|item| item.uri)
            .unwrap_or_default();
        let queue = fetch_playlist_tracks(client, &party_id).await?;
        Some(next_position(&queue, &current_uri))
    } else {
        None
    };

    client
        .add_tracks_to_playlist(&party_id, &uris, position)
        .await?;
    Ok(client.outcome(()))
}

/// Replaces the party queue with `track_ids` and starts playing at `start_at`.
///
/// 1. read the current queue, unplayable entries included
/// 2. remove all of its entries in batches of at most 100, pausing after each batch
/// 3. add the new tracks in one call
/// 4. read the queue again to find the absolute position of `start_at`
/// 5. after a settle delay, play the party playlist from that position on the
///    party device
///
/// # Errors
///
/// Any failing step aborts the run. [`Error::NotFound`] is returned when
/// `start_at` is not in the rebuilt queue.
pub async fn party_play(
    client: &SpotifyClient,
    track_ids: &[String],
    start_at: &str,
) -> Result<Outcome<()>> {
    let config = client.config();
    let party_id = config.party_playlist_id.as_str();
    let timing = config.party_timing;

    let current = fetch_all_playlist_tracks(client, party_id).await?;
    let current_uris: Vec<String> = current
        .into_iter()
        .map(|track| track.uri)
        .filter(|uri| !uri.is_empty())
        .collect();
    info!("Clearing {} tracks from the party queue", current_uris.len());

    for batch in current_uris.chunks(TRACK_BATCH_LIMIT) {
        client.remove_tracks_from_playlist(party_id, batch).await?;
        sleep(timing.drain_delay).await;
    }

    let uris: Vec<String> = track_ids.iter().map(|id| utils::track_uri(id)).collect();
    client.add_tracks_to_playlist(party_id, &uris, None).await?;

    let queue = fetch_playlist_tracks(client, party_id).await?;
    let start = queue
        .into_iter()
        .find(|track| track.id == start_at)
        .ok_or_else(|| Error::NotFound(format!("Track {start_at} is not in the party queue")))?;

    sleep(timing.settle_delay).await;

    let request = PlayRequest {
        context_uri: Some(config.party_context_uri()),
        offset: Some(PlayOffset {
            position: start.play_context.offset.position,
            uri: None,
        }),
        position_ms: Some(start.play_context.position_ms),
        device_id: Some(config.party_device_id.clone()),
        ..Default::default()
    };
    client.play(Some(&request)).await?;

    success!(
        "Party started with {} tracks at position {}",
        uris.len(),
        start.play_context.offset.position.unwrap_or_default()
    );
    Ok(client.outcome(()))
}

/// Puts a track straight into the player queue of the party device.
pub async fn add_to_queue(client: &SpotifyClient, track_id: &str) -> Result<Outcome<()>> {
    let uri = utils::track_uri(track_id);
    client
        .add_to_queue(&uri, Some(client.config().party_device_id.as_str()))
        .await?;
    Ok(client.outcome(()))
}

/// Replaces every item of an arbitrary playlist with `uris`.
pub async fn replace_items(
    client: &SpotifyClient,
    playlist_id: &str,
    uris: &[String],
) -> Result<Outcome<()>> {
    client.replace_playlist_tracks(playlist_id, uris).await?;
    Ok(client.outcome(()))
}
