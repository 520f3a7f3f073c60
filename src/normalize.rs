//! Mapping of Spotify response shapes onto the records served to clients.
//!
//! All functions here are pure. Missing optional fields become `None` or an
//! empty default instead of an error, so a single odd item (a local file, a
//! podcast episode, a playlist without cover) never fails a whole listing.

use uuid::Uuid;

use crate::types::{
    AlbumRef, ArtistRef, CurrentPlayback, Image, NormalizedPlaylist, NormalizedTrack,
    PlayContext, PlaybackState, Playlist, Track, TrackItem, TrackOffset,
};

/// Playlist name reserved for the internal party queue.
pub const RESERVED_PLAYLIST_NAME: &str = "zQueue";

/// Where a page of tracks came from, used to compute absolute positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageContext<'a> {
    pub playlist_id: Option<&'a str>,
    pub offset: usize,
}

fn first_image(images: Option<&Vec<Image>>) -> Option<String> {
    images?.iter().find_map(|image| image.url.clone())
}

pub fn playlist(item: &Playlist) -> NormalizedPlaylist {
    NormalizedPlaylist {
        name: item.name.clone(),
        image: first_image(item.images.as_ref()),
        kind: item.kind.clone(),
        id: item.id.clone(),
        description: item.description.clone(),
        url: item.external_urls.as_ref().and_then(|u| u.spotify.clone()),
        uri: item.uri.clone(),
        owner: item.owner.as_ref().and_then(|o| o.display_name.clone()),
        snapshot_id: item.snapshot_id.clone(),
    }
}

/// Normalizes the user's playlists, hiding the reserved party-queue playlist.
pub fn user_playlists(items: &[Playlist]) -> Vec<NormalizedPlaylist> {
    items
        .iter()
        .map(playlist)
        .filter(|p| p.name.as_deref() != Some(RESERVED_PLAYLIST_NAME))
        .collect()
}

fn artists(track: &Track) -> Vec<ArtistRef> {
    track
        .artists
        .iter()
        .flatten()
        .map(|artist| ArtistRef {
            id: artist.id.clone(),
            name: artist.name.clone(),
            href: artist.href.clone(),
        })
        .collect()
}

fn album(track: &Track) -> AlbumRef {
    track
        .album
        .as_ref()
        .map(|album| AlbumRef {
            id: album.id.clone(),
            name: album.name.clone(),
            image: first_image(album.images.as_ref()),
        })
        .unwrap_or_default()
}

fn base_track(track: &Track) -> NormalizedTrack {
    let album = album(track);
    NormalizedTrack {
        local: track.is_local.unwrap_or(false),
        name: track.name.clone().unwrap_or_default(),
        artists: artists(track),
        image: album.image.clone(),
        album,
        id: track
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        uri: track.uri.clone().unwrap_or_default(),
        date_added: None,
        href: track.href.clone(),
        url: track.external_urls.as_ref().and_then(|u| u.spotify.clone()),
        play_context: PlayContext::default(),
        duration_ms: track.duration_ms,
    }
}

/// Normalizes one collection entry found at `index` within its page.
pub fn collection_track(
    item: &TrackItem,
    index: usize,
    context: PageContext<'_>,
) -> NormalizedTrack {
    let track = item.track.clone().unwrap_or_default();
    let mut normalized = base_track(&track);
    normalized.local = item.is_local.or(track.is_local).unwrap_or(false);
    normalized.date_added = item.added_at.clone().or_else(|| item.played_at.clone());
    normalized.play_context = PlayContext {
        context_uri: context
            .playlist_id
            .map(|id| format!("spotify:playlist:{id}")),
        offset: TrackOffset {
            position: Some(index + context.offset),
        },
        position_ms: 0,
    };
    normalized
}

/// Normalizes a page of collection entries. `null` entries are skipped but
/// still occupy their position.
pub fn tracks_page(
    items: &[Option<TrackItem>],
    context: PageContext<'_>,
) -> Vec<NormalizedTrack> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| Some(collection_track(item.as_ref()?, index, context)))
        .collect()
}

/// Normalizes a bare track, playing it in the context of its album.
pub fn album_track(track: &Track) -> NormalizedTrack {
    let mut normalized = base_track(track);
    normalized.play_context = PlayContext {
        context_uri: track
            .album
            .as_ref()
            .and_then(|a| a.id.as_ref())
            .map(|id| format!("spotify:album:{id}")),
        offset: TrackOffset {
            position: track
                .track_number
                .and_then(|n| n.checked_sub(1))
                .map(|n| n as usize),
        },
        position_ms: 0,
    };
    normalized
}

pub fn search_tracks(items: &[Track]) -> Vec<NormalizedTrack> {
    retain_playable(items.iter().map(album_track).collect())
}

/// Drops entries that cannot be streamed: nameless ones and local files.
pub fn retain_playable(mut tracks: Vec<NormalizedTrack>) -> Vec<NormalizedTrack> {
    tracks.retain(|t| !t.name.is_empty() && !t.local);
    tracks
}

pub fn playback_state(playback: Option<&CurrentPlayback>) -> PlaybackState {
    let Some(playback) = playback else {
        return PlaybackState {
            item: empty_item(),
            ..Default::default()
        };
    };

    PlaybackState {
        current_type: playback.currently_playing_type.clone(),
        device: playback.device.clone(),
        is_playing: playback.is_playing,
        item: playback
            .item
            .as_ref()
            .map(album_track)
            .unwrap_or_else(empty_item),
        repeat: playback.repeat_state.clone(),
        shuffle: playback.shuffle_state,
        image: playback
            .item
            .as_ref()
            .and_then(|t| t.album.as_ref())
            .and_then(|a| a.images.as_ref())
            .and_then(|images| images.first())
            .and_then(|image| image.url.clone()),
        progress_ms: playback.progress_ms.unwrap_or(0),
    }
}

// Placeholder item with empty strings and a single empty artist.
fn empty_item() -> NormalizedTrack {
    NormalizedTrack {
        artists: vec![ArtistRef {
            id: Some(String::new()),
            name: Some(String::new()),
            href: Some(String::new()),
        }],
        album: AlbumRef {
            id: Some(String::new()),
            name: Some(String::new()),
            image: Some(String::new()),
        },
        ..Default::default()
    }
}
