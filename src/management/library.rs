use crate::{
    error::Result,
    normalize::{self, PageContext},
    spotify::SpotifyClient,
    types::{NormalizedPlaylist, NormalizedTrack, Outcome, Paging, UserProfile},
};

use super::pagination::collect_pages;

const PLAYLISTS_PAGE_SIZE: usize = 10;
const TRACKS_PAGE_SIZE: usize = 50;
const RECENT_TRACKS_LIMIT: usize = 50;

pub async fn me(client: &SpotifyClient) -> Result<Outcome<UserProfile>> {
    let profile = client.me().await?.unwrap_or_default();
    Ok(client.outcome(profile))
}

/// Display name of the current user, `unknown` when the profile has none.
pub async fn username(client: &SpotifyClient) -> Result<Outcome<String>> {
    let name = client
        .me()
        .await?
        .and_then(|profile| profile.display_name)
        .unwrap_or_else(|| "unknown".to_string());
    Ok(client.outcome(name))
}

/// All playlists of the user except the reserved party-queue playlist.
pub async fn user_playlists(client: &SpotifyClient) -> Result<Outcome<Vec<NormalizedPlaylist>>> {
    let playlists = collect_pages(
        PLAYLISTS_PAGE_SIZE,
        |offset, limit| client.user_playlists_page(offset, limit),
        |items, _| items.iter().flatten().cloned().collect(),
    )
    .await?;

    Ok(client.outcome(normalize::user_playlists(&playlists)))
}

pub async fn playlist(
    client: &SpotifyClient,
    playlist_id: &str,
) -> Result<Outcome<NormalizedPlaylist>> {
    let playlist = client
        .playlist(playlist_id)
        .await?
        .map(|p| normalize::playlist(&p))
        .unwrap_or_default();
    Ok(client.outcome(playlist))
}

/// Every entry of a playlist with its absolute position, local files and
/// nameless entries included.
pub async fn fetch_all_playlist_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
) -> Result<Vec<NormalizedTrack>> {
    collect_pages(
        TRACKS_PAGE_SIZE,
        |offset, limit| client.playlist_tracks_page(playlist_id, offset, limit),
        |items, offset| {
            normalize::tracks_page(
                items,
                PageContext {
                    playlist_id: Some(playlist_id),
                    offset,
                },
            )
        },
    )
    .await
}

/// Every playable track of a playlist with its absolute position.
pub async fn fetch_playlist_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
) -> Result<Vec<NormalizedTrack>> {
    let tracks = fetch_all_playlist_tracks(client, playlist_id).await?;
    Ok(normalize::retain_playable(tracks))
}

pub async fn playlist_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
) -> Result<Outcome<Vec<NormalizedTrack>>> {
    let tracks = fetch_playlist_tracks(client, playlist_id).await?;
    Ok(client.outcome(tracks))
}

pub async fn saved_tracks(client: &SpotifyClient) -> Result<Outcome<Vec<NormalizedTrack>>> {
    let tracks = collect_pages(
        TRACKS_PAGE_SIZE,
        |offset, limit| async move {
            let page = client.saved_tracks_page(offset, limit).await?;
            // the library is read one page deep: its length stands in for the total
            Ok(Paging {
                items: page.items,
                total: None,
            })
        },
        |items, offset| {
            normalize::tracks_page(
                items,
                PageContext {
                    playlist_id: None,
                    offset,
                },
            )
        },
    )
    .await?;

    Ok(client.outcome(normalize::retain_playable(tracks)))
}

pub async fn recent_tracks(client: &SpotifyClient) -> Result<Outcome<Vec<NormalizedTrack>>> {
    let items = client.recently_played(RECENT_TRACKS_LIMIT).await?;
    let tracks = normalize::tracks_page(&items, PageContext::default());
    Ok(client.outcome(normalize::retain_playable(tracks)))
}

pub async fn search(client: &SpotifyClient, query: &str) -> Result<Outcome<Vec<NormalizedTrack>>> {
    let tracks = client.search_tracks(query).await?;
    Ok(client.outcome(normalize::search_tracks(&tracks)))
}
