use axum::{
    Json,
    extract::Query,
    response::Response,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{Error, Result},
    management::library,
};

use super::session::{Session, json, json_body};

#[derive(Debug, Deserialize)]
pub struct PlaylistQuery {
    playlist: Option<String>,
}

impl PlaylistQuery {
    fn id(self) -> Result<String> {
        self.playlist
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                Error::Validation("Error: Missing playlist id in query parameter".to_string())
            })
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(rename = "searchQuery")]
    search_query: Option<String>,
}

pub async fn me(Session(client): Session) -> Result<Response> {
    Ok(json(library::me(&client).await?))
}

pub async fn username(Session(client): Session) -> Result<Response> {
    let outcome = library::username(&client).await?;
    Ok(json_body(
        &outcome.credentials,
        json!({ "displayName": outcome.data }),
    ))
}

pub async fn user_playlists(Session(client): Session) -> Result<Response> {
    Ok(json(library::user_playlists(&client).await?))
}

pub async fn playlist(
    Session(client): Session,
    Query(query): Query<PlaylistQuery>,
) -> Result<Response> {
    let id = query.id()?;
    Ok(json(library::playlist(&client, &id).await?))
}

pub async fn playlist_tracks(
    Session(client): Session,
    Query(query): Query<PlaylistQuery>,
) -> Result<Response> {
    let id = query.id()?;
    Ok(json(library::playlist_tracks(&client, &id).await?))
}

pub async fn saved_tracks(Session(client): Session) -> Result<Response> {
    Ok(json(library::saved_tracks(&client).await?))
}

pub async fn recent_tracks(Session(client): Session) -> Result<Response> {
    Ok(json(library::recent_tracks(&client).await?))
}

pub async fn search(Session(client): Session, Json(body): Json<SearchBody>) -> Result<Response> {
    let query = body
        .search_query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| {
            Error::Validation("Error: Missing search term in query parameter".to_string())
        })?;
    Ok(json(library::search(&client, &query).await?))
}
