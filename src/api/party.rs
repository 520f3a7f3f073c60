use axum::{Json, extract::Query, response::Response};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{Error, Result},
    management::party,
};

use super::session::{Session, ack, json_body};

#[derive(Debug, Deserialize)]
pub struct EnqueueBody {
    track: Option<String>,
    #[serde(default)]
    next: bool,
}

#[derive(Debug, Deserialize)]
pub struct PartyPlayBody {
    #[serde(default)]
    tracks: Vec<String>,
    #[serde(rename = "startAt")]
    start_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    track: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceItemsBody {
    #[serde(rename = "playlistId")]
    playlist_id: Option<String>,
    uris: Option<Vec<String>>,
}

pub async fn enqueue(Session(client): Session, Json(body): Json<EnqueueBody>) -> Result<Response> {
    let track = body
        .track
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Validation("Error: Missing track id(s)".to_string()))?;
    Ok(ack(party::enqueue(&client, &track, body.next).await?))
}

pub async fn party_play(
    Session(client): Session,
    Json(body): Json<PartyPlayBody>,
) -> Result<Response> {
    let start_at = body
        .start_at
        .filter(|s| !s.is_empty() && !body.tracks.is_empty())
        .ok_or_else(|| Error::Validation("Error: Missing options in body".to_string()))?;
    Ok(ack(party::party_play(&client, &body.tracks, &start_at).await?))
}

pub async fn add_to_queue(
    Session(client): Session,
    Query(query): Query<TrackQuery>,
) -> Result<Response> {
    let track = query
        .track
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            Error::Validation("Error: Missing track uri in query parameter".to_string())
        })?;
    Ok(ack(party::add_to_queue(&client, &track).await?))
}

pub async fn replace_items(
    Session(client): Session,
    Json(body): Json<ReplaceItemsBody>,
) -> Result<Response> {
    let (Some(playlist_id), Some(uris)) = (body.playlist_id.filter(|id| !id.is_empty()), body.uris)
    else {
        return Err(Error::Validation("Error: Invalid request".to_string()));
    };

    let outcome = party::replace_items(&client, &playlist_id, &uris).await?;
    Ok(json_body(
        &outcome.credentials,
        json!({ "cacheAuth": outcome.credentials }),
    ))
}
