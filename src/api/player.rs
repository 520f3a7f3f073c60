use axum::{extract::Query, response::Response};
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    management::playback,
};

use super::session::{Session, ack, json};

#[derive(Debug, Deserialize)]
pub struct DeviceQuery {
    device: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShuffleQuery {
    shuffle: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayQuery {
    tracks: Option<String>,
}

pub async fn playback_state(Session(client): Session) -> Result<Response> {
    Ok(json(playback::playback_state(&client).await?))
}

pub async fn toggle_play(Session(client): Session) -> Result<Response> {
    Ok(ack(playback::toggle_play(&client).await?))
}

pub async fn play(Session(client): Session, Query(query): Query<PlayQuery>) -> Result<Response> {
    Ok(ack(playback::play(&client, query.tracks.as_deref()).await?))
}

pub async fn pause(Session(client): Session) -> Result<Response> {
    Ok(ack(playback::pause(&client).await?))
}

pub async fn next(Session(client): Session) -> Result<Response> {
    Ok(ack(playback::next(&client).await?))
}

pub async fn prev(Session(client): Session) -> Result<Response> {
    Ok(ack(playback::prev(&client).await?))
}

pub async fn set_shuffle(
    Session(client): Session,
    Query(query): Query<ShuffleQuery>,
) -> Result<Response> {
    let state = match query.shuffle.as_deref() {
        Some("true") => true,
        Some("false") => false,
        _ => {
            return Err(Error::Validation(
                "Error: Missing toggle flag in query parameter".to_string(),
            ));
        }
    };
    Ok(ack(playback::set_shuffle(&client, state).await?))
}

pub async fn change_device(
    Session(client): Session,
    Query(query): Query<DeviceQuery>,
) -> Result<Response> {
    let device = query
        .device
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            Error::Validation("Error: Missing device id in query parameter".to_string())
        })?;
    Ok(ack(playback::change_device(&client, &device).await?))
}

pub async fn devices(Session(client): Session) -> Result<Response> {
    Ok(json(playback::devices(&client).await?))
}

pub async fn queue(Session(client): Session) -> Result<Response> {
    Ok(json(playback::queue(&client).await?))
}
