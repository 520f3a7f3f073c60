use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    error::Error,
    server::AppState,
    spotify::SpotifyClient,
    types::{Credentials, Outcome},
};

pub const ACCESS_TOKEN_HEADER: &str = "access_token";
pub const REFRESH_TOKEN_HEADER: &str = "refresh_token";

/// Spotify client built from the credential headers of the request.
pub struct Session(pub SpotifyClient);

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let app = parts
            .extensions
            .get::<AppState>()
            .cloned()
            .ok_or_else(|| Error::Config("application state is not installed".to_string()))?;

        let credentials = credentials_from_headers(&parts.headers).ok_or_else(|| {
            Error::Validation(format!(
                "Error: Missing {ACCESS_TOKEN_HEADER} or {REFRESH_TOKEN_HEADER} header"
            ))
        })?;

        Ok(Session(app.client(credentials)))
    }
}

pub fn credentials_from_headers(headers: &HeaderMap) -> Option<Credentials> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    Some(Credentials::new(
        header(ACCESS_TOKEN_HEADER)?,
        header(REFRESH_TOKEN_HEADER)?,
    ))
}

/// Echoes the credential pair in the response headers.
fn with_credentials(mut response: Response, credentials: &Credentials) -> Response {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&credentials.access_token) {
        headers.insert(ACCESS_TOKEN_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&credentials.refresh_token) {
        headers.insert(REFRESH_TOKEN_HEADER, value);
    }
    response
}

/// `200` with `{cacheAuth, data}` as body.
pub fn json<T: Serialize>(outcome: Outcome<T>) -> Response {
    let credentials = outcome.credentials.clone();
    with_credentials(Json(outcome).into_response(), &credentials)
}

/// `200` with an arbitrary body and the credentials in the headers only.
pub fn json_body<T: Serialize>(credentials: &Credentials, body: T) -> Response {
    with_credentials(Json(body).into_response(), credentials)
}

/// `200` without body.
pub fn ack(outcome: Outcome<()>) -> Response {
    with_credentials(StatusCode::OK.into_response(), &outcome.credentials)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            crate::warning!("Request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
