//! # Spotify Integration Module
//!
//! This module is the only place that talks to the Spotify Web API. It is split
//! by concern:
//!
//! ```text
//! management (workflows)
//!          ↓
//! SpotifyClient  ── one per incoming request, owns its credentials
//!     ├── playlists  (listings, insert, remove, replace)
//!     ├── player     (play, pause, skip, shuffle, devices, queue)
//!     └── library    (profile, saved tracks, history, search)
//!          ↓
//! Invoker (retry + refresh)  ──  Authenticator (accounts service)
//!          ↓
//! Api (reqwest, JSON)
//! ```
//!
//! ## Request scoping
//!
//! A [`SpotifyClient`] is built from the credential pair of a single incoming
//! request and dropped when the request is done. Clients only share the pooled
//! [`reqwest::Client`] and the immutable [`SpotifyConfig`], so concurrent
//! requests for different users never see each other's tokens.
//!
//! ## Calls
//!
//! Every endpoint is described as an [`ApiRequest`] value and executed by
//! [`Api::execute`] inside a closure handed to the [`retry::Invoker`]. The
//! invoker retries failed calls and refreshes the access token when Spotify
//! reports it expired; the refreshed pair is readable through
//! [`SpotifyClient::credentials`] so the HTTP layer can return it.
//!
//! ## Errors
//!
//! Single attempts fail with [`ApiError`]; what leaves this module is an
//! [`Error`](crate::error::Error) tagged with the Spotify operation name, e.g.
//! `getPlaylistTracks` or `addTracksToPlaylist`.

pub mod auth;
pub mod library;
pub mod player;
pub mod playlists;
pub mod retry;

use std::sync::Arc;

use reqwest::{Client, Method, header::CONTENT_LENGTH};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;

use crate::{
    config::SpotifyConfig,
    error::{ApiError, Error, Result},
    types::{Credentials, Outcome},
};

use self::{
    auth::Authenticator,
    retry::{Invoker, RetryPolicy},
};

/// One Spotify Web API request, relative to the configured API base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Thin HTTP transport for the Web API.
#[derive(Debug, Clone)]
pub struct Api {
    http: Client,
    config: Arc<SpotifyConfig>,
}

impl Api {
    pub fn new(http: Client, config: Arc<SpotifyConfig>) -> Self {
        Self { http, config }
    }

    /// Sends `request` with `access_token` and decodes the JSON body.
    ///
    /// Returns `Ok(None)` for an empty body (Spotify answers most player
    /// commands, and the playback state while idle, with `204 No Content`).
    pub async fn execute<T: DeserializeOwned>(
        &self,
        access_token: &str,
        request: &ApiRequest,
    ) -> std::result::Result<Option<T>, ApiError> {
        let url = format!("{}{}", self.config.api_url, request.path);
        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .bearer_auth(access_token);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match &request.body {
            Some(body) => builder.json(body),
            // Spotify rejects body-less PUT/POST without a length (411)
            None => builder.header(CONTENT_LENGTH, 0),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::from_response(status, &body));
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&body)?))
    }
}

/// Request-scoped handle on the Spotify Web API.
pub struct SpotifyClient {
    api: Api,
    config: Arc<SpotifyConfig>,
    invoker: Invoker<Authenticator>,
}

impl SpotifyClient {
    pub fn new(http: Client, config: Arc<SpotifyConfig>, credentials: Credentials) -> Self {
        Self::with_policy(http, config, credentials, RetryPolicy::default())
    }

    pub fn with_policy(
        http: Client,
        config: Arc<SpotifyConfig>,
        credentials: Credentials,
        policy: RetryPolicy,
    ) -> Self {
        let authenticator = Authenticator::new(http.clone(), Arc::clone(&config));
        Self {
            api: Api::new(http, Arc::clone(&config)),
            config,
            invoker: Invoker::new(authenticator, policy, credentials),
        }
    }

    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    /// Credentials to hand back to the caller, refreshed if needed.
    pub fn credentials(&self) -> Credentials {
        self.invoker.credentials()
    }

    /// Pairs `data` with the current credentials.
    pub fn outcome<T>(&self, data: T) -> Outcome<T> {
        Outcome {
            credentials: self.credentials(),
            data,
        }
    }

    /// Forces a token refresh regardless of expiry.
    pub async fn refresh(&self) -> Result<Credentials> {
        self.invoker.refresh().await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: ApiRequest,
    ) -> Result<Option<T>> {
        let api = &self.api;
        let request = &request;
        self.invoker
            .invoke(operation, |credentials| async move {
                api.execute::<T>(&credentials.access_token, request).await
            })
            .await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: ApiRequest,
    ) -> Result<T> {
        self.request(operation, request)
            .await?
            .ok_or(Error::Vendor {
                operation,
                source: ApiError::EmptyBody,
            })
    }

    async fn command(&self, operation: &'static str, request: ApiRequest) -> Result<()> {
        self.request::<IgnoredAny>(operation, request).await?;
        Ok(())
    }
}
