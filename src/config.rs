//! Configuration management for spotiweb.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage Spotify API
//! credentials, endpoint URLs, the party queue target and server settings.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env.local` in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::error::{Error, Result};

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3100";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SCOPE: &str = "user-read-private user-modify-playback-state user-read-playback-state user-read-currently-playing user-read-recently-played user-read-playback-position playlist-read-collaborative playlist-read-private app-remote-control streaming user-library-read ugc-image-upload playlist-modify-public playlist-modify-private";

/// Loads environment variables from `.env` files.
///
/// Looks for `.env.local` in the working directory first and then for `.env`
/// in the platform-specific local data directory under `spotiweb/.env`. Values
/// already present in the environment are never overwritten, and a missing file
/// is not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotiweb/.env`
/// - macOS: `~/Library/Application Support/spotiweb/.env`
/// - Windows: `%LOCALAPPDATA%/spotiweb/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// file cannot be parsed.
pub async fn load_env() -> std::result::Result<(), String> {
    let local = PathBuf::from(".env.local");
    if local.is_file() {
        dotenv::from_path(&local).map_err(|e| e.to_string())?;
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotiweb/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("{name} must be set")))
}

fn or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Returns the address the HTTP server binds to, e.g. `0.0.0.0:3100`.
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the client ID obtained when registering the application with Spotify.
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret.
///
/// The secret authenticates code exchanges and token refreshes. It should be
/// kept confidential and never exposed in logs or version control.
pub fn spotify_client_secret() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the OAuth redirect URI registered in the Spotify application settings.
pub fn spotify_redirect_uri() -> Result<String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Returns the space separated scopes requested during authorization.
pub fn spotify_scope() -> String {
    or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the id of the playlist used as shared party queue.
pub fn party_playlist_id() -> Result<String> {
    required("SPOTIFY_PARTY_PLAYLIST_ID")
}

/// Returns the id of the device party playback is started on.
pub fn party_device_id() -> Result<String> {
    required("SPOTIFY_PARTY_DEVICE_ID")
}

/// Pauses inserted between the steps of a party-play run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyTiming {
    /// Wait after each removal batch while draining the queue.
    pub drain_delay: Duration,
    /// Wait between rebuilding the queue and starting playback.
    pub settle_delay: Duration,
}

impl Default for PartyTiming {
    fn default() -> Self {
        Self {
            drain_delay: Duration::from_millis(300),
            settle_delay: Duration::from_millis(500),
        }
    }
}

/// Immutable snapshot of everything needed to talk to Spotify.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub party_playlist_id: String,
    pub party_device_id: String,
    pub party_timing: PartyTiming,
}

impl SpotifyConfig {
    /// Collects the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: spotify_client_id()?,
            client_secret: spotify_client_secret()?,
            redirect_uri: spotify_redirect_uri()?,
            scope: spotify_scope(),
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
            api_url: spotify_apiurl(),
            party_playlist_id: party_playlist_id()?,
            party_device_id: party_device_id()?,
            party_timing: PartyTiming::default(),
        })
    }

    /// Context URI of the party playlist, e.g. `spotify:playlist:<id>`.
    pub fn party_context_uri(&self) -> String {
        format!("spotify:playlist:{}", self.party_playlist_id)
    }
}
