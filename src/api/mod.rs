//! # API Module
//!
//! HTTP handlers of the spotiweb server. Handlers validate their inputs, build a
//! request-scoped Spotify client from the credential headers and delegate to
//! [`crate::management`].
//!
//! ## Credentials
//!
//! Authenticated routes read the `access_token` and `refresh_token` request
//! headers. Every response of such a route carries the pair to use next in the
//! same two headers; JSON responses also embed it as `cacheAuth`. The pair only
//! differs from the request when the access token had to be refreshed.
//!
//! ## Errors
//!
//! Failures are answered with the status Spotify reported when there is one,
//! `400` for invalid input and `500` otherwise, with a plain-text body.
//!
//! ## Endpoints
//!
//! - [`auth`] - login redirect, OAuth callback and explicit token refresh
//! - [`library`] - profile, playlists, saved and recent tracks, search
//! - [`player`] - playback state and transport controls, devices, queue
//! - [`party`] - party queue management
//! - [`status`] - health check and post-login landing page

pub mod auth;
pub mod library;
pub mod party;
pub mod player;
pub mod session;
pub mod status;

pub use session::Session;
pub use status::{auth_status, health};
