//! High-level operations offered to the HTTP layer.
//!
//! Every operation takes a request-scoped [`SpotifyClient`](crate::spotify::SpotifyClient)
//! and returns an [`Outcome`](crate::types::Outcome) carrying the data together
//! with the credentials the caller has to use from now on.

pub mod library;
pub mod pagination;
pub mod party;
pub mod playback;
