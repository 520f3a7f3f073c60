use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    routing::{get, post, put},
};
use reqwest::Client;
use tower_http::cors::CorsLayer;

use crate::{
    Res, api,
    config::SpotifyConfig,
    spotify::{SpotifyClient, auth::Authenticator},
    success,
    types::Credentials,
};

/// Process-wide state: the pooled HTTP client and the immutable configuration.
///
/// Holds no credentials. Each request gets its own [`SpotifyClient`].
#[derive(Debug, Clone)]
pub struct AppState {
    http: Client,
    config: Arc<SpotifyConfig>,
}

impl AppState {
    pub fn new(config: SpotifyConfig) -> Self {
        Self {
            http: Client::new(),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    pub fn client(&self, credentials: Credentials) -> SpotifyClient {
        SpotifyClient::new(self.http.clone(), Arc::clone(&self.config), credentials)
    }

    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(self.http.clone(), Arc::clone(&self.config))
    }
}

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(api::auth_status))
        .route("/health", get(api::health))
        .route("/login", get(api::auth::login))
        .route("/callback", get(api::auth::callback))
        .route("/refresh", get(api::auth::refresh))
        .route("/me", get(api::library::me))
        .route("/user-name", get(api::library::username))
        .route("/user-playlists", get(api::library::user_playlists))
        .route("/playlist", get(api::library::playlist))
        .route("/playlist-tracks", get(api::library::playlist_tracks))
        .route("/saved-tracks", get(api::library::saved_tracks))
        .route("/recent-tracks", get(api::library::recent_tracks))
        .route("/search", post(api::library::search))
        .route("/enqueue", post(api::party::enqueue))
        .route("/party-play", post(api::party::party_play))
        .route("/add-to-queue", post(api::party::add_to_queue))
        .route("/replace-playlist-items", post(api::party::replace_items))
        .route("/get-queue", get(api::player::queue))
        .route("/change-device", post(api::player::change_device))
        .route("/set-shuffle", put(api::player::set_shuffle))
        .route("/play", get(api::player::play))
        .route("/toggle-play", put(api::player::toggle_play))
        .route("/pause", put(api::player::pause))
        .route("/next", put(api::player::next))
        .route("/prev", put(api::player::prev))
        .route("/devices", get(api::player::devices))
        .route("/playback-state", get(api::player::playback_state));

    Router::new()
        .nest("/api/v1", routes)
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
}

pub async fn start_api_server(state: AppState, addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(addr)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    success!("Spotify backend listening on http://{}/api/v1", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
