use std::{future::Future, sync::Arc};

use chrono::Utc;
use reqwest::{Client, Url};

use crate::{
    config::SpotifyConfig,
    error::{ApiError, Error, Result},
    spotify::retry::TokenRefresher,
    success,
    types::{Credentials, Token, TokenResponse},
};

/// Talks to the Spotify accounts service on behalf of the application.
///
/// Both token grants authenticate with the client id and secret as HTTP Basic
/// credentials, as required for the authorization code flow.
#[derive(Debug, Clone)]
pub struct Authenticator {
    http: Client,
    config: Arc<SpotifyConfig>,
}

impl Authenticator {
    pub fn new(http: Client, config: Arc<SpotifyConfig>) -> Self {
        Self { http, config }
    }

    /// Builds the URL the user is redirected to for granting access.
    ///
    /// # Arguments
    ///
    /// * `state` - Opaque value echoed back to the callback
    ///
    /// # Example
    ///
    /// ```
    /// let url = authenticator.authorize_url(&utils::generate_state())?;
    /// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
    /// ```
    pub fn authorize_url(&self, state: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("scope", self.config.scope.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| Error::Config(format!("invalid authorize URL: {e}")))
    }

    /// Exchanges an authorization code received on the callback for a token.
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        let json = self
            .token_request(
                "authorizationCodeGrant",
                &[
                    ("grant_type", "authorization_code"),
                    ("code", code),
                    ("redirect_uri", self.config.redirect_uri.as_str()),
                ],
            )
            .await?;

        Ok(Token {
            access_token: json.access_token,
            refresh_token: json.refresh_token.unwrap_or_default(),
            scope: json.scope.unwrap_or_default(),
            expires_in: json.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        })
    }

    /// Exchanges the refresh token of `credentials` for a new access token.
    ///
    /// Spotify may or may not rotate the refresh token; when it does not, the
    /// current one is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when the refresh token is rejected (revoked or
    /// malformed) or the accounts service cannot be reached.
    pub async fn refresh_credentials(&self, credentials: &Credentials) -> Result<Credentials> {
        let json = self
            .token_request(
                "refreshAccessToken",
                &[
                    ("grant_type", "refresh_token"),
                    ("refresh_token", credentials.refresh_token.as_str()),
                ],
            )
            .await?;

        success!("Access token refreshed");
        Ok(Credentials {
            access_token: json.access_token,
            refresh_token: json
                .refresh_token
                .unwrap_or_else(|| credentials.refresh_token.clone()),
        })
    }

    async fn token_request(
        &self,
        operation: &'static str,
        form: &[(&str, &str)],
    ) -> Result<TokenResponse> {
        let auth_error = |source: ApiError| Error::Auth { operation, source };

        let res = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(form)
            .send()
            .await
            .map_err(|e| auth_error(e.into()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| auth_error(e.into()))?;
        if !status.is_success() {
            return Err(auth_error(ApiError::from_response(status, &body)));
        }

        serde_json::from_str(&body).map_err(|e| auth_error(e.into()))
    }
}

impl TokenRefresher for Authenticator {
    fn refresh(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Credentials>> + Send {
        self.refresh_credentials(credentials)
    }
}
