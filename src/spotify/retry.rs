use std::{
    future::Future,
    sync::{Mutex, PoisonError},
};

use crate::{
    error::{ApiError, Error, Result},
    info,
    types::Credentials,
    warning,
};

/// Bound on how often a single Spotify call is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Exchanges a refresh token for a fresh credential pair.
pub trait TokenRefresher {
    fn refresh(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Credentials>> + Send;
}

/// Runs Spotify calls with bounded retry and re-authentication on expiry.
///
/// The invoker owns the credentials of one request. A call that fails because
/// the access token expired triggers a refresh; the renewed pair replaces the
/// current one for this and every later call made through the same invoker,
/// and is what [`Invoker::credentials`] hands back to the caller.
///
/// After a refresh the call is attempted exactly once more and that attempt's
/// outcome is final. Any other failure is retried until
/// [`RetryPolicy::max_attempts`] is reached.
pub struct Invoker<R> {
    refresher: R,
    policy: RetryPolicy,
    credentials: Mutex<Credentials>,
}

impl<R: TokenRefresher> Invoker<R> {
    pub fn new(refresher: R, policy: RetryPolicy, credentials: Credentials) -> Self {
        Self {
            refresher,
            policy,
            credentials: Mutex::new(credentials),
        }
    }

    /// Credentials currently in use, including any refresh that happened.
    pub fn credentials(&self) -> Credentials {
        self.credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_credentials(&self, credentials: Credentials) {
        *self
            .credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = credentials;
    }

    /// Refreshes the credentials unconditionally.
    pub async fn refresh(&self) -> Result<Credentials> {
        info!("Refreshing access token...");
        let renewed = self.refresher.refresh(&self.credentials()).await?;
        self.replace_credentials(renewed.clone());
        Ok(renewed)
    }

    /// Executes `call` with the current credentials until it succeeds or the
    /// retry budget is spent.
    ///
    /// # Errors
    ///
    /// - [`Error::Auth`] when the refresh is rejected, or the final attempt still
    ///   reports an expired token
    /// - [`Error::Vendor`] tagged with `operation` for any other final failure
    pub async fn invoke<T, F, Fut>(&self, operation: &'static str, mut call: F) -> Result<T>
    where
        F: FnMut(Credentials) -> Fut,
        Fut: Future<Output = std::result::Result<T, ApiError>>,
    {
        let mut attempt = 0;
        let mut refreshed = false;

        loop {
            attempt += 1;
            let failure = match call(self.credentials()).await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            warning!(
                "{} failed (attempt {}/{}): {}",
                operation,
                attempt,
                self.policy.max_attempts,
                failure
            );

            let expired = failure.is_token_expired();
            if refreshed || attempt >= self.policy.max_attempts {
                return Err(if expired {
                    Error::Auth {
                        operation,
                        source: failure,
                    }
                } else {
                    Error::Vendor {
                        operation,
                        source: failure,
                    }
                });
            }

            if expired {
                self.refresh().await?;
                refreshed = true;
            }
        }
    }
}
