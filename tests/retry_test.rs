use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use reqwest::StatusCode;
use spotiweb::{
    error::{ApiError, Error, Result},
    spotify::retry::{Invoker, RetryPolicy, TokenRefresher},
    types::Credentials,
};

// Refresher that counts its calls and either renews or rejects
#[derive(Clone, Default)]
struct CountingRefresher {
    calls: Arc<AtomicUsize>,
    reject: bool,
}

impl TokenRefresher for CountingRefresher {
    fn refresh(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Credentials>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = if self.reject {
            Err(Error::Auth {
                operation: "refreshAccessToken",
                source: status_error(StatusCode::BAD_REQUEST, "Refresh token revoked"),
            })
        } else {
            Ok(Credentials::new("fresh-access", credentials.refresh_token.clone()))
        };
        async move { result }
    }
}

fn status_error(status: StatusCode, message: &str) -> ApiError {
    ApiError::Status {
        status,
        message: message.to_string(),
    }
}

fn expired() -> ApiError {
    status_error(StatusCode::UNAUTHORIZED, "The access token expired")
}

fn server_error() -> ApiError {
    status_error(StatusCode::BAD_GATEWAY, "Bad gateway")
}

fn invoker(refresher: CountingRefresher) -> Invoker<CountingRefresher> {
    Invoker::new(
        refresher,
        RetryPolicy::default(),
        Credentials::new("old-access", "refresh-me"),
    )
}

#[tokio::test]
async fn test_success_on_first_attempt() {
    let refresher = CountingRefresher::default();
    let invoker = invoker(refresher.clone());
    let mut attempts = 0;

    let value = invoker
        .invoke("getMe", |_| {
            attempts += 1;
            async { Ok::<_, ApiError>("me") }
        })
        .await
        .unwrap();

    assert_eq!(value, "me");
    assert_eq!(attempts, 1);
    assert_eq!(refresher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_retries_other_failures_up_to_the_limit() {
    let refresher = CountingRefresher::default();
    let invoker = invoker(refresher.clone());
    let mut attempts = 0;

    let value = invoker
        .invoke("getPlaylist", |_| {
            attempts += 1;
            let attempt = attempts;
            async move {
                if attempt < 3 {
                    Err(server_error())
                } else {
                    Ok(attempt)
                }
            }
        })
        .await
        .unwrap();

    // Two failures, then the third and last attempt succeeds
    assert_eq!(value, 3);
    assert_eq!(attempts, 3);
    assert_eq!(refresher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_exhausted_retries_report_the_operation() {
    let invoker = invoker(CountingRefresher::default());
    let mut attempts = 0;

    let result: Result<()> = invoker
        .invoke("addTracksToPlaylist", |_| {
            attempts += 1;
            async { Err(server_error()) }
        })
        .await;

    assert_eq!(attempts, 3);
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Vendor { operation: "addTracksToPlaylist", .. }));
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_expired_token_refreshes_once_and_retries() {
    let refresher = CountingRefresher::default();
    let invoker = invoker(refresher.clone());
    let mut seen = Vec::new();

    let value = invoker
        .invoke("getUserPlaylists", |credentials| {
            seen.push(credentials.access_token.clone());
            async move {
                if credentials.access_token == "old-access" {
                    Err(expired())
                } else {
                    Ok(credentials.access_token)
                }
            }
        })
        .await
        .unwrap();

    assert_eq!(value, "fresh-access");
    assert_eq!(seen, vec!["old-access", "fresh-access"]);
    assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);

    // The renewed pair is what the caller gets back
    let credentials = invoker.credentials();
    assert_eq!(credentials.access_token, "fresh-access");
    assert_eq!(credentials.refresh_token, "refresh-me");
}

#[tokio::test]
async fn test_attempt_after_refresh_is_final() {
    let refresher = CountingRefresher::default();
    let invoker = invoker(refresher.clone());
    let mut attempts = 0;

    let result: Result<()> = invoker
        .invoke("getMe", |_| {
            attempts += 1;
            async { Err(expired()) }
        })
        .await;

    assert_eq!(attempts, 2);
    assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
    assert!(matches!(result, Err(Error::Auth { operation: "getMe", .. })));
}

#[tokio::test]
async fn test_failure_after_refresh_is_not_retried() {
    let refresher = CountingRefresher::default();
    let invoker = invoker(refresher.clone());
    let mut attempts = 0;

    let result: Result<()> = invoker
        .invoke("getMe", |_| {
            attempts += 1;
            let attempt = attempts;
            async move {
                if attempt == 1 {
                    Err(expired())
                } else {
                    Err(server_error())
                }
            }
        })
        .await;

    assert_eq!(attempts, 2);
    assert!(matches!(result, Err(Error::Vendor { operation: "getMe", .. })));
}

#[tokio::test]
async fn test_expired_message_without_401() {
    let refresher = CountingRefresher::default();
    let invoker = invoker(refresher.clone());

    let value = invoker
        .invoke("getMe", |credentials| async move {
            if credentials.access_token == "old-access" {
                Err(status_error(StatusCode::BAD_REQUEST, "Token has expired"))
            } else {
                Ok(())
            }
        })
        .await;

    assert!(value.is_ok());
    assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_rejected_refresh_is_an_auth_error() {
    let refresher = CountingRefresher {
        reject: true,
        ..Default::default()
    };
    let invoker = invoker(refresher.clone());
    let mut attempts = 0;

    let result: Result<()> = invoker
        .invoke("getMe", |_| {
            attempts += 1;
            async { Err(expired()) }
        })
        .await;

    assert_eq!(attempts, 1);
    assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Auth { operation: "refreshAccessToken", .. }));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    // Credentials stay untouched
    assert_eq!(invoker.credentials().access_token, "old-access");
}

#[tokio::test]
async fn test_single_attempt_policy() {
    let invoker = Invoker::new(
        CountingRefresher::default(),
        RetryPolicy { max_attempts: 1 },
        Credentials::new("old-access", "refresh-me"),
    );
    let mut attempts = 0;

    let result: Result<()> = invoker
        .invoke("getMe", |_| {
            attempts += 1;
            async { Err(server_error()) }
        })
        .await;

    assert_eq!(attempts, 1);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_explicit_refresh() {
    let refresher = CountingRefresher::default();
    let invoker = invoker(refresher.clone());

    let renewed = invoker.refresh().await.unwrap();
    assert_eq!(renewed.access_token, "fresh-access");
    assert_eq!(invoker.credentials(), renewed);
}
