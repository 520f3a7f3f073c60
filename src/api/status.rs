use axum::{
    extract::Query,
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    status: Option<String>,
}

/// Landing page a client can redirect to once the login round trip is done.
pub async fn auth_status(Query(query): Query<StatusQuery>) -> (StatusCode, &'static str) {
    match query.status.as_deref() {
        Some("success") => (StatusCode::OK, "Success! You can close this page."),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "An error occured"),
    }
}
