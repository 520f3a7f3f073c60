use axum::{
    Extension, Json,
    extract::Query,
    response::{Redirect, Response},
};
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    server::AppState,
    types::Token,
    utils,
};

use super::session::{Session, json_body};

pub async fn login(Extension(app): Extension<AppState>) -> Result<Redirect> {
    let url = app.authenticator().authorize_url(&utils::generate_state())?;
    Ok(Redirect::to(url.as_str()))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
}

pub async fn callback(
    Extension(app): Extension<AppState>,
    Query(params): Query<CallbackQuery>,
) -> Result<Json<Token>> {
    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| Error::Validation("Error: missing code".to_string()))?;

    let token = app.authenticator().exchange_code(&code).await?;
    Ok(Json(token))
}

pub async fn refresh(Session(client): Session) -> Result<Response> {
    let credentials = client.refresh().await?;
    Ok(json_body(&credentials, &credentials))
}
