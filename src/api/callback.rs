use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension, Json,
    extract::Query,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    error::ApiError,
    info,
    spotify::auth::{exchange_code, is_programmatic_request, redirect_uri_for},
    utils, warning,
};

/// Landing point of Spotify's authorization redirect.
///
/// The browser arrives here first and is sent on to `/?code=...`; the page
/// script then calls back with `fetch=true` and receives the token JSON.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let code = params.get("code").filter(|c| !c.is_empty());
    info!(
        "Received callback with code: {}...",
        code.map(|c| utils::truncate_code(c)).unwrap_or("None")
    );

    if !is_programmatic_request(&headers, &params) {
        return Redirect::to(&browser_location(code, params.get("error"))).into_response();
    }

    match token_for(code, &headers, &state).await {
        Ok(token) => Json(token).into_response(),
        Err(e) => {
            warning!("{} in callback: {}", e.kind(), e);
            e.into_response()
        }
    }
}

async fn token_for(
    code: Option<&String>,
    headers: &HeaderMap,
    state: &AppState,
) -> Result<serde_json::Value, ApiError> {
    let code = code.ok_or(ApiError::MissingCode)?;
    state
        .config
        .spotify_credentials()
        .map_err(ApiError::Configuration)?;

    let redirect_uri = redirect_uri_for(headers, &state.config);
    exchange_code(&state.http, &state.config, code, &redirect_uri).await
}

fn browser_location(code: Option<&String>, error: Option<&String>) -> String {
    let pair = match (code, error) {
        (Some(code), _) => Some(("code", code.as_str())),
        (None, Some(error)) => Some(("error", error.as_str())),
        (None, None) => None,
    };

    match pair {
        Some(pair) => format!("/?{}", utils::query_string(&[pair])),
        None => "/".to_string(),
    }
}
