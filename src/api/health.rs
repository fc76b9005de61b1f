use std::sync::Arc;

use axum::{Extension, http::HeaderMap, response::Json};
use serde_json::{Value, json};

use crate::{AppState, spotify::auth::redirect_uri_for};

pub async fn health(
    headers: HeaderMap,
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "status": "healthy",
        "app": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "config": {
            "spotify_client_id": config.spotify_client_id.is_some(),
            "spotify_client_secret": config.spotify_client_secret.is_some(),
            "lastfm_api_key": config.lastfm_api_key.is_some(),
            "redirect_uri": redirect_uri_for(&headers, config),
        }
    }))
}
