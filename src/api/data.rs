use std::sync::Arc;

use axum::{
    Extension, Json,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    error::ApiError,
    management::build_universe,
    spotify::auth::redirect_uri_for,
    success,
    types::{SpotifyConfigResponse, UniverseResponse},
    warning,
};

pub async fn get_data(headers: HeaderMap, Extension(state): Extension<Arc<AppState>>) -> Response {
    match build_universe(&state, headers.get(header::AUTHORIZATION)).await {
        Ok(artists) => {
            success!("Built universe with {} artists", artists.len());
            Json(UniverseResponse {
                current_user_artists: artists,
            })
            .into_response()
        }
        Err(e) => {
            warning!("{} in get_data: {}", e.kind(), e);
            e.into_response()
        }
    }
}

/// Public half of the OAuth setup, so the front end can build the
/// authorize URL with the same redirect URI `/callback` will use.
pub async fn spotify_config(
    headers: HeaderMap,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<SpotifyConfigResponse>, ApiError> {
    let client_id = state.config.spotify_client_id.clone().ok_or_else(|| {
        ApiError::Configuration("SPOTIFY_CLIENT_ID is not configured".to_string())
    })?;

    Ok(Json(SpotifyConfigResponse {
        client_id,
        redirect_uri: redirect_uri_for(&headers, &state.config),
    }))
}
