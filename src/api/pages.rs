use std::{io::ErrorKind, path::Path as FsPath, sync::Arc};

use axum::{
    Extension,
    extract::Path,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::json;

use crate::{AppState, spotify::auth::request_origin, utils, warning};

pub async fn index(Extension(state): Extension<Arc<AppState>>) -> Response {
    page(&state.config.public_dir.join("index.html")).await
}

pub async fn universe(Extension(state): Extension<Arc<AppState>>) -> Response {
    page(&state.config.public_dir.join("universe.html")).await
}

pub async fn static_files(
    Path(path): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    match utils::safe_join(&state.config.static_dir(), &path) {
        Some(file) => serve_file(&file, utils::content_type_for(&file)).await,
        None => not_found(),
    }
}

/// Serves front-end scripts that sit next to the HTML pages.
/// Anything that is not a `.js` file is a 404.
pub async fn script(uri: Uri, Extension(state): Extension<Arc<AppState>>) -> Response {
    let path = uri.path();
    if !path.ends_with(".js") {
        return not_found();
    }

    match utils::safe_join(&state.config.public_dir, path) {
        Some(file) => serve_file(&file, "application/javascript").await,
        None => not_found(),
    }
}

/// Shows how the server sees the request URL, to debug redirect URI
/// mismatches behind proxies.
pub async fn debug(
    uri: Uri,
    headers: HeaderMap,
    Extension(state): Extension<Arc<AppState>>,
) -> Json<serde_json::Value> {
    let origin = request_origin(&headers, &state.config).unwrap_or_default();
    Json(json!({
        "base_url": format!("{}{}", origin, uri.path()),
        "url_root": format!("{}/", origin),
        "host_url": format!("{}/", origin),
        "SPOTIFY_REDIRECT_URI": state.config.spotify_redirect_uri,
        "expected_callback": format!("{}/callback", origin),
    }))
}

async fn page(path: &FsPath) -> Response {
    match async_fs::read_to_string(path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => file_error(path, e),
    }
}

async fn serve_file(path: &FsPath, content_type: &'static str) -> Response {
    match async_fs::read(path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(e) => file_error(path, e),
    }
}

fn file_error(path: &FsPath, e: std::io::Error) -> Response {
    if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) {
        return not_found();
    }

    warning!("Failed to read {}: {}", path.display(), e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}
