use axum::{
    Extension, Router,
    extract::Request,
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::{AppState, Res, api, config::Config, info};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/universe", get(api::universe))
        .route("/static/{*path}", get(api::static_files))
        .route("/callback", get(api::callback))
        .route("/get_data", get(api::get_data))
        .route("/spotify_config", get(api::spotify_config))
        .route("/health", get(api::health))
        .route("/debug", get(api::debug))
        .fallback(api::script)
        .layer(middleware::from_fn(cors))
        .layer(Extension(state))
}

/// Binds the configured host and port. The host may be an IP literal
/// (IPv4 or IPv6) or a name that resolves to one.
pub async fn bind(config: &Config) -> Res<TcpListener> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    Ok(listener)
}

pub async fn start_api_server(state: Arc<AppState>) -> Res<()> {
    let listener = bind(&state.config).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Permissive CORS: preflights are answered directly, every other
/// response gets an allow-any-origin header.
async fn cors(req: Request, next: Next) -> Response {
    let mut res = if req.method() == Method::OPTIONS {
        let mut res = StatusCode::NO_CONTENT.into_response();
        let headers = res.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            req.headers()
                .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
                .cloned()
                .unwrap_or_else(|| HeaderValue::from_static("Authorization, Content-Type")),
        );
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static("600"),
        );
        res
    } else {
        next.run(req).await
    };

    res.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    res
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
