use std::{collections::HashMap, time::Duration};

use axum::http::{HeaderMap, header};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use crate::{config::Config, error::ApiError, info, utils, warning};

pub const TOKEN_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Decides whether a `/callback` hit came from front-end code rather than
/// from the browser following Spotify's redirect.
///
/// Browser navigations get bounced to `/` so the page can pick the code up
/// and call back with `fetch=true`; everything else performs the exchange.
pub fn is_programmatic_request(headers: &HeaderMap, params: &HashMap<String, String>) -> bool {
    let accepts_json = header_str(headers, header::ACCEPT.as_str())
        .is_some_and(|v| v.to_ascii_lowercase().contains("application/json"));

    let xhr = header_str(headers, "x-requested-with")
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));

    let fetch_mode = header_str(headers, "sec-fetch-mode")
        .is_some_and(|v| !v.eq_ignore_ascii_case("navigate"));

    let fetch_flag = params
        .get("fetch")
        .is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1");

    accepts_json || xhr || fetch_mode || fetch_flag
}

/// Scheme and host the client used to reach us, e.g. `https://app.up.railway.app`.
///
/// Proxies terminate TLS in front of the known production hosts, so those
/// are forced to `https` even when the hop to us was plain HTTP.
pub fn request_origin(headers: &HeaderMap, config: &Config) -> Option<String> {
    let host = header_str(headers, "x-forwarded-host")
        .and_then(|v| v.split(',').next())
        .or_else(|| header_str(headers, header::HOST.as_str()))
        .map(str::trim)
        .filter(|h| !h.is_empty())?;

    let forwarded_https = header_str(headers, "x-forwarded-proto")
        .is_some_and(|v| v.split(',').next().unwrap_or_default().trim() == "https");

    let lower = host.to_ascii_lowercase();
    let secure_host = config.secure_hosts.iter().any(|s| lower.contains(s.as_str()));

    let scheme = if forwarded_https || secure_host {
        "https"
    } else {
        "http"
    };

    Some(format!("{scheme}://{host}"))
}

/// Redirect URI for the current request.
///
/// Spotify compares it byte for byte with the one used to start the
/// authorization, which the front end derived from the same origin. The
/// configured value is only used when the request carries no host.
pub fn redirect_uri_for(headers: &HeaderMap, config: &Config) -> String {
    match request_origin(headers, config) {
        Some(origin) => format!("{origin}/callback"),
        None => config.spotify_redirect_uri.clone(),
    }
}

/// Exchanges an authorization code for an access token.
///
/// The upstream body is passed through untouched on success; the only
/// check is that it actually contains an `access_token`.
pub async fn exchange_code(
    http: &Client,
    config: &Config,
    code: &str,
    redirect_uri: &str,
) -> Result<Value, ApiError> {
    let (client_id, client_secret) = config
        .spotify_credentials()
        .map_err(ApiError::Configuration)?;

    info!("Exchanging code with redirect_uri: {}", redirect_uri);

    let res = http
        .post(&config.spotify_token_url)
        .timeout(TOKEN_EXCHANGE_TIMEOUT)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
        .send()
        .await?;

    let status = res.status();
    let text = res.text().await?;
    let body: Value = serde_json::from_str(&text).unwrap_or_else(|_| json!({ "message": text }));

    if status != StatusCode::OK {
        warning!("Spotify token endpoint answered {}: {}", status, text);
        return Err(ApiError::TokenExchange {
            status: status.as_u16(),
            details: body,
        });
    }

    if body.get("access_token").and_then(Value::as_str).is_none() {
        warning!("Spotify token response without access_token");
        return Err(ApiError::TokenExchange {
            status: status.as_u16(),
            details: body,
        });
    }

    info!(
        "Token exchange succeeded for code {}...",
        utils::truncate_code(code)
    );
    Ok(body)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
