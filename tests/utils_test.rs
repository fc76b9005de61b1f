use std::{collections::HashMap, path::Path};

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use serde_json::json;
use universe::config::Config;
use universe::error::ApiError;
use universe::lastfm::playcount;
use universe::management::{sanitize_artist_name, sort_by_scrobbles};
use universe::spotify::SpotifyClient;
use universe::spotify::auth::{is_programmatic_request, redirect_uri_for, request_origin};
use universe::types::{ArtistStat, TimeRange};
use universe::utils::*;

// Helper function to create a test artist stat
fn create_test_stat(name: &str, scrobble_count: u64) -> ArtistStat {
    ArtistStat {
        name: name.to_string(),
        scrobble_count,
        local_image_path: None,
    }
}

fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(*name, HeaderValue::from_static(value));
    }
    map
}

fn no_params() -> HashMap<String, String> {
    HashMap::new()
}

#[test]
fn test_sanitize_artist_name() {
    assert_eq!(sanitize_artist_name("AC/DC: Live!"), "ACDC_Live");
    assert_eq!(sanitize_artist_name("Daft Punk"), "Daft_Punk");
    assert_eq!(sanitize_artist_name("Jay-Z"), "Jay-Z");
    assert_eq!(sanitize_artist_name("snake_case"), "snake_case");

    // Trailing whitespace left behind by stripped characters is dropped
    assert_eq!(sanitize_artist_name("Sigur Rós !"), "Sigur_Rós");

    // Nothing usable left
    assert_eq!(sanitize_artist_name("?!/"), "unknown");
}

#[test]
fn test_sanitize_collisions_share_a_token() {
    // Documented limitation: both artists end up in the same file
    assert_eq!(
        sanitize_artist_name("AC/DC"),
        sanitize_artist_name("ACDC")
    );
}

#[test]
fn test_sort_by_scrobbles() {
    let mut stats = vec![
        create_test_stat("A", 10),
        create_test_stat("B", 50),
        create_test_stat("C", 0),
    ];

    sort_by_scrobbles(&mut stats);

    let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A", "C"]);
}

#[test]
fn test_sort_by_scrobbles_keeps_rank_on_ties() {
    let mut stats = vec![
        create_test_stat("first", 5),
        create_test_stat("second", 7),
        create_test_stat("third", 5),
    ];

    sort_by_scrobbles(&mut stats);

    let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["second", "first", "third"]);
}

#[test]
fn test_playcount() {
    assert_eq!(playcount(&json!({"artist": {"stats": {"playcount": "12345"}}})), 12345);
    assert_eq!(playcount(&json!({"artist": {"stats": {"playcount": 42}}})), 42);
    assert_eq!(playcount(&json!({"artist": {"stats": {"playcount": "lots"}}})), 0);
    assert_eq!(playcount(&json!({"artist": {"stats": {"playcount": -3}}})), 0);
    assert_eq!(playcount(&json!({"artist": {"stats": {}}})), 0);
    assert_eq!(playcount(&json!({"error": 6, "message": "The artist you supplied could not be found"})), 0);
}

#[test]
fn test_browser_navigation_is_not_programmatic() {
    assert!(!is_programmatic_request(&HeaderMap::new(), &no_params()));

    let browser = headers(&[
        ("accept", "text/html,application/xhtml+xml,*/*;q=0.8"),
        ("sec-fetch-mode", "navigate"),
    ]);
    assert!(!is_programmatic_request(&browser, &no_params()));
}

#[test]
fn test_fetch_indicators_are_programmatic() {
    let accept_json = headers(&[("accept", "application/json")]);
    assert!(is_programmatic_request(&accept_json, &no_params()));

    let xhr = headers(&[("x-requested-with", "XMLHttpRequest")]);
    assert!(is_programmatic_request(&xhr, &no_params()));

    let cors = headers(&[("sec-fetch-mode", "cors")]);
    assert!(is_programmatic_request(&cors, &no_params()));

    let mut params = no_params();
    params.insert("fetch".to_string(), "true".to_string());
    assert!(is_programmatic_request(&HeaderMap::new(), &params));

    params.insert("fetch".to_string(), "false".to_string());
    assert!(!is_programmatic_request(&HeaderMap::new(), &params));
}

#[test]
fn test_request_origin() {
    let config = Config::default();

    let local = headers(&[("host", "127.0.0.1:5000")]);
    assert_eq!(
        request_origin(&local, &config).as_deref(),
        Some("http://127.0.0.1:5000")
    );

    // Known production hosts are always https
    let railway = headers(&[("host", "universe.up.railway.app")]);
    assert_eq!(
        request_origin(&railway, &config).as_deref(),
        Some("https://universe.up.railway.app")
    );

    // Proxy headers win over the raw host
    let proxied = headers(&[
        ("host", "10.0.0.4:8080"),
        ("x-forwarded-host", "music.example.com"),
        ("x-forwarded-proto", "https"),
    ]);
    assert_eq!(
        request_origin(&proxied, &config).as_deref(),
        Some("https://music.example.com")
    );

    assert_eq!(request_origin(&HeaderMap::new(), &config), None);
}

#[test]
fn test_redirect_uri_for() {
    let config = Config {
        spotify_redirect_uri: "http://127.0.0.1:8888/".to_string(),
        ..Config::default()
    };

    let local = headers(&[("host", "localhost:5000")]);
    assert_eq!(redirect_uri_for(&local, &config), "http://localhost:5000/callback");

    // Falls back to the configured value without a host
    assert_eq!(
        redirect_uri_for(&HeaderMap::new(), &config),
        "http://127.0.0.1:8888/"
    );
}

#[test]
fn test_spotify_client_requires_bearer_token() {
    let http = reqwest::Client::new();
    let api = "https://api.spotify.com/v1";

    let missing = SpotifyClient::from_authorization(None, http.clone(), api);
    assert!(matches!(missing, Err(ApiError::AuthenticationRequired)));

    let basic = HeaderValue::from_static("Basic dXNlcjpwYXNz");
    let wrong_scheme = SpotifyClient::from_authorization(Some(&basic), http.clone(), api);
    assert!(matches!(wrong_scheme, Err(ApiError::AuthenticationRequired)));

    let empty = HeaderValue::from_static("Bearer ");
    let empty_token = SpotifyClient::from_authorization(Some(&empty), http.clone(), api);
    assert!(matches!(empty_token, Err(ApiError::AuthenticationRequired)));

    let bearer = HeaderValue::from_static("Bearer BQC123");
    assert!(SpotifyClient::from_authorization(Some(&bearer), http, api).is_ok());
}

#[test]
fn test_api_error_status() {
    assert_eq!(ApiError::MissingCode.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ApiError::MissingCode.to_string(), "No code provided");
    assert_eq!(
        ApiError::TokenExchange {
            status: 400,
            details: json!({"error": "invalid_grant"})
        }
        .status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        ApiError::Configuration("missing".to_string()).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        ApiError::AuthenticationRequired.status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        ApiError::UpstreamAuth("401".to_string()).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_config_credentials() {
    let config = Config::default();
    assert!(config.spotify_credentials().is_err());

    let config = Config {
        spotify_client_id: Some("id".to_string()),
        spotify_client_secret: Some("secret".to_string()),
        ..Config::default()
    };
    assert_eq!(config.spotify_credentials(), Ok(("id", "secret")));
    assert_eq!(config.server_addr(), "0.0.0.0:5000");

    let ipv6 = Config {
        host: "::".to_string(),
        ..Config::default()
    };
    assert_eq!(ipv6.server_addr(), "[::]:5000");
}

#[test]
fn test_time_range_display() {
    assert_eq!(TimeRange::ShortTerm.to_string(), "short_term");
    assert_eq!(TimeRange::MediumTerm.to_string(), "medium_term");
    assert_eq!(TimeRange::LongTerm.to_string(), "long_term");
}

#[test]
fn test_query_string() {
    assert_eq!(query_string(&[("code", "abc")]), "code=abc");
    assert_eq!(query_string(&[("code", "a b&c")]), "code=a+b%26c");
}

#[test]
fn test_truncate_code() {
    assert_eq!(truncate_code("short"), "short");
    assert_eq!(truncate_code("AQBxxxxxxxxxxxxxxxxxxxxxxxxxxxx").len(), 20);
}

#[test]
fn test_safe_join() {
    let root = Path::new("/srv/static");

    assert_eq!(
        safe_join(root, "images/ACDC_Live.jpg"),
        Some(root.join("images/ACDC_Live.jpg"))
    );
    assert_eq!(safe_join(root, "/app.js"), Some(root.join("app.js")));

    assert_eq!(safe_join(root, "../secret.env"), None);
    assert_eq!(safe_join(root, "images/../../secret.env"), None);
    assert_eq!(safe_join(root, ""), None);
}

#[test]
fn test_content_type_for() {
    assert_eq!(content_type_for(Path::new("app.js")), "application/javascript");
    assert_eq!(content_type_for(Path::new("a/B.JPG")), "image/jpeg");
    assert_eq!(content_type_for(Path::new("style.css")), "text/css; charset=utf-8");
    assert_eq!(content_type_for(Path::new("blob")), "application/octet-stream");
}
