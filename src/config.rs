//! Configuration management for the Spotify Universe backend.
//!
//! All settings come from environment variables, optionally seeded from a
//! `.env` file in the working directory. They are read once at startup into
//! a [`Config`] value that is handed to the handlers through the shared
//! application state; nothing reads the environment while serving requests.
//!
//! The configuration follows a hierarchical approach:
//! 1. Command-line flags (`--host`, `--port`)
//! 2. Environment variables
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::warning;

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_SECURE_HOSTS: &str = "railway.app";

/// Loads environment variables from a `.env` file in the working directory.
///
/// A missing file is fine: deployments usually inject the variables
/// directly. A file that exists but cannot be parsed is reported.
///
/// # Errors
///
/// Returns the parse error as a string if the `.env` file is malformed.
pub fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenv::Error::Io(_)) => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Immutable runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    /// Fallback redirect URI, used when the request does not reveal its host.
    pub spotify_redirect_uri: String,
    pub lastfm_api_key: Option<String>,
    pub host: String,
    pub port: u16,
    /// Directory holding `index.html`, `universe.html`, scripts and `static/`.
    pub public_dir: PathBuf,
    pub spotify_token_url: String,
    pub spotify_api_url: String,
    pub lastfm_api_url: String,
    /// Host fragments that are always served over HTTPS behind a proxy.
    pub secure_hosts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spotify_client_id: None,
            spotify_client_secret: None,
            spotify_redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            lastfm_api_key: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_dir: PathBuf::from("."),
            spotify_token_url: DEFAULT_SPOTIFY_TOKEN_URL.to_string(),
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            lastfm_api_url: DEFAULT_LASTFM_API_URL.to_string(),
            secure_hosts: parse_list(DEFAULT_SECURE_HOSTS),
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Empty variables count as unset. An unparsable `PORT` falls back to
    /// the default with a warning rather than aborting startup.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warning!("Invalid PORT value '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        Self {
            spotify_client_id: var("SPOTIFY_CLIENT_ID"),
            spotify_client_secret: var("SPOTIFY_CLIENT_SECRET"),
            spotify_redirect_uri: var("SPOTIFY_REDIRECT_URI")
                .unwrap_or(defaults.spotify_redirect_uri),
            lastfm_api_key: var("LAST_FM_API_KEY"),
            host: var("HOST").unwrap_or(defaults.host),
            port,
            public_dir: var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            spotify_token_url: var("SPOTIFY_API_TOKEN_URL").unwrap_or(defaults.spotify_token_url),
            spotify_api_url: var("SPOTIFY_API_URL").unwrap_or(defaults.spotify_api_url),
            lastfm_api_url: var("LAST_FM_API_URL").unwrap_or(defaults.lastfm_api_url),
            secure_hosts: var("SECURE_HOSTS")
                .map(|raw| parse_list(&raw))
                .unwrap_or(defaults.secure_hosts),
        }
    }

    /// Display form of the listen address, e.g. `0.0.0.0:5000` or `[::]:5000`.
    pub fn server_addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Directory served under `/static`.
    pub fn static_dir(&self) -> PathBuf {
        self.public_dir.join("static")
    }

    /// Client id and secret, or a description of what is missing.
    pub fn spotify_credentials(&self) -> Result<(&str, &str), String> {
        match (&self.spotify_client_id, &self.spotify_client_secret) {
            (Some(id), Some(secret)) => Ok((id.as_str(), secret.as_str())),
            (None, Some(_)) => Err("SPOTIFY_CLIENT_ID is not configured".to_string()),
            (Some(_), None) => Err("SPOTIFY_CLIENT_SECRET is not configured".to_string()),
            (None, None) => {
                Err("SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET are not configured".to_string())
            }
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
