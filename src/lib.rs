//! Spotify Universe backend library
//!
//! This library powers a small web backend that exchanges a Spotify OAuth
//! authorization code for an access token and then builds the "universe" of
//! a listener: their long-term top artists ranked by Last.fm scrobble count,
//! with artist images cached on disk for the front end.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for pages, OAuth callback and data endpoints
//! - `config` - Configuration loaded from the environment
//! - `error` - Error taxonomy shared by the handlers
//! - `lastfm` - Last.fm scrobble count lookups
//! - `management` - Image caching and the artist aggregation pipeline
//! - `server` - Router construction and the HTTP listener
//! - `spotify` - Spotify token exchange and Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod config;
pub mod error;
pub mod lastfm;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;

/// A convenient Result type alias for startup operations that may fail.
///
/// Request handling uses [`error::ApiError`] instead; this alias covers
/// the plumbing around it (loading configuration, binding the listener).
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Shared state handed to every request handler.
///
/// Holds the immutable configuration read at process start and a single
/// HTTP client whose connection pool is reused by all outbound calls.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn shared(config: Config) -> Arc<Self> {
        Arc::new(Self::new(config))
    }
}

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for startup failures where the server cannot run at all.
/// Failures while serving a request are reported with [`warning!`] and
/// turned into an error response instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems: a failed image download, a Last.fm
/// lookup that fell back to zero, a rejected token exchange.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
