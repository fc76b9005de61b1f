//! Last.fm scrobble counts.
//!
//! Scrobble counts only decide the ordering and the planet sizes in the
//! front end, so a lookup never fails the request: no key, a network
//! error or an odd payload all come back as `0`.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::warning;

pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

pub struct LastFmClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

impl LastFmClient {
    pub fn new(http: Client, api_key: Option<String>, base_url: &str) -> Self {
        Self {
            http,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: base_url.to_string(),
        }
    }

    /// Total scrobbles for `artist` across all Last.fm users.
    pub async fn scrobble_count(&self, artist: &str) -> u64 {
        let Some(api_key) = &self.api_key else {
            return 0;
        };

        match self.fetch_artist_info(artist, api_key).await {
            Ok(json) => playcount(&json),
            Err(e) => {
                warning!("Last.fm lookup failed for {}: {}", artist, e);
                0
            }
        }
    }

    async fn fetch_artist_info(&self, artist: &str, api_key: &str) -> Result<Value, reqwest::Error> {
        self.http
            .get(&self.base_url)
            .query(&[
                ("method", "artist.getinfo"),
                ("artist", artist),
                ("api_key", api_key),
                ("format", "json"),
            ])
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await
    }
}

/// Reads `artist.stats.playcount`, which Last.fm sends as a string.
pub fn playcount(json: &Value) -> u64 {
    match json.pointer("/artist/stats/playcount") {
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}
