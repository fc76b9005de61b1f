use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of the listener's universe as returned by `/get_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistStat {
    pub name: String,
    pub scrobble_count: u64,
    pub local_image_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniverseResponse {
    pub current_user_artists: Vec<ArtistStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

/// Artist record from the top-artists endpoint. Only what the universe
/// needs is decoded; images are ordered largest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl TopArtist {
    pub fn largest_image_url(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtistsResponse {
    pub items: Vec<TopArtist>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyConfigResponse {
    pub client_id: String,
    pub redirect_uri: String,
}
