use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::Client;

use crate::warning;

pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Web path under which cached images are served.
pub const IMAGES_WEB_PREFIX: &str = "static/images";

/// Write-through cache of artist images on local disk.
///
/// Files are keyed by the sanitized artist name and rewritten on every
/// call. Two artists whose names sanitize to the same token share a file;
/// the last one written wins.
pub struct ImageCache {
    http: Client,
    dir: PathBuf,
}

impl ImageCache {
    /// `static_dir` is the directory served under `/static`.
    pub fn new(http: Client, static_dir: PathBuf) -> Self {
        Self {
            http,
            dir: static_dir.join("images"),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Downloads `url` for `artist` and returns the web path of the stored
    /// copy, e.g. `static/images/Daft_Punk.jpg`.
    ///
    /// Returns `None` without touching the filesystem when there is no URL,
    /// and `None` after logging when the download or the write fails.
    pub async fn store(&self, url: Option<&str>, artist: &str) -> Option<String> {
        let url = url.filter(|u| !u.trim().is_empty())?;
        let filename = format!("{}.jpg", sanitize_artist_name(artist));

        match self.download(url, &filename).await {
            Ok(()) => Some(format!("{IMAGES_WEB_PREFIX}/{filename}")),
            Err(e) => {
                warning!("Failed to download image for {}: {}", artist, e);
                None
            }
        }
    }

    async fn download(&self, url: &str, filename: &str) -> Result<(), String> {
        async_fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| e.to_string())?;

        let bytes = self
            .http
            .get(url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| e.to_string())?
            .bytes()
            .await
            .map_err(|e| e.to_string())?;

        async_fs::write(self.dir.join(filename), &bytes)
            .await
            .map_err(|e| e.to_string())
    }
}

/// Turns an artist name into a filesystem-safe token.
///
/// Keeps letters, digits, spaces, hyphens and underscores, drops trailing
/// whitespace and swaps the remaining spaces for underscores:
/// `"AC/DC: Live!"` becomes `"ACDC_Live"`.
pub fn sanitize_artist_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();

    let token = kept.trim_end().replace(' ', "_");
    if token.is_empty() {
        "unknown".to_string()
    } else {
        token
    }
}
