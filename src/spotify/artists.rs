use axum::http::HeaderValue;
use reqwest::Client;

use crate::{
    error::ApiError,
    types::{TimeRange, TopArtist, TopArtistsResponse},
};

/// Most artists the top-artists endpoint hands out in one page.
pub const MAX_TOP_ARTISTS: u32 = 50;

/// Spotify Web API client bound to the caller's access token.
///
/// The token lives only as long as the request that supplied it.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: String,
}

impl SpotifyClient {
    /// Builds a client from an inbound `Authorization` header.
    ///
    /// Fails with [`ApiError::AuthenticationRequired`] before any network
    /// traffic when the header is absent or not a non-empty bearer token.
    pub fn from_authorization(
        header: Option<&HeaderValue>,
        http: Client,
        api_url: &str,
    ) -> Result<Self, ApiError> {
        let token = header
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::AuthenticationRequired)?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Fetches the user's top artists for `time_range`.
    ///
    /// `limit` is clamped to what the endpoint accepts (1..=50). Any
    /// failure, including an expired or revoked token, is reported as
    /// [`ApiError::UpstreamAuth`].
    pub async fn top_artists(
        &self,
        limit: u32,
        time_range: TimeRange,
    ) -> Result<Vec<TopArtist>, ApiError> {
        let limit = limit.clamp(1, MAX_TOP_ARTISTS);
        let api_url = format!(
            "{uri}/me/top/artists?limit={limit}&time_range={range}",
            uri = self.api_url,
            limit = limit,
            range = time_range
        );

        let response = self
            .http
            .get(&api_url)
            .bearer_auth(&self.token)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| ApiError::UpstreamAuth(e.to_string()))?;

        let res = response
            .json::<TopArtistsResponse>()
            .await
            .map_err(|e| ApiError::UpstreamAuth(e.to_string()))?;

        Ok(res.items)
    }
}
