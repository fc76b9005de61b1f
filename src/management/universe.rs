use axum::http::HeaderValue;

use crate::{
    AppState,
    error::ApiError,
    info,
    lastfm::LastFmClient,
    management::ImageCache,
    spotify::{SpotifyClient, artists::MAX_TOP_ARTISTS},
    types::{ArtistStat, TimeRange, TopArtist},
    warning,
};

/// Builds the caller's universe: their long-term top artists, each with a
/// cached image and a Last.fm scrobble count, most scrobbled first.
///
/// Only the bearer token check and the top-artists call can fail the
/// request. Enrichment runs one artist at a time and degrades per artist.
pub async fn build_universe(
    state: &AppState,
    authorization: Option<&HeaderValue>,
) -> Result<Vec<ArtistStat>, ApiError> {
    let spotify = SpotifyClient::from_authorization(
        authorization,
        state.http.clone(),
        &state.config.spotify_api_url,
    )?;

    let artists = spotify
        .top_artists(MAX_TOP_ARTISTS, TimeRange::LongTerm)
        .await?;
    info!("Fetched {} top artists", artists.len());

    let images = ImageCache::new(state.http.clone(), state.config.static_dir());
    let lastfm = LastFmClient::new(
        state.http.clone(),
        state.config.lastfm_api_key.clone(),
        &state.config.lastfm_api_url,
    );

    let mut stats = Vec::with_capacity(artists.len());
    for artist in artists.iter().take(MAX_TOP_ARTISTS as usize) {
        match enrich(artist, &images, &lastfm).await {
            Ok(stat) => stats.push(stat),
            Err(e) => warning!("Skipping artist: {}", e),
        }
    }

    sort_by_scrobbles(&mut stats);
    Ok(stats)
}

async fn enrich(
    artist: &TopArtist,
    images: &ImageCache,
    lastfm: &LastFmClient,
) -> Result<ArtistStat, String> {
    let name = artist
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            format!(
                "record {} has no name",
                artist.id.as_deref().unwrap_or("<unknown id>")
            )
        })?;

    let local_image_path = images.store(artist.largest_image_url(), name).await;
    let scrobble_count = lastfm.scrobble_count(name).await;

    Ok(ArtistStat {
        name: name.to_string(),
        scrobble_count,
        local_image_path,
    })
}

/// Most scrobbled first. The sort is stable, so ties keep Spotify's ranking.
pub fn sort_by_scrobbles(stats: &mut [ArtistStat]) {
    stats.sort_by(|a, b| b.scrobble_count.cmp(&a.scrobble_count));
}
