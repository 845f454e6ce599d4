use anyhow::Result;
use engine::MovieId;
use std::time::Duration;

/// Returned for any lookup that cannot produce a real poster URL.
pub const PLACEHOLDER_URL: &str = "https://via.placeholder.com/500x750.png?text=No+Image";

const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(4);

/// Maps a movie id to a display image URL via the TMDB metadata API. Every
/// failure mode (no credential, network error, non-200, missing
/// `poster_path`, timeout) resolves to the placeholder; nothing propagates
/// to the caller.
#[derive(Clone)]
pub struct PosterClient {
    http: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
}

impl PosterClient {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_api_base(DEFAULT_API_BASE, api_key)
    }

    /// Test seam: point the client at a different metadata endpoint.
    pub fn with_api_base(api_base: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_base: api_base.into(),
            api_key,
        })
    }

    pub async fn resolve(&self, movie_id: MovieId) -> String {
        match self.fetch(movie_id).await {
            Some(url) => url,
            None => {
                tracing::debug!(movie_id, "poster lookup failed, using placeholder");
                PLACEHOLDER_URL.to_string()
            }
        }
    }

    async fn fetch(&self, movie_id: MovieId) -> Option<String> {
        let key = self.api_key.as_deref()?;
        let url = format!("{}/movie/{}?api_key={}", self.api_base, movie_id, key);
        let resp = self.http.get(&url).send().await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        let body: serde_json::Value = resp.json().await.ok()?;
        let path = body.get("poster_path")?.as_str()?;
        Some(format!("{IMAGE_BASE}{path}"))
    }
}
