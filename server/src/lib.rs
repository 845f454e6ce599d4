pub mod poster;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use engine::{Engine, EngineError, MovieId};
use poster::{PosterClient, PLACEHOLDER_URL};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Deserialize)]
pub struct RecommendParams {
    pub title: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize {
    10
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<RecommendedMovie>,
}

#[derive(Serialize)]
pub struct RecommendedMovie {
    pub id: MovieId,
    pub title: String,
    pub score: f32,
    pub poster: String,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub posters: PosterClient,
}

/// Loads the snapshot, builds the engine once, and wires the routes. The
/// engine is shared read-only behind an `Arc` for the process lifetime.
pub fn build_app(snapshot_dir: String, max_terms: usize) -> Result<Router> {
    let engine = Engine::from_snapshot(&snapshot_dir, max_terms)?;
    let api_key = std::env::var("TMDB_API_KEY").ok();
    if api_key.is_none() {
        tracing::warn!("TMDB_API_KEY not set, all posters will be placeholders");
    }
    let posters = PosterClient::new(api_key)?;
    Ok(build_router(Arc::new(engine), posters))
}

pub fn build_router(engine: Arc<Engine>, posters: PosterClient) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/movies", get(movies_handler))
        .route("/recommend", get(recommend_handler))
        .with_state(AppState { engine, posters })
        .layer(cors)
}

/// Catalog titles in load order, the selection list for a UI.
pub async fn movies_handler(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.engine.catalog().titles().map(str::to_string).collect())
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>, (StatusCode, Json<serde_json::Value>)> {
    let start = std::time::Instant::now();
    let k = params.k.max(1).min(50);

    let recs = state.engine.recommend(&params.title, k).map_err(|e| match e {
        EngineError::TitleNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": other.to_string() })),
        ),
    })?;

    // Posters resolve concurrently, each bounded by the client timeout, so
    // one slow lookup cannot stall the batch.
    let mut lookups = Vec::with_capacity(recs.len());
    for rec in &recs {
        let posters = state.posters.clone();
        let id = rec.id;
        lookups.push(tokio::spawn(async move { posters.resolve(id).await }));
    }

    let mut results = Vec::with_capacity(recs.len());
    for (rec, lookup) in recs.into_iter().zip(lookups) {
        let poster = lookup.await.unwrap_or_else(|_| PLACEHOLDER_URL.to_string());
        results.push(RecommendedMovie {
            id: rec.id,
            title: rec.title,
            score: rec.score,
            poster,
        });
    }

    Ok(Json(RecommendResponse {
        query: params.title,
        took_s: start.elapsed().as_secs_f64(),
        results,
    }))
}
