//! Trend Routes
//!
//! Current trend analysis, raw trending feed passthrough and liveness.

use std::num::NonZeroUsize;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use trend_core::{Post, TrendAnalysis};
use trend_orchestrator::AnalysisProvenance;

use crate::{ApiResponse, AppError, AppState};

/// Query parameters for the trending feed
#[derive(Deserialize)]
pub struct TrendingQuery {
    /// Number of posts to fetch (default: 50)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

#[derive(Serialize)]
pub struct TrendsResponse {
    pub success: bool,
    pub analysis: TrendAnalysis,
    pub provenance: AnalysisProvenance,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub fn trend_routes() -> Router<AppState> {
    Router::new()
        .route("/api/trends", get(get_trends))
        .route("/api/farcaster/trending", get(get_trending_posts))
        .route("/health", get(health))
}

/// GET /api/trends
async fn get_trends(State(state): State<AppState>) -> Json<TrendsResponse> {
    let outcome = state.orchestrator.analyze_trends_with_provenance().await;

    Json(TrendsResponse {
        success: true,
        analysis: TrendAnalysis::clone(&outcome.analysis),
        provenance: outcome.provenance,
    })
}

/// GET /api/farcaster/trending?limit=N
///
/// Raw feed passthrough; source errors are reported, not replaced.
async fn get_trending_posts(
    State(state): State<AppState>,
    query: Result<Query<TrendingQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Post>>>, AppError> {
    let Query(query) = query.map_err(|r| AppError::rejected(r.status(), r.body_text()))?;
    let limit = NonZeroUsize::new(query.limit)
        .ok_or_else(|| AppError::bad_request("limit must be greater than 0"))?;

    let posts = state.orchestrator.recent_posts(limit).await.map_err(|e| {
        AppError::with_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            anyhow::anyhow!("Failed to fetch trending casts: {e}"),
        )
    })?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(posts),
        error: None,
    }))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
