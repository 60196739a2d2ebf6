//! Challenge Routes
//!
//! Daily AI-generated challenges and manual challenge creation.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use trend_core::{Challenge, TrendError};

use crate::{AppError, AppState};

#[derive(Serialize)]
pub struct ChallengesResponse {
    pub success: bool,
    pub challenges: Vec<Challenge>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateChallengeRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Challenge length in hours (default: configured challenge duration)
    #[serde(default)]
    pub duration: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeResponse {
    pub success: bool,
    pub challenge_id: String,
    pub challenge: Challenge,
    pub message: String,
}

pub fn challenge_routes() -> Router<AppState> {
    Router::new().route("/api/challenges", get(get_challenges).post(create_challenge))
}

/// GET /api/challenges
///
/// Always succeeds: pipeline failures surface as the fallback challenge.
async fn get_challenges(State(state): State<AppState>) -> Json<ChallengesResponse> {
    let challenges = state.orchestrator.generate_daily_challenges().await;

    Json(ChallengesResponse {
        success: true,
        challenges,
        timestamp: Utc::now(),
    })
}

/// POST /api/challenges
async fn create_challenge(
    State(state): State<AppState>,
    payload: Result<Json<CreateChallengeRequest>, JsonRejection>,
) -> Result<Json<CreateChallengeResponse>, AppError> {
    let Json(req) = payload.map_err(|r| AppError::rejected(r.status(), r.body_text()))?;

    let duration = req
        .duration
        .map(|hours| {
            Duration::try_hours(hours)
                .ok_or_else(|| AppError::bad_request(format!("duration out of range: {hours}h")))
        })
        .transpose()?;

    let challenge = state
        .orchestrator
        .synthesizer()
        .custom(&req.title, &req.description, duration, Utc::now())
        .map_err(|e| match e {
            TrendError::InvalidData(msg) => AppError::bad_request(msg),
            other => AppError::with_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                anyhow::anyhow!("Failed to create challenge: {other}"),
            ),
        })?;

    tracing::info!("Created custom challenge {} ({})", challenge.id, challenge.title);

    Ok(Json(CreateChallengeResponse {
        success: true,
        challenge_id: challenge.id.clone(),
        challenge,
        message: "Challenge created successfully".to_string(),
    }))
}
