//! HTTP surface for the trend pipeline.
//!
//! Exposes daily challenges, the current trend analysis and the raw feed
//! over JSON, backed by a shared [`TrendOrchestrator`].

pub mod challenge_routes;
pub mod config;
pub mod trend_routes;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use neynar_client::NeynarClient;
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use trend_orchestrator::TrendOrchestrator;

pub use config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<TrendOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: TrendOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Error returned from handlers, rendered as `{ success: false, error }`.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn with_status(status: StatusCode, error: anyhow::Error) -> Self {
        Self { status, error }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, anyhow::anyhow!(message.into()))
    }

    /// Extractor rejection, keeping axum's status and message.
    pub fn rejected(status: StatusCode, message: String) -> Self {
        Self::with_status(status, anyhow::anyhow!(message))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {:#}", self.error);
        } else {
            tracing::debug!("Request rejected: {:#}", self.error);
        }

        let body = Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.error.to_string()),
        });
        (self.status, body).into_response()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(challenge_routes::challenge_routes())
        .merge(trend_routes::trend_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_orchestrator(config: &ServerConfig) -> anyhow::Result<TrendOrchestrator> {
    if config.neynar_api_key.is_none() {
        tracing::warn!("NEYNAR_API_KEY not set, trend analysis will use the fallback dataset");
    }

    let client = NeynarClient::with_timeout(
        config.neynar_api_key.clone().unwrap_or_default(),
        Duration::from_secs(config.neynar_timeout_secs),
    )
    .with_base_url(config.neynar_base_url.clone())
    .with_feed(config.neynar_feed);

    TrendOrchestrator::with_config(Arc::new(client), config.orchestrator_config()?)
        .context("invalid orchestrator configuration")
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    init_tracing(config.json_logging);

    tracing::info!(
        "Starting trend server (feed: {:?}, post limit: {}, cache TTL: {}s)",
        config.neynar_feed,
        config.post_limit,
        config.cache_ttl_secs
    );

    let state = AppState::new(build_orchestrator(&config)?);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_error_renders_failure_envelope() {
        let response = AppError::bad_request("title is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "title is required");
    }

    #[test]
    fn test_errors_default_to_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
