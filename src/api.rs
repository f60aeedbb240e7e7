// src/api.rs
//! JSON HTTP surface over the `Analyzer`.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::engine::{anon_hash, Analyzer, ComparisonReport, TextAnalysis};
use crate::error::AnalysisError;
use crate::telemetry;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

pub fn router(analyzer: Arc<Analyzer>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/compare", post(compare))
        .layer(CorsLayer::very_permissive())
        .with_state(AppState { analyzer })
}

#[derive(Deserialize)]
struct AnalyzeReq {
    text: String,
}

#[derive(Deserialize)]
struct CompareReq {
    original: String,
    edited: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// `AnalysisError` rendered as `422 Unprocessable Entity`; a failed worker as `500`.
pub enum ApiError {
    Analysis(AnalysisError),
    Worker(String),
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        telemetry::record_error(&e);
        Self::Analysis(e)
    }
}

impl From<JoinError> for ApiError {
    fn from(e: JoinError) -> Self {
        error!(target: "api", error = %e, "analysis worker failed");
        Self::Worker(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Analysis(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: e.kind(),
                    message: e.to_string(),
                },
            ),
            Self::Worker(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "internal",
                    message,
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

// Analysis is CPU-bound; it runs on the blocking pool, off the runtime workers.
async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<TextAnalysis>, ApiError> {
    let started = Instant::now();
    let analyzer = state.analyzer.clone();
    let analysis = tokio::task::spawn_blocking(move || analyzer.analyze(&body.text)).await??;
    telemetry::record_success(1, started.elapsed());
    info!(
        target: "api",
        id = %analysis.metadata.document_id,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "analyze"
    );
    Ok(Json(analysis))
}

async fn compare(
    State(state): State<AppState>,
    Json(body): Json<CompareReq>,
) -> Result<Json<ComparisonReport>, ApiError> {
    let started = Instant::now();
    let analyzer = state.analyzer.clone();
    let ids = (anon_hash(&body.original), anon_hash(&body.edited));
    let report =
        tokio::task::spawn_blocking(move || analyzer.report(&body.original, &body.edited)).await??;
    telemetry::record_success(2, started.elapsed());
    info!(
        target: "api",
        original = %ids.0,
        edited = %ids.1,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "compare"
    );
    Ok(Json(report))
}
