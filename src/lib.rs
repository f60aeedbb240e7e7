// src/lib.rs
// Public library surface for the binary, integration tests and reuse.

pub mod api;
pub mod benchmarks;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod interpret;
pub mod lexicon;
pub mod metrics;
pub mod pos;
pub mod segment;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::compare::{compare, AnalysisResult, Direction, MetricDelta, MetricDeltas};
pub use crate::config::AnalyzerConfig;
pub use crate::engine::{Analyzer, ComparisonReport, TextAnalysis, TextMetadata};
pub use crate::error::AnalysisError;
pub use crate::metrics::{Calibration, MetricKind, MetricScores, Polarity, RawMetrics};

use std::sync::Arc;
use tracing::info;

/// Full application router: analysis routes plus `/metrics`.
///
/// Reads the analyzer config from the environment (see `config::analyzer`).
pub fn app() -> anyhow::Result<axum::Router> {
    let analyzer = Arc::new(Analyzer::from_env()?);
    app_with(analyzer)
}

/// Same as [`app`] with an explicitly built analyzer.
pub fn app_with(analyzer: Arc<Analyzer>) -> anyhow::Result<axum::Router> {
    let telemetry = telemetry::Telemetry::init()?;
    info!(min_sentences = analyzer.min_sentences(), "router built");
    Ok(router(analyzer).merge(telemetry.router()))
}
