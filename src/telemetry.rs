// src/telemetry.rs
//! Prometheus exposition for analysis counters and latency.

use crate::error::AnalysisError;
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::time::Duration;

pub const ANALYSES_TOTAL: &str = "voice_tracer_analyses_total";
pub const ANALYSIS_ERRORS_TOTAL: &str = "voice_tracer_analysis_errors_total";
pub const ANALYSIS_DURATION_MS: &str = "voice_tracer_analysis_duration_ms";

// A process holds at most one global recorder; tests build several routers.
static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Clone)]
pub struct Telemetry {
    pub handle: PrometheusHandle,
}

impl Telemetry {
    /// Install the Prometheus recorder (first call only) and describe the series.
    pub fn init() -> Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("prometheus: install recorder")?;
                describe_counter!(ANALYSES_TOTAL, "Documents analyzed successfully");
                describe_counter!(ANALYSIS_ERRORS_TOTAL, "Analyses rejected, by error kind");
                describe_histogram!(
                    ANALYSIS_DURATION_MS,
                    Unit::Milliseconds,
                    "Wall time per analysis request"
                );
                Ok::<_, anyhow::Error>(handle)
            })?
            .clone();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Record one finished request covering `documents` analyses.
pub fn record_success(documents: u64, elapsed: Duration) {
    counter!(ANALYSES_TOTAL).increment(documents);
    histogram!(ANALYSIS_DURATION_MS).record(elapsed.as_secs_f64() * 1000.0);
}

pub fn record_error(err: &AnalysisError) {
    counter!(ANALYSIS_ERRORS_TOTAL, "kind" => err.kind()).increment(1);
}
