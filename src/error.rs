// src/error.rs
//! Errors raised at the segmentation / feature-extraction boundary.
//!
//! Metric calculators never fail: degenerate denominators resolve to 0.0.
//! Config and lexicon loading use `anyhow` with path context instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Segmentation produced zero sentences (empty or whitespace-only input).
    #[error("input contains no sentences")]
    EmptyInput,

    /// Fewer sentences than the configured minimum.
    #[error("need at least {required} sentences, got {sentences}")]
    InsufficientData { sentences: usize, required: usize },
}

impl AnalysisError {
    /// Stable short label used for metrics and API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::EmptyInput => "empty_input",
            AnalysisError::InsufficientData { .. } => "insufficient_data",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_and_kinds() {
        let e = AnalysisError::InsufficientData {
            sentences: 1,
            required: 2,
        };
        assert_eq!(e.to_string(), "need at least 2 sentences, got 1");
        assert_eq!(e.kind(), "insufficient_data");
        assert_eq!(AnalysisError::EmptyInput.kind(), "empty_input");
    }
}
