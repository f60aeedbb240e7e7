// src/config/analyzer.rs
//! Analyzer configuration: minimum sentence count, optional lexicon file and
//! calibration constants. Read from TOML; every field has a default.

use crate::features::DEFAULT_MIN_SENTENCES;
use crate::lexicon::{load_lexicon_from, Lexicon};
use crate::metrics::Calibration;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/voice_tracer.toml";

pub const ENV_CONFIG_PATH: &str = "VOICE_TRACER_CONFIG";
pub const ENV_MIN_SENTENCES: &str = "VOICE_TRACER_MIN_SENTENCES";

fn default_min_sentences() -> usize {
    DEFAULT_MIN_SENTENCES
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Texts with fewer sentences are rejected with `InsufficientData`.
    #[serde(default = "default_min_sentences")]
    pub min_sentences: usize,
    /// JSON or TOML lexicon; the built-in tables are used when unset.
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
    #[serde(default)]
    pub calibration: Calibration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_sentences: DEFAULT_MIN_SENTENCES,
            lexicon_path: None,
            calibration: Calibration::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Resolve the config path from `VOICE_TRACER_CONFIG` (or the default path),
    /// load it, then apply `VOICE_TRACER_MIN_SENTENCES`.
    ///
    /// A missing file at the default path falls back to defaults; a missing
    /// file named explicitly through the env var is an error.
    pub fn from_env() -> anyhow::Result<Self> {
        let explicit = std::env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from);
        let path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut cfg = if explicit.is_none() && !path.exists() {
            info!(target: "config", path = %path.display(), "no config file, using defaults");
            Self::default()
        } else {
            Self::load_from_file(&path)?
        };

        if let Some(n) = parse_min_sentences_env(std::env::var(ENV_MIN_SENTENCES).ok()) {
            cfg.min_sentences = n;
        }
        Ok(cfg)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading analyzer config from {}", path.display()))?;
        Self::from_toml_str(&data)
            .with_context(|| format!("parsing analyzer config {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let mut cfg: AnalyzerConfig = toml::from_str(s)?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Reset out-of-range values to their defaults.
    pub fn sanitize(&mut self) {
        if self.min_sentences == 0 {
            warn!(target: "config", "min_sentences = 0 is invalid, using default");
            self.min_sentences = DEFAULT_MIN_SENTENCES;
        }
        for field in self.calibration.sanitize() {
            warn!(target: "config", field, "calibration value out of range, using default");
        }
    }

    /// The configured lexicon file, or the built-in tables.
    pub fn lexicon(&self) -> anyhow::Result<Lexicon> {
        match &self.lexicon_path {
            Some(p) => load_lexicon_from(p),
            None => Ok(Lexicon::default()),
        }
    }
}

fn parse_min_sentences_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
}
