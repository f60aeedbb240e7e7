// src/config/mod.rs
pub mod analyzer;

pub use analyzer::{
    AnalyzerConfig, DEFAULT_CONFIG_PATH, ENV_CONFIG_PATH, ENV_MIN_SENTENCES,
};
