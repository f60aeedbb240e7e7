// src/metrics/information.rs
//! Information density, inverted so that generic, low-specificity text scores high.
//!
//! composite = 0.3 * entity rate + 0.4 * content ratio + 0.3 * unique content ratio
//! score     = 1 - clamp(composite / information_scale)

use super::{clamp01, per_thousand, Calibration, Measure};
use crate::features::FeatureSet;

const ENTITY_WEIGHT: f64 = 0.3;
const CONTENT_WEIGHT: f64 = 0.4;
const UNIQUE_CONTENT_WEIGHT: f64 = 0.3;

pub fn calculate(features: &FeatureSet, cal: &Calibration) -> Measure {
    if features.word_count == 0 {
        return Measure::ZERO;
    }
    let words = features.word_count as f64;

    let entity_rate =
        clamp01(per_thousand(features.entity_count as f64, features.word_count) / cal.entity_scale);
    let content_ratio = features.content_count as f64 / words;
    let unique_content = if features.content_count == 0 {
        0.0
    } else {
        features.unique_content_lemmas as f64 / features.content_count as f64
    };

    let composite = ENTITY_WEIGHT * entity_rate
        + CONTENT_WEIGHT * content_ratio
        + UNIQUE_CONTENT_WEIGHT * unique_content;
    Measure::new(composite, 1.0 - clamp01(composite / cal.information_scale))
}
