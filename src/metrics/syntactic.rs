// src/metrics/syntactic.rs
//! Syntactic complexity: weighted blend of mean sentence length,
//! subordination per sentence and modifier density.

use super::{clamp01, Calibration, Measure};
use crate::features::FeatureSet;

const LENGTH_WEIGHT: f64 = 0.4;
const SUBORDINATION_WEIGHT: f64 = 0.3;
const MODIFIER_WEIGHT: f64 = 0.3;

pub fn calculate(features: &FeatureSet, cal: &Calibration) -> Measure {
    if features.sentence_count == 0 || features.word_count == 0 {
        return Measure::ZERO;
    }
    let sentences = features.sentence_count as f64;

    let length = (features.mean_sentence_length() / cal.sentence_length_scale).min(1.0);
    let subordination = (features.subordination_count as f64 / sentences).min(1.0);
    let modifiers = (features.modifier_count as f64 / features.word_count as f64).min(1.0);

    let composite = clamp01(
        LENGTH_WEIGHT * length + SUBORDINATION_WEIGHT * subordination + MODIFIER_WEIGHT * modifiers,
    );
    Measure::new(composite, composite)
}
