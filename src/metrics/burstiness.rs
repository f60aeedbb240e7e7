// src/metrics/burstiness.rs
//! Burstiness: coefficient of variation of sentence lengths (population stddev / mean).

use super::{clamp01, Calibration, Measure};
use crate::features::FeatureSet;

pub fn calculate(features: &FeatureSet, cal: &Calibration) -> Measure {
    let raw = coefficient_of_variation(&features.sentence_lengths);
    Measure::new(raw, clamp01(raw / cal.burstiness_scale))
}

/// Population stddev over mean; 0 for empty input or zero mean.
pub fn coefficient_of_variation(lengths: &[usize]) -> f64 {
    if lengths.is_empty() {
        return 0.0;
    }
    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<usize>() as f64 / n;
    if mean == 0.0 {
        return 0.0;
    }
    let var = lengths
        .iter()
        .map(|&l| {
            let d = l as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    var.sqrt() / mean
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varied_lengths() {
        let cv = coefficient_of_variation(&[5, 20, 4, 18]);
        assert!((cv - 0.6207).abs() < 1e-3, "cv={cv}");
    }

    #[test]
    fn uniform_lengths() {
        let cv = coefficient_of_variation(&[12, 13, 12, 12]);
        assert!((cv - 0.0353).abs() < 1e-3, "cv={cv}");
        assert_eq!(coefficient_of_variation(&[9, 9, 9]), 0.0);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(coefficient_of_variation(&[]), 0.0);
        assert_eq!(coefficient_of_variation(&[0, 0]), 0.0);
    }

    #[test]
    fn monotone_in_spread_at_fixed_mean() {
        let a = coefficient_of_variation(&[10, 10, 10, 10]);
        let b = coefficient_of_variation(&[8, 12, 8, 12]);
        let c = coefficient_of_variation(&[2, 18, 2, 18]);
        assert!(a < b && b < c);
    }
}
