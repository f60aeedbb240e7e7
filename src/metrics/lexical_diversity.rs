// src/metrics/lexical_diversity.rs
//! Lexical diversity via MTLD (Measure of Textual Lexical Diversity).
//!
//! A factor closes each time the running type-token ratio drops to the
//! threshold; the leftover segment contributes a partial factor. Forward and
//! backward passes are averaged.

use super::{clamp01, Calibration, Measure};
use crate::features::FeatureSet;
use std::collections::HashSet;

pub fn calculate(features: &FeatureSet, cal: &Calibration) -> Measure {
    let raw = mtld(&features.words, cal.mtld_threshold);
    Measure::new(raw, clamp01(raw / cal.mtld_scale))
}

/// Bidirectional MTLD over lowercased words. 0 for an empty sequence.
pub fn mtld<S: AsRef<str>>(words: &[S], threshold: f64) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let forward = mtld_pass(words.iter().map(AsRef::as_ref), threshold);
    let backward = mtld_pass(words.iter().rev().map(AsRef::as_ref), threshold);
    (forward + backward) / 2.0
}

fn mtld_pass<'a>(words: impl Iterator<Item = &'a str>, threshold: f64) -> f64 {
    let mut factors = 0.0;
    let mut types: HashSet<&str> = HashSet::new();
    let mut segment_len = 0usize;
    let mut total = 0usize;

    for w in words {
        total += 1;
        segment_len += 1;
        types.insert(w);
        let ttr = types.len() as f64 / segment_len as f64;
        if ttr <= threshold {
            factors += 1.0;
            types.clear();
            segment_len = 0;
        }
    }

    if segment_len > 0 {
        let ttr = types.len() as f64 / segment_len as f64;
        factors += (1.0 - ttr) / (1.0 - threshold);
    }

    if factors == 0.0 {
        total as f64
    } else {
        total as f64 / factors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_word_closes_a_factor_every_two_tokens() {
        let words = vec!["the"; 10];
        assert!((mtld(&words, 0.72) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn all_unique_returns_length() {
        let words = ["alpha", "beta", "gamma", "delta", "epsilon"];
        assert_eq!(mtld(&words, 0.72), 5.0);
    }

    #[test]
    fn empty_is_zero() {
        let words: [&str; 0] = [];
        assert_eq!(mtld(&words, 0.72), 0.0);
    }

    #[test]
    fn richer_vocabulary_scores_higher() {
        let poor: Vec<&str> = "a b a b a b a b a b c a b c a b".split(' ').collect();
        let rich: Vec<&str> = "a b c d e f g h a i j k l m n o".split(' ').collect();
        assert!(mtld(&rich, 0.72) > mtld(&poor, 0.72));
    }
}
