// src/metrics/hedging.rs
//! Epistemic hedging, inverted: confident, unhedged prose scores high.
//!
//! raw   = (hedges - confidence_weight * confidence markers) per 1000 words
//! score = 1 - clamp(max(raw, 0) / hedging_scale)

use super::{clamp01, per_thousand, Calibration, Measure};
use crate::features::FeatureSet;
use crate::lexicon::CompiledLexicon;

pub fn calculate(features: &FeatureSet, lexicon: &CompiledLexicon, cal: &Calibration) -> Measure {
    if features.word_count == 0 {
        return Measure::ZERO;
    }
    let hedges = lexicon.hedges.count(&features.lower_text) as f64;
    let confidence = lexicon.confidence.count(&features.lower_text) as f64;

    let raw = per_thousand(hedges - cal.confidence_weight * confidence, features.word_count);
    Measure::new(raw, 1.0 - clamp01(raw.max(0.0) / cal.hedging_scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(text: &str, words: usize) -> FeatureSet {
        FeatureSet {
            word_count: words,
            ..FeatureSet::with_text(text)
        }
    }

    #[test]
    fn hedges_lower_the_score() {
        let lex = CompiledLexicon::builtin().unwrap();
        let m = calculate(&features("Perhaps it rains. It might stop.", 100), &lex, &Calibration::default());
        assert!((m.raw - 20.0).abs() < 1e-9, "raw={}", m.raw);
        assert!((m.score - (1.0 - 20.0 / 150.0)).abs() < 1e-9, "score={}", m.score);
    }

    #[test]
    fn confidence_cancels_two_hedges() {
        let lex = CompiledLexicon::builtin().unwrap();
        // 3 hedges - 2 * 1 confidence
        let m = calculate(
            &features("Perhaps it rains. It might stop. It could. Clearly not.", 100),
            &lex,
            &Calibration::default(),
        );
        assert!((m.raw - 10.0).abs() < 1e-9, "raw={}", m.raw);
    }

    #[test]
    fn net_confident_text_scores_one() {
        let lex = CompiledLexicon::builtin().unwrap();
        let m = calculate(&features("Clearly it rains. It stops.", 100), &lex, &Calibration::default());
        assert!((m.raw + 20.0).abs() < 1e-9, "raw={}", m.raw);
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn heavy_hedging_bottoms_out() {
        let lex = CompiledLexicon::builtin().unwrap();
        let m = calculate(&features("Perhaps. Possibly. Probably.", 20), &lex, &Calibration::default());
        assert!((m.raw - 150.0).abs() < 1e-9, "raw={}", m.raw);
        assert_eq!(m.score, 0.0);
    }

    #[test]
    fn no_words_is_zero() {
        let lex = CompiledLexicon::builtin().unwrap();
        assert_eq!(
            calculate(&features("Perhaps.", 0), &lex, &Calibration::default()),
            Measure::ZERO
        );
    }
}
