// src/metrics/discourse.rs
//! Discourse marker density: explicit connectives per 1000 words.

use super::{clamp01, per_thousand, Calibration, Measure};
use crate::features::FeatureSet;
use crate::lexicon::CompiledLexicon;

pub fn calculate(features: &FeatureSet, lexicon: &CompiledLexicon, cal: &Calibration) -> Measure {
    if features.word_count == 0 {
        return Measure::ZERO;
    }
    let hits = lexicon.discourse_markers.count(&features.lower_text);
    let raw = per_thousand(hits as f64, features.word_count);
    Measure::new(raw, clamp01(raw / cal.discourse_scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_per_thousand_words() {
        let lex = CompiledLexicon::builtin().unwrap();
        let f = FeatureSet {
            word_count: 100,
            ..FeatureSet::with_text("However, the plan worked. Therefore we left.")
        };
        let m = calculate(&f, &lex, &Calibration::default());
        assert!((m.raw - 20.0).abs() < 1e-9, "raw={}", m.raw);
        assert!((m.score - 20.0 / 30.0).abs() < 1e-9, "score={}", m.score);
    }

    #[test]
    fn saturates_at_scale() {
        let lex = CompiledLexicon::builtin().unwrap();
        let f = FeatureSet {
            word_count: 50,
            ..FeatureSet::with_text("However, thus. Moreover, indeed.")
        };
        let m = calculate(&f, &lex, &Calibration::default());
        assert!((m.raw - 80.0).abs() < 1e-9);
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn no_words_is_zero() {
        let lex = CompiledLexicon::builtin().unwrap();
        let f = FeatureSet::with_text("However.");
        assert_eq!(calculate(&f, &lex, &Calibration::default()), Measure::ZERO);
    }
}
