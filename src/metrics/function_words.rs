// src/metrics/function_words.rs
//! Function word ratio: closed-class tokens (DET, ADP, CCONJ, SCONJ, AUX, PRON, PART) per word.

use super::{clamp01, Calibration, Measure};
use crate::features::FeatureSet;

pub fn calculate(features: &FeatureSet, cal: &Calibration) -> Measure {
    if features.word_count == 0 {
        return Measure::ZERO;
    }
    let raw = features.function_word_count() as f64 / features.word_count as f64;
    let score = clamp01((raw - cal.function_word_baseline) / cal.function_word_span);
    Measure::new(raw, score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::PosTag;

    fn features(counts: &[(PosTag, usize)]) -> FeatureSet {
        FeatureSet {
            word_count: counts.iter().map(|&(_, n)| n).sum(),
            pos_counts: counts.iter().copied().collect(),
            ..FeatureSet::default()
        }
    }

    #[test]
    fn ratio_normalized_from_baseline() {
        let f = features(&[
            (PosTag::Det, 25),
            (PosTag::Adp, 20),
            (PosTag::Pron, 10),
            (PosTag::Noun, 30),
            (PosTag::Verb, 15),
        ]);
        assert_eq!(f.pos_count(PosTag::Det), 25);
        assert_eq!(f.pos_count(PosTag::Aux), 0);

        let m = calculate(&f, &Calibration::default());
        assert!((m.raw - 0.55).abs() < 1e-12, "raw={}", m.raw);
        // (0.55 - 0.45) / 0.20
        assert!((m.score - 0.5).abs() < 1e-9, "score={}", m.score);
    }

    #[test]
    fn at_or_below_baseline_scores_zero() {
        let f = features(&[(PosTag::Det, 45), (PosTag::Noun, 55)]);
        let m = calculate(&f, &Calibration::default());
        assert!((m.raw - 0.45).abs() < 1e-12);
        assert_eq!(m.score, 0.0);

        let f = features(&[(PosTag::Noun, 10)]);
        assert_eq!(calculate(&f, &Calibration::default()).score, 0.0);
    }

    #[test]
    fn saturates_above_baseline_plus_span() {
        let f = features(&[(PosTag::Pron, 70), (PosTag::Cconj, 10), (PosTag::Noun, 20)]);
        assert_eq!(calculate(&f, &Calibration::default()).score, 1.0);
    }

    #[test]
    fn no_words_is_zero() {
        assert_eq!(calculate(&FeatureSet::default(), &Calibration::default()), Measure::ZERO);
    }
}
