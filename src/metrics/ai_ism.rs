// src/metrics/ai_ism.rs
//! AI-ism likelihood (0..=100).
//!
//! Each lexicon category turns its hit count into a capped score:
//! - up to 3 hits: 3 points each
//! - 4 to 6 hits: 20 + 3 per hit above 3
//! - more: 30
//!
//! The category score is multiplied by the category weight. The pattern
//! category also counts bigrams repeated beyond the calibration limit. A
//! passive-voice bonus is added when the passive sentence ratio exceeds its
//! threshold, and the sum is mapped onto 0..=100.

use super::{Calibration, Measure};
use crate::features::FeatureSet;
use crate::lexicon::{CompiledLexicon, PATTERN};
use serde::Serialize;
use std::collections::HashMap;

pub const CATEGORY_CAP: f64 = 30.0;
/// Characters of context kept on each side of a detection.
pub const CONTEXT_CHARS: usize = 50;
pub const EXAMPLES_PER_PHRASE: usize = 2;

/// One detected AI-ism occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiIsmDetection {
    pub phrase: String,
    pub category: String,
    /// Surrounding source text.
    pub context: String,
}

pub fn calculate(
    features: &FeatureSet,
    lexicon: &CompiledLexicon,
    cal: &Calibration,
) -> (Measure, Vec<AiIsmDetection>) {
    let text = features.lower_text.as_str();
    let mut detections = Vec::new();
    let mut total = 0.0;

    for category in &lexicon.ai_isms {
        let hits = category.phrases.hits(text);
        let mut n = hits.len();
        if category.name == PATTERN {
            n += repeated_bigrams(&features.words, cal.repeated_bigram_limit);
        }
        total += category_score(n) * category.weight;

        let mut shown: HashMap<&str, usize> = HashMap::new();
        for hit in hits {
            let seen = shown.entry(hit.phrase).or_insert(0);
            if *seen >= EXAMPLES_PER_PHRASE {
                continue;
            }
            *seen += 1;
            detections.push(AiIsmDetection {
                phrase: hit.phrase.to_string(),
                category: category.name.clone(),
                context: context_around(
                    &features.raw_text,
                    features.raw_offset(hit.start),
                    features.raw_offset(hit.end),
                ),
            });
        }
    }

    if features.sentence_count > 0 {
        let ratio = features.passive_sentences as f64 / features.sentence_count as f64;
        if ratio > cal.passive_ratio_threshold {
            total += cal.passive_bonus * ratio;
        }
    }

    let raw = (total / cal.ai_ism_total * 100.0).clamp(0.0, 100.0);
    (Measure::new(raw, raw), detections)
}

/// Capped score for `n` hits in one category.
pub fn category_score(n: usize) -> f64 {
    let score = match n {
        0..=3 => 3.0 * n as f64,
        4..=6 => 20.0 + 3.0 * (n - 3) as f64,
        _ => CATEGORY_CAP,
    };
    score.min(CATEGORY_CAP)
}

/// Distinct adjacent word pairs occurring more than `limit` times.
pub fn repeated_bigrams(words: &[String], limit: usize) -> usize {
    let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
    for pair in words.windows(2) {
        *counts.entry((pair[0].as_str(), pair[1].as_str())).or_insert(0) += 1;
    }
    counts.values().filter(|&&c| c > limit).count()
}

fn context_around(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = text[end..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    text[from..to].trim().to_string()
}
