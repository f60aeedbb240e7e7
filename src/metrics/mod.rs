// src/metrics/mod.rs
//! The eight metric calculators and the value types they fill.
//!
//! Every calculator is a pure function of a `FeatureSet` (plus the compiled
//! lexicon for phrase matching) and the `Calibration` constants. Calculators
//! never fail; a zero denominator yields the sentinel `0.0` for both the raw
//! value and the normalized score.
//!
//! Polarity:
//! - human (higher = more human-like): burstiness, lexical diversity, syntactic complexity
//! - AI (higher = more AI-like): the other five

pub mod ai_ism;
pub mod burstiness;
pub mod discourse;
pub mod function_words;
pub mod hedging;
pub mod information;
pub mod lexical_diversity;
pub mod syntactic;

use crate::features::FeatureSet;
use crate::lexicon::CompiledLexicon;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use ai_ism::AiIsmDetection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Burstiness,
    LexicalDiversity,
    SyntacticComplexity,
    AiIsmLikelihood,
    FunctionWordRatio,
    DiscourseMarkerDensity,
    InformationDensity,
    EpistemicHedging,
}

/// Which direction of a metric reads as "more human".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Higher = more human-like.
    Human,
    /// Higher = more AI-like.
    Ai,
}

impl MetricKind {
    pub const ALL: [MetricKind; 8] = [
        MetricKind::Burstiness,
        MetricKind::LexicalDiversity,
        MetricKind::SyntacticComplexity,
        MetricKind::AiIsmLikelihood,
        MetricKind::FunctionWordRatio,
        MetricKind::DiscourseMarkerDensity,
        MetricKind::InformationDensity,
        MetricKind::EpistemicHedging,
    ];

    /// Stable snake_case key (matches the serialized form).
    pub fn key(self) -> &'static str {
        match self {
            MetricKind::Burstiness => "burstiness",
            MetricKind::LexicalDiversity => "lexical_diversity",
            MetricKind::SyntacticComplexity => "syntactic_complexity",
            MetricKind::AiIsmLikelihood => "ai_ism_likelihood",
            MetricKind::FunctionWordRatio => "function_word_ratio",
            MetricKind::DiscourseMarkerDensity => "discourse_marker_density",
            MetricKind::InformationDensity => "information_density",
            MetricKind::EpistemicHedging => "epistemic_hedging",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Burstiness => "Burstiness",
            MetricKind::LexicalDiversity => "Lexical Diversity",
            MetricKind::SyntacticComplexity => "Syntactic Complexity",
            MetricKind::AiIsmLikelihood => "AI-ism Likelihood",
            MetricKind::FunctionWordRatio => "Function Word Ratio",
            MetricKind::DiscourseMarkerDensity => "Discourse Marker Density",
            MetricKind::InformationDensity => "Information Density",
            MetricKind::EpistemicHedging => "Epistemic Hedging",
        }
    }

    pub fn polarity(self) -> Polarity {
        match self {
            MetricKind::Burstiness
            | MetricKind::LexicalDiversity
            | MetricKind::SyntacticComplexity => Polarity::Human,
            _ => Polarity::Ai,
        }
    }

    /// Upper bound of the normalized score.
    pub fn max_score(self) -> f64 {
        match self {
            MetricKind::AiIsmLikelihood => 100.0,
            _ => 1.0,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Normalized scores: seven in [0,1], AI-ism likelihood in [0,100].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricScores {
    pub burstiness: f64,
    pub lexical_diversity: f64,
    pub syntactic_complexity: f64,
    pub ai_ism_likelihood: f64,
    pub function_word_ratio: f64,
    pub discourse_marker_density: f64,
    pub information_density: f64,
    pub epistemic_hedging: f64,
}

/// Pre-normalization value of each metric (CV, MTLD, per-1000 rates, ...).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawMetrics {
    pub burstiness: f64,
    pub lexical_diversity: f64,
    pub syntactic_complexity: f64,
    pub ai_ism_likelihood: f64,
    pub function_word_ratio: f64,
    pub discourse_marker_density: f64,
    pub information_density: f64,
    pub epistemic_hedging: f64,
}

macro_rules! metric_accessors {
    ($ty:ty) => {
        impl $ty {
            pub fn get(&self, kind: MetricKind) -> f64 {
                match kind {
                    MetricKind::Burstiness => self.burstiness,
                    MetricKind::LexicalDiversity => self.lexical_diversity,
                    MetricKind::SyntacticComplexity => self.syntactic_complexity,
                    MetricKind::AiIsmLikelihood => self.ai_ism_likelihood,
                    MetricKind::FunctionWordRatio => self.function_word_ratio,
                    MetricKind::DiscourseMarkerDensity => self.discourse_marker_density,
                    MetricKind::InformationDensity => self.information_density,
                    MetricKind::EpistemicHedging => self.epistemic_hedging,
                }
            }

            pub fn set(&mut self, kind: MetricKind, value: f64) {
                let slot = match kind {
                    MetricKind::Burstiness => &mut self.burstiness,
                    MetricKind::LexicalDiversity => &mut self.lexical_diversity,
                    MetricKind::SyntacticComplexity => &mut self.syntactic_complexity,
                    MetricKind::AiIsmLikelihood => &mut self.ai_ism_likelihood,
                    MetricKind::FunctionWordRatio => &mut self.function_word_ratio,
                    MetricKind::DiscourseMarkerDensity => &mut self.discourse_marker_density,
                    MetricKind::InformationDensity => &mut self.information_density,
                    MetricKind::EpistemicHedging => &mut self.epistemic_hedging,
                };
                *slot = value;
            }

            pub fn iter(&self) -> impl Iterator<Item = (MetricKind, f64)> + '_ {
                MetricKind::ALL.into_iter().map(move |k| (k, self.get(k)))
            }
        }
    };
}

metric_accessors!(MetricScores);
metric_accessors!(RawMetrics);

impl MetricScores {
    /// Every score inside its documented range.
    pub fn in_range(&self) -> bool {
        self.iter()
            .all(|(k, v)| v.is_finite() && (0.0..=k.max_score()).contains(&v))
    }
}

/// Raw value and normalized score of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measure {
    pub raw: f64,
    pub score: f64,
}

impl Measure {
    pub const ZERO: Measure = Measure {
        raw: 0.0,
        score: 0.0,
    };

    pub fn new(raw: f64, score: f64) -> Self {
        Self { raw, score }
    }
}

/// Tunable constants for the calculators. Defaults reproduce the reference formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Burstiness CV at which the score saturates.
    pub burstiness_scale: f64,
    /// MTLD type-token ratio threshold.
    pub mtld_threshold: f64,
    pub mtld_scale: f64,
    /// Mean sentence length (words) at which the length component saturates.
    pub sentence_length_scale: f64,
    pub function_word_baseline: f64,
    pub function_word_span: f64,
    /// Discourse markers per 1000 words at which the score saturates.
    pub discourse_scale: f64,
    /// Entities per 1000 words at which the entity component saturates.
    pub entity_scale: f64,
    pub information_scale: f64,
    /// Net hedges per 1000 words at which the score bottoms out.
    pub hedging_scale: f64,
    /// Each confidence marker cancels this many hedges.
    pub confidence_weight: f64,
    pub passive_ratio_threshold: f64,
    pub passive_bonus: f64,
    /// A bigram repeated more than this many times counts as a pattern hit.
    pub repeated_bigram_limit: usize,
    /// Sum of category scores mapped to 100.
    pub ai_ism_total: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            burstiness_scale: 1.5,
            mtld_threshold: 0.72,
            mtld_scale: 150.0,
            sentence_length_scale: 30.0,
            function_word_baseline: 0.45,
            function_word_span: 0.20,
            discourse_scale: 30.0,
            entity_scale: 50.0,
            information_scale: 0.70,
            hedging_scale: 150.0,
            confidence_weight: 2.0,
            passive_ratio_threshold: 0.25,
            passive_bonus: 20.0,
            repeated_bigram_limit: 3,
            ai_ism_total: 120.0,
        }
    }
}

impl Calibration {
    /// Replace out-of-range values with defaults. Returns the names of the fields that were reset.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let d = Calibration::default();
        let mut reset = Vec::new();

        let mut positive = |name: &'static str, v: &mut f64, default: f64| {
            if !v.is_finite() || *v <= 0.0 {
                *v = default;
                reset.push(name);
            }
        };
        positive("burstiness_scale", &mut self.burstiness_scale, d.burstiness_scale);
        positive("mtld_scale", &mut self.mtld_scale, d.mtld_scale);
        positive(
            "sentence_length_scale",
            &mut self.sentence_length_scale,
            d.sentence_length_scale,
        );
        positive("function_word_span", &mut self.function_word_span, d.function_word_span);
        positive("discourse_scale", &mut self.discourse_scale, d.discourse_scale);
        positive("entity_scale", &mut self.entity_scale, d.entity_scale);
        positive("information_scale", &mut self.information_scale, d.information_scale);
        positive("hedging_scale", &mut self.hedging_scale, d.hedging_scale);
        positive("ai_ism_total", &mut self.ai_ism_total, d.ai_ism_total);

        if !(self.mtld_threshold > 0.0 && self.mtld_threshold < 1.0) {
            self.mtld_threshold = d.mtld_threshold;
            reset.push("mtld_threshold");
        }
        if !(0.0..1.0).contains(&self.function_word_baseline) {
            self.function_word_baseline = d.function_word_baseline;
            reset.push("function_word_baseline");
        }
        for (name, v, default) in [
            ("confidence_weight", &mut self.confidence_weight, d.confidence_weight),
            ("passive_bonus", &mut self.passive_bonus, d.passive_bonus),
            (
                "passive_ratio_threshold",
                &mut self.passive_ratio_threshold,
                d.passive_ratio_threshold,
            ),
        ] {
            if !v.is_finite() || *v < 0.0 {
                *v = default;
                reset.push(name);
            }
        }
        reset
    }
}

/// Clamp to [0,1]; NaN maps to 0.
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// `count` per 1000 words; 0 when there are no words.
pub fn per_thousand(count: f64, words: usize) -> f64 {
    if words == 0 {
        return 0.0;
    }
    count / words as f64 * 1000.0
}

/// Everything the calculators produce for one document.
#[derive(Debug, Clone)]
pub struct MetricReport {
    pub scores: MetricScores,
    pub raw: RawMetrics,
    pub ai_isms: Vec<AiIsmDetection>,
}

/// Run all eight calculators over one feature set.
pub fn score_all(
    features: &FeatureSet,
    lexicon: &CompiledLexicon,
    cal: &Calibration,
) -> MetricReport {
    let (ai, ai_isms) = ai_ism::calculate(features, lexicon, cal);
    let measures = [
        (MetricKind::Burstiness, burstiness::calculate(features, cal)),
        (
            MetricKind::LexicalDiversity,
            lexical_diversity::calculate(features, cal),
        ),
        (MetricKind::SyntacticComplexity, syntactic::calculate(features, cal)),
        (MetricKind::AiIsmLikelihood, ai),
        (
            MetricKind::FunctionWordRatio,
            function_words::calculate(features, cal),
        ),
        (
            MetricKind::DiscourseMarkerDensity,
            discourse::calculate(features, lexicon, cal),
        ),
        (MetricKind::InformationDensity, information::calculate(features, cal)),
        (MetricKind::EpistemicHedging, hedging::calculate(features, lexicon, cal)),
    ];

    let mut scores = MetricScores::default();
    let mut raw = RawMetrics::default();
    for (kind, m) in measures {
        scores.set(kind, m.score);
        raw.set(kind, m.raw);
    }

    MetricReport {
        scores,
        raw,
        ai_isms,
    }
}
