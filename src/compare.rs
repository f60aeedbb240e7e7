// src/compare.rs
//! Original-vs-edited comparison: per-metric deltas and drift direction.

use crate::metrics::{MetricKind, MetricScores, Polarity};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    TowardAi,
    TowardHuman,
    Unchanged,
}

impl Direction {
    /// Direction of a change given the metric's polarity.
    pub fn of(kind: MetricKind, delta: f64) -> Self {
        if delta == 0.0 || delta.is_nan() {
            return Direction::Unchanged;
        }
        match (kind.polarity(), delta > 0.0) {
            (Polarity::Human, true) | (Polarity::Ai, false) => Direction::TowardHuman,
            (Polarity::Human, false) | (Polarity::Ai, true) => Direction::TowardAi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDelta {
    pub original: f64,
    pub edited: f64,
    /// `edited - original`
    pub delta: f64,
    /// `delta / |original|`, 0 when the original is 0.
    pub pct_change: f64,
    pub direction: Direction,
}

impl MetricDelta {
    pub fn between(kind: MetricKind, original: f64, edited: f64) -> Self {
        let delta = edited - original;
        let pct_change = if original == 0.0 {
            0.0
        } else {
            delta / original.abs()
        };
        Self {
            original,
            edited,
            delta,
            pct_change,
            direction: Direction::of(kind, delta),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDeltas {
    pub burstiness: MetricDelta,
    pub lexical_diversity: MetricDelta,
    pub syntactic_complexity: MetricDelta,
    pub ai_ism_likelihood: MetricDelta,
    pub function_word_ratio: MetricDelta,
    pub discourse_marker_density: MetricDelta,
    pub information_density: MetricDelta,
    pub epistemic_hedging: MetricDelta,
}

impl MetricDeltas {
    pub fn get(&self, kind: MetricKind) -> &MetricDelta {
        match kind {
            MetricKind::Burstiness => &self.burstiness,
            MetricKind::LexicalDiversity => &self.lexical_diversity,
            MetricKind::SyntacticComplexity => &self.syntactic_complexity,
            MetricKind::AiIsmLikelihood => &self.ai_ism_likelihood,
            MetricKind::FunctionWordRatio => &self.function_word_ratio,
            MetricKind::DiscourseMarkerDensity => &self.discourse_marker_density,
            MetricKind::InformationDensity => &self.information_density,
            MetricKind::EpistemicHedging => &self.epistemic_hedging,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKind, &MetricDelta)> + '_ {
        MetricKind::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// Metrics whose change moved toward the AI end.
    pub fn toward_ai(&self) -> Vec<MetricKind> {
        self.iter()
            .filter(|(_, d)| d.direction == Direction::TowardAi)
            .map(|(k, _)| k)
            .collect()
    }
}

/// Compare two score sets. Pure.
pub fn compare(original: &MetricScores, edited: &MetricScores) -> MetricDeltas {
    let d = |k: MetricKind| MetricDelta::between(k, original.get(k), edited.get(k));
    MetricDeltas {
        burstiness: d(MetricKind::Burstiness),
        lexical_diversity: d(MetricKind::LexicalDiversity),
        syntactic_complexity: d(MetricKind::SyntacticComplexity),
        ai_ism_likelihood: d(MetricKind::AiIsmLikelihood),
        function_word_ratio: d(MetricKind::FunctionWordRatio),
        discourse_marker_density: d(MetricKind::DiscourseMarkerDensity),
        information_density: d(MetricKind::InformationDensity),
        epistemic_hedging: d(MetricKind::EpistemicHedging),
    }
}

/// Scores of both versions plus their deltas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub original: MetricScores,
    pub edited: MetricScores,
    pub deltas: MetricDeltas,
}

impl AnalysisResult {
    pub fn new(original: MetricScores, edited: MetricScores) -> Self {
        let deltas = compare(&original, &edited);
        Self {
            original,
            edited,
            deltas,
        }
    }
}
