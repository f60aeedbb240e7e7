// src/interpret.rs
//! Human-readable reading of scores and deltas.

use crate::compare::{Direction, MetricDeltas};
use crate::metrics::MetricKind;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    /// Band a 0..=1 value: below 0.33 low, below 0.67 medium, otherwise high.
    pub fn of(unit: f64) -> Self {
        if unit < 0.33 {
            Level::Low
        } else if unit < 0.67 {
            Level::Medium
        } else {
            Level::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub level: Level,
    pub text: &'static str,
}

pub fn interpret(kind: MetricKind, score: f64) -> Interpretation {
    let level = Level::of(score / kind.max_score());
    let [low, medium, high] = level_texts(kind);
    let text = match level {
        Level::Low => low,
        Level::Medium => medium,
        Level::High => high,
    };
    Interpretation { level, text }
}

fn level_texts(kind: MetricKind) -> [&'static str; 3] {
    match kind {
        MetricKind::Burstiness => [
            "Machine-like uniformity",
            "Moderate variation",
            "Human-like natural variation",
        ],
        MetricKind::LexicalDiversity => [
            "Formulaic, repetitive vocabulary",
            "Moderate vocabulary richness",
            "Rich, varied vocabulary",
        ],
        MetricKind::SyntacticComplexity => [
            "Simple, repetitive structures",
            "Moderate complexity",
            "Complex, varied structures",
        ],
        MetricKind::AiIsmLikelihood => [
            "Natural human-like patterns",
            "Mixed characteristics",
            "Formulaic AI-like patterns",
        ],
        MetricKind::FunctionWordRatio => [
            "Content-heavy wording",
            "Balanced scaffolding",
            "Over-scaffolded syntax",
        ],
        MetricKind::DiscourseMarkerDensity => [
            "Implicit flow",
            "Balanced signposting",
            "Over-signposted structure",
        ],
        MetricKind::InformationDensity => [
            "Dense, concrete content",
            "Moderate specificity",
            "Verbose, generic wording",
        ],
        MetricKind::EpistemicHedging => [
            "Nuanced, hedged tone",
            "Moderately hedged",
            "Overconfident tone",
        ],
    }
}

struct NarrativeSpec {
    subject: &'static str,
    /// Minimum |delta| (score units) worth describing.
    threshold: f64,
    toward_ai: &'static str,
    toward_human: &'static str,
    steady: &'static str,
}

fn narrative_spec(kind: MetricKind) -> NarrativeSpec {
    match kind {
        MetricKind::Burstiness => NarrativeSpec {
            subject: "Sentence length variation",
            threshold: 0.1,
            toward_ai: "Editing standardized sentence lengths toward a uniform rhythm.",
            toward_human: "Sentence structures became more varied and natural.",
            steady: "Minimal change in sentence length variation.",
        },
        MetricKind::LexicalDiversity => NarrativeSpec {
            subject: "Vocabulary diversity",
            threshold: 0.1,
            toward_ai: "Varied word choice was replaced with more common phrasing.",
            toward_human: "The edit kept or expanded the original vocabulary.",
            steady: "Minimal change in vocabulary diversity.",
        },
        MetricKind::SyntacticComplexity => NarrativeSpec {
            subject: "Syntactic complexity",
            threshold: 0.1,
            toward_ai: "Sentence structures were simplified, possibly removing original complexity.",
            toward_human: "The edited version uses more sophisticated structures.",
            steady: "Minimal change in syntactic complexity.",
        },
        MetricKind::AiIsmLikelihood => NarrativeSpec {
            subject: "AI-ism markers",
            threshold: 5.0,
            toward_ai: "The edited version contains more AI-characteristic phrases and patterns.",
            toward_human: "The edits removed formulaic phrasing in favour of plainer language.",
            steady: "AI-ism markers remained largely unchanged.",
        },
        MetricKind::FunctionWordRatio => NarrativeSpec {
            subject: "Function word use",
            threshold: 0.1,
            toward_ai: "Grammatical scaffolding grew around the same content.",
            toward_human: "Wording became more content-heavy.",
            steady: "Minimal change in function word use.",
        },
        MetricKind::DiscourseMarkerDensity => NarrativeSpec {
            subject: "Discourse marker density",
            threshold: 0.1,
            toward_ai: "Transitions became more explicitly signposted.",
            toward_human: "Flow relies less on explicit connectors.",
            steady: "Minimal change in discourse marker use.",
        },
        MetricKind::InformationDensity => NarrativeSpec {
            subject: "Generic wording",
            threshold: 0.1,
            toward_ai: "Concrete details were diluted by generic expansion.",
            toward_human: "The text became more concrete and specific.",
            steady: "Minimal change in information density.",
        },
        MetricKind::EpistemicHedging => NarrativeSpec {
            subject: "Unhedged certainty",
            threshold: 0.1,
            toward_ai: "Qualifications were stripped, so claims read as more certain.",
            toward_human: "The edit introduced more nuance and hedging.",
            steady: "Minimal change in hedging.",
        },
    }
}

/// One sentence per metric describing how it moved.
pub fn narrate(deltas: &MetricDeltas) -> BTreeMap<MetricKind, String> {
    deltas
        .iter()
        .map(|(kind, d)| {
            let spec = narrative_spec(kind);
            let text = if d.delta.abs() < spec.threshold || d.direction == Direction::Unchanged {
                spec.steady.to_string()
            } else {
                let verb = if d.delta > 0.0 { "increased" } else { "decreased" };
                let amount = if d.original == 0.0 {
                    "from a zero baseline".to_string()
                } else {
                    format!("by {:.0}%", (d.pct_change * 100.0).abs())
                };
                let why = match d.direction {
                    Direction::TowardAi => spec.toward_ai,
                    _ => spec.toward_human,
                };
                format!("{} {verb} {amount}. {why}", spec.subject)
            };
            (kind, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;
    use crate::metrics::MetricScores;

    #[test]
    fn level_bands() {
        assert_eq!(Level::of(0.0), Level::Low);
        assert_eq!(Level::of(0.329), Level::Low);
        assert_eq!(Level::of(0.33), Level::Medium);
        assert_eq!(Level::of(0.67), Level::High);
    }

    #[test]
    fn ai_ism_is_scaled_before_banding() {
        assert_eq!(interpret(MetricKind::AiIsmLikelihood, 50.0).level, Level::Medium);
        let high = interpret(MetricKind::AiIsmLikelihood, 90.0);
        assert_eq!(high.text, "Formulaic AI-like patterns");
    }

    #[test]
    fn narratives_cover_every_metric() {
        let original = MetricScores {
            burstiness: 0.5,
            ai_ism_likelihood: 10.0,
            ..MetricScores::default()
        };
        let edited = MetricScores {
            burstiness: 0.2,
            ai_ism_likelihood: 40.0,
            discourse_marker_density: 0.3,
            ..MetricScores::default()
        };
        let n = narrate(&compare(&original, &edited));
        assert_eq!(n.len(), 8);
        assert!(n[&MetricKind::Burstiness].starts_with("Sentence length variation decreased by 60%."));
        assert!(n[&MetricKind::AiIsmLikelihood].contains("increased by 300%"));
        assert!(n[&MetricKind::DiscourseMarkerDensity].contains("from a zero baseline"));
        assert_eq!(
            n[&MetricKind::LexicalDiversity],
            "Minimal change in vocabulary diversity."
        );
    }
}
