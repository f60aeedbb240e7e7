//! # Analysis Engine
//! `Analyzer` wires segmentation, feature extraction and the eight metric
//! calculators together. Pure and synchronous; safe to share across threads.
//!
//! Log lines identify documents by a short SHA-256 prefix, never by content.

use crate::benchmarks::{closest_benchmark, BenchmarkDistance};
use crate::compare::AnalysisResult;
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::features::{FeatureExtractor, FeatureSet};
use crate::interpret::{interpret, narrate, Interpretation};
use crate::lexicon::CompiledLexicon;
use crate::metrics::{score_all, AiIsmDetection, Calibration, MetricKind, MetricScores, RawMetrics};
use crate::pos::{PosTagger, RuleTagger};
use crate::segment::{segment, Document};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Short, stable, non-reversible document id for logs and responses.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMetadata {
    pub document_id: String,
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub token_count: usize,
    pub avg_sentence_length: f64,
}

impl TextMetadata {
    fn new(doc: &Document, features: &FeatureSet) -> Self {
        Self {
            document_id: anon_hash(doc.raw()),
            char_count: features.char_count,
            word_count: features.word_count,
            sentence_count: features.sentence_count,
            token_count: features.total_tokens,
            avg_sentence_length: features.mean_sentence_length(),
        }
    }
}

/// Everything computed for a single document.
#[derive(Debug, Clone, Serialize)]
pub struct TextAnalysis {
    pub scores: MetricScores,
    pub raw: RawMetrics,
    pub metadata: TextMetadata,
    pub ai_isms: Vec<AiIsmDetection>,
}

impl TextAnalysis {
    pub fn interpretations(&self) -> BTreeMap<MetricKind, Interpretation> {
        self.scores.iter().map(|(k, v)| (k, interpret(k, v))).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InterpretationPair {
    pub original: Interpretation,
    pub edited: Interpretation,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkComparison {
    pub original: Vec<BenchmarkDistance>,
    pub edited: Vec<BenchmarkDistance>,
}

/// Full original-vs-edited output.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub result: AnalysisResult,
    pub original: TextAnalysis,
    pub edited: TextAnalysis,
    pub interpretations: BTreeMap<MetricKind, InterpretationPair>,
    pub narratives: BTreeMap<MetricKind, String>,
    pub benchmarks: BenchmarkComparison,
}

/// Configured pipeline. Build once, share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Analyzer {
    extractor: FeatureExtractor,
    lexicon: Arc<CompiledLexicon>,
    calibration: Calibration,
}

impl Analyzer {
    /// Load the lexicon named by `cfg` (or the built-in one) and compile it.
    pub fn new(cfg: AnalyzerConfig) -> anyhow::Result<Self> {
        Self::with_tagger(cfg, Arc::new(RuleTagger))
    }

    pub fn with_tagger(mut cfg: AnalyzerConfig, tagger: Arc<dyn PosTagger>) -> anyhow::Result<Self> {
        cfg.sanitize();
        let lexicon = Arc::new(CompiledLexicon::compile(&cfg.lexicon()?)?);
        debug!(
            target: "engine",
            tagger = tagger.name(),
            min_sentences = cfg.min_sentences,
            categories = lexicon.ai_isms.len(),
            "analyzer ready"
        );
        Ok(Self {
            extractor: FeatureExtractor::new(tagger, lexicon.clone(), cfg.min_sentences),
            lexicon,
            calibration: cfg.calibration,
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(AnalyzerConfig::from_env()?)
    }

    pub fn min_sentences(&self) -> usize {
        self.extractor.min_sentences()
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn analyze(&self, text: &str) -> Result<TextAnalysis, AnalysisError> {
        let doc = segment(text)?;
        let features = self.extractor.extract(&doc)?;
        let report = score_all(&features, &self.lexicon, &self.calibration);
        let metadata = TextMetadata::new(&doc, &features);

        debug!(
            target: "engine",
            id = %metadata.document_id,
            sentences = metadata.sentence_count,
            words = metadata.word_count,
            ai_ism = report.scores.ai_ism_likelihood,
            detections = report.ai_isms.len(),
            "text analyzed"
        );

        Ok(TextAnalysis {
            scores: report.scores,
            raw: report.raw,
            metadata,
            ai_isms: report.ai_isms,
        })
    }

    pub fn scores(&self, text: &str) -> Result<MetricScores, AnalysisError> {
        self.analyze(text).map(|a| a.scores)
    }

    /// Analyze both versions in parallel. The original's error wins if both fail.
    fn analyze_pair(
        &self,
        original: &str,
        edited: &str,
    ) -> Result<(TextAnalysis, TextAnalysis), AnalysisError> {
        let (a, b) = rayon::join(|| self.analyze(original), || self.analyze(edited));
        Ok((a?, b?))
    }

    pub fn compare_texts(&self, original: &str, edited: &str) -> Result<AnalysisResult, AnalysisError> {
        let (a, b) = self.analyze_pair(original, edited)?;
        Ok(AnalysisResult::new(a.scores, b.scores))
    }

    pub fn report(&self, original: &str, edited: &str) -> Result<ComparisonReport, AnalysisError> {
        let (a, b) = self.analyze_pair(original, edited)?;
        let result = AnalysisResult::new(a.scores, b.scores);

        let interpretations = MetricKind::ALL
            .into_iter()
            .map(|k| {
                let pair = InterpretationPair {
                    original: interpret(k, a.scores.get(k)),
                    edited: interpret(k, b.scores.get(k)),
                };
                (k, pair)
            })
            .collect();

        let toward_ai = result.deltas.toward_ai();
        debug!(
            target: "engine",
            original = %a.metadata.document_id,
            edited = %b.metadata.document_id,
            toward_ai = ?toward_ai,
            "comparison built"
        );

        Ok(ComparisonReport {
            narratives: narrate(&result.deltas),
            benchmarks: BenchmarkComparison {
                original: closest_benchmark(&a.scores),
                edited: closest_benchmark(&b.scores),
            },
            interpretations,
            result,
            original: a,
            edited: b,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HUMAN: &str = "I wrote this late. The lab was cold, and the centrifuge kept \
        rattling against the bench while Marta argued with the printer about toner. \
        Nothing worked. We left.";

    fn analyzer() -> Analyzer {
        Analyzer::new(AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("hello");
        assert_eq!(a.len(), 12);
        assert_eq!(a, anon_hash("hello"));
        assert_ne!(a, anon_hash("hello!"));
    }

    #[test]
    fn analyze_fills_metadata() {
        let a = analyzer().analyze(HUMAN).unwrap();
        assert_eq!(a.metadata.sentence_count, 4);
        assert_eq!(a.metadata.document_id, anon_hash(HUMAN));
        assert!(a.metadata.token_count > a.metadata.word_count);
        assert!(a.scores.in_range());
        assert_eq!(a.interpretations().len(), 8);
    }

    #[test]
    fn errors_surface_before_scoring() {
        let an = analyzer();
        assert_eq!(an.scores("   ").unwrap_err(), AnalysisError::EmptyInput);
        assert!(matches!(
            an.scores("One sentence only."),
            Err(AnalysisError::InsufficientData { sentences: 1, required: 2 })
        ));
        assert!(an.compare_texts(HUMAN, "").is_err());
    }

    #[test]
    fn report_is_self_consistent() {
        let edited = "It is important to note that the laboratory environment was cold. \
            Furthermore, the equipment can be seen as unreliable. In conclusion, the \
            experiment was not successful.";
        let r = analyzer().report(HUMAN, edited).unwrap();
        assert_eq!(r.result.original, r.original.scores);
        assert_eq!(r.result.edited, r.edited.scores);
        assert_eq!(r.narratives.len(), 8);
        assert_eq!(r.interpretations.len(), 8);
        assert_eq!(r.benchmarks.original.len(), 3);
        assert!(r.result.deltas.ai_ism_likelihood.delta > 0.0);
    }
}
