// src/features.rs
//! Feature extraction: one pass over a segmented `Document` producing the
//! `FeatureSet` every metric calculator reads from.

use crate::error::AnalysisError;
use crate::lexicon::CompiledLexicon;
use crate::pos::{tag_sentence, PosTag, PosTagger};
use crate::segment::{Document, Sentence, Token};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_MIN_SENTENCES: usize = 2;

/// Per-sentence attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentenceFeatures {
    pub word_count: usize,
    pub subordinate_clauses: usize,
    pub modifiers: usize,
    pub passive: bool,
}

/// Aggregated per-document counts. Built once, read by all calculators.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeatureSet {
    /// All tokens, punctuation included.
    pub total_tokens: usize,
    /// Non-punctuation tokens.
    pub word_count: usize,
    pub sentence_count: usize,
    pub char_count: usize,
    pub sentence_lengths: Vec<usize>,
    pub sentences: Vec<SentenceFeatures>,
    pub pos_counts: BTreeMap<PosTag, usize>,
    /// Capitalized, non-sentence-initial word tokens.
    pub entity_count: usize,
    /// Lowercased word tokens in order.
    pub words: Vec<String>,
    pub unique_lemmas: usize,
    pub content_count: usize,
    pub unique_content_lemmas: usize,
    pub subordination_count: usize,
    pub modifier_count: usize,
    pub passive_sentences: usize,
    /// Source text as submitted.
    #[serde(skip)]
    pub raw_text: String,
    /// Whole text lowercased (curly apostrophes folded) for phrase matching.
    #[serde(skip)]
    pub lower_text: String,
    /// `(lower_text byte, raw_text byte)` at every source character, plus both ends.
    #[serde(skip)]
    pub lower_offsets: Vec<(usize, usize)>,
}

impl FeatureSet {
    /// Empty counts over `raw`, with the folded text and offset map filled in.
    pub fn with_text(raw: &str) -> Self {
        let (lower_text, lower_offsets) = fold_lower(raw);
        Self {
            raw_text: raw.to_string(),
            lower_text,
            lower_offsets,
            ..Self::default()
        }
    }

    /// Byte offset in `raw_text` of the source character behind `lower_text[at..]`.
    pub fn raw_offset(&self, at: usize) -> usize {
        match self.lower_offsets.binary_search_by_key(&at, |&(lower, _)| lower) {
            Ok(i) => self.lower_offsets[i].1,
            Err(0) => 0,
            Err(i) => self.lower_offsets[i - 1].1,
        }
    }

    pub fn pos_count(&self, tag: PosTag) -> usize {
        self.pos_counts.get(&tag).copied().unwrap_or(0)
    }

    pub fn function_word_count(&self) -> usize {
        self.pos_counts
            .iter()
            .filter(|(t, _)| t.is_function())
            .map(|(_, n)| n)
            .sum()
    }

    pub fn mean_sentence_length(&self) -> f64 {
        if self.sentence_count == 0 {
            return 0.0;
        }
        self.word_count as f64 / self.sentence_count as f64
    }
}

/// Configured extractor: tagging strategy, lexicon, minimum sentence count.
#[derive(Clone)]
pub struct FeatureExtractor {
    tagger: Arc<dyn PosTagger>,
    lexicon: Arc<CompiledLexicon>,
    min_sentences: usize,
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureExtractor")
            .field("tagger", &self.tagger.name())
            .field("min_sentences", &self.min_sentences)
            .finish()
    }
}

impl FeatureExtractor {
    pub fn new(
        tagger: Arc<dyn PosTagger>,
        lexicon: Arc<CompiledLexicon>,
        min_sentences: usize,
    ) -> Self {
        Self {
            tagger,
            lexicon,
            min_sentences: min_sentences.max(1),
        }
    }

    pub fn min_sentences(&self) -> usize {
        self.min_sentences
    }

    pub fn extract(&self, doc: &Document) -> Result<FeatureSet, AnalysisError> {
        let sentence_count = doc.sentence_count();
        if sentence_count < self.min_sentences {
            return Err(AnalysisError::InsufficientData {
                sentences: sentence_count,
                required: self.min_sentences,
            });
        }

        let mut pos_counts: BTreeMap<PosTag, usize> = BTreeMap::new();
        let mut sentences = Vec::with_capacity(sentence_count);
        let mut words = Vec::with_capacity(doc.word_count());
        let mut lemmas: HashSet<String> = HashSet::new();
        let mut content_lemmas: HashSet<String> = HashSet::new();
        let mut content_count = 0usize;
        let mut entity_count = 0usize;

        for sentence in doc.sentences() {
            let tags = tag_sentence(self.tagger.as_ref(), sentence);
            let mut modifiers = 0usize;
            let mut seen_word = false;

            for (tok, &tag) in sentence.tokens.iter().zip(&tags) {
                *pos_counts.entry(tag).or_insert(0) += 1;
                if tok.is_punct {
                    continue;
                }
                if seen_word && is_entity_like(tok) {
                    entity_count += 1;
                }
                seen_word = true;

                let lemma = lemma_of(&tok.lower);
                if tag.is_content() {
                    content_count += 1;
                    content_lemmas.insert(lemma.clone());
                }
                if tag.is_modifier() {
                    modifiers += 1;
                }
                lemmas.insert(lemma);
                words.push(tok.lower.clone());
            }

            let sentence_lower = sentence.text.to_lowercase().replace('\u{2019}', "'");
            sentences.push(SentenceFeatures {
                word_count: sentence.word_count(),
                subordinate_clauses: self.lexicon.subordinators.count_disjoint(&sentence_lower),
                modifiers,
                passive: has_passive(sentence, &tags),
            });
        }

        let features = FeatureSet {
            total_tokens: doc.token_count(),
            word_count: words.len(),
            sentence_count,
            char_count: doc.raw().chars().count(),
            sentence_lengths: sentences.iter().map(|s| s.word_count).collect(),
            subordination_count: sentences.iter().map(|s| s.subordinate_clauses).sum(),
            modifier_count: sentences.iter().map(|s| s.modifiers).sum(),
            passive_sentences: sentences.iter().filter(|s| s.passive).count(),
            sentences,
            pos_counts,
            entity_count,
            unique_lemmas: lemmas.len(),
            content_count,
            unique_content_lemmas: content_lemmas.len(),
            words,
            ..FeatureSet::with_text(doc.raw())
        };

        debug!(
            target: "features",
            tagger = self.tagger.name(),
            sentences = features.sentence_count,
            words = features.word_count,
            entities = features.entity_count,
            subordination = features.subordination_count,
            modifiers = features.modifier_count,
            "features extracted"
        );

        Ok(features)
    }
}

/// Lowercase `raw` char by char (curly apostrophes folded), recording where each source char lands.
pub fn fold_lower(raw: &str) -> (String, Vec<(usize, usize)>) {
    let mut lower = String::with_capacity(raw.len());
    let mut offsets = Vec::with_capacity(raw.len() + 1);
    for (at, c) in raw.char_indices() {
        offsets.push((lower.len(), at));
        if c == '\u{2019}' {
            lower.push('\'');
        } else {
            lower.extend(c.to_lowercase());
        }
    }
    offsets.push((lower.len(), raw.len()));
    (lower, offsets)
}

fn is_entity_like(tok: &Token) -> bool {
    tok.is_capitalized() && tok.lower != "i" && !tok.lower.starts_with("i'")
}

/// Lemma-like normal form: possessive and regular plural endings stripped.
pub fn lemma_of(lower: &str) -> String {
    let w = lower.strip_suffix("'s").unwrap_or(lower);
    let len = w.chars().count();
    if len > 4 {
        if let Some(stem) = w.strip_suffix("ies") {
            return format!("{stem}y");
        }
    }
    if len > 3 && w.ends_with('s') && !["ss", "us", "is"].iter().any(|s| w.ends_with(s)) {
        return w[..w.len() - 1].to_string();
    }
    w.to_string()
}

fn is_be_form(w: &str) -> bool {
    matches!(
        w,
        "am" | "is" | "are" | "was" | "were" | "be" | "been" | "being" | "isn't" | "aren't"
            | "wasn't" | "weren't"
    )
}

fn looks_participle(w: &str) -> bool {
    (w.len() > 4 && (w.ends_with("ed") || w.ends_with("en")))
        || matches!(
            w,
            "known" | "seen" | "given" | "taken" | "made" | "done" | "written" | "shown"
                | "found" | "held" | "built" | "thought" | "said" | "told" | "brought"
                | "kept" | "left" | "set" | "put" | "paid" | "sent" | "led" | "met"
        )
}

/// A form of "be" followed (optionally after one adverb) by a participle-looking verb.
fn has_passive(sentence: &Sentence, tags: &[PosTag]) -> bool {
    let words: Vec<(&Token, PosTag)> = sentence
        .tokens
        .iter()
        .zip(tags.iter().copied())
        .filter(|(t, _)| !t.is_punct)
        .collect();

    words.iter().enumerate().any(|(i, (tok, _))| {
        if !is_be_form(&tok.lower) {
            return false;
        }
        let mut j = i + 1;
        if words.get(j).is_some_and(|(_, tag)| *tag == PosTag::Adv) {
            j += 1;
        }
        words
            .get(j)
            .is_some_and(|(t, tag)| matches!(tag, PosTag::Verb | PosTag::Adj) && looks_participle(&t.lower))
    })
}
