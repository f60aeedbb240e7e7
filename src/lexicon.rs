// src/lexicon.rs
//! Phrase lexicons: AI-ism categories, discourse markers, hedging/confidence
//! markers and subordinating conjunctions.
//!
//! Lexicons are plain data (`Lexicon`), loadable from TOML or JSON, and are
//! compiled once into case-insensitive word-boundary matchers
//! (`CompiledLexicon`) that the calculators share read-only.
//!
//! File shape (any field may be omitted; omitted fields keep the built-in list):
//! ```toml
//! discourse_markers = ["however", "therefore"]
//! hedges = ["perhaps", "might"]
//! confidence = ["clearly"]
//! subordinators = ["because", "although"]
//!
//! [ai_isms]
//! opening = ["it is important to note that"]
//! closing = ["in conclusion"]
//!
//! [category_weights]
//! opening = 1.0
//! ```

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

pub const OPENING: &str = "opening";
pub const CLOSING: &str = "closing";
pub const CONNECTOR: &str = "connector";
/// Repetitive-pattern signals: passive phrases plus computed repetition hits.
pub const PATTERN: &str = "pattern";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// AI-ism category → phrases.
    pub ai_isms: BTreeMap<String, Vec<String>>,
    /// AI-ism category → weight applied to the category score (default 1.0).
    pub category_weights: BTreeMap<String, f64>,
    pub discourse_markers: Vec<String>,
    pub hedges: Vec<String>,
    pub confidence: Vec<String>,
    pub subordinators: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        let mut ai_isms = BTreeMap::new();
        ai_isms.insert(
            OPENING.to_string(),
            owned(&[
                "it is important to note that",
                "it should be noted that",
                "it is widely recognized that",
                "it is evident that",
                "it is clear that",
                "one could argue that",
                "one might suggest that",
                "furthermore, it is",
            ]),
        );
        ai_isms.insert(
            CLOSING.to_string(),
            owned(&[
                "in conclusion",
                "to summarize",
                "in summary",
                "to conclude",
                "ultimately",
                "in essence",
                "it is therefore clear",
                "in light of the above",
            ]),
        );
        ai_isms.insert(
            CONNECTOR.to_string(),
            owned(&[
                "delve into",
                "shed light on",
                "pave the way",
                "leverage",
                "in the context of",
                "moreover",
                "furthermore",
                "in the interest of",
                "in order to",
                "so as to",
                "with respect to",
                "as a matter of fact",
            ]),
        );
        ai_isms.insert(
            PATTERN.to_string(),
            owned(&[
                "can be seen",
                "is considered",
                "is known",
                "is thought",
                "is believed",
                "is said to",
                "is noted",
                "is suggested",
            ]),
        );

        Self {
            ai_isms,
            category_weights: BTreeMap::new(),
            discourse_markers: owned(&[
                "moreover",
                "therefore",
                "however",
                "furthermore",
                "consequently",
                "thus",
                "in conclusion",
                "on the other hand",
                "for instance",
                "for example",
                "in addition",
                "as a result",
                "in contrast",
                "in summary",
                "to conclude",
                "additionally",
                "meanwhile",
                "subsequently",
                "nevertheless",
                "nonetheless",
                "indeed",
                "in other words",
                "by contrast",
                "as such",
                "overall",
            ]),
            hedges: owned(&[
                "perhaps",
                "arguably",
                "possibly",
                "probably",
                "likely",
                "unlikely",
                "it seems",
                "it appears",
                "suggests",
                "may",
                "might",
                "could",
                "tends to",
                "in my view",
                "i think",
                "i believe",
                "one could argue",
                "it is possible",
                "it is plausible",
            ]),
            confidence: owned(&[
                "certainly",
                "definitely",
                "absolutely",
                "undoubtedly",
                "clearly",
                "obviously",
                "without doubt",
                "must be",
                "is clear that",
            ]),
            subordinators: owned(&[
                "although",
                "because",
                "since",
                "while",
                "if",
                "unless",
                "whereas",
                "though",
                "whether",
                "until",
                "when",
                "whenever",
                "where",
                "after",
                "before",
                "once",
                "even though",
                "so that",
                "which",
                "whom",
                "whose",
            ]),
        }
    }
}

impl Lexicon {
    /// Weight for an AI-ism category (1.0 unless overridden).
    pub fn weight(&self, category: &str) -> f64 {
        self.category_weights
            .get(category)
            .copied()
            .filter(|w| w.is_finite() && *w >= 0.0)
            .unwrap_or(1.0)
    }

    /// Trim, lowercase and dedup every list; drop empty entries.
    pub fn cleaned(mut self) -> Self {
        for phrases in self.ai_isms.values_mut() {
            *phrases = clean_list(std::mem::take(phrases));
        }
        self.discourse_markers = clean_list(self.discourse_markers);
        self.hedges = clean_list(self.hedges);
        self.confidence = clean_list(self.confidence);
        self.subordinators = clean_list(self.subordinators);
        self
    }
}

/// Load a lexicon from an explicit path. Format chosen by extension (`.toml` or `.json`).
pub fn load_lexicon_from(path: &Path) -> Result<Lexicon> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading lexicon from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_lexicon(&content, ext.as_str())
        .with_context(|| format!("parsing lexicon {}", path.display()))
}

pub fn parse_lexicon(s: &str, hint_ext: &str) -> Result<Lexicon> {
    let lex: Lexicon = match hint_ext {
        "toml" => toml::from_str(s)?,
        "json" => serde_json::from_str(s)?,
        _ => serde_json::from_str(s)
            .or_else(|_| toml::from_str(s))
            .map_err(|e| anyhow!("unsupported lexicon format: {e}"))?,
    };
    Ok(lex.cleaned())
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut set = BTreeSet::new();
    for it in items {
        let t = it.trim().to_lowercase();
        if !t.is_empty() {
            set.insert(t);
        }
    }
    set.into_iter().collect()
}

/* ----------------------------
Compiled matchers
---------------------------- */

/// One phrase plus its compiled word-boundary pattern.
#[derive(Debug, Clone)]
struct CompiledPhrase {
    phrase: String,
    re: Regex,
}

/// Set of phrases counted against lowercased text.
#[derive(Debug, Clone, Default)]
pub struct PhraseSet {
    phrases: Vec<CompiledPhrase>,
}

/// A single phrase occurrence (byte span in the searched text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseHit<'a> {
    pub phrase: &'a str,
    pub start: usize,
    pub end: usize,
}

impl PhraseSet {
    pub fn compile(phrases: &[String]) -> Result<Self> {
        let phrases = phrases
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| {
                let re = Regex::new(&phrase_pattern(p))
                    .map_err(|e| anyhow!("phrase `{p}` regex error: {e}"))?;
                Ok(CompiledPhrase {
                    phrase: p.clone(),
                    re,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { phrases })
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Total occurrences of every phrase; each phrase counted independently.
    pub fn count(&self, lower_text: &str) -> usize {
        self.phrases
            .iter()
            .map(|p| p.re.find_iter(lower_text).count())
            .sum()
    }

    /// Occurrences with overlaps resolved leftmost-longest: "even though" is one hit, not two.
    pub fn count_disjoint(&self, lower_text: &str) -> usize {
        let mut hits = self.hits(lower_text);
        hits.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        let mut covered = 0usize;
        let mut n = 0usize;
        for hit in hits {
            if hit.start >= covered {
                n += 1;
                covered = hit.end;
            }
        }
        n
    }

    /// Every occurrence, grouped by phrase in lexicon order.
    pub fn hits<'a>(&'a self, lower_text: &str) -> Vec<PhraseHit<'a>> {
        let mut out = Vec::new();
        for p in &self.phrases {
            for m in p.re.find_iter(lower_text) {
                out.push(PhraseHit {
                    phrase: p.phrase.as_str(),
                    start: m.start(),
                    end: m.end(),
                });
            }
        }
        out
    }
}

/// `\b` only where the phrase edge is a word character; inner spaces match any whitespace run.
fn phrase_pattern(phrase: &str) -> String {
    let p = phrase.trim().to_lowercase();
    let body = regex::escape(&p).replace(' ', r"\s+");
    let lead = if p.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let trail = if p.chars().last().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    format!("{lead}{body}{trail}")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// AI-ism category with its weight and matcher.
#[derive(Debug, Clone)]
pub struct AiIsmCategory {
    pub name: String,
    pub weight: f64,
    pub phrases: PhraseSet,
}

/// Lexicon compiled for matching. Built once per `Analyzer`, shared read-only.
#[derive(Debug, Clone)]
pub struct CompiledLexicon {
    pub ai_isms: Vec<AiIsmCategory>,
    pub discourse_markers: PhraseSet,
    pub hedges: PhraseSet,
    pub confidence: PhraseSet,
    pub subordinators: PhraseSet,
}

impl CompiledLexicon {
    pub fn compile(lex: &Lexicon) -> Result<Self> {
        let mut ai_isms = lex
            .ai_isms
            .iter()
            .map(|(name, phrases)| {
                Ok(AiIsmCategory {
                    name: name.clone(),
                    weight: lex.weight(name),
                    phrases: PhraseSet::compile(phrases)
                        .with_context(|| format!("ai_isms.{name}"))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // The pattern bucket always exists: repetition signals land there even without phrases.
        if !ai_isms.iter().any(|c| c.name == PATTERN) {
            ai_isms.push(AiIsmCategory {
                name: PATTERN.to_string(),
                weight: lex.weight(PATTERN),
                phrases: PhraseSet::default(),
            });
        }

        Ok(Self {
            ai_isms,
            discourse_markers: PhraseSet::compile(&lex.discourse_markers)
                .context("discourse_markers")?,
            hedges: PhraseSet::compile(&lex.hedges).context("hedges")?,
            confidence: PhraseSet::compile(&lex.confidence).context("confidence")?,
            subordinators: PhraseSet::compile(&lex.subordinators).context("subordinators")?,
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::compile(&Lexicon::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_four_categories() {
        let lex = Lexicon::default();
        let names: Vec<&str> = lex.ai_isms.keys().map(String::as_str).collect();
        assert_eq!(names, vec![CLOSING, CONNECTOR, OPENING, PATTERN]);
        assert!(CompiledLexicon::builtin().is_ok());
    }

    #[test]
    fn phrase_counting_is_word_bounded() {
        let set = PhraseSet::compile(&owned(&["may", "in conclusion"])).unwrap();
        assert_eq!(set.count("the mayor may go. in  conclusion, may."), 3);
        assert_eq!(set.count("dismay"), 0);
    }

    #[test]
    fn punctuation_edges_still_match() {
        let set = PhraseSet::compile(&owned(&["furthermore, it is"])).unwrap();
        assert_eq!(set.count("furthermore, it is done."), 1);
    }

    #[test]
    fn disjoint_count_keeps_the_longer_phrase() {
        let set = PhraseSet::compile(&owned(&["though", "even though", "when"])).unwrap();
        let text = "even though it rained, we went. though late, we stayed when asked.";
        assert_eq!(set.count(text), 4);
        assert_eq!(set.count_disjoint(text), 3);
    }

    #[test]
    fn hits_carry_spans() {
        let set = PhraseSet::compile(&owned(&["delve into"])).unwrap();
        let hits = set.hits("we delve into it");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].phrase, "delve into");
        assert_eq!((hits[0].start, hits[0].end), (3, 13));
    }

    #[test]
    fn parse_toml_and_json_partial_override() {
        let toml = r#"
hedges = [" Perhaps ", "", "perhaps", "Might"]
[category_weights]
opening = 2.0
"#;
        let lex = parse_lexicon(toml, "toml").unwrap();
        assert_eq!(lex.hedges, vec!["might".to_string(), "perhaps".to_string()]);
        assert_eq!(lex.weight(OPENING), 2.0);
        assert_eq!(lex.weight(CLOSING), 1.0);
        // untouched lists keep built-ins
        assert!(lex.discourse_markers.contains(&"however".to_string()));

        let json = r#"{"discourse_markers": ["Thus"]}"#;
        let lex = parse_lexicon(json, "").unwrap();
        assert_eq!(lex.discourse_markers, vec!["thus".to_string()]);
    }

    #[test]
    fn negative_weight_falls_back_to_one() {
        let mut lex = Lexicon::default();
        lex.category_weights.insert(CLOSING.into(), -3.0);
        assert_eq!(lex.weight(CLOSING), 1.0);
    }

    #[test]
    fn pattern_bucket_always_compiled() {
        let mut lex = Lexicon::default();
        lex.ai_isms.remove(PATTERN);
        let c = CompiledLexicon::compile(&lex).unwrap();
        assert!(c.ai_isms.iter().any(|cat| cat.name == PATTERN && cat.phrases.is_empty()));
    }
}
