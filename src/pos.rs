// src/pos.rs
//! Coarse part-of-speech tagging behind a swappable strategy.
//!
//! `RuleTagger` is the default: closed-class lookups for function words,
//! then capitalization / suffix / neighbour heuristics for open classes.
//! Anything implementing `PosTagger` can replace it without touching the
//! metric calculators.

use crate::segment::{Sentence, Token};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Noun,
    Verb,
    Adj,
    Adv,
    Det,
    Adp,
    Pron,
    Aux,
    Cconj,
    Sconj,
    Part,
    Punct,
    Other,
}

impl PosTag {
    pub const ALL: [PosTag; 13] = [
        PosTag::Noun,
        PosTag::Verb,
        PosTag::Adj,
        PosTag::Adv,
        PosTag::Det,
        PosTag::Adp,
        PosTag::Pron,
        PosTag::Aux,
        PosTag::Cconj,
        PosTag::Sconj,
        PosTag::Part,
        PosTag::Punct,
        PosTag::Other,
    ];

    /// Closed-class grammatical categories.
    pub fn is_function(self) -> bool {
        matches!(
            self,
            PosTag::Det
                | PosTag::Adp
                | PosTag::Cconj
                | PosTag::Sconj
                | PosTag::Aux
                | PosTag::Pron
                | PosTag::Part
        )
    }

    /// Open-class categories carrying lexical content.
    pub fn is_content(self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Verb | PosTag::Adj | PosTag::Adv)
    }

    pub fn is_modifier(self) -> bool {
        matches!(self, PosTag::Adj | PosTag::Adv)
    }
}

/// Neighbourhood visible to a tagger for one token.
#[derive(Debug, Clone, Copy)]
pub struct TagContext<'a> {
    /// Tag of the previous token in the sentence (punctuation included).
    pub prev: Option<PosTag>,
    pub next: Option<&'a Token>,
    /// First word token of its sentence.
    pub sentence_initial: bool,
}

/// `token -> category` strategy.
pub trait PosTagger: Send + Sync {
    fn tag(&self, token: &Token, ctx: &TagContext<'_>) -> PosTag;

    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Tag every token of `sentence` left to right, feeding each decision into the next context.
pub fn tag_sentence(tagger: &dyn PosTagger, sentence: &Sentence) -> Vec<PosTag> {
    let mut tags = Vec::with_capacity(sentence.tokens.len());
    let mut seen_word = false;
    for (i, tok) in sentence.tokens.iter().enumerate() {
        let ctx = TagContext {
            prev: tags.last().copied(),
            next: sentence.tokens.get(i + 1),
            sentence_initial: !tok.is_punct && !seen_word,
        };
        if !tok.is_punct {
            seen_word = true;
        }
        tags.push(tagger.tag(tok, &ctx));
    }
    tags
}

/// Rule-based default tagger.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTagger;

impl PosTagger for RuleTagger {
    fn tag(&self, token: &Token, ctx: &TagContext<'_>) -> PosTag {
        if token.is_punct {
            return PosTag::Punct;
        }
        let w = token.lower.as_str();
        if w.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') || is_number_word(w) {
            return PosTag::Other;
        }

        if let Some(tag) = contextual_closed_class(w, ctx) {
            return tag;
        }
        if let Some(tag) = closed_class(w) {
            return tag;
        }

        if token.is_capitalized() && !ctx.sentence_initial {
            return PosTag::Noun;
        }
        if is_common_adjective(w) {
            return PosTag::Adj;
        }
        open_class(w, ctx.prev)
    }

    fn name(&self) -> &'static str {
        "rule"
    }
}

/// Words whose category depends on neighbours.
fn contextual_closed_class(w: &str, ctx: &TagContext<'_>) -> Option<PosTag> {
    match w {
        "to" => {
            let next_nominal = ctx.next.is_some_and(|n| {
                n.is_capitalized()
                    || n.lower.chars().next().is_some_and(|c| c.is_ascii_digit())
                    || matches!(closed_class(&n.lower), Some(PosTag::Det | PosTag::Pron))
            });
            Some(if next_nominal { PosTag::Adp } else { PosTag::Part })
        }
        "that" => {
            let Some(next) = ctx.next.filter(|n| !n.is_punct) else {
                return Some(PosTag::Pron);
            };
            let clause_follows = next.is_capitalized()
                || matches!(closed_class(&next.lower), Some(PosTag::Det | PosTag::Pron));
            let tag = if clause_follows || matches!(ctx.prev, Some(PosTag::Adj)) {
                PosTag::Sconj
            } else {
                PosTag::Det
            };
            Some(tag)
        }
        _ => None,
    }
}

fn closed_class(w: &str) -> Option<PosTag> {
    let tag = match w {
        "the" | "a" | "an" | "this" | "these" | "those" | "every" | "each" | "some" | "any"
        | "no" | "all" | "both" | "either" | "neither" | "another" | "such" | "many" | "few"
        | "several" | "much" => PosTag::Det,

        "i" | "me" | "my" | "mine" | "myself" | "we" | "us" | "our" | "ours" | "ourselves"
        | "you" | "your" | "yours" | "yourself" | "yourselves" | "he" | "him" | "his"
        | "himself" | "she" | "her" | "hers" | "herself" | "it" | "its" | "itself" | "they"
        | "them" | "their" | "theirs" | "themselves" | "who" | "whom" | "whose" | "which"
        | "what" | "someone" | "anyone" | "everyone" | "nobody" | "something" | "anything"
        | "everything" | "nothing" | "it's" | "i'm" | "i've" | "i'd" | "i'll" | "you're"
        | "we're" | "they're" | "he's" | "she's" | "that's" | "there's" | "we've"
        | "they've" => PosTag::Pron,

        "am" | "is" | "are" | "was" | "were" | "be" | "been" | "being" | "have" | "has"
        | "had" | "having" | "do" | "does" | "did" | "will" | "would" | "shall" | "should"
        | "can" | "could" | "may" | "might" | "must" | "don't" | "doesn't" | "didn't"
        | "can't" | "won't" | "isn't" | "aren't" | "wasn't" | "weren't" | "couldn't"
        | "wouldn't" | "shouldn't" | "hasn't" | "haven't" | "hadn't" | "cannot" => PosTag::Aux,

        "not" | "n't" => PosTag::Part,

        "and" | "or" | "but" | "nor" | "yet" | "so" => PosTag::Cconj,

        "although" | "because" | "since" | "while" | "whereas" | "though" | "if" | "unless"
        | "whether" | "until" | "when" | "whenever" | "where" | "wherever" | "whereby" => {
            PosTag::Sconj
        }

        "in" | "on" | "at" | "by" | "for" | "with" | "about" | "against" | "between" | "into"
        | "through" | "during" | "before" | "after" | "above" | "below" | "from" | "up"
        | "down" | "out" | "over" | "under" | "of" | "off" | "across" | "among" | "around"
        | "behind" | "beyond" | "within" | "without" | "toward" | "towards" | "upon" | "via"
        | "despite" | "like" | "per" | "near" | "throughout" | "along" | "as" | "than" => {
            PosTag::Adp
        }

        "very" | "too" | "also" | "just" | "only" | "then" | "now" | "here" | "there"
        | "often" | "always" | "never" | "sometimes" | "already" | "still" | "even" | "quite"
        | "rather" | "almost" | "again" | "soon" | "perhaps" | "however" | "therefore"
        | "thus" | "moreover" | "furthermore" | "indeed" | "well" | "how" | "why" | "once"
        | "ever" | "instead" | "otherwise" | "hence" | "meanwhile" | "later" | "today" => {
            PosTag::Adv
        }

        _ => return None,
    };
    Some(tag)
}

fn is_number_word(w: &str) -> bool {
    matches!(
        w,
        "one" | "two" | "three" | "four" | "five" | "six" | "seven" | "eight" | "nine" | "ten"
            | "hundred" | "thousand" | "million" | "billion" | "first" | "second" | "third"
    )
}

fn is_common_adjective(w: &str) -> bool {
    matches!(
        w,
        "good" | "bad" | "new" | "old" | "great" | "high" | "low" | "large" | "small" | "big"
            | "long" | "short" | "important" | "clear" | "different" | "possible" | "likely"
            | "able" | "sure" | "true" | "real" | "whole" | "full" | "main" | "major" | "key"
            | "certain" | "significant" | "same" | "other" | "own" | "young" | "early" | "late"
            | "hard" | "easy" | "free" | "strong" | "simple" | "complex" | "recent" | "current"
            | "unique" | "specific" | "relevant" | "evident" | "further" | "heavy" | "careful"
    )
}

fn is_ly_exception(w: &str) -> bool {
    matches!(
        w,
        "family" | "supply" | "apply" | "reply" | "ally" | "rely" | "italy" | "july"
            | "assembly" | "anomaly" | "monopoly" | "belly" | "butterfly"
    )
}

fn open_class(w: &str, prev: Option<PosTag>) -> PosTag {
    let len = w.chars().count();
    let ends = |suffix: &str| w.ends_with(suffix) && len > suffix.len() + 2;

    if ends("ly") && !is_ly_exception(w) {
        return PosTag::Adv;
    }

    if ["tion", "sion", "ment", "ness", "ity", "ism", "ist", "ance", "ence", "ship", "hood", "dom"]
        .iter()
        .any(|s| ends(s))
    {
        return PosTag::Noun;
    }

    if ["ous", "ful", "ive", "able", "ible", "ical", "al", "ic", "less", "ish"]
        .iter()
        .any(|s| ends(s))
    {
        return PosTag::Adj;
    }

    let after_nominal_marker = matches!(prev, Some(PosTag::Det | PosTag::Adj | PosTag::Adp));
    let after_verbal_marker = matches!(prev, Some(PosTag::Aux | PosTag::Part | PosTag::Pron));

    if ends("ize") || ends("ise") || ends("ify") {
        return PosTag::Verb;
    }
    if ends("ed") {
        return if matches!(prev, Some(PosTag::Det)) {
            PosTag::Adj
        } else {
            PosTag::Verb
        };
    }
    if ends("ing") {
        return if after_nominal_marker {
            PosTag::Noun
        } else {
            PosTag::Verb
        };
    }
    if after_verbal_marker {
        return PosTag::Verb;
    }
    PosTag::Noun
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment;

    fn tags_of(text: &str) -> Vec<(String, PosTag)> {
        let doc = segment(text).unwrap();
        let s = &doc.sentences()[0];
        let tags = tag_sentence(&RuleTagger, s);
        s.tokens
            .iter()
            .map(|t| t.text.clone())
            .zip(tags)
            .collect()
    }

    fn tag_for(text: &str, word: &str) -> PosTag {
        tags_of(text)
            .into_iter()
            .find(|(w, _)| w == word)
            .map(|(_, t)| t)
            .unwrap()
    }

    #[test]
    fn closed_classes() {
        let text = "The cat and I sat on a mat because it was not cold.";
        assert_eq!(tag_for(text, "The"), PosTag::Det);
        assert_eq!(tag_for(text, "and"), PosTag::Cconj);
        assert_eq!(tag_for(text, "I"), PosTag::Pron);
        assert_eq!(tag_for(text, "on"), PosTag::Adp);
        assert_eq!(tag_for(text, "because"), PosTag::Sconj);
        assert_eq!(tag_for(text, "was"), PosTag::Aux);
        assert_eq!(tag_for(text, "not"), PosTag::Part);
        assert_eq!(tag_for(text, "."), PosTag::Punct);
    }

    #[test]
    fn open_class_heuristics() {
        let text = "They quickly finalized the remarkable transformation near Paris.";
        assert_eq!(tag_for(text, "quickly"), PosTag::Adv);
        assert_eq!(tag_for(text, "finalized"), PosTag::Verb);
        assert_eq!(tag_for(text, "remarkable"), PosTag::Adj);
        assert_eq!(tag_for(text, "transformation"), PosTag::Noun);
        assert_eq!(tag_for(text, "Paris"), PosTag::Noun);
    }

    #[test]
    fn to_and_that_use_context() {
        assert_eq!(tag_for("We want to leave now.", "to"), PosTag::Part);
        assert_eq!(tag_for("We walked to the river.", "to"), PosTag::Adp);
        assert_eq!(tag_for("Note that it works.", "that"), PosTag::Sconj);
        assert_eq!(tag_for("We saw that film.", "that"), PosTag::Det);
    }

    #[test]
    fn function_and_content_partition() {
        for tag in PosTag::ALL {
            assert!(!(tag.is_function() && tag.is_content()), "{tag:?}");
        }
        assert!(PosTag::Adj.is_modifier());
        assert!(!PosTag::Noun.is_modifier());
    }

    #[test]
    fn serializes_uppercase() {
        let v = serde_json::to_value(PosTag::Cconj).unwrap();
        assert_eq!(v, serde_json::json!("CCONJ"));
    }
}
