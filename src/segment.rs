// src/segment.rs
//! Sentence segmentation and word tokenization.
//!
//! Heuristic, not a parser:
//! - sentences end at runs of `.`, `!`, `?` (closing quotes/brackets stay attached),
//!   or at a blank line;
//! - no split after single-letter initials (not "I"), titles, abbreviations read in
//!   context, inside numbers, or when the next visible character is lowercase;
//! - tokens are alphanumeric runs (internal `'`, `’`, `-` and digit separators kept),
//!   every other visible character is a one-char punctuation token.

use crate::error::AnalysisError;
use serde::Serialize;

/// A single word or punctuation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Surface form as it appears in the text.
    pub text: String,
    /// Lowercased form (curly apostrophes folded to `'`).
    pub lower: String,
    pub is_punct: bool,
}

impl Token {
    fn word(text: &str) -> Self {
        Self {
            text: text.to_string(),
            lower: text.to_lowercase().replace('\u{2019}', "'"),
            is_punct: false,
        }
    }

    fn punct(c: char) -> Self {
        Self {
            text: c.to_string(),
            lower: c.to_string(),
            is_punct: true,
        }
    }

    /// True when the first character is uppercase.
    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }
}

/// Ordered tokens of one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Number of non-punctuation tokens.
    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    pub fn words(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|t| !t.is_punct)
    }
}

/// Segmented text. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    raw: String,
    sentences: Vec<Sentence>,
}

impl Document {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Flat view over every token of every sentence.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }

    pub fn token_count(&self) -> usize {
        self.tokens().count()
    }

    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Sentence::word_count).sum()
    }
}

/// Split `text` into sentences and tokens.
pub fn segment(text: &str) -> Result<Document, AnalysisError> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let sentences: Vec<Sentence> = split_sentences(&normalized)
        .into_iter()
        .filter_map(|s| {
            let tokens = tokenize(s);
            if tokens.iter().all(|t| t.is_punct) {
                return None;
            }
            Some(Sentence {
                text: s.to_string(),
                tokens,
            })
        })
        .collect();

    if sentences.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    Ok(Document {
        raw: text.to_string(),
        sentences,
    })
}

/// Sentence spans (trimmed, non-empty) in order of appearance.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map(|&(b, _)| b).unwrap_or(text.len());

    let mut out = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i].1;

        if c == '\n' {
            // Blank line → paragraph break.
            let mut j = i + 1;
            while j < chars.len() && chars[j].1 != '\n' && chars[j].1.is_whitespace() {
                j += 1;
            }
            if j < chars.len() && chars[j].1 == '\n' {
                push_span(&mut out, &text[start..byte_at(i)]);
                start = byte_at(j);
                i = j + 1;
                continue;
            }
            i += 1;
            continue;
        }

        if !is_terminal(c) {
            i += 1;
            continue;
        }

        // Consume the terminal run, then closers.
        let run_start = i;
        let mut j = i;
        while j < chars.len() && is_terminal(chars[j].1) {
            j += 1;
        }
        let single_period = j - run_start == 1 && c == '.';
        while j < chars.len() && is_closer(chars[j].1) {
            j += 1;
        }

        // Glued to the next character (3.14, U.S.A, "end.Next") → not a boundary.
        if j < chars.len() && !chars[j].1.is_whitespace() {
            i = j;
            continue;
        }

        let next_visible = chars[j..].iter().map(|&(_, ch)| ch).find(|ch| !ch.is_whitespace());
        if single_period && guards_abbreviation(&chars, run_start, next_visible) {
            i = j;
            continue;
        }

        if next_visible.is_some_and(char::is_lowercase) {
            i = j;
            continue;
        }

        push_span(&mut out, &text[start..byte_at(j)]);
        start = byte_at(j);
        i = j;
    }

    push_span(&mut out, &text[start..]);
    out
}

fn push_span<'a>(out: &mut Vec<&'a str>, span: &'a str) {
    let t = span.trim();
    if !t.is_empty() {
        out.push(t);
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | ')' | ']' | '}' | '\u{201D}' | '\u{2019}' | '\u{00BB}'
    )
}

/// Word immediately before the period at `dot` reads as an initial or an abbreviation.
///
/// Titles always hold the sentence open. Abbreviations that double as ordinary
/// words (`no`, `ed`, month names, ...) only do so before a number, `al` only after `et`,
/// and `Gen`/`Rev`/`Co` only when capitalized and followed by a capital.
fn guards_abbreviation(chars: &[(usize, char)], dot: usize, next_visible: Option<char>) -> bool {
    let k = word_start(chars, dot);
    let word: String = chars[k..dot].iter().map(|&(_, ch)| ch).collect();
    if word.is_empty() {
        return false;
    }
    let mut letters = word.chars();
    if let (Some(first), None) = (letters.next(), letters.next()) {
        // the pronoun "I" ends sentences
        return first.is_alphabetic() && first != 'I';
    }

    let lower = word.to_lowercase();
    if is_title(&lower) {
        return true;
    }
    if is_numbered_abbreviation(&lower) {
        return next_visible.is_some_and(|c| c.is_ascii_digit());
    }
    if lower == "al" {
        return previous_word(chars, k).eq_ignore_ascii_case("et");
    }
    if is_capitalized_abbreviation(&lower) {
        return word.starts_with(char::is_uppercase) && next_visible.is_some_and(char::is_uppercase);
    }
    false
}

fn word_start(chars: &[(usize, char)], end: usize) -> usize {
    let mut k = end;
    while k > 0 && chars[k - 1].1.is_alphanumeric() {
        k -= 1;
    }
    k
}

/// Alphanumeric run preceding index `k`, skipping whitespace.
fn previous_word(chars: &[(usize, char)], k: usize) -> String {
    let mut end = k;
    while end > 0 && chars[end - 1].1.is_whitespace() {
        end -= 1;
    }
    chars[word_start(chars, end)..end].iter().map(|&(_, ch)| ch).collect()
}

fn is_title(word: &str) -> bool {
    matches!(
        word,
        "mr" | "mrs" | "ms" | "dr" | "prof" | "sr" | "jr" | "st" | "mt" | "vs" | "cf" | "approx" | "dept"
    )
}

fn is_numbered_abbreviation(word: &str) -> bool {
    matches!(
        word,
        "no" | "vol"
            | "pp"
            | "fig"
            | "ed"
            | "eds"
            | "est"
            | "jan"
            | "feb"
            | "mar"
            | "apr"
            | "jun"
            | "jul"
            | "aug"
            | "sep"
            | "sept"
            | "oct"
            | "nov"
            | "dec"
    )
}

fn is_capitalized_abbreviation(word: &str) -> bool {
    matches!(word, "gen" | "rev" | "gov" | "co" | "corp")
}

fn is_joiner(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '-')
}

/// Split one sentence into word and punctuation tokens.
pub fn tokenize(s: &str) -> Vec<Token> {
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i].1;
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if !c.is_alphanumeric() {
            out.push(Token::punct(c));
            i += 1;
            continue;
        }

        let start = chars[i].0;
        let mut j = i + 1;
        while j < chars.len() {
            let cj = chars[j].1;
            let next_alnum = chars.get(j + 1).is_some_and(|&(_, n)| n.is_alphanumeric());
            if cj.is_alphanumeric() {
                j += 1;
            } else if is_joiner(cj) && next_alnum {
                j += 2;
            } else if matches!(cj, '.' | ',')
                && chars[j - 1].1.is_ascii_digit()
                && chars.get(j + 1).is_some_and(|&(_, n)| n.is_ascii_digit())
            {
                j += 2;
            } else {
                break;
            }
        }
        let end = chars.get(j).map(|&(b, _)| b).unwrap_or(s.len());
        out.push(Token::word(&s[start..end]));
        i = j;
    }

    out
}
