//! Language-specific text normalization.
//!
//! Normalizers collapse orthographic variation (accents, ligatures, digraphs)
//! so a single lexicon entry matches every written form of a word. They are
//! applied to the text being scanned and to the lexicon terms themselves, so
//! both sides of a match always go through the same folding.
//!
//! Some folds change the number of characters (`ß` becomes `ss`, `sch`
//! becomes `sh`). To keep offsets found in the normalized buffer usable
//! against the original text, every normalizer produces a [`NormalizedText`]
//! that records, for each output character, the index of the source character
//! it came from.
//!
//! License: MIT OR APACHE 2.0

mod french;
mod german;
mod russian;
mod spanish;

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Result, SwearjarError};

/// Languages with a registered normalizer, in the order they are chained for
/// "all languages" mode.
pub const REGISTERED_LANGUAGES: &[&str] = &["english", "french", "german", "spanish", "russian"];

/// Returns the identifiers of every language with a registered normalizer.
pub fn registered_languages() -> Vec<String> {
    REGISTERED_LANGUAGES.iter().map(|l| l.to_string()).collect()
}

/// Normalized text plus a map from each of its characters back to the index
/// of the source character that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    pub origin: Vec<usize>,
}

impl NormalizedText {
    /// Wraps `source` unchanged, with an identity character map.
    pub fn identity(source: &str) -> Self {
        let origin = (0..source.chars().count()).collect();
        Self { text: source.to_string(), origin }
    }

    /// Number of characters in the normalized text.
    pub fn char_len(&self) -> usize {
        self.origin.len()
    }

    /// Applies a further mapping step on top of this one, composing the
    /// character maps so the result still points at the original source.
    fn then(self, step: impl Fn(&str) -> NormalizedText) -> NormalizedText {
        let next = step(&self.text);
        let origin = next.origin.iter().map(|&i| self.origin[i]).collect();
        NormalizedText { text: next.text, origin }
    }

    /// Maps a character span `[start, start + len)` of the normalized text to
    /// the corresponding character span of the source text.
    ///
    /// Source characters folded away by a contraction ("ll" to "y") belong to
    /// the span that ends on their replacement.
    pub fn source_span(&self, start: usize, len: usize) -> (usize, usize) {
        if len == 0 || start >= self.origin.len() {
            return (start, 0);
        }
        let last = (start + len - 1).min(self.origin.len() - 1);
        let src_start = self.origin[start];
        let mut src_end = self.origin[last] + 1;
        if let Some(&next) = self.origin.get(last + 1) {
            src_end = src_end.max(next);
        }
        (src_start, src_end.saturating_sub(src_start))
    }
}

/// Incrementally builds a [`NormalizedText`].
#[derive(Debug, Default)]
pub(crate) struct MappedBuilder {
    text: String,
    origin: Vec<usize>,
}

impl MappedBuilder {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self { text: String::with_capacity(cap), origin: Vec::with_capacity(cap) }
    }

    pub(crate) fn push(&mut self, c: char, src: usize) {
        self.text.push(c);
        self.origin.push(src);
    }

    pub(crate) fn push_str(&mut self, s: &str, src: usize) {
        for c in s.chars() {
            self.push(c, src);
        }
    }

    pub(crate) fn finish(self) -> NormalizedText {
        NormalizedText { text: self.text, origin: self.origin }
    }
}

/// Folds every character through `table`, leaving unmapped characters as-is.
pub(crate) fn map_chars(source: &str, table: fn(char) -> Option<&'static str>) -> NormalizedText {
    let mut out = MappedBuilder::with_capacity(source.len());
    for (i, c) in source.chars().enumerate() {
        match table(c) {
            Some(replacement) => out.push_str(replacement, i),
            None => out.push(c, i),
        }
    }
    out.finish()
}

/// Picks the replacement for a case-insensitive digraph match the way the
/// German and Spanish folds do: all upper-case, leading capital, or lower.
pub(crate) fn case_pattern<'a>(matched: &[char], upper: &'a str, title: &'a str, lower: &'a str) -> &'a str {
    let all_upper = matched.iter().all(|c| c.is_uppercase());
    let title_case = matched.first().is_some_and(|c| c.is_uppercase())
        && matched.iter().skip(1).all(|c| c.is_lowercase());
    if all_upper {
        upper
    } else if title_case {
        title
    } else {
        lower
    }
}

/// The closed set of text normalizers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalizer {
    /// Identity.
    English,
    French,
    German,
    Spanish,
    Russian,
    /// Applies each normalizer in order ("all languages" mode).
    Chain(Vec<Normalizer>),
}

impl Normalizer {
    /// Looks up the normalizer registered for `language` (case-insensitive).
    pub fn for_language(language: &str) -> Result<Self> {
        match language.trim().to_lowercase().as_str() {
            "english" => Ok(Normalizer::English),
            "french" => Ok(Normalizer::French),
            "german" => Ok(Normalizer::German),
            "spanish" => Ok(Normalizer::Spanish),
            "russian" => Ok(Normalizer::Russian),
            _ => Err(SwearjarError::UnknownLanguage(language.to_string())),
        }
    }

    /// Every registered normalizer, chained in registration order.
    pub fn all() -> Self {
        Normalizer::Chain(vec![
            Normalizer::English,
            Normalizer::French,
            Normalizer::German,
            Normalizer::Spanish,
            Normalizer::Russian,
        ])
    }

    /// Normalizes `text`, discarding the character map.
    pub fn normalize(&self, text: &str) -> String {
        self.normalize_mapped(text).text
    }

    /// Normalizes `text` and returns the character map back to the source.
    pub fn normalize_mapped(&self, text: &str) -> NormalizedText {
        match self {
            Normalizer::English => NormalizedText::identity(text),
            Normalizer::French => french::normalize(text),
            Normalizer::German => german::normalize(text),
            Normalizer::Spanish => spanish::normalize(text),
            Normalizer::Russian => russian::normalize(text),
            Normalizer::Chain(steps) => steps
                .iter()
                .fold(NormalizedText::identity(text), |acc, step| acc.then(|t| step.normalize_mapped(t))),
        }
    }
}

impl fmt::Display for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Normalizer::English => write!(f, "english"),
            Normalizer::French => write!(f, "french"),
            Normalizer::German => write!(f, "german"),
            Normalizer::Spanish => write!(f, "spanish"),
            Normalizer::Russian => write!(f, "russian"),
            Normalizer::Chain(steps) => {
                let names: Vec<String> = steps.iter().map(|s| s.to_string()).collect();
                write!(f, "{}", names.join("+"))
            }
        }
    }
}

/// Normalizes `text` with the normalizer registered for `language`.
pub fn normalize(text: &str, language: &str) -> Result<String> {
    let normalizer = Normalizer::for_language(language)?;
    debug!("Normalizing {} chars with the {} normalizer.", text.chars().count(), normalizer);
    Ok(normalizer.normalize(text))
}
