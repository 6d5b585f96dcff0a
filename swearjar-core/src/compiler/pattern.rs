//! pattern.rs - Builds one obfuscation-tolerant matcher per lexicon term.
//!
//! Every letter of a term is replaced by its substitution class, repeated
//! one-or-more times so elongated spellings ("fuuuck") still match, and the
//! separator fragment is interposed between adjacent letters so spaced or
//! punctuated spellings ("f-u-c-k", "f u c k", "f.u.c.k") match as well.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};
use std::collections::{BTreeMap, HashMap};

use crate::errors::{Result, SwearjarError};

/// Maximum number of characters allowed in a single lexicon term.
pub const MAX_TERM_LENGTH: usize = 64;

/// Size limit handed to the regex compiler for one term.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Target letter -> strings that may stand in for it.
pub type SubstitutionTable = BTreeMap<String, Vec<String>>;

/// Characters allowed, in any combination, between the letters of a term.
pub type SeparatorSet = Vec<String>;

/// A compiled matcher for one lexicon term.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    /// The canonical lexicon term, as reported in detection results.
    pub term: String,
    /// The term after language normalization; the pattern is built from this.
    pub normalized_term: String,
    /// The pattern text the regex was built from.
    pub source: String,
    pub regex: Regex,
}

impl CompiledExpression {
    /// Length of the canonical term in characters.
    pub fn term_len(&self) -> usize {
        self.term.chars().count()
    }
}

/// Accepts both plain keys (`a`) and the slash-delimited form (`/a/`) used by
/// older language packs, and returns the lower-cased target character.
fn parse_target(key: &str) -> Result<char> {
    let trimmed = key
        .strip_prefix('/')
        .and_then(|k| k.strip_suffix('/'))
        .unwrap_or(key);
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c.to_lowercase().next().unwrap_or(c)),
        _ => Err(SwearjarError::MalformedSubstitutionTable {
            target: key.to_string(),
            reason: "target must be a single character".to_string(),
        }),
    }
}

/// Builds the fragment that matches one letter: any of `alternatives`
/// (plus the letter itself), repeated one or more times.
pub fn substitution_class(target: char, alternatives: &[String]) -> Result<String> {
    if alternatives.is_empty() {
        return Err(SwearjarError::MalformedSubstitutionTable {
            target: target.to_string(),
            reason: "substitute list is empty".to_string(),
        });
    }

    let mut singles: Vec<char> = vec![target];
    let mut multis: Vec<String> = Vec::new();
    for alt in alternatives {
        let mut chars = alt.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {
                return Err(SwearjarError::MalformedSubstitutionTable {
                    target: target.to_string(),
                    reason: "substitute is an empty string".to_string(),
                });
            }
            (Some(c), None) => {
                if !singles.contains(&c) {
                    singles.push(c);
                }
            }
            _ => {
                let escaped = regex::escape(alt);
                if !multis.contains(&escaped) {
                    multis.push(escaped);
                }
            }
        }
    }

    let class: String = singles.iter().map(|c| regex::escape(&c.to_string())).collect();
    if multis.is_empty() {
        Ok(format!("[{}]+", class))
    } else {
        Ok(format!("(?:[{}]|{})+", class, multis.join("|")))
    }
}

/// Builds the fragment allowed between two letters: any run of the given
/// separators or whitespace, plus a period when a word character follows.
///
/// The period is excluded from the character class; `\.\b` only matches a
/// period sitting directly before a word character.
pub fn separator_expression(separators: &[String]) -> String {
    let mut class = String::new();
    let mut seen: Vec<char> = Vec::new();
    for c in separators.iter().flat_map(|s| s.chars()) {
        if c == '.' || c.is_whitespace() || seen.contains(&c) {
            continue;
        }
        seen.push(c);
        class.push_str(&regex::escape(&c.to_string()));
    }
    format!(r"(?:[{}\s]|\.\b)*?", class)
}

/// Prepared substitution classes and separator fragment, reusable across
/// every term of a lexicon.
#[derive(Debug, Clone)]
pub struct PatternCompiler {
    classes: HashMap<char, String>,
    separator: String,
}

impl PatternCompiler {
    pub fn new(substitutions: &SubstitutionTable, separators: &[String]) -> Result<Self> {
        let mut classes = HashMap::with_capacity(substitutions.len());
        for (key, alternatives) in substitutions {
            let target = parse_target(key)?;
            classes.insert(target, substitution_class(target, alternatives)?);
        }
        Ok(Self { classes, separator: separator_expression(separators) })
    }

    /// The separator fragment interposed between letters.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Assembles the pattern text for `term` without compiling it.
    pub fn expression_source(&self, term: &str) -> Result<String> {
        let term = term.trim();
        if term.is_empty() {
            return Err(SwearjarError::EmptyTerm);
        }
        let len = term.chars().count();
        if len > MAX_TERM_LENGTH {
            return Err(SwearjarError::TermTooLong(term.to_string(), len, MAX_TERM_LENGTH));
        }

        let mut pieces: Vec<String> = Vec::with_capacity(len);
        let mut previous_was_space = false;
        for c in term.chars() {
            if c.is_whitespace() {
                if !previous_was_space {
                    pieces.push(r"\s+".to_string());
                }
                previous_was_space = true;
                continue;
            }
            previous_was_space = false;
            let lower = c.to_lowercase().next().unwrap_or(c);
            let piece = match self.classes.get(&lower) {
                Some(class) => class.clone(),
                None => format!("{}+", regex::escape(&c.to_string())),
            };
            pieces.push(piece);
        }
        Ok(pieces.join(&self.separator))
    }

    /// Compiles `term` as written.
    pub fn compile(&self, term: &str) -> Result<CompiledExpression> {
        self.compile_normalized(term, term)
    }

    /// Compiles the pattern from `normalized`, reporting matches as `term`.
    pub fn compile_normalized(&self, term: &str, normalized: &str) -> Result<CompiledExpression> {
        let source = self.expression_source(normalized)?;
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| SwearjarError::PatternCompilation(term.to_string(), e))?;
        debug!(
            target: "swearjar_core::compiler",
            "Term of {} chars compiled to a {} byte expression.",
            term.chars().count(),
            source.len()
        );
        Ok(CompiledExpression {
            term: term.to_string(),
            normalized_term: normalized.trim().to_string(),
            source,
            regex,
        })
    }
}

/// Compiles a single term against a substitution table and separator set.
pub fn compile_pattern(
    term: &str,
    substitutions: &SubstitutionTable,
    separators: &[String],
) -> Result<CompiledExpression> {
    PatternCompiler::new(substitutions, separators)?.compile(term)
}
