// swearjar-core/src/engines/scan_mask.rs
//! A `ProfanityEngine` implementation that scans text with the compiled
//! lexicon, masks every accepted match and rescans until a pass accepts
//! nothing new.
//!
//! Each pass works on two buffers kept in lockstep: the working buffer (what
//! the caller gets back) and its normalized form, which is what the
//! expressions run against. Matches are located and filtered in the
//! normalized buffer and mapped back to the working buffer through the
//! normalizer's character map, so folds that change length ("ß" to "ss")
//! never shift the masked span.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;

use crate::compiler::{compile_lexicon_with, CompiledExpression, CompiledLexicon, ExpressionCache};
use crate::config::{LexiconSource, SwearjarConfig};
use crate::detection_match::{log_accepted_match_debug, log_rejected_match_debug, DetectionMatch, DetectionResult};
use crate::engine::ProfanityEngine;
use crate::errors::{Result, SwearjarError};
use crate::normalizers::Normalizer;
use crate::options::{DetectorOptions, UniqueBy};

/// The scan-mask detector. Immutable once built; share it freely.
#[derive(Debug, Clone)]
pub struct Detector {
    lexicon: Arc<CompiledLexicon>,
    false_positives: HashSet<String>,
    normalizer: Normalizer,
    options: DetectorOptions,
}

impl Detector {
    /// Compiles `source` and builds a detector without going through a cache.
    pub fn new(source: &LexiconSource, options: DetectorOptions) -> Result<Self> {
        Self::build(source, options, None)
    }

    /// Builds a detector, reusing the compiled lexicon from `cache` when the
    /// same source was compiled before.
    pub fn with_cache(source: &LexiconSource, options: DetectorOptions, cache: &ExpressionCache) -> Result<Self> {
        Self::build(source, options, Some(cache))
    }

    /// Resolves the lexicon for `options.language` from `config` and builds a
    /// detector for it.
    pub fn from_config(
        config: &SwearjarConfig,
        options: DetectorOptions,
        cache: Option<&ExpressionCache>,
    ) -> Result<Self> {
        let source = config.lexicon_for(&options.language)?;
        Self::build(&source, options, cache)
    }

    fn build(source: &LexiconSource, options: DetectorOptions, cache: Option<&ExpressionCache>) -> Result<Self> {
        options.validate()?;
        validate_mask_against_substitutions(options.mask, source)?;
        let source = separators_without_mask(source, options.mask);

        let normalizer = source.normalizer();
        let compile = || {
            compile_lexicon_with(&source.profanities, &source.substitutions, &source.separators, &normalizer)
        };
        let lexicon = match cache {
            Some(cache) => cache.get_or_compile(&source.cache_key(), compile)?,
            None => Arc::new(compile()?),
        };

        Self::from_compiled(lexicon, &source.false_positives, normalizer, options)
    }

    /// Builds a detector around an already compiled lexicon.
    ///
    /// Only the lexicon terms are checked against the mask character here;
    /// the substitution table is no longer available.
    pub fn from_compiled(
        lexicon: Arc<CompiledLexicon>,
        false_positives: &[String],
        normalizer: Normalizer,
        options: DetectorOptions,
    ) -> Result<Self> {
        options.validate()?;

        let folded_mask: String = options.mask.to_lowercase().collect();
        if let Some(expr) = lexicon.iter().find(|e| {
            e.term.to_lowercase().contains(&folded_mask) || e.normalized_term.to_lowercase().contains(&folded_mask)
        }) {
            return Err(SwearjarError::InvalidOption(format!(
                "mask character '{}' appears in lexicon term '{}'",
                options.mask, expr.term
            )));
        }

        let mut set = HashSet::with_capacity(false_positives.len() * 2);
        for word in false_positives {
            let word = word.trim();
            if word.is_empty() {
                continue;
            }
            set.insert(word.to_lowercase());
            set.insert(normalizer.normalize(word).to_lowercase());
        }

        debug!(
            "Detector ready: {} expressions, {} false positives, {} normalizer, mode {:?}.",
            lexicon.len(),
            set.len(),
            normalizer,
            options.mode
        );

        Ok(Self { lexicon, false_positives: set, normalizer, options })
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Shared handle to the compiled lexicon.
    pub fn lexicon(&self) -> Arc<CompiledLexicon> {
        Arc::clone(&self.lexicon)
    }

    /// Runs the acceptance filters on one match. Returns the enclosing full
    /// word when the match is accepted.
    fn accept(
        &self,
        expr: &CompiledExpression,
        normalized: &[char],
        start: usize,
        len: usize,
        threshold: Option<f64>,
    ) -> Option<String> {
        let end = start + len;
        let matched: String = normalized[start..end].iter().collect();

        if spans_word_boundary(&matched) {
            log_rejected_match_debug(&expr.term, &matched, "absorbs a letter of a neighbouring word");
            return None;
        }

        let (word_start, word_end) = full_word_bounds(normalized, start, end);
        let full_word: String = normalized[word_start..word_end].iter().collect();
        let folded_word = full_word.to_lowercase();

        if expr.normalized_term.chars().count() == 2 && folded_word != expr.normalized_term.to_lowercase() {
            log_rejected_match_debug(&expr.term, &matched, "two-character term inside a longer word");
            return None;
        }

        if let Some(threshold) = threshold {
            let density = len as f64 / (word_end - word_start).max(1) as f64;
            if density < threshold {
                log_rejected_match_debug(&expr.term, &matched, "match density below threshold");
                return None;
            }
        }

        if self.false_positives.contains(&folded_word) {
            log_rejected_match_debug(&expr.term, &matched, "false positive");
            return None;
        }

        Some(full_word)
    }
}

impl ProfanityEngine for Detector {
    fn check(&self, text: &str) -> Result<DetectionResult> {
        if text.is_empty() {
            return Err(SwearjarError::InvalidInput("text to check cannot be empty".to_string()));
        }

        let mask = self.options.mask;
        let threshold = self.options.effective_threshold();
        let mut result = DetectionResult::new(text);
        let mut seen: HashSet<String> = HashSet::new();
        let mut working: Vec<char> = text.chars().collect();

        // Every accepted match masks at least one unmasked character, so the
        // loop settles long before this bound.
        let max_passes = working.len() + 1;
        let mut settled = false;

        for pass in 1..=max_passes {
            working = collapse_whitespace(&working);
            let working_text: String = working.iter().collect();
            let mapped = self.normalizer.normalize_mapped(&working_text);
            let mut normalized: Vec<char> = mapped.text.chars().collect();
            let mut accepted = 0usize;

            for expr in self.lexicon.iter() {
                let haystack: String = normalized.iter().collect();
                for (start, len) in char_spans(expr, &haystack) {
                    let full_word = match self.accept(expr, &normalized, start, len, threshold) {
                        Some(word) => word,
                        None => continue,
                    };

                    let (src_start, src_len) = mapped.source_span(start, len);
                    let matched_text: String = working[src_start..src_start + src_len].iter().collect();
                    mask_span(&mut normalized, start, len, mask);
                    mask_span(&mut working, src_start, src_len, mask);

                    let detection = DetectionMatch {
                        term: expr.term.clone(),
                        matched_text,
                        start,
                        length: len,
                        full_word,
                    };
                    log_accepted_match_debug(&expr.term, &detection);

                    let key = match self.options.unique_by {
                        UniqueBy::Term => detection.term.clone(),
                        UniqueBy::MatchedText => detection.matched_text.clone(),
                    };
                    if seen.insert(key.clone()) {
                        result.unique_terms_found.push(key);
                    }
                    result.matches.push(detection);
                    result.match_count += 1;
                    result.has_profanity = true;
                    accepted += 1;
                }
            }

            if accepted == 0 {
                settled = true;
                break;
            }
            debug!("Pass {} accepted {} match(es); rescanning.", pass, accepted);
        }

        if !settled {
            warn!("Masking did not settle after {} passes; returning the current buffer.", max_passes);
        }

        result.masked_text = working.into_iter().collect();
        Ok(result)
    }

    fn compiled_lexicon(&self) -> &CompiledLexicon {
        &self.lexicon
    }

    fn options(&self) -> &DetectorOptions {
        &self.options
    }
}

/// Rejects a mask that any substitution class would accept as a letter.
fn validate_mask_against_substitutions(mask: char, source: &LexiconSource) -> Result<()> {
    let folded: String = mask.to_lowercase().collect();
    for (target, alternatives) in &source.substitutions {
        let bare = target.trim_matches('/');
        let clash = std::iter::once(bare)
            .chain(alternatives.iter().map(String::as_str))
            .any(|s| s.to_lowercase().contains(&folded));
        if clash {
            return Err(SwearjarError::MalformedSubstitutionTable {
                target: target.clone(),
                reason: format!("substitutes include the mask character '{}'", mask),
            });
        }
    }
    Ok(())
}

/// Drops separators containing the mask character. A masked span must not
/// bridge the letters on either side of it into a new match.
fn separators_without_mask(source: &LexiconSource, mask: char) -> Cow<'_, LexiconSource> {
    let folded: String = mask.to_lowercase().collect();
    let is_mask = |sep: &String| sep.to_lowercase().contains(&folded);
    if !source.separators.iter().any(is_mask) {
        return Cow::Borrowed(source);
    }
    debug!("Mask character '{}' removed from the separator set.", mask);
    let mut stripped = source.clone();
    stripped.separators.retain(|sep| !is_mask(sep));
    Cow::Owned(stripped)
}

/// Collapses every run of whitespace to a single space.
fn collapse_whitespace(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len());
    let mut in_space = false;
    for &c in chars {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Character offsets and lengths of every match of `expr` in `haystack`.
fn char_spans(expr: &CompiledExpression, haystack: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut chars_before = 0;
    let mut last_byte = 0;
    for m in expr.regex.find_iter(haystack) {
        chars_before += haystack[last_byte..m.start()].chars().count();
        let len = m.as_str().chars().count();
        spans.push((chars_before, len));
        chars_before += len;
        last_byte = m.end();
    }
    spans
}

/// True when a match pulled in a single letter of the word before or after
/// it. A match made only of single letters is a spaced-out spelling.
fn spans_word_boundary(matched: &str) -> bool {
    let parts: Vec<&str> = matched.split_whitespace().collect();
    if parts.len() < 2 {
        return false;
    }
    let single_letter = |part: &str| {
        let mut chars = part.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
    };
    if parts.iter().all(|p| p.chars().count() == 1) {
        return false;
    }
    single_letter(parts[0]) || single_letter(parts[parts.len() - 1])
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Expands `[start, end)` outwards to the surrounding word characters.
fn full_word_bounds(chars: &[char], start: usize, end: usize) -> (usize, usize) {
    let mut left = start;
    while left > 0 && is_word_char(chars[left - 1]) {
        left -= 1;
    }
    let mut right = end;
    while right < chars.len() && is_word_char(chars[right]) {
        right += 1;
    }
    (left, right)
}

fn mask_span(chars: &mut [char], start: usize, len: usize, mask: char) {
    let end = (start + len).min(chars.len());
    for c in &mut chars[start.min(end)..end] {
        *c = mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::SubstitutionTable;
    use crate::options::DetectionMode;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn detector(lexicon: &[&str], false_positives: &[&str], options: DetectorOptions) -> Detector {
        let source = LexiconSource::custom(strings(lexicon), strings(false_positives), SubstitutionTable::new(), vec![]);
        Detector::new(&source, options).unwrap()
    }

    #[test]
    fn test_obfuscated_term_is_masked() {
        let substitutions: SubstitutionTable = [
            ("f", vec!["f", "ƒ"]),
            ("u", vec!["u", "ü"]),
            ("c", vec!["c", "ç"]),
            ("k", vec!["k"]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), strings(&v)))
        .collect();
        let source = LexiconSource::custom(strings(&["fuck"]), vec![], substitutions, strings(&["-", "_"]));
        let detector = Detector::new(&source, DetectorOptions::default()).unwrap();

        let result = detector.check("This is ƒü-ç-k right now").unwrap();
        assert!(result.has_profanity());
        assert_eq!(result.masked_text(), "This is ****** right now");
        assert_eq!(result.unique_terms_found(), ["fuck"]);
        assert_eq!(result.match_count(), 1);
        assert_eq!(result.matches[0].matched_text, "ƒü-ç-k");
    }

    #[test]
    fn test_empty_input_rejected() {
        let d = detector(&["shit"], &[], DetectorOptions::default());
        assert!(matches!(d.check(""), Err(SwearjarError::InvalidInput(_))));
    }

    #[test]
    fn test_custom_mask() {
        let d = detector(&["shit"], &[], DetectorOptions::default().mask_with("#"));
        assert_eq!(d.mask("shit").unwrap(), "####");
    }

    #[test]
    fn test_longest_term_wins() {
        let d = detector(&["ass", "asshole"], &[], DetectorOptions::default());
        let result = d.check("asshole").unwrap();
        assert_eq!(result.unique_terms_found(), ["asshole"]);
        assert_eq!(result.match_count(), 1);
    }

    #[test]
    fn test_two_character_term_needs_whole_word() {
        let d = detector(&["as"], &[], DetectorOptions::default());
        assert!(!d.has_profanity("cassette").unwrap());
        assert!(d.has_profanity("as").unwrap());
    }

    #[test]
    fn test_absorbed_neighbour_letter_rejected() {
        let d = detector(&["ass"], &[], DetectorOptions::default());
        assert!(!d.has_profanity("was shit").unwrap());
    }

    #[test]
    fn test_spaced_out_spelling_accepted() {
        let d = detector(&["fuck"], &[], DetectorOptions::default());
        let result = d.check("oh f u c k").unwrap();
        assert_eq!(result.masked_text(), "oh *******");
    }

    #[test]
    fn test_false_positive_word_exempt() {
        let d = detector(&["ass"], &["class"], DetectorOptions::default());
        assert!(!d.has_profanity("This is a class").unwrap());
        assert!(d.has_profanity("kiss my ass").unwrap());
    }

    #[test]
    fn test_density_threshold_per_mode() {
        let normal = detector(&["ass"], &[], DetectorOptions::default());
        assert!(!normal.has_profanity("brassiere").unwrap());
        assert!(normal.has_profanity("asses").unwrap());

        let strict = detector(&["ass"], &[], DetectorOptions::default().with_mode(DetectionMode::Strict));
        assert_eq!(strict.mask("brassiere").unwrap(), "br***iere");

        let lenient = detector(&["ass"], &[], DetectorOptions::default().lenient());
        assert!(!lenient.has_profanity("asses").unwrap());
        assert!(lenient.has_profanity("ass").unwrap());
    }

    #[test]
    fn test_masking_is_idempotent() {
        let d = detector(&["shit", "damn"], &[], DetectorOptions::default());
        let first = d.check("Damn, this SHIT is damn good").unwrap();
        assert_eq!(first.match_count(), 3);
        let second = d.check(first.masked_text()).unwrap();
        assert!(!second.has_profanity());
        assert_eq!(second.masked_text(), first.masked_text());
    }

    #[test]
    fn test_unique_by_matched_text() {
        let by_term = detector(&["fuck"], &[], DetectorOptions::default());
        assert_eq!(by_term.check("FUCK and fuck").unwrap().unique_terms_found(), ["fuck"]);

        let by_text = detector(&["fuck"], &[], DetectorOptions::default().unique_by(UniqueBy::MatchedText));
        let result = by_text.check("FUCK and fuck").unwrap();
        assert_eq!(result.unique_terms_found(), ["FUCK", "fuck"]);
        assert_eq!(result.match_count(), 2);
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let d = detector(&["shit"], &[], DetectorOptions::default());
        let result = d.check("hello   there\n\tfriend").unwrap();
        assert!(!result.has_profanity());
        assert_eq!(result.masked_text(), "hello there friend");
        assert_eq!(result.source_text(), "hello   there\n\tfriend");
    }

    #[test]
    fn test_mask_in_substitution_class_rejected() {
        let substitutions: SubstitutionTable = [("a".to_string(), strings(&["@"]))].into_iter().collect();
        let source = LexiconSource::custom(strings(&["ass"]), vec![], substitutions, vec![]);
        let err = Detector::new(&source, DetectorOptions::default().mask_with("@")).unwrap_err();
        assert!(matches!(err, SwearjarError::MalformedSubstitutionTable { .. }));
    }

    #[test]
    fn test_masked_span_does_not_join_neighbours() {
        let source = LexiconSource::custom(strings(&["fuck", "shit"]), vec![], SubstitutionTable::new(), strings(&["#"]));
        let d = Detector::new(&source, DetectorOptions::default().mask_with("#")).unwrap();
        let result = d.check("fushitck").unwrap();
        assert_eq!(result.masked_text(), "fu####ck");
        assert_eq!(result.unique_terms_found(), ["shit"]);
        assert_eq!(result.match_count(), 1);
        // The separator still applies with any other mask.
        let d = Detector::new(&source, DetectorOptions::default()).unwrap();
        assert_eq!(d.mask("f#u#c#k").unwrap(), "*******");
    }

    #[test]
    fn test_mask_in_term_rejected() {
        let source = LexiconSource::custom(strings(&["fuck"]), vec![], SubstitutionTable::new(), vec![]);
        let err = Detector::new(&source, DetectorOptions::default().mask_with("K")).unwrap_err();
        assert!(matches!(err, SwearjarError::InvalidOption(_)));
    }

    #[test]
    fn test_length_changing_fold_masks_source_span() {
        let config = SwearjarConfig::load_default().unwrap();
        let options = DetectorOptions::default().with_language("german");
        let d = Detector::from_config(&config, options, None).unwrap();
        let result = d.check("Du Scheiße!").unwrap();
        assert_eq!(result.masked_text(), "Du *******!");
        assert_eq!(result.unique_terms_found(), ["scheiße"]);
        assert_eq!(result.matches[0].matched_text, "Scheiße");
    }

    #[test]
    fn test_cached_detectors_share_lexicon() {
        let cache = ExpressionCache::new();
        let source = LexiconSource::custom(strings(&["damn"]), vec![], SubstitutionTable::new(), vec![]);
        let a = Detector::with_cache(&source, DetectorOptions::default(), &cache).unwrap();
        let b = Detector::with_cache(&source, DetectorOptions::default().mask_with("#"), &cache).unwrap();
        assert!(Arc::ptr_eq(&a.lexicon(), &b.lexicon()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_helpers() {
        assert_eq!(collapse_whitespace(&"a  \n b".chars().collect::<Vec<_>>()), vec!['a', ' ', 'b']);
        assert!(spans_word_boundary("fuck m"));
        assert!(spans_word_boundary("s hit"));
        assert!(!spans_word_boundary("f u c k"));
        assert!(!spans_word_boundary("fu ck"));
        let chars: Vec<char> = "a class.".chars().collect();
        assert_eq!(full_word_bounds(&chars, 4, 7), (2, 7));
    }
}
