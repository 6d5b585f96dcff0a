// swearjar-core/src/detection_match.rs
//! Provides the per-match and per-check records produced by the scan-mask
//! engine, plus debug logging helpers that keep matched text out of logs
//! unless explicitly allowed.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Initialized once: whether matched text may appear verbatim in debug logs.
    static ref MATCH_DEBUG_ALLOWED: bool = {
        std::env::var("SWEARJAR_ALLOW_DEBUG_MATCHES")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A single accepted match. Offsets are in characters over the normalized
/// buffer; `matched_text` is the slice of the caller's text that was masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DetectionMatch {
    pub term: String,
    pub matched_text: String,
    pub start: usize,
    pub length: usize,
    pub full_word: String,
}

/// The outcome of one `check` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DetectionResult {
    pub source_text: String,
    pub masked_text: String,
    pub has_profanity: bool,
    pub match_count: usize,
    /// Unique terms (or matched strings) in first-seen order.
    pub unique_terms_found: Vec<String>,
    #[serde(default)]
    pub matches: Vec<DetectionMatch>,
}

impl DetectionResult {
    pub(crate) fn new(source: &str) -> Self {
        Self {
            source_text: source.to_string(),
            masked_text: source.to_string(),
            ..Default::default()
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn masked_text(&self) -> &str {
        &self.masked_text
    }

    pub fn has_profanity(&self) -> bool {
        self.has_profanity
    }

    pub fn match_count(&self) -> usize {
        self.match_count
    }

    pub fn unique_terms_found(&self) -> &[String] {
        &self.unique_terms_found
    }
}

pub fn redact_match(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[MATCH]".to_string()
    } else {
        format!("[MATCH: {} chars]", len)
    }
}

fn get_loggable_content(matched: &str) -> String {
    if *MATCH_DEBUG_ALLOWED {
        matched.to_string()
    } else {
        redact_match(matched)
    }
}

pub fn log_accepted_match_debug(term: &str, m: &DetectionMatch) {
    debug!(
        "Accepted match for term '{}': '{}' at {}+{} (full word '{}')",
        get_loggable_content(term),
        get_loggable_content(&m.matched_text),
        m.start,
        m.length,
        get_loggable_content(&m.full_word)
    );
}

pub fn log_rejected_match_debug(term: &str, matched: &str, reason: &str) {
    debug!(
        "Rejected match for term '{}': '{}' ({})",
        get_loggable_content(term),
        get_loggable_content(matched),
        reason
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_match_short_string() {
        assert_eq!(redact_match("shit"), "[MATCH]".to_string());
    }

    #[test]
    fn test_redact_match_counts_characters() {
        assert_eq!(redact_match("ебанная сука"), "[MATCH: 12 chars]".to_string());
    }

    #[test]
    fn test_new_result_starts_unmasked() {
        let r = DetectionResult::new("hello");
        assert_eq!(r.masked_text(), "hello");
        assert!(!r.has_profanity());
        assert_eq!(r.match_count(), 0);
        assert!(r.unique_terms_found().is_empty());
    }
}
