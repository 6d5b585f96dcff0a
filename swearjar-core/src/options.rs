// File: swearjar-core/src/options.rs

//! options.rs - Detector options: language selection, mask character,
//! false-positive threshold, detection mode and unique-match granularity.
//!
//! Options are plain values. Every setter consumes `self` and returns the
//! updated copy, so one base configuration can be specialised several ways
//! without any of them affecting the others:
//!
//! ```rust
//! use swearjar_core::DetectorOptions;
//!
//! let base = DetectorOptions::default();
//! let hashes = base.clone().mask_with("#");
//! let spanish = base.clone().with_language("spanish").lenient();
//! assert_eq!(base.mask, '*');
//! assert_eq!(hashes.mask, '#');
//! assert_eq!(spanish.language.to_string(), "spanish");
//! ```
//!
//! license: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::config::SwearjarConfig;
use crate::errors::{Result, SwearjarError};

pub const DEFAULT_MASK: char = '*';
pub const DEFAULT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_LANGUAGE: &str = "english";

/// Sentinel accepted wherever a language id is parsed.
pub const ALL_LANGUAGES: &str = "all";

/// Which lexicon(s) a detector checks against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageSelection {
    Single(String),
    All,
}

impl Default for LanguageSelection {
    fn default() -> Self {
        LanguageSelection::Single(DEFAULT_LANGUAGE.to_string())
    }
}

impl From<String> for LanguageSelection {
    fn from(s: String) -> Self {
        let lang = s.trim().to_lowercase();
        if lang == ALL_LANGUAGES {
            LanguageSelection::All
        } else {
            LanguageSelection::Single(lang)
        }
    }
}

impl From<&str> for LanguageSelection {
    fn from(s: &str) -> Self {
        LanguageSelection::from(s.to_string())
    }
}

impl From<LanguageSelection> for String {
    fn from(selection: LanguageSelection) -> Self {
        selection.to_string()
    }
}

impl FromStr for LanguageSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(LanguageSelection::from(s))
    }
}

impl fmt::Display for LanguageSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageSelection::Single(lang) => write!(f, "{}", lang),
            LanguageSelection::All => write!(f, "{}", ALL_LANGUAGES),
        }
    }
}

/// The closed set of detection strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    /// All filters, with the configured match-density threshold.
    #[default]
    Normal,
    /// Skips the match-density filter, so terms buried in longer words fire.
    Strict,
    /// Only matches that make up their whole word fire.
    Lenient,
}

/// What goes into `unique_terms_found`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueBy {
    /// The canonical lexicon term.
    #[default]
    Term,
    /// The exact text that was masked.
    MatchedText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorOptions {
    pub language: LanguageSelection,
    pub mask: char,
    pub threshold: f64,
    pub mode: DetectionMode,
    pub unique_by: UniqueBy,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            language: LanguageSelection::default(),
            mask: DEFAULT_MASK,
            threshold: DEFAULT_THRESHOLD,
            mode: DetectionMode::Normal,
            unique_by: UniqueBy::Term,
        }
    }
}

impl DetectorOptions {
    /// Options seeded from a loaded configuration's defaults.
    pub fn from_config(config: &SwearjarConfig) -> Self {
        Self {
            language: LanguageSelection::from(config.default_language()),
            mask: config.mask_character(),
            threshold: config.false_positive_threshold(),
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<LanguageSelection>) -> Self {
        self.language = language.into();
        self
    }

    pub fn all_languages(self) -> Self {
        self.with_language(LanguageSelection::All)
    }

    /// Uses the first character of `mask`; an empty string keeps the current mask.
    pub fn mask_with(mut self, mask: &str) -> Self {
        if let Some(c) = mask.chars().next() {
            self.mask = c;
        }
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_mode(mut self, mode: DetectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn strict(self) -> Self {
        self.with_mode(DetectionMode::Strict)
    }

    pub fn lenient(self) -> Self {
        self.with_mode(DetectionMode::Lenient)
    }

    pub fn unique_by(mut self, unique_by: UniqueBy) -> Self {
        self.unique_by = unique_by;
        self
    }

    /// The density threshold the engine applies, or `None` when the density
    /// filter is off.
    pub fn effective_threshold(&self) -> Option<f64> {
        match self.mode {
            DetectionMode::Normal => Some(self.threshold),
            DetectionMode::Strict => None,
            DetectionMode::Lenient => Some(1.0),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(SwearjarError::InvalidOption(format!(
                "false-positive threshold must be in (0, 1], got {}",
                self.threshold
            )));
        }
        if self.mask.is_whitespace() {
            return Err(SwearjarError::InvalidOption("mask character cannot be whitespace".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_return_modified_copies() {
        let base = DetectorOptions::default();
        let changed = base.clone().mask_with("#").strict().with_threshold(0.75);
        assert_eq!(base, DetectorOptions::default());
        assert_eq!(changed.mask, '#');
        assert_eq!(changed.mode, DetectionMode::Strict);
        assert_eq!(changed.threshold, 0.75);
    }

    #[test]
    fn test_mask_with_uses_first_character() {
        assert_eq!(DetectorOptions::default().mask_with("###").mask, '#');
        assert_eq!(DetectorOptions::default().mask_with("●x").mask, '●');
        assert_eq!(DetectorOptions::default().mask_with("").mask, '*');
    }

    #[test]
    fn test_language_selection_parsing() {
        assert_eq!(LanguageSelection::from("ALL"), LanguageSelection::All);
        assert_eq!(LanguageSelection::from(" German "), LanguageSelection::Single("german".to_string()));
        assert_eq!("all".parse::<LanguageSelection>().unwrap().to_string(), "all");
    }

    #[test]
    fn test_effective_threshold_per_mode() {
        let opts = DetectorOptions::default();
        assert_eq!(opts.effective_threshold(), Some(0.5));
        assert_eq!(opts.clone().strict().effective_threshold(), None);
        assert_eq!(opts.lenient().effective_threshold(), Some(1.0));
    }

    #[test]
    fn test_validate_threshold_bounds() {
        assert!(DetectorOptions::default().with_threshold(1.0).validate().is_ok());
        assert!(DetectorOptions::default().with_threshold(0.0).validate().is_err());
        assert!(DetectorOptions::default().with_threshold(1.5).validate().is_err());
        assert!(DetectorOptions::default().with_threshold(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_whitespace_mask_rejected() {
        assert!(DetectorOptions::default().mask_with(" ").validate().is_err());
    }
}
