//! Configuration management for `swearjar-core`.
//!
//! This module defines the language packs (lexicon, false positives and
//! language-specific substitutions) and the shared settings (separators,
//! shared substitutions, mask, threshold) that feed the compiler. It handles
//! YAML (de)serialization, the embedded default packs, loading and merging
//! user-supplied packs, and resolving a [`LexiconSource`] for a language
//! selection.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::compiler::{SeparatorSet, SubstitutionTable};
use crate::errors::SwearjarError;
use crate::normalizers::Normalizer;
use crate::options::{LanguageSelection, DEFAULT_LANGUAGE, DEFAULT_MASK, DEFAULT_THRESHOLD};

/// Language packs compiled into the library, as `(language, yaml)`.
const EMBEDDED_LANGUAGES: &[(&str, &str)] = &[
    ("english", include_str!("../config/languages/english.yaml")),
    ("french", include_str!("../config/languages/french.yaml")),
    ("german", include_str!("../config/languages/german.yaml")),
    ("spanish", include_str!("../config/languages/spanish.yaml")),
    ("russian", include_str!("../config/languages/russian.yaml")),
];

/// One language's lexicon, false positives and extra substitutions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LanguagePack {
    pub profanities: Vec<String>,
    pub false_positives: Vec<String>,
    /// Merged on top of the shared substitution table.
    pub substitutions: SubstitutionTable,
}

impl LanguagePack {
    /// Loads a single language pack from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading language pack from: {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read language pack {}", path.display()))?;
        let pack: LanguagePack = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse language pack {}", path.display()))?;
        validate_pack(&path.display().to_string(), &pack)?;
        info!("Loaded {} terms from language pack {}.", pack.profanities.len(), path.display());
        Ok(pack)
    }

    /// Appends terms and false positives from `other`, skipping duplicates,
    /// and merges its substitutions.
    fn extend(&mut self, other: LanguagePack) {
        extend_unique(&mut self.profanities, other.profanities);
        extend_unique(&mut self.false_positives, other.false_positives);
        merge_substitutions(&mut self.substitutions, &other.substitutions);
    }
}

/// Top-level configuration: shared settings plus every registered language.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SwearjarConfig {
    pub default_language: Option<String>,
    pub mask_character: Option<char>,
    pub false_positive_threshold: Option<f64>,
    pub separators: SeparatorSet,
    /// Substitutions shared by every language.
    pub substitutions: SubstitutionTable,
    pub languages: BTreeMap<String, LanguagePack>,
}

/// Everything the compiler and engine need for one language selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexiconSource {
    pub language: LanguageSelection,
    pub profanities: Vec<String>,
    pub false_positives: Vec<String>,
    pub separators: SeparatorSet,
    pub substitutions: SubstitutionTable,
}

impl LexiconSource {
    /// A lexicon supplied directly by the caller, checked with the identity
    /// (English) normalizer.
    pub fn custom(
        profanities: Vec<String>,
        false_positives: Vec<String>,
        substitutions: SubstitutionTable,
        separators: SeparatorSet,
    ) -> Self {
        Self {
            language: LanguageSelection::default(),
            profanities,
            false_positives,
            separators,
            substitutions,
        }
    }

    /// The normalizer for this selection. Languages without a registered
    /// normalizer (user-supplied packs) are matched without folding.
    pub fn normalizer(&self) -> Normalizer {
        match &self.language {
            LanguageSelection::All => Normalizer::all(),
            LanguageSelection::Single(lang) => Normalizer::for_language(lang).unwrap_or_else(|_| {
                warn!("No normalizer registered for '{}'; matching its pack without folding.", lang);
                Normalizer::English
            }),
        }
    }

    /// Content hash identifying this exact compilation input.
    pub fn cache_key(&self) -> String {
        let mut hasher = Sha256::new();
        match serde_json::to_vec(self) {
            Ok(bytes) => hasher.update(&bytes),
            Err(e) => {
                // Every field is a string, list or map; this is not expected to fail.
                warn!("Falling back to debug formatting for cache key: {}", e);
                hasher.update(format!("{:?}", self).as_bytes());
            }
        }
        format!("swearjar_lexicon_{}", hex::encode(hasher.finalize()))
    }
}

impl SwearjarConfig {
    /// Loads a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom configuration from: {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SwearjarConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        info!("Loaded {} language pack(s) from file {}.", config.languages.len(), path.display());
        Ok(config)
    }

    /// Loads the shared defaults and every embedded language pack.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded strings...");
        let default_yaml = include_str!("../config/default.yaml");
        let mut config: SwearjarConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default configuration")?;

        for (language, yaml) in EMBEDDED_LANGUAGES {
            let pack: LanguagePack = serde_yml::from_str(yaml)
                .with_context(|| format!("Failed to parse embedded '{}' language pack", language))?;
            config.languages.insert(language.to_string(), pack);
        }

        debug!("Loaded {} default language pack(s).", config.languages.len());
        Ok(config)
    }

    pub fn default_language(&self) -> &str {
        self.default_language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn mask_character(&self) -> char {
        self.mask_character.unwrap_or(DEFAULT_MASK)
    }

    pub fn false_positive_threshold(&self) -> f64 {
        self.false_positive_threshold.unwrap_or(DEFAULT_THRESHOLD)
    }

    /// Registered language ids, sorted.
    pub fn available_languages(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }

    /// Registers (or extends) a language pack and returns the updated config.
    pub fn with_language_pack(mut self, language: &str, pack: LanguagePack) -> Self {
        let key = language.trim().to_lowercase();
        match self.languages.get_mut(&key) {
            Some(existing) => existing.extend(pack),
            None => {
                self.languages.insert(key, pack);
            }
        }
        self
    }

    /// Resolves the lexicon, false positives and substitution table for a
    /// language selection. "All" unions every registered pack.
    pub fn lexicon_for(&self, selection: &LanguageSelection) -> std::result::Result<LexiconSource, SwearjarError> {
        let mut substitutions = self.substitutions.clone();
        let mut profanities: Vec<String> = Vec::new();
        let mut false_positives: Vec<String> = Vec::new();

        let packs: Vec<&LanguagePack> = match selection {
            LanguageSelection::All => self.languages.values().collect(),
            LanguageSelection::Single(lang) => {
                let pack = self
                    .languages
                    .get(&lang.to_lowercase())
                    .ok_or_else(|| SwearjarError::UnknownLanguage(lang.clone()))?;
                vec![pack]
            }
        };

        for pack in packs {
            extend_unique(&mut profanities, pack.profanities.iter().cloned());
            extend_unique(&mut false_positives, pack.false_positives.iter().cloned());
            merge_substitutions(&mut substitutions, &pack.substitutions);
        }

        debug!(
            "Resolved lexicon for '{}': {} terms, {} false positives, {} substitution classes.",
            selection,
            profanities.len(),
            false_positives.len(),
            substitutions.len()
        );

        Ok(LexiconSource {
            language: selection.clone(),
            profanities,
            false_positives,
            separators: self.separators.clone(),
            substitutions,
        })
    }

    /// Checks settings and every pack, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if let Some(t) = self.false_positive_threshold {
            if !(t > 0.0 && t <= 1.0) {
                errors.push(format!("false_positive_threshold must be in (0, 1], got {}.", t));
            }
        }
        if let Some(mask) = self.mask_character {
            if mask.is_whitespace() {
                errors.push("mask_character cannot be whitespace.".to_string());
            }
        }
        if let Some(lang) = &self.default_language {
            if lang.trim().is_empty() {
                errors.push("default_language cannot be empty.".to_string());
            }
        }
        for (language, pack) in &self.languages {
            if let Err(e) = validate_pack(language, pack) {
                errors.push(e.to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
        }
    }
}

/// Merges a user configuration over the defaults. Scalar settings from the
/// user win when set; separators and packs are extended.
pub fn merge_config(default_config: SwearjarConfig, user_config: Option<SwearjarConfig>) -> SwearjarConfig {
    debug!("merge_config called. Default language packs: {}", default_config.languages.len());

    let mut merged = default_config;
    if let Some(user) = user_config {
        if let Some(lang) = user.default_language {
            debug!("Overriding default language with user value: {}", lang);
            merged.default_language = Some(lang);
        }
        if let Some(mask) = user.mask_character {
            debug!("Overriding mask character with user value.");
            merged.mask_character = Some(mask);
        }
        if let Some(threshold) = user.false_positive_threshold {
            debug!("Overriding false-positive threshold with user value: {}", threshold);
            merged.false_positive_threshold = Some(threshold);
        }
        extend_unique(&mut merged.separators, user.separators);
        merge_substitutions(&mut merged.substitutions, &user.substitutions);
        for (language, pack) in user.languages {
            merged = merged.with_language_pack(&language, pack);
        }
    }

    debug!("Final language packs after merge: {}", merged.languages.len());
    merged
}

pub fn language_candidate_paths(name: &str) -> Vec<PathBuf> {
    let base_dirs = vec![
        dirs::home_dir().map(|p| p.join(".swearjar").join("languages")),
        dirs::config_dir().map(|p| p.join("swearjar").join("languages")),
        Some(PathBuf::from("/etc/swearjar/languages")),
        Some(PathBuf::from("./config/languages")),
    ];

    base_dirs
        .into_iter()
        .flatten()
        .map(|dir| dir.join(format!("{}.yaml", name)))
        .collect()
}

/// Loads a language pack from an explicit path, or by name from the
/// candidate directories.
pub fn load_language_by_name(name_or_path: &str) -> Result<LanguagePack> {
    debug!("Attempting to load language pack from: '{}'", name_or_path);

    let path_to_load = {
        let path = Path::new(name_or_path);
        if path.is_file() {
            Some(path.to_path_buf())
        } else {
            language_candidate_paths(name_or_path).into_iter().find(|p| p.exists())
        }
    }
    .with_context(|| {
        format!(
            "Language pack '{}' not found. It is not a file path and is not in any expected location.",
            name_or_path
        )
    })?;

    LanguagePack::load_from_file(&path_to_load)
}

/// Lists language packs installed in the candidate directories, as
/// `(name, path)`. The first directory holding a given name wins.
pub fn installed_language_packs() -> Vec<(String, PathBuf)> {
    let mut out: Vec<(String, PathBuf)> = Vec::new();
    let candidate_dirs = language_candidate_paths("_")
        .into_iter()
        .filter_map(|p| p.parent().map(Path::to_path_buf));

    for dir in candidate_dirs {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                if !out.iter().any(|(n, _)| n == name) {
                    out.push((name.to_string(), path.clone()));
                }
            }
        }
    }
    out.sort();
    out
}

fn validate_pack(language: &str, pack: &LanguagePack) -> Result<()> {
    let mut errors = Vec::new();
    for (i, term) in pack.profanities.iter().enumerate() {
        if term.trim().is_empty() {
            errors.push(format!("'{}': profanity #{} is empty.", language, i));
        }
    }
    for (target, alternatives) in &pack.substitutions {
        if alternatives.is_empty() {
            errors.push(format!("'{}': substitution '{}' has no alternatives.", language, target));
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(errors.join("\n")))
    }
}

fn extend_unique(target: &mut Vec<String>, items: impl IntoIterator<Item = String>) {
    let mut seen: HashSet<String> = target.iter().cloned().collect();
    for item in items {
        if seen.insert(item.clone()) {
            target.push(item);
        }
    }
}

fn merge_substitutions(target: &mut SubstitutionTable, extra: &SubstitutionTable) {
    for (key, alternatives) in extra {
        extend_unique(target.entry(key.clone()).or_default(), alternatives.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_registers_all_languages() {
        let config = SwearjarConfig::load_default().unwrap();
        assert_eq!(config.available_languages(), vec!["english", "french", "german", "russian", "spanish"]);
        assert_eq!(config.default_language(), "english");
        assert_eq!(config.mask_character(), '*');
        assert_eq!(config.false_positive_threshold(), 0.5);
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_language() {
        let config = SwearjarConfig::load_default().unwrap();
        let err = config.lexicon_for(&LanguageSelection::from("klingon")).unwrap_err();
        assert!(matches!(err, SwearjarError::UnknownLanguage(_)));
    }

    #[test]
    fn test_all_languages_unions_packs() {
        let config = SwearjarConfig::load_default().unwrap();
        let all = config.lexicon_for(&LanguageSelection::All).unwrap();
        for term in ["fuck", "merde", "scheiße", "mierda", "пизда"] {
            assert!(all.profanities.iter().any(|p| p == term), "missing {term}");
        }
        assert_eq!(all.normalizer(), Normalizer::all());
    }

    #[test]
    fn test_pack_substitutions_extend_shared_table() {
        let mut config = SwearjarConfig::default().with_language_pack(
            "test",
            LanguagePack {
                profanities: vec!["x".into()],
                false_positives: vec![],
                substitutions: BTreeMap::from([("a".to_string(), vec!["á".to_string()])]),
            },
        );
        config.substitutions.insert("a".into(), vec!["@".into()]);
        let source = config.lexicon_for(&LanguageSelection::from("test")).unwrap();
        assert_eq!(source.substitutions["a"], vec!["@".to_string(), "á".to_string()]);
        assert_eq!(source.normalizer(), Normalizer::English);
    }

    #[test]
    fn test_pack_without_normalizer_matches_unfolded() {
        let config = SwearjarConfig::load_default()
            .unwrap()
            .with_language_pack("pirate", LanguagePack { profanities: vec!["arr".into()], ..Default::default() });
        let source = config.lexicon_for(&LanguageSelection::from("pirate")).unwrap();
        assert_eq!(source.normalizer(), Normalizer::English);
        assert!(Normalizer::for_language("pirate").is_err());
    }

    #[test]
    fn test_cache_key_depends_on_content() {
        let a = LexiconSource::custom(vec!["a".into()], vec![], SubstitutionTable::new(), vec![]);
        let b = LexiconSource::custom(vec!["b".into()], vec![], SubstitutionTable::new(), vec![]);
        assert_eq!(a.cache_key(), a.clone().cache_key());
        assert_ne!(a.cache_key(), b.cache_key());
        assert!(a.cache_key().starts_with("swearjar_lexicon_"));
    }

    #[test]
    fn test_merge_config_overrides_and_extends() {
        let default = SwearjarConfig::load_default().unwrap();
        let user = SwearjarConfig {
            mask_character: Some('#'),
            languages: BTreeMap::from([(
                "english".to_string(),
                LanguagePack { profanities: vec!["frack".into()], ..Default::default() },
            )]),
            ..Default::default()
        };
        let merged = merge_config(default, Some(user));
        assert_eq!(merged.mask_character(), '#');
        let english = &merged.languages["english"];
        assert!(english.profanities.contains(&"frack".to_string()));
        assert!(english.profanities.contains(&"fuck".to_string()));
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let config = SwearjarConfig { false_positive_threshold: Some(0.0), ..Default::default() };
        assert!(config.validate().is_err());
    }
}
