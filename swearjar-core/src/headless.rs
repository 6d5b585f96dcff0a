// File: swearjar-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot, non-interactive use of the core engine.
//! Each call resolves the lexicon, builds a detector and checks the text.
//! Callers checking many strings should build a `Detector` once instead.

use log::debug;

use crate::config::SwearjarConfig;
use crate::detection_match::DetectionResult;
use crate::engine::ProfanityEngine;
use crate::engines::scan_mask::Detector;
use crate::errors::Result;
use crate::options::DetectorOptions;

/// Checks `text` against the lexicon `options.language` selects from `config`.
///
/// # Arguments
///
/// * `config` - The merged configuration (defaults + optional user packs).
/// * `options` - Language, mask, threshold and mode.
/// * `text` - The string to check.
pub fn headless_check(config: &SwearjarConfig, options: DetectorOptions, text: &str) -> Result<DetectionResult> {
    debug!("Headless check with language '{}'.", options.language);
    let detector = Detector::from_config(config, options, None)?;
    detector.check(text)
}

/// Returns `text` with every accepted match masked.
pub fn headless_mask_string(config: &SwearjarConfig, options: DetectorOptions, text: &str) -> Result<String> {
    Ok(headless_check(config, options, text)?.masked_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SwearjarError;
    use test_log::test;

    #[test]
    fn test_headless_mask_string_english() -> anyhow::Result<()> {
        let config = SwearjarConfig::load_default()?;
        let masked = headless_mask_string(&config, DetectorOptions::default(), "what the fuck is this shit")?;
        assert_eq!(masked, "what the **** is this ****");
        Ok(())
    }

    #[test]
    fn test_headless_check_reports_terms() -> anyhow::Result<()> {
        let config = SwearjarConfig::load_default()?;
        let options = DetectorOptions::default().with_language("spanish");
        let result = headless_check(&config, options, "vete a la mierda")?;
        assert!(result.has_profanity());
        assert_eq!(result.unique_terms_found(), ["mierda"]);
        assert_eq!(result.masked_text(), "vete a la ******");
        Ok(())
    }

    #[test]
    fn test_headless_unknown_language() -> anyhow::Result<()> {
        let config = SwearjarConfig::load_default()?;
        let options = DetectorOptions::default().with_language("klingon");
        let err = headless_check(&config, options, "text").unwrap_err();
        assert!(matches!(err, SwearjarError::UnknownLanguage(_)));
        Ok(())
    }
}
