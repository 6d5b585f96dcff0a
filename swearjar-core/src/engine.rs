// swearjar-core/src/engine.rs
//! Defines the core `ProfanityEngine` trait.
//!
//! The trait decouples callers (the headless helpers, the CLI) from the
//! concrete detection method, so a different engine can be dropped in without
//! touching them. Every engine is synchronous and must be safe to share
//! across threads.
//!
//! License: MIT OR APACHE 2.0

use crate::compiler::CompiledLexicon;
use crate::detection_match::DetectionResult;
use crate::errors::Result;
use crate::options::DetectorOptions;

/// A trait that defines the core functionality of a profanity engine.
pub trait ProfanityEngine: Send + Sync {
    /// Scans `text`, masks every accepted match and reports what was found.
    ///
    /// Fails with `InvalidInput` for empty text. A failed call leaves no
    /// state behind.
    fn check(&self, text: &str) -> Result<DetectionResult>;

    /// Returns `true` when `text` contains at least one accepted match.
    fn has_profanity(&self, text: &str) -> Result<bool> {
        Ok(self.check(text)?.has_profanity)
    }

    /// Returns `text` with every accepted match masked.
    fn mask(&self, text: &str) -> Result<String> {
        Ok(self.check(text)?.masked_text)
    }

    /// Returns the compiled lexicon the engine scans with.
    fn compiled_lexicon(&self) -> &CompiledLexicon;

    /// Returns a reference to the engine's options.
    fn options(&self) -> &DetectorOptions;
}
