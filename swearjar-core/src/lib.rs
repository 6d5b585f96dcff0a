// swearjar-core/src/lib.rs
//! # Swearjar Core Library
//!
//! `swearjar-core` provides the platform-independent logic for profanity
//! detection and masking. It compiles per-language lexicons into
//! obfuscation-tolerant matchers, normalizes text per language, and runs a
//! scan-and-mask engine behind the pluggable `ProfanityEngine` trait.
//!
//! The engine is pure and synchronous: no I/O happens while checking text.
//! Configuration loading lives in `config` and is the only place the crate
//! touches the filesystem.
//!
//! ## Modules
//!
//! * `config`: Language packs, shared separators/substitutions, loading and merging.
//! * `compiler`: Builds one matcher per lexicon term and caches compiled lexicons.
//! * `normalizers`: Per-language folding (accents, ligatures, digraphs).
//! * `engine`: Defines the `ProfanityEngine` trait.
//! * `engines`: Contains the scan-mask `Detector`.
//! * `detection_match`: Per-match and per-check records.
//! * `options`: Detector options (language, mask, threshold, mode).
//! * `headless`: One-shot convenience wrappers.
//!
//! ## Usage Example
//!
//! ```rust
//! use swearjar_core::{Detector, DetectorOptions, ExpressionCache, ProfanityEngine, SwearjarConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Load the embedded language packs.
//!     let config = SwearjarConfig::load_default()?;
//!
//!     // 2. Build a detector. The cache lets later detectors over the same
//!     //    lexicon skip compilation.
//!     let cache = ExpressionCache::new();
//!     let detector = Detector::from_config(&config, DetectorOptions::default(), Some(&cache))?;
//!
//!     // 3. Check some text.
//!     let result = detector.check("This is sh1t")?;
//!     assert!(result.has_profanity());
//!     assert_eq!(result.masked_text(), "This is ****");
//!     assert_eq!(result.unique_terms_found(), ["shit"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Engine and compiler operations return [`SwearjarError`]; configuration
//! loading returns `anyhow::Result` with file context attached.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod compiler;
pub mod config;
pub mod detection_match;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod normalizers;
pub mod options;

/// Re-exports the configuration types and loaders.
pub use config::{
    installed_language_packs, language_candidate_paths, load_language_by_name, merge_config, LanguagePack,
    LexiconSource, SwearjarConfig,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::SwearjarError;

pub use engine::ProfanityEngine;
pub use engines::scan_mask::Detector;

pub use detection_match::{DetectionMatch, DetectionResult};

pub use options::{DetectionMode, DetectorOptions, LanguageSelection, UniqueBy};

/// Re-exports the compiler entry points for advanced usage.
pub use compiler::{
    compile_lexicon, compile_lexicon_with, compile_pattern, CompiledExpression, CompiledLexicon, ExpressionCache,
    SeparatorSet, SubstitutionTable,
};

pub use normalizers::{normalize, registered_languages, NormalizedText, Normalizer};

pub use headless::{headless_check, headless_mask_string};
