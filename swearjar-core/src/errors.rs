//! errors.rs - Custom error types for the swearjar-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `swearjar-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream `match` expressions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SwearjarError {
    /// The text handed to `check` was empty.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No lexicon or normalizer registered for language '{0}'")]
    UnknownLanguage(String),

    #[error("Malformed substitution entry for '{target}': {reason}")]
    MalformedSubstitutionTable { target: String, reason: String },

    #[error("Lexicon contains an empty term")]
    EmptyTerm,

    #[error("Term '{0}': length ({1}) exceeds maximum allowed ({2})")]
    TermTooLong(String, usize, usize),

    #[error("Failed to compile expression for term '{0}': {1}")]
    PatternCompilation(String, regex::Error),

    #[error("{0}")]
    CompilationFailed(String),

    #[error("Invalid detector option: {0}")]
    InvalidOption(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}

/// Convenience alias used throughout the core.
pub type Result<T, E = SwearjarError> = std::result::Result<T, E>;
