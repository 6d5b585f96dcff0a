//! compiler - Turns a lexicon into scan-ready compiled expressions.
//!
//! `pattern` builds the matcher for one term, this module applies it across a
//! whole lexicon and fixes the scanning order, and `cache` memoizes compiled
//! lexicons by content hash so the work is done once per distinct input.
//!
//! License: MIT OR APACHE 2.0

pub mod cache;
pub mod pattern;

use log::{debug, warn};
use std::collections::HashSet;

use crate::errors::{Result, SwearjarError};
use crate::normalizers::Normalizer;

pub use cache::{ExpressionCache, DEFAULT_CACHE_TTL};
pub use pattern::{
    compile_pattern, separator_expression, substitution_class, CompiledExpression, PatternCompiler,
    SeparatorSet, SubstitutionTable, MAX_TERM_LENGTH,
};

/// Every compiled expression of a lexicon, stored in scanning order: longest
/// canonical term first, ties broken alphabetically.
#[derive(Debug, Clone, Default)]
pub struct CompiledLexicon {
    expressions: Vec<CompiledExpression>,
}

impl CompiledLexicon {
    pub fn iter(&self) -> std::slice::Iter<'_, CompiledExpression> {
        self.expressions.iter()
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Looks up the expression compiled for a canonical term.
    pub fn get(&self, term: &str) -> Option<&CompiledExpression> {
        self.expressions.iter().find(|e| e.term == term)
    }

    /// Canonical terms in scanning order.
    pub fn terms(&self) -> Vec<&str> {
        self.expressions.iter().map(|e| e.term.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a CompiledLexicon {
    type Item = &'a CompiledExpression;
    type IntoIter = std::slice::Iter<'a, CompiledExpression>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Compiles every term of `lexicon` as written.
pub fn compile_lexicon(
    lexicon: &[String],
    substitutions: &SubstitutionTable,
    separators: &[String],
) -> Result<CompiledLexicon> {
    compile_lexicon_with(lexicon, substitutions, separators, &Normalizer::English)
}

/// Compiles every term of `lexicon` from its normalized form, keyed by the
/// canonical term, so terms and scanned text go through the same folding.
pub fn compile_lexicon_with(
    lexicon: &[String],
    substitutions: &SubstitutionTable,
    separators: &[String],
    normalizer: &Normalizer,
) -> Result<CompiledLexicon> {
    debug!("Starting compilation of {} terms with the {} normalizer.", lexicon.len(), normalizer);

    let compiler = PatternCompiler::new(substitutions, separators)?;
    let mut seen: HashSet<&str> = HashSet::with_capacity(lexicon.len());
    let mut expressions = Vec::with_capacity(lexicon.len());
    let mut errors: Vec<SwearjarError> = Vec::new();

    for term in lexicon {
        let term = term.trim();
        if !seen.insert(term) {
            warn!("Skipping duplicate lexicon term.");
            continue;
        }
        let normalized = normalizer.normalize(term);
        match compiler.compile_normalized(term, &normalized) {
            Ok(expression) => expressions.push(expression),
            Err(e) => errors.push(e),
        }
    }

    if errors.len() == 1 {
        return Err(errors.remove(0));
    }
    if !errors.is_empty() {
        let message = errors.iter().map(|e| e.to_string()).collect::<Vec<String>>().join("\n");
        return Err(SwearjarError::CompilationFailed(format!(
            "Failed to compile {} term(s):\n{}",
            errors.len(),
            message
        )));
    }

    expressions.sort_by(|a, b| b.term_len().cmp(&a.term_len()).then_with(|| a.term.cmp(&b.term)));
    debug!("Finished compiling lexicon. Total compiled: {}.", expressions.len());
    Ok(CompiledLexicon { expressions })
}
