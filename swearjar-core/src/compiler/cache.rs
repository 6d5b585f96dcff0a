//! cache.rs - Memoizes compiled lexicons by content hash.
//!
//! Compiling a lexicon means assembling and building one regex per term, so
//! the result is kept in an `ExpressionCache` keyed by a hash of everything
//! that went into it. The cache is an explicit object owned by the caller
//! rather than process-wide state. Entries expire after a TTL and the whole
//! cache can be dropped with [`ExpressionCache::invalidate_all`].
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::compiler::CompiledLexicon;
use crate::errors::Result;

/// Default lifetime of a cached lexicon: 24 hours.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
struct CacheEntry {
    lexicon: Arc<CompiledLexicon>,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

/// A thread-safe cache of compiled lexicons.
///
/// Entries hold immutable `Arc`s, so a poisoned lock cannot leave a
/// half-written entry behind; the guard is recovered instead of failing.
#[derive(Debug)]
pub struct ExpressionCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for ExpressionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { entries: RwLock::new(HashMap::new()), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the live entry for `key`, if any.
    pub fn get(&self, key: &str) -> Option<Arc<CompiledLexicon>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| Arc::clone(&entry.lexicon))
    }

    /// Returns the cached lexicon for `key`, or runs `build` and caches it.
    ///
    /// At most one build runs per key: the write lock is held across the build
    /// and the entry is re-checked after acquiring it.
    pub fn get_or_compile<F>(&self, key: &str, build: F) -> Result<Arc<CompiledLexicon>>
    where
        F: FnOnce() -> Result<CompiledLexicon>,
    {
        if let Some(lexicon) = self.get(key) {
            debug!("Serving compiled lexicon from cache for key: {}", key);
            return Ok(lexicon);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get(key) {
            if !entry.is_expired(self.ttl) {
                debug!("Lexicon for key {} was compiled while waiting for the lock.", key);
                return Ok(Arc::clone(&entry.lexicon));
            }
        }

        debug!("Compiled lexicon not found in cache. Compiling now.");
        let lexicon = Arc::new(build()?);
        entries.insert(
            key.to_string(),
            CacheEntry { lexicon: Arc::clone(&lexicon), inserted_at: Instant::now() },
        );
        debug!("Successfully compiled and cached lexicon for key: {}", key);
        Ok(lexicon)
    }

    /// Drops every cached lexicon.
    pub fn invalidate_all(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        debug!("Clearing {} cached lexicon(s).", entries.len());
        entries.clear();
    }

    /// Drops expired entries and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        before - entries.len()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{compile_lexicon, SubstitutionTable};
    use crate::errors::SwearjarError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn build_small() -> Result<CompiledLexicon> {
        compile_lexicon(&["damn".to_string()], &SubstitutionTable::new(), &[])
    }

    #[test]
    fn test_builds_once_per_key() {
        let cache = ExpressionCache::new();
        let builds = AtomicUsize::new(0);
        for _ in 0..3 {
            cache
                .get_or_compile("k", || {
                    builds.fetch_add(1, Ordering::SeqCst);
                    build_small()
                })
                .unwrap();
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entries_are_rebuilt() {
        let cache = ExpressionCache::with_ttl(Duration::ZERO);
        let builds = AtomicUsize::new(0);
        for _ in 0..2 {
            cache
                .get_or_compile("k", || {
                    builds.fetch_add(1, Ordering::SeqCst);
                    build_small()
                })
                .unwrap();
        }
        assert_eq!(builds.load(Ordering::SeqCst), 2);
        assert!(cache.get("k").is_none());
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_all() {
        let cache = ExpressionCache::new();
        cache.get_or_compile("a", build_small).unwrap();
        cache.get_or_compile("b", build_small).unwrap();
        assert_eq!(cache.len(), 2);
        cache.invalidate_all();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }

    #[test]
    fn test_failed_build_is_not_cached() {
        let cache = ExpressionCache::new();
        let err = cache.get_or_compile("bad", || Err(SwearjarError::EmptyTerm)).unwrap_err();
        assert!(matches!(err, SwearjarError::EmptyTerm));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(ExpressionCache::new());
        let builds = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let builds = Arc::clone(&builds);
                std::thread::spawn(move || {
                    cache
                        .get_or_compile("shared", || {
                            builds.fetch_add(1, Ordering::SeqCst);
                            build_small()
                        })
                        .map(|l| l.len())
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().unwrap(), 1);
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }
}
