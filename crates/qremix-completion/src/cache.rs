//! Bounded LRU memoization of resolved suggestions
//!
//! Entries are keyed by the raw prompt together with the canonical serialization of the
//! extracted context. All access goes through one mutex; a lookup refreshes recency, so the
//! lock is taken for reads as well as writes.
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use tracing::{debug, warn};

use crate::error::{CompletionError, CompletionResult};
use crate::metrics::{CacheMetrics, CacheStats};
use crate::types::CompletionContext;

/// Default number of cached suggestions
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

type CacheKey = (String, String);

/// Thread-safe LRU cache of suggestions
pub struct SuggestionCache {
    entries: Mutex<LruCache<CacheKey, String>>,
    metrics: CacheMetrics,
}

impl SuggestionCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            metrics: CacheMetrics::new(),
        }
    }

    /// Create a cache holding at most `capacity` suggestions
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Config`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> CompletionResult<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            CompletionError::Config("cache capacity must be greater than 0".to_string())
        })?;
        Ok(Self::new(capacity))
    }

    /// Look up a previously stored suggestion, marking it most recently used
    pub fn get(&self, prompt: &str, context: &CompletionContext) -> Option<String> {
        let key = match cache_key(prompt, context) {
            Ok(key) => key,
            Err(e) => {
                warn!("Skipping cache lookup: {}", e);
                return None;
            }
        };

        let hit = self.entries.lock().get(&key).cloned();
        match hit {
            Some(suggestion) => {
                self.metrics.record_hit();
                debug!(prompt_len = prompt.len(), "Suggestion cache hit");
                Some(suggestion)
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    /// Store a suggestion, evicting the least recently used entry when full
    pub fn put(&self, prompt: &str, context: &CompletionContext, suggestion: impl Into<String>) {
        let key = match cache_key(prompt, context) {
            Ok(key) => key,
            Err(e) => {
                warn!("Skipping cache store: {}", e);
                return;
            }
        };

        let displaced = self.entries.lock().push(key.clone(), suggestion.into());
        self.metrics.record_insertion();

        // push hands back the old value for an existing key as well as an evicted entry
        if let Some((old_key, _)) = displaced {
            if old_key != key {
                self.metrics.record_eviction();
                debug!("Suggestion cache evicted least recently used entry");
            }
        }
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.metrics.record_clear();
        debug!("Suggestion cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        let (len, cap) = {
            let entries = self.entries.lock();
            (entries.len(), entries.cap().get())
        };
        self.metrics.snapshot(len, cap)
    }
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

impl std::fmt::Debug for SuggestionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

fn cache_key(prompt: &str, context: &CompletionContext) -> CompletionResult<CacheKey> {
    Ok((prompt.to_string(), context.canonical_key()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> CompletionContext {
        CompletionContext::new().with_current_word(text)
    }

    #[test]
    fn test_get_after_put() {
        let cache = SuggestionCache::default();
        cache.put("p", &word("pay"), "payable ");

        assert_eq!(cache.get("p", &word("pay")).as_deref(), Some("payable "));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_includes_prompt_and_context() {
        let cache = SuggestionCache::default();
        cache.put("p", &word("pay"), "payable ");

        assert!(cache.get("q", &word("pay")).is_none());
        assert!(cache.get("p", &word("pub")).is_none());
    }

    #[test]
    fn test_empty_suggestion_is_cached() {
        let cache = SuggestionCache::default();
        cache.put("p", &word("xyz"), "");
        assert_eq!(cache.get("p", &word("xyz")).as_deref(), Some(""));
    }

    #[test]
    fn test_lru_eviction() {
        let cache = SuggestionCache::with_capacity(2).unwrap();
        cache.put("p", &word("a"), "1");
        cache.put("p", &word("b"), "2");

        // touch "a" so "b" becomes least recently used
        assert!(cache.get("p", &word("a")).is_some());
        cache.put("p", &word("c"), "3");

        assert_eq!(cache.len(), 2);
        assert!(cache.get("p", &word("b")).is_none());
        assert!(cache.get("p", &word("a")).is_some());
        assert!(cache.get("p", &word("c")).is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_overwrite_is_not_eviction() {
        let cache = SuggestionCache::with_capacity(2).unwrap();
        cache.put("p", &word("a"), "1");
        cache.put("p", &word("a"), "2");

        assert_eq!(cache.get("p", &word("a")).as_deref(), Some("2"));
        let stats = cache.stats();
        assert_eq!(stats.insertions, 2);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_clear() {
        let cache = SuggestionCache::default();
        cache.put("p", &word("a"), "1");
        cache.put("p", &word("b"), "2");
        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.get("p", &word("a")).is_none());
        assert_eq!(cache.stats().clears, 1);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            SuggestionCache::with_capacity(0),
            Err(CompletionError::Config(_))
        ));
    }

    #[test]
    fn test_stats() {
        let cache = SuggestionCache::with_capacity(10).unwrap();
        assert!(cache.get("p", &word("a")).is_none());
        cache.put("p", &word("a"), "1");
        assert!(cache.get("p", &word("a")).is_some());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entry_count, 1);
        assert_eq!(stats.capacity, 10);
        assert_eq!(stats.hit_rate(), 50.0);
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(SuggestionCache::default().capacity(), DEFAULT_CACHE_CAPACITY);
    }
}
