/// Completion engine facade
///
/// The engine is the single entry point used by transports. A request flows through:
///
/// 1. **Extraction**: loosely-typed fields are normalized into a [`CompletionContext`]
/// 2. **Cache lookup**: a hit on `(prompt, context)` short-circuits the rest
/// 3. **Resolution**: the [`SuggestionResolver`] pipeline picks a suggestion
/// 4. **Cache store**: the result, empty or not, is memoized
///
/// The engine never surfaces an error: any internal fault becomes an empty suggestion.
///
/// # Example
///
/// ```ignore
/// use qremix_completion::CompletionEngine;
/// use serde_json::json;
///
/// let engine = CompletionEngine::with_cache();
/// let suggestion = engine.resolve_fields("", &json!({ "currentWord": "pay" }));
/// assert_eq!(suggestion, "payable ");
/// ```
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::SuggestionCache;
use crate::config::EngineConfig;
use crate::context::ContextExtractor;
use crate::error::CompletionResult;
use crate::metrics::{CacheStats, OperationTimer};
use crate::resolver::SuggestionResolver;
use crate::types::{CompletionContext, CompletionRequest, CompletionResponse};

/// Composes extraction, caching and resolution
pub struct CompletionEngine {
    resolver: SuggestionResolver,
    cache: Option<Arc<SuggestionCache>>,
}

impl CompletionEngine {
    /// Create an engine from a resolver and an optional shared cache
    pub fn new(resolver: SuggestionResolver, cache: Option<Arc<SuggestionCache>>) -> Self {
        Self { resolver, cache }
    }

    /// Built-in strategies with a default-sized cache
    pub fn with_cache() -> Self {
        Self::new(
            SuggestionResolver::with_builtin_strategies(),
            Some(Arc::new(SuggestionCache::default())),
        )
    }

    /// Built-in strategies, every request resolved afresh
    pub fn without_cache() -> Self {
        Self::new(SuggestionResolver::with_builtin_strategies(), None)
    }

    /// Build an engine with the built-in strategies as described by `config`
    pub fn from_config(config: &EngineConfig) -> CompletionResult<Self> {
        let cache = if config.cache_enabled {
            Some(Arc::new(SuggestionCache::with_capacity(
                config.cache_capacity,
            )?))
        } else {
            None
        };

        Ok(Self::new(SuggestionResolver::with_builtin_strategies(), cache))
    }

    /// Resolve a suggestion for an already-extracted context; `""` means no suggestion
    pub fn resolve(&self, prompt: &str, context: &CompletionContext) -> String {
        let timer = OperationTimer::start();

        if let Some(cache) = &self.cache {
            if let Some(suggestion) = cache.get(prompt, context) {
                debug!(
                    elapsed_ms = timer.elapsed_ms(),
                    "Returning cached suggestion"
                );
                return suggestion;
            }
        }

        let resolution = self.resolver.resolve_detailed(context);
        let strategy = resolution
            .as_ref()
            .map(|r| r.strategy.as_str())
            .unwrap_or("none");
        let suggestion = resolution
            .as_ref()
            .map(|r| r.suggestion.clone())
            .unwrap_or_default();

        if let Some(cache) = &self.cache {
            cache.put(prompt, context, suggestion.clone());
        }

        info!(
            prompt_len = prompt.len(),
            strategy,
            suggestion_len = suggestion.len(),
            elapsed_ms = timer.elapsed_ms(),
            "Generated suggestion"
        );

        suggestion
    }

    /// Extract a context from raw editor fields, then resolve it
    pub fn resolve_fields(&self, prompt: &str, fields: &Value) -> String {
        let context = ContextExtractor::extract(fields);
        self.resolve(prompt, &context)
    }

    pub fn complete(&self, request: &CompletionRequest) -> CompletionResponse {
        CompletionResponse::new(self.resolve_fields(&request.prompt, &request.prompt_data))
    }

    /// Drop all memoized suggestions; a no-op when caching is disabled
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Cache statistics, or `None` when caching is disabled
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| cache.stats())
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::with_cache()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::SuggestionStrategy;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts how often the pipeline actually runs
    struct CountingStrategy {
        calls: Arc<AtomicUsize>,
    }

    impl SuggestionStrategy for CountingStrategy {
        fn name(&self) -> &str {
            "counting"
        }

        fn suggest(&self, context: &CompletionContext) -> CompletionResult<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(format!("seen {}", context.current_word)))
        }
    }

    fn counting_engine(cache: Option<Arc<SuggestionCache>>) -> (CompletionEngine, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut resolver = SuggestionResolver::new();
        resolver.register(Arc::new(CountingStrategy {
            calls: calls.clone(),
        }));
        (CompletionEngine::new(resolver, cache), calls)
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompletionEngine>();
    }

    #[test]
    fn test_resolve_fields() {
        let engine = CompletionEngine::with_cache();
        assert_eq!(engine.resolve_fields("", &json!({ "currentWord": "pay" })), "payable ");
        assert_eq!(engine.resolve_fields("", &json!({ "wordBeforeCursor": "xyz123" })), "");
    }

    #[test]
    fn test_complete() {
        let engine = CompletionEngine::without_cache();
        let request = CompletionRequest::new(
            "contract",
            json!({ "wordBeforeCursor": "function approve(" }),
        );
        assert_eq!(
            engine.complete(&request).suggestion,
            "address spender, uint256 amount"
        );
    }

    #[test]
    fn test_identical_requests_resolve_once() {
        let (engine, calls) = counting_engine(Some(Arc::new(SuggestionCache::default())));
        let context = CompletionContext::new().with_current_word("a");

        assert_eq!(engine.resolve("p", &context), "seen a");
        assert_eq!(engine.resolve("p", &context), "seen a");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        engine.resolve("other", &context);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_without_cache_always_resolves() {
        let (engine, calls) = counting_engine(None);
        let context = CompletionContext::new();

        engine.resolve("p", &context);
        engine.resolve("p", &context);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(engine.cache_stats().is_none());
    }

    #[test]
    fn test_clear_cache_forces_recompute() {
        let (engine, calls) = counting_engine(Some(Arc::new(SuggestionCache::default())));
        let context = CompletionContext::new();

        engine.resolve("p", &context);
        engine.clear_cache();
        engine.resolve("p", &context);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_results_are_cached() {
        let engine = CompletionEngine::with_cache();
        let context = CompletionContext::new().with_word_before_cursor("xyz123");

        assert_eq!(engine.resolve("", &context), "");
        assert_eq!(engine.resolve("", &context), "");

        let stats = engine.cache_stats().unwrap();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entry_count, 1);
    }

    #[test]
    fn test_from_config() {
        let engine = CompletionEngine::from_config(&EngineConfig::default().with_cache_capacity(3))
            .unwrap();
        assert_eq!(engine.cache_stats().unwrap().capacity, 3);

        let disabled = CompletionEngine::from_config(&EngineConfig::without_cache()).unwrap();
        assert!(!disabled.cache_enabled());

        let invalid = CompletionEngine::from_config(&EngineConfig::default().with_cache_capacity(0));
        assert!(invalid.is_err());
    }
}
