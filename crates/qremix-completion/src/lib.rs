//! QRemix Completion Engine
//!
//! Context-aware Solidity completion: given the text around the cursor, pick the snippet most
//! likely to complete the current token or statement, with no network access.
//!
//! # Architecture
//!
//! 1. **Context extraction** ([`ContextExtractor`]): normalize loosely-typed editor fields
//! 2. **Identifier tables** ([`tables`]): keyword, type and function prefix completion
//! 3. **Pattern registry** ([`PatternRegistry`]): regex-matched construct skeletons
//! 4. **Resolver** ([`SuggestionResolver`]): ordered strategy pipeline, first answer wins
//! 5. **Result cache** ([`SuggestionCache`]): bounded LRU keyed by prompt and context
//! 6. **Engine** ([`CompletionEngine`]): the facade tying the above together
//!
//! # Example
//!
//! ```ignore
//! use qremix_completion::CompletionEngine;
//! use serde_json::json;
//!
//! let engine = CompletionEngine::with_cache();
//! let suggestion = engine.resolve_fields("", &json!({ "wordBeforeCursor": "mapping(" }));
//! assert!(suggestion.starts_with("mapping(address => uint256)"));
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod patterns;
pub mod resolver;
pub mod tables;
pub mod types;

pub use cache::{SuggestionCache, DEFAULT_CACHE_CAPACITY};
pub use config::{ConfigFormat, ConfigLoader, EngineConfig};
pub use context::ContextExtractor;
pub use engine::CompletionEngine;
pub use error::{CompletionError, CompletionResult};
pub use metrics::{CacheMetrics, CacheStats, OperationTimer};
pub use patterns::{PatternEntry, PatternRegistry, PatternSpec, BUILTIN_PATTERNS};
pub use resolver::{
    has_open_parameter_list, signature_parameters, DeclarationStrategy, ParameterListStrategy,
    PrefixIdentifierStrategy, RegistryPatternStrategy, Resolution, SuggestionResolver,
    SuggestionStrategy,
};
pub use tables::{PrefixTable, FUNCTIONS, KEYWORDS, TYPES};
pub use types::{CompletionContext, CompletionRequest, CompletionResponse};
