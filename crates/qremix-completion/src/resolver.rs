//! Suggestion resolution pipeline
//!
//! The resolver runs an ordered list of [`SuggestionStrategy`] values against a
//! [`CompletionContext`] and returns the first non-empty answer. The built-in order goes from
//! the narrowest signal to the broadest:
//!
//! 1. [`PrefixIdentifierStrategy`]: the current word is a prefix of a known keyword, type or
//!    function name
//! 2. [`RegistryPatternStrategy`]: the text before the cursor contains a recognized construct
//! 3. [`ParameterListStrategy`]: an unclosed parameter list
//! 4. [`DeclarationStrategy`]: a type followed by a space
//!
//! When nothing matches the suggestion is the empty string. Strategy errors are logged and
//! absorbed at this boundary, so [`SuggestionResolver::resolve`] is total.
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::CompletionResult;
use crate::patterns::PatternRegistry;
use crate::tables::{PrefixTable, FUNCTIONS, KEYWORDS, TYPES};
use crate::types::CompletionContext;

/// Parameter lists for well-known ERC20 operations, checked in order
const SIGNATURE_PARAMETERS: &[(&str, &str)] = &[
    ("transfer", "address recipient, uint256 amount"),
    ("approve", "address spender, uint256 amount"),
    ("mint", "address to, uint256 amount"),
    ("burn", "uint256 amount"),
];

const GENERIC_PARAMETERS: &str = "address account, uint256 amount";

/// Variable-name and visibility suffixes offered after a type, checked in order
const DECLARATION_SUFFIXES: &[(&str, &str)] = &[
    ("address", "public owner"),
    ("uint", "public totalSupply"),
    ("mapping", "(address => uint256) public balances"),
    ("string", "public name"),
    ("bool", "public isActive"),
];

/// Tailored parameter list if `text` mentions a known function signature
pub fn signature_parameters(text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();
    SIGNATURE_PARAMETERS
        .iter()
        .find(|(name, _)| text.contains(name))
        .map(|(_, params)| *params)
}

/// True when `text` opens a parameter list without closing it
pub fn has_open_parameter_list(text: &str) -> bool {
    text.contains('(') && !text.contains(')')
}

/// One step of the resolution pipeline
///
/// Implementations must be pure functions of the context. Returning `Ok(None)` (or an empty
/// string) passes control to the next strategy.
pub trait SuggestionStrategy: Send + Sync {
    /// Strategy name for logging and diagnostics
    fn name(&self) -> &str;

    /// Produce a suggestion for `context`, if this strategy applies
    fn suggest(&self, context: &CompletionContext) -> CompletionResult<Option<String>>;
}

/// Matches the current word as a case-insensitive prefix of a table identifier.
///
/// Tables are consulted in order and the first table with a hit wins, so with the default
/// tables keywords beat types and types beat function names.
pub struct PrefixIdentifierStrategy {
    tables: Vec<&'static PrefixTable>,
}

impl PrefixIdentifierStrategy {
    pub fn new(tables: Vec<&'static PrefixTable>) -> Self {
        Self { tables }
    }
}

impl Default for PrefixIdentifierStrategy {
    fn default() -> Self {
        Self::new(vec![&KEYWORDS, &TYPES, &FUNCTIONS])
    }
}

impl SuggestionStrategy for PrefixIdentifierStrategy {
    fn name(&self) -> &str {
        "prefix_identifier"
    }

    fn suggest(&self, context: &CompletionContext) -> CompletionResult<Option<String>> {
        if context.current_word.is_empty() {
            return Ok(None);
        }

        for table in &self.tables {
            if let Some((key, text)) = table.lookup(&context.current_word) {
                debug!(table = table.name(), key, "Prefix identifier match");
                return Ok(Some(text.to_string()));
            }
        }

        Ok(None)
    }
}

/// Searches the text before the cursor with each registry matcher, in registry order
pub struct RegistryPatternStrategy {
    registry: Option<Arc<PatternRegistry>>,
}

impl RegistryPatternStrategy {
    /// Use the process-wide built-in registry
    pub fn builtin() -> Self {
        Self { registry: None }
    }

    /// Use a caller-supplied registry
    pub fn with_registry(registry: Arc<PatternRegistry>) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    fn find(registry: &PatternRegistry, text: &str) -> Option<String> {
        for entry in registry.iter() {
            let Some(captures) = entry.matcher().captures(text) else {
                continue;
            };

            if entry.defers_to_signatures() && has_open_parameter_list(text) {
                let names_signature = captures
                    .get(1)
                    .and_then(|name| signature_parameters(name.as_str()))
                    .is_some();
                if names_signature {
                    debug!(key = entry.key(), "Pattern deferred to signature parameters");
                    continue;
                }
            }

            debug!(key = entry.key(), "Registry pattern match");
            return Some(entry.suggestion().to_string());
        }

        None
    }
}

impl Default for RegistryPatternStrategy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SuggestionStrategy for RegistryPatternStrategy {
    fn name(&self) -> &str {
        "registry_pattern"
    }

    fn suggest(&self, context: &CompletionContext) -> CompletionResult<Option<String>> {
        let text = &context.word_before_cursor;
        match &self.registry {
            Some(registry) => Ok(Self::find(registry, text)),
            None => Ok(Self::find(PatternRegistry::builtin()?, text)),
        }
    }
}

/// Suggests a parameter list when the text before the cursor has an unclosed `(`
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterListStrategy;

impl SuggestionStrategy for ParameterListStrategy {
    fn name(&self) -> &str {
        "parameter_list"
    }

    fn suggest(&self, context: &CompletionContext) -> CompletionResult<Option<String>> {
        let text = &context.word_before_cursor;
        if !has_open_parameter_list(text) {
            return Ok(None);
        }

        let params = signature_parameters(text).unwrap_or(GENERIC_PARAMETERS);
        Ok(Some(params.to_string()))
    }
}

/// Suggests a variable name and visibility after a type followed by a space
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationStrategy;

impl SuggestionStrategy for DeclarationStrategy {
    fn name(&self) -> &str {
        "declaration"
    }

    fn suggest(&self, context: &CompletionContext) -> CompletionResult<Option<String>> {
        let text = &context.word_before_cursor;
        if !text.contains(' ') {
            return Ok(None);
        }

        let text = text.to_lowercase();
        Ok(DECLARATION_SUFFIXES
            .iter()
            .find(|(type_name, _)| text.contains(type_name))
            .map(|(_, suffix)| suffix.to_string()))
    }
}

/// The suggestion produced by a resolver run, with the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub strategy: String,
    pub suggestion: String,
}

/// Ordered strategy pipeline
///
/// # Example
///
/// ```ignore
/// use qremix_completion::{CompletionContext, SuggestionResolver};
///
/// let resolver = SuggestionResolver::with_builtin_strategies();
/// let context = CompletionContext::new().with_current_word("pay");
/// assert_eq!(resolver.resolve(&context), "payable ");
/// ```
pub struct SuggestionResolver {
    strategies: Vec<Arc<dyn SuggestionStrategy>>,
}

impl SuggestionResolver {
    /// Create a resolver with no strategies; it always resolves to `""`
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Create a resolver with the four built-in strategies in priority order
    pub fn with_builtin_strategies() -> Self {
        let mut resolver = Self::new();
        resolver.register(Arc::new(PrefixIdentifierStrategy::default()));
        resolver.register(Arc::new(RegistryPatternStrategy::builtin()));
        resolver.register(Arc::new(ParameterListStrategy));
        resolver.register(Arc::new(DeclarationStrategy));
        resolver
    }

    /// Append a strategy; it runs after every strategy registered before it
    pub fn register(&mut self, strategy: Arc<dyn SuggestionStrategy>) {
        self.strategies.push(strategy);
    }

    pub fn strategy_names(&self) -> Vec<String> {
        self.strategies
            .iter()
            .map(|strategy| strategy.name().to_string())
            .collect()
    }

    /// Run the pipeline, surfacing the first strategy error
    pub fn try_resolve(&self, context: &CompletionContext) -> CompletionResult<Option<Resolution>> {
        for strategy in &self.strategies {
            match strategy.suggest(context)? {
                Some(suggestion) if !suggestion.is_empty() => {
                    return Ok(Some(Resolution {
                        strategy: strategy.name().to_string(),
                        suggestion,
                    }));
                }
                _ => continue,
            }
        }

        Ok(None)
    }

    /// Run the pipeline, absorbing errors into "no resolution"
    pub fn resolve_detailed(&self, context: &CompletionContext) -> Option<Resolution> {
        match self.try_resolve(context) {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!("Error generating suggestion: {}", e);
                None
            }
        }
    }

    /// Resolve a context to a suggestion; `""` means no suggestion
    pub fn resolve(&self, context: &CompletionContext) -> String {
        self.resolve_detailed(context)
            .map(|resolution| resolution.suggestion)
            .unwrap_or_default()
    }
}

impl Default for SuggestionResolver {
    fn default() -> Self {
        Self::with_builtin_strategies()
    }
}
