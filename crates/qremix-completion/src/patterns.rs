//! Solidity construct registry
//!
//! An ordered table of language constructs, each bound to a case-insensitive regex and a canned
//! multi-line suggestion. The built-in registry is compiled once per process and is read-only
//! afterwards; the registry stores matchers but never runs them. Match order and strategy
//! selection belong to [`crate::resolver`].
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

use crate::error::{CompletionError, CompletionResult};

/// Declarative description of a registry entry, compiled by [`PatternRegistry::build`]
#[derive(Debug, Clone, Copy)]
pub struct PatternSpec {
    pub key: &'static str,
    pub pattern: &'static str,
    pub suggestion: &'static str,
    /// When set, a match whose first capture group names a known function signature is
    /// skipped while the parameter list is still open, so the parameter-list heuristic can
    /// answer instead.
    pub defers_to_signatures: bool,
}

impl PatternSpec {
    pub const fn new(key: &'static str, pattern: &'static str, suggestion: &'static str) -> Self {
        Self {
            key,
            pattern,
            suggestion,
            defers_to_signatures: false,
        }
    }

    pub const fn deferring_to_signatures(mut self) -> Self {
        self.defers_to_signatures = true;
        self
    }
}

/// A compiled registry entry
#[derive(Debug, Clone)]
pub struct PatternEntry {
    key: String,
    matcher: Regex,
    suggestion: String,
    defers_to_signatures: bool,
}

impl PatternEntry {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }

    pub fn defers_to_signatures(&self) -> bool {
        self.defers_to_signatures
    }
}

/// Ordered registry of compiled construct patterns
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    entries: Vec<PatternEntry>,
}

static BUILTIN: Lazy<CompletionResult<PatternRegistry>> =
    Lazy::new(|| PatternRegistry::build(BUILTIN_PATTERNS));

impl PatternRegistry {
    /// Compile `specs` into a registry, preserving their order.
    ///
    /// # Errors
    ///
    /// - [`CompletionError::DuplicatePattern`] if two specs share a key
    /// - [`CompletionError::InvalidPattern`] if a pattern fails to compile
    pub fn build(specs: &[PatternSpec]) -> CompletionResult<Self> {
        let mut seen = HashSet::with_capacity(specs.len());
        let mut entries = Vec::with_capacity(specs.len());

        for spec in specs {
            if !seen.insert(spec.key) {
                return Err(CompletionError::DuplicatePattern {
                    key: spec.key.to_string(),
                });
            }

            let matcher = RegexBuilder::new(spec.pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| CompletionError::InvalidPattern {
                    key: spec.key.to_string(),
                    message: e.to_string(),
                })?;

            entries.push(PatternEntry {
                key: spec.key.to_string(),
                matcher,
                suggestion: spec.suggestion.to_string(),
                defers_to_signatures: spec.defers_to_signatures,
            });
        }

        Ok(Self { entries })
    }

    /// The process-wide built-in registry, compiled on first use
    pub fn builtin() -> CompletionResult<&'static PatternRegistry> {
        match &*BUILTIN {
            Ok(registry) => Ok(registry),
            Err(e) => Err(CompletionError::Internal(format!(
                "built-in pattern registry: {e}"
            ))),
        }
    }

    /// Entries in match order
    pub fn iter(&self) -> impl Iterator<Item = &PatternEntry> {
        self.entries.iter()
    }

    pub fn get(&self, key: &str) -> Option<&PatternEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(PatternEntry::key).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const CONTRACT_SKELETON: &str = r#"contract MyToken is ERC20, Ownable, Pausable {
    using SafeMath for uint256;

    uint256 private constant TOTAL_SUPPLY = 1000000 * 10**18;  // 1 million tokens
    uint256 public constant MAX_BUY_AMOUNT = 10000 * 10**18;   // 10k tokens

    mapping(address => bool) public isExcluded;
    mapping(address => uint256) public lastTransactionTime;

    event ExclusionSet(address indexed account, bool excluded);
    event MaxBuyExceeded(address indexed buyer, uint256 amount);

    constructor() ERC20("MyToken", "MTK") {
        _mint(msg.sender, TOTAL_SUPPLY);
        _setupRole(DEFAULT_ADMIN_ROLE, msg.sender);
    }
}"#;

const FUNCTION_SKELETON: &str = r#"function transfer(address recipient, uint256 amount) public virtual override returns (bool) {
    require(recipient != address(0), "Transfer to zero address");
    require(amount > 0, "Amount must be positive");
    require(amount <= balanceOf(msg.sender), "Insufficient balance");

    if (!isExcluded[msg.sender] && !isExcluded[recipient]) {
        require(amount <= MAX_BUY_AMOUNT, "Amount exceeds max buy");
        require(block.timestamp >= lastTransactionTime[recipient] + 1 hours, "Too frequent");
    }

    _transfer(msg.sender, recipient, amount);
    lastTransactionTime[recipient] = block.timestamp;

    emit Transfer(msg.sender, recipient, amount);
    return true;
}"#;

const EVENT_DECLARATIONS: &str = r#"event TokensBought(
    address indexed buyer,
    uint256 amount,
    uint256 cost,
    uint256 timestamp
);

event TokensSold(
    address indexed seller,
    uint256 amount,
    uint256 earnings,
    uint256 timestamp
);"#;

const MAPPING_DECLARATIONS: &str = r#"mapping(address => uint256) private _balances;
mapping(address => mapping(address => uint256)) private _allowances;
mapping(address => bool) public isWhitelisted;
mapping(address => uint256) public lastTradeTimestamp;"#;

const REQUIRE_STATEMENTS: &str = r#"require(!paused(), "Contract is paused");
require(msg.sender == owner(), "Caller is not owner");
require(amount <= maxTransactionAmount, "Exceeds max transaction");
require(block.timestamp >= cooldownTime[msg.sender], "Cooldown active");"#;

const IMPORT_BLOCK: &str = r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.0;

import "@openzeppelin/contracts/token/ERC20/ERC20.sol";
import "@openzeppelin/contracts/token/ERC20/extensions/ERC20Burnable.sol";
import "@openzeppelin/contracts/security/Pausable.sol";
import "@openzeppelin/contracts/access/AccessControl.sol";
import "@openzeppelin/contracts/utils/math/SafeMath.sol";"#;

const STRUCT_SKELETONS: &str = r#"struct TradeInfo {
    address trader;
    uint256 amount;
    uint256 price;
    uint256 timestamp;
    TradeType tradeType;
    bool isProcessed;
}

struct UserInfo {
    uint256 totalTrades;
    uint256 totalVolume;
    uint256 lastTradeTime;
    bool isWhitelisted;
    TradeInfo[] trades;
}"#;

const MODIFIER_SKELETONS: &str = r#"modifier onlyAdmin() {
    require(hasRole(DEFAULT_ADMIN_ROLE, msg.sender), "Caller is not admin");
    _;
}

modifier whenNotLocked() {
    require(!tradingLocked, "Trading is locked");
    _;
}

modifier validAmount(uint256 amount) {
    require(amount > 0, "Amount must be positive");
    require(amount <= maxTransactionAmount, "Exceeds max amount");
    _;
}"#;

const ENUM_SKELETON: &str = r#"enum Status {
    Pending,
    Active,
    Completed
}"#;

const PRAGMA_LINE: &str = "pragma solidity ^0.8.0;";

/// Built-in constructs, in match order
pub static BUILTIN_PATTERNS: &[PatternSpec] = &[
    PatternSpec::new("contract", r"contract\s+\w+\s*\{", CONTRACT_SKELETON),
    PatternSpec::new("function", r"function\s+(\w+)\s*\(", FUNCTION_SKELETON)
        .deferring_to_signatures(),
    PatternSpec::new("event", r"event\s+\w+\s*\(", EVENT_DECLARATIONS),
    PatternSpec::new("mapping", r"mapping\s*\(", MAPPING_DECLARATIONS),
    PatternSpec::new("require", r"require\s*\(", REQUIRE_STATEMENTS),
    PatternSpec::new("import", r"import\s+", IMPORT_BLOCK),
    PatternSpec::new("struct", r"struct\s+\w+\s*\{", STRUCT_SKELETONS),
    PatternSpec::new("modifier", r"modifier\s+\w+\s*\(", MODIFIER_SKELETONS),
    PatternSpec::new("enum", r"enum\s+\w+\s*\{", ENUM_SKELETON),
    PatternSpec::new("pragma", r"pragma\s+", PRAGMA_LINE),
];
