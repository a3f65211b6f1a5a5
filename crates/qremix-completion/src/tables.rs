//! Solidity identifier tables for prefix completion
//!
//! Three ordered tables map a short identifier to the text inserted when the word under the
//! cursor is a prefix of that identifier. Order matters: the first matching entry of a table
//! wins, and the resolver consults the keyword table before the type table before the function
//! table.

/// An ordered, immutable identifier → completion table
#[derive(Debug, Clone, Copy)]
pub struct PrefixTable {
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

impl PrefixTable {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { name, entries }
    }

    /// Table name, used in logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Find the first entry whose identifier starts with `word`, ignoring case.
    ///
    /// Returns `None` for an empty `word`.
    pub fn lookup(&self, word: &str) -> Option<(&'static str, &'static str)> {
        if word.is_empty() {
            return None;
        }

        let word = word.to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| key.to_lowercase().starts_with(&word))
            .copied()
    }

    /// Completion text for an exact identifier
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, text)| *text)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Modifiers, visibility and data-location keywords
pub static KEYWORDS: PrefixTable = PrefixTable::new(
    "keyword",
    &[
        ("view", "view returns "),
        ("pure", "pure returns "),
        ("payable", "payable "),
        ("memory", "memory "),
        ("storage", "storage "),
        ("calldata", "calldata "),
        ("public", "public "),
        ("private", "private "),
        ("internal", "internal "),
        ("external", "external "),
        ("returns", "returns "),
        ("virtual", "virtual "),
        ("override", "override "),
        ("constant", "constant "),
        ("immutable", "immutable "),
    ],
);

/// Elementary and common composite types
pub static TYPES: PrefixTable = PrefixTable::new(
    "type",
    &[
        ("uint", "uint256 "),
        ("uint256", "uint256 "),
        ("address", "address "),
        ("bool", "bool "),
        ("string", "string "),
        ("bytes", "bytes "),
        ("bytes32", "bytes32 "),
        ("mapping", "mapping(address => uint256) "),
        ("array", "uint256[] "),
    ],
);

const CONSTRUCTOR_BODY: &str = r#"constructor(string memory name_, string memory symbol_) ERC20(name_, symbol_) {
    _mint(msg.sender, TOTAL_SUPPLY);
}"#;

const TRANSFER_BODY: &str = r#"function transfer(address recipient, uint256 amount) public virtual override returns (bool) {
    require(recipient != address(0), "Transfer to zero address");
    require(amount <= balanceOf(msg.sender), "Insufficient balance");
    _transfer(msg.sender, recipient, amount);
    return true;
}"#;

const APPROVE_BODY: &str = r#"function approve(address spender, uint256 amount) public virtual override returns (bool) {
    require(spender != address(0), "Approve to zero address");
    _approve(msg.sender, spender, amount);
    return true;
}"#;

const MINT_BODY: &str = r#"function mint(address to, uint256 amount) public onlyOwner {
    require(to != address(0), "Mint to zero address");
    _mint(to, amount);
}"#;

const BURN_BODY: &str = r#"function burn(uint256 amount) public virtual {
    require(amount <= balanceOf(msg.sender), "Burn amount exceeds balance");
    _burn(msg.sender, amount);
}"#;

/// ERC20-style function bodies keyed by function name
pub static FUNCTIONS: PrefixTable = PrefixTable::new(
    "function",
    &[
        ("constructor", CONSTRUCTOR_BODY),
        ("transfer", TRANSFER_BODY),
        ("approve", APPROVE_BODY),
        ("mint", MINT_BODY),
        ("burn", BURN_BODY),
    ],
);
