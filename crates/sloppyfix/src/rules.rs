//! The data-driven rewrite rule table.
//!
//! A rule maps a deprecated qualified call (`from_path`'s local name plus
//! `from_func`) to its replacement (`to_path` imported under `to_alias`,
//! calling `to_func`). The table is loaded once and read-only during a
//! pass; additional migrations only need new table rows, not new matcher
//! or rewriter logic.

/// One (source → target) call migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    /// Import path the deprecated call is qualified through.
    pub from_path: String,
    /// Deprecated function name on the source package.
    pub from_func: String,
    /// Replacement import path.
    pub to_path: String,
    /// Canonical alias the replacement path must be bound to; overrides
    /// any alias the file already uses for that path.
    pub to_alias: String,
    /// Replacement function name.
    pub to_func: String,
}

impl RewriteRule {
    pub fn new(
        from_path: &str,
        from_func: &str,
        to_path: &str,
        to_alias: &str,
        to_func: &str,
    ) -> Self {
        Self {
            from_path: from_path.to_owned(),
            from_func: from_func.to_owned(),
            to_path: to_path.to_owned(),
            to_alias: to_alias.to_owned(),
            to_func: to_func.to_owned(),
        }
    }
}

/// Ordered, immutable rule table. Safe to share across parallel per-file
/// pipelines.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// The fixed net-parsing migration: `net.ParseIP` and `net.ParseCIDR`
    /// are strict about leading zeros since Go 1.17, so callers that must
    /// keep the old behavior move to the sloppy variants in
    /// `k8s.io/utils/net`.
    pub fn netparse() -> Self {
        Self::new(vec![
            RewriteRule::new(
                "net",
                "ParseIP",
                "k8s.io/utils/net",
                "netutils",
                "ParseIPSloppy",
            ),
            RewriteRule::new(
                "net",
                "ParseCIDR",
                "k8s.io/utils/net",
                "netutils",
                "ParseCIDRSloppy",
            ),
        ])
    }

    pub fn as_slice(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
