//! Source-to-source rewriter for deprecated Go net parsing calls.
//!
//! Parses a Go file with tree-sitter, rewrites call sites matched by a
//! [`rules::RuleSet`] (by default `net.ParseIP` → `netutils.ParseIPSloppy`
//! and `net.ParseCIDR` → `netutils.ParseCIDRSloppy`), reconciles the
//! import block, and re-emits canonical text. [`pipeline::fix_source`] is
//! the entry point; the rewrite is idempotent and leaves files without
//! matches byte-identical.

pub mod error;
pub mod format;
pub mod imports;
pub mod matcher;
pub mod pipeline;
pub mod printer;
pub mod rewriter;
pub mod rules;
pub mod syntax;
pub mod types;

pub use error::FixError;
pub use pipeline::{FixOutput, fix_file, fix_source};
pub use rules::{RewriteRule, RuleSet};
