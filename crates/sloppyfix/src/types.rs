//! Shared type definitions for the sloppyfix crate.

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// An insertion-ordered set using the fast FxHash hasher.
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Placement of an import path within the printed import block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportGroup {
    /// Go standard library packages (e.g. net, fmt, net/http)
    Standard,

    /// External modules fetched by the module system (e.g. k8s.io/utils/net)
    ThirdParty,
}

impl ImportGroup {
    /// Classify an import path the way goimports does: a first path
    /// segment containing a dot names an external module host, anything
    /// else is standard library.
    pub fn classify(path: &str) -> Self {
        let first = path.split('/').next().unwrap_or(path);
        if first.contains('.') {
            ImportGroup::ThirdParty
        } else {
            ImportGroup::Standard
        }
    }
}

impl std::fmt::Display for ImportGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportGroup::Standard => write!(f, "standard"),
            ImportGroup::ThirdParty => write!(f, "third-party"),
        }
    }
}
