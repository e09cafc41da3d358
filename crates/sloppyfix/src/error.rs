//! Error kinds for the per-file fix pipeline.
//!
//! Each file's pass is all-or-nothing: any of these aborts the file with
//! no partial output, and none of them is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixError {
    /// Malformed input syntax; no rewrite is attempted for the file.
    #[error("{file}: parse error: {message}")]
    Parse { file: String, message: String },

    /// Serialization failed after mutation. Mutated arenas must always be
    /// printable, so this signals an internal invariant violation.
    #[error("{file}: print error: {message}")]
    Print { file: String, message: String },

    /// The import-grouping post-pass failed on already-printed output.
    #[error("{file}: format error: {message}")]
    Format { file: String, message: String },
}
