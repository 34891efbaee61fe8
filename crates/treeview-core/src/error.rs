//! Domain errors shared across the treeview crates.

use thiserror::Error;

/// Errors with a meaning callers may want to match on.
///
/// Everything else travels as `anyhow::Error` with context attached.
#[derive(Error, Debug)]
pub enum TreeViewError {
    /// The asset store has no file at this path.
    #[error("asset not found: {plugin}/{path}")]
    AssetNotFound { plugin: String, path: String },

    /// A position string outside `lhs`, `rhs`, `bhs`, `modal` (or aliases).
    #[error("invalid panel position: {0:?}")]
    InvalidPosition(String),

    /// The configuration parsed but holds an unusable value.
    #[error("invalid treeview config: {0}")]
    InvalidConfig(String),
}
