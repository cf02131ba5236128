//! Error types for tree navigation and assignment.

use std::convert::Infallible;
use thiserror::Error;

/// Errors surfaced by tree operations.
///
/// Most misses (absent keys, absent move sources) are not errors; they are
/// reported as `false`/`None` or absorbed as no-ops. These variants cover the
/// cases that must reach the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A path tried to descend through a leaf.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// A value that is neither a scalar nor a mapping.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A move whose destination lies beneath its own source.
    #[error("Cannot move '{from}' into its own descendant '{to}'")]
    MoveIntoDescendant { from: String, to: String },

    /// An operation that needs at least one key part got none.
    #[error("Path is empty")]
    EmptyPath,
}

impl From<Infallible> for TreeError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
