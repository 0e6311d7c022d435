//! Error types for the spell checker.
//!
//! - [`SpellError`]: construction and loading failures.
//! - [`InvariantError`]: returned by `check_invariants` when the table's
//!   internal bookkeeping is inconsistent.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SpellError {
    #[error("invalid table capacity {0}: must be greater than zero")]
    InvalidCapacity(usize),

    #[error("dictionary unreadable: {path}")]
    DictionaryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Error returned when a table invariant does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
