//! Store error types.

use thiserror::Error;

/// Errors specific to on-disk stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key cannot be used as a file name.
    #[error("invalid store key '{0}': use letters, digits, '-', '_' or '.', not starting with '.'")]
    InvalidKey(String),

    /// The stored file exists but is not a snapshot.
    #[error("corrupt snapshot at {path}: {message}")]
    Corrupt { path: String, message: String },
}
