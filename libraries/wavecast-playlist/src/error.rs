//! Error types for playlist indexing

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scan root not found: {0}")]
    RootNotFound(String),

    #[error("Invalid scan root: {0}")]
    InvalidRoot(String),

    #[error("Scan root unreadable: {path}: {source}")]
    RootUnreadable {
        path: String,
        source: std::io::Error,
    },
}
