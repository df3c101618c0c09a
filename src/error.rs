//! Global error handling for code-zippy
//!
//! Every stage of the snapshot pipeline reports failures through
//! [`SnapshotError`]; nothing is retried or skipped, the first error ends the run.

use std::io;
use thiserror::Error;

/// Global error type for snapshot operations
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Directory traversal errors (permission denied, symlink loops, ...)
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Archive codec errors
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for snapshot operations
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Creates a SnapshotError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::SnapshotError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
