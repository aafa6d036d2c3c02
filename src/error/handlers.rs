//! Error handlers
//!
//! Turns storage errors into log lines before they are handed back to the caller.

use crate::error::types::{ErrorKind, StorageError};
use log::{Level, log};

/// Log a storage error raised by `operation`
pub fn handle_error(operation: &str, err: &StorageError) {
    match log_level(err) {
        Level::Error => log!(Level::Error, "{} failed: {}", operation, err),
        level => log!(level, "{} rejected: {}", operation, err),
    }
}

/// Level a storage error is logged at: caller input and unreadable stored
/// images are warnings, file system failures are errors
pub fn log_level(err: &StorageError) -> Level {
    if is_caller_error(err) || matches!(err, StorageError::Decode(_)) {
        Level::Warn
    } else {
        Level::Error
    }
}

/// Whether the error stems from caller input rather than the file system
pub fn is_caller_error(err: &StorageError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::InvalidName | ErrorKind::UnsupportedFormat | ErrorKind::ResourceNotFound
    )
}
