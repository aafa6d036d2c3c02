//! Error types
//!
//! Defines the error type returned by storage operations and the coarse
//! kind each error falls into.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Coarse classification of storage errors.
///
/// `AlreadyExists` is never carried by a `StorageError`: a save or folder
/// creation that finds its target present succeeds with a skip outcome, and
/// those outcomes report this kind through `skip_kind()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ResourceNotFound,
    AlreadyExists,
    IoFailure,
    UnsupportedFormat,
    InvalidName,
}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    /// Bundle resource could not be found
    ResourceNotFound(String),
    /// Copy source does not exist
    SourceNotFound(PathBuf),
    /// Image name has an extension no encoder is registered for
    UnsupportedFormat(String),
    InvalidName(String),
    /// Storage root could not be determined
    RootUnavailable(String),
    Encode(image::ImageError),
    /// Stored bytes could not be decoded as an image
    Decode(image::ImageError),
    IoError(io::Error),
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::ResourceNotFound(_) | StorageError::SourceNotFound(_) => {
                ErrorKind::ResourceNotFound
            }
            StorageError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            StorageError::InvalidName(_) => ErrorKind::InvalidName,
            StorageError::RootUnavailable(_)
            | StorageError::Encode(_)
            | StorageError::Decode(_)
            | StorageError::IoError(_) => ErrorKind::IoFailure,
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ResourceNotFound(r) => write!(f, "Resource not found in bundle: {}", r),
            StorageError::SourceNotFound(p) => {
                write!(f, "Source not found: {}", p.display())
            }
            StorageError::UnsupportedFormat(n) => write!(f, "Unsupported image format: {}", n),
            StorageError::InvalidName(n) => write!(f, "Invalid entry name: {}", n),
            StorageError::RootUnavailable(msg) => write!(f, "Storage root unavailable: {}", msg),
            StorageError::Encode(e) => write!(f, "Image encoding failed: {}", e),
            StorageError::Decode(e) => write!(f, "Image decoding failed: {}", e),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Encode(e) | StorageError::Decode(e) => Some(e),
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

impl From<image::ImageError> for StorageError {
    fn from(error: image::ImageError) -> Self {
        StorageError::Encode(error)
    }
}
