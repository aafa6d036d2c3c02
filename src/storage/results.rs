//! Storage result types
//!
//! Outcomes returned by mutating storage operations. Skips are outcomes,
//! not errors.

use std::path::{Path, PathBuf};

use crate::error::ErrorKind;

/// Result of a folder creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderOutcome {
    Created(PathBuf),
    /// An entry with that name was already present; nothing was changed
    AlreadyExists(PathBuf),
}

/// Result of a folder deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(PathBuf),
    NotFound(PathBuf),
}

/// Result of a file or image save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { path: PathBuf, bytes: u64 },
    /// Destination already present; its contents were left untouched
    AlreadyExists(PathBuf),
}

impl FolderOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FolderOutcome::Created(p) | FolderOutcome::AlreadyExists(p) => p,
        }
    }

    /// `ErrorKind::AlreadyExists` when creation was skipped
    pub fn skip_kind(&self) -> Option<ErrorKind> {
        match self {
            FolderOutcome::Created(_) => None,
            FolderOutcome::AlreadyExists(_) => Some(ErrorKind::AlreadyExists),
        }
    }
}

impl DeleteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            DeleteOutcome::Deleted(p) | DeleteOutcome::NotFound(p) => p,
        }
    }
}

impl SaveOutcome {
    pub fn path(&self) -> &Path {
        match self {
            SaveOutcome::Saved { path, .. } | SaveOutcome::AlreadyExists(path) => path,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }

    /// `ErrorKind::AlreadyExists` when the save was skipped
    pub fn skip_kind(&self) -> Option<ErrorKind> {
        match self {
            SaveOutcome::Saved { .. } => None,
            SaveOutcome::AlreadyExists(_) => Some(ErrorKind::AlreadyExists),
        }
    }
}
