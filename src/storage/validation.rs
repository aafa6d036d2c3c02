//! Entry name validation
//!
//! Keeps every resolved path inside the storage root.

use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Entries are either `file` or `folder/file`
pub const MAX_ENTRY_DEPTH: usize = 2;

/// Validate an entry name relative to the storage root
pub fn validate_entry_name(name: &str) -> Result<(), StorageError> {
    validate_with_depth(name, MAX_ENTRY_DEPTH)
}

/// Validate a folder name, which must be a single path component
pub fn validate_folder_name(name: &str) -> Result<(), StorageError> {
    validate_with_depth(name, 1)
}

fn validate_with_depth(name: &str, max_depth: usize) -> Result<(), StorageError> {
    if name.trim().is_empty() {
        return Err(StorageError::InvalidName("Empty name".into()));
    }
    if name.contains('\0') {
        return Err(StorageError::InvalidName(name.escape_default().to_string()));
    }

    let mut depth = 0;
    for component in Path::new(name).components() {
        match component {
            Component::Normal(_) => depth += 1,
            // "./a" is tolerated, anything climbing or anchoring is not
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(StorageError::InvalidName(name.to_string()));
            }
        }
    }

    if depth == 0 || depth > max_depth {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Resolve a validated entry name to its path under `root`
pub fn resolve_entry_path(root: &Path, name: &str) -> Result<PathBuf, StorageError> {
    validate_entry_name(name)?;
    Ok(root.join(name))
}

/// Resolve a validated folder name to its path under `root`
pub fn resolve_folder_path(root: &Path, name: &str) -> Result<PathBuf, StorageError> {
    validate_folder_name(name)?;
    Ok(root.join(name))
}
