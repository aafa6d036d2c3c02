//! Resource names
//!
//! A bundle resource is addressed by an explicit base name and extension.

use std::fmt;

use crate::error::StorageError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceName {
    base: String,
    extension: String,
}

impl ResourceName {
    pub fn new(base: &str, extension: &str) -> Result<Self, StorageError> {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        if base.is_empty() || extension.is_empty() {
            return Err(StorageError::InvalidName(format!("{}.{}", base, extension)));
        }
        if base.contains(['/', '\\']) || extension.contains(['/', '\\', '.']) {
            return Err(StorageError::InvalidName(format!("{}.{}", base, extension)));
        }
        Ok(Self {
            base: base.to_string(),
            extension: extension.to_string(),
        })
    }

    /// Split a file name on its last dot, so `archive.tar.gz` becomes
    /// (`archive.tar`, `gz`). Names without an extension are rejected.
    pub fn from_file_name(file_name: &str) -> Result<Self, StorageError> {
        match file_name.rsplit_once('.') {
            Some((base, extension)) => Self::new(base, extension),
            None => Err(StorageError::InvalidName(file_name.to_string())),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `base.extension`, the name the resource is stored under
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.base, self.extension)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.base, self.extension)
    }
}
