//! Application resource bundle
//!
//! Read-only directory of resources packaged with the application.

mod resource;

pub use resource::ResourceName;

use log::debug;
use std::path::{Path, PathBuf};

use crate::storage::filesystem::file_exists;

#[derive(Debug, Clone)]
pub struct Bundle {
    root: PathBuf,
}

impl Bundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `resources/` next to the running executable
    pub fn beside_executable() -> Option<Self> {
        let exe_path = std::env::current_exe().ok()?;
        let exe_dir = exe_path.parent()?;
        Some(Self::new(exe_dir.join("resources")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the resource if the bundle contains it as a regular file
    pub fn resource_path(&self, resource: &ResourceName) -> Option<PathBuf> {
        let path = self.root.join(resource.file_name());
        if file_exists(&path) {
            Some(path)
        } else {
            debug!("Resource {} not in bundle {}", resource, self.root.display());
            None
        }
    }
}
