//! Storage helper
//!
//! Binds the storage operations to one storage root and bundle. Failures
//! are logged before being returned; lookups collapse every failure into
//! `None`.

use image::DynamicImage;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::bundle::{Bundle, ResourceName};
use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::error::handlers::handle_error;
use crate::media::DEFAULT_JPEG_QUALITY;
use crate::storage::operations;
use crate::storage::results::{DeleteOutcome, FolderOutcome, SaveOutcome};
use crate::storage::validation::resolve_entry_path;

#[derive(Debug, Clone)]
pub struct StorageHelper {
    root: PathBuf,
    bundle: Bundle,
    jpeg_quality: u8,
}

impl StorageHelper {
    /// Helper over an existing root directory
    pub fn new(root: impl Into<PathBuf>, bundle: Bundle) -> Self {
        Self {
            root: root.into(),
            bundle,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Build from configuration, creating the root when `create_root` is set
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let root = config.storage_root_path()?;
        let bundle = config.bundle()?;

        if config.create_root {
            std::fs::create_dir_all(&root).inspect_err(|e| {
                warn!("Failed to create storage root {}: {}", root.display(), e);
            })?;
        }
        info!(
            "Storage root: {} (bundle: {})",
            root.display(),
            bundle.root().display()
        );

        Ok(Self::new(root, bundle).with_jpeg_quality(config.jpeg_quality))
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn storage_root(&self) -> &Path {
        &self.root
    }

    pub fn bundle(&self) -> &Bundle {
        &self.bundle
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Resolve an entry name to its location without touching the disk
    pub fn entry_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        resolve_entry_path(&self.root, name)
    }

    pub fn create_folder(&self, folder_name: &str) -> Result<FolderOutcome, StorageError> {
        operations::create_folder(&self.root, folder_name)
            .inspect_err(|e| handle_error(&format!("Create folder {}", folder_name), e))
    }

    /// Remove a folder and its contents. Absent folders are left alone and
    /// reported as `DeleteOutcome::NotFound`.
    pub fn delete_folder(&self, folder_name: &str) -> Result<DeleteOutcome, StorageError> {
        operations::delete_folder(&self.root, folder_name)
            .inspect_err(|e| handle_error(&format!("Delete folder {}", folder_name), e))
    }

    /// Copy a bundled resource into storage under `base.extension`
    pub fn save_bundle_file(&self, resource: &ResourceName) -> Result<SaveOutcome, StorageError> {
        operations::save_bundle_file(&self.root, &self.bundle, resource)
            .inspect_err(|e| handle_error(&format!("Save bundle file {}", resource), e))
    }

    /// Copy an external file or directory tree (such as a completed
    /// download) into storage
    pub fn save_file_from(
        &self,
        file_name: &str,
        source: &Path,
    ) -> Result<SaveOutcome, StorageError> {
        operations::save_file_from(&self.root, file_name, source)
            .inspect_err(|e| handle_error(&format!("Save file {}", file_name), e))
    }

    /// Encode and store an image. `png` is lossless, `jpg` uses the
    /// configured quality; other extensions are rejected without writing.
    pub fn save_image(
        &self,
        image: &DynamicImage,
        image_name: &str,
    ) -> Result<SaveOutcome, StorageError> {
        operations::save_image(&self.root, image, image_name, self.jpeg_quality)
            .inspect_err(|e| handle_error(&format!("Save image {}", image_name), e))
    }

    pub fn get_file(&self, file_name: &str) -> Option<PathBuf> {
        match operations::get_file(&self.root, file_name) {
            Ok(path) => path,
            Err(e) => {
                handle_error(&format!("Get file {}", file_name), &e);
                None
            }
        }
    }

    /// Decoded image, or `None` if the entry is missing or unreadable
    pub fn get_image(&self, image_name: &str) -> Option<DynamicImage> {
        match operations::get_image(&self.root, image_name) {
            Ok(image) => image,
            Err(e) => {
                handle_error(&format!("Get image {}", image_name), &e);
                None
            }
        }
    }
}
