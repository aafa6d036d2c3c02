//! Storage operations
//!
//! Folder management, file copies and image persistence relative to a
//! storage root. Every operation resolves its target first, then performs a
//! single file system primitive.

use image::DynamicImage;
use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::bundle::{Bundle, ResourceName};
use crate::error::StorageError;
use crate::media::{self, ImageEncoding};
use crate::storage::filesystem::{self, directory_exists, entry_exists};
use crate::storage::results::{DeleteOutcome, FolderOutcome, SaveOutcome};
use crate::storage::validation::{resolve_entry_path, resolve_folder_path};

/// Creates a folder directly under the root unless an entry of that name exists
pub fn create_folder(root: &Path, folder_name: &str) -> Result<FolderOutcome, StorageError> {
    let folder_path = resolve_folder_path(root, folder_name)?;

    if entry_exists(&folder_path) {
        info!("Folder {} already present at {}", folder_name, folder_path.display());
        return Ok(FolderOutcome::AlreadyExists(folder_path));
    }

    match filesystem::create_directory(&folder_path) {
        Ok(()) => {
            info!("Folder {} created at {}", folder_name, folder_path.display());
            Ok(FolderOutcome::Created(folder_path))
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Ok(FolderOutcome::AlreadyExists(folder_path))
        }
        Err(e) => Err(StorageError::from(e)),
    }
}

/// Deletes a folder and its contents when it exists
pub fn delete_folder(root: &Path, folder_name: &str) -> Result<DeleteOutcome, StorageError> {
    let folder_path = resolve_folder_path(root, folder_name)?;

    if !entry_exists(&folder_path) {
        info!("Folder {} not present, nothing to delete", folder_name);
        return Ok(DeleteOutcome::NotFound(folder_path));
    }

    filesystem::remove_entry(&folder_path)?;
    info!("Folder {} deleted", folder_name);
    Ok(DeleteOutcome::Deleted(folder_path))
}

/// Copies a bundled resource into the root under `base.extension`
pub fn save_bundle_file(
    root: &Path,
    bundle: &Bundle,
    resource: &ResourceName,
) -> Result<SaveOutcome, StorageError> {
    let source = bundle
        .resource_path(resource)
        .ok_or_else(|| StorageError::ResourceNotFound(resource.to_string()))?;

    copy_into(root, &resource.file_name(), &source)
}

/// Copies a file or directory tree from any location (e.g. a finished
/// download) into the root
pub fn save_file_from(
    root: &Path,
    file_name: &str,
    source: &Path,
) -> Result<SaveOutcome, StorageError> {
    if !entry_exists(source) {
        return Err(StorageError::SourceNotFound(source.to_path_buf()));
    }

    copy_into(root, file_name, source)
}

fn copy_into(root: &Path, file_name: &str, source: &Path) -> Result<SaveOutcome, StorageError> {
    let destination = resolve_entry_path(root, file_name)?;

    if entry_exists(&destination) {
        warn!("File {} already exists in storage, skipping copy", file_name);
        return Ok(SaveOutcome::AlreadyExists(destination));
    }

    let copied = if directory_exists(source) {
        filesystem::copy_tree_new(source, &destination)
    } else {
        filesystem::copy_new(source, &destination)
    };

    match copied {
        Ok(bytes) => {
            info!(
                "Copied {} to storage ({} bytes) at {}",
                file_name,
                bytes,
                destination.display()
            );
            Ok(SaveOutcome::Saved {
                path: destination,
                bytes,
            })
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            warn!("File {} appeared during copy, skipping", file_name);
            Ok(SaveOutcome::AlreadyExists(destination))
        }
        Err(e) => Err(StorageError::from(e)),
    }
}

/// Encodes `image` according to the extension of `image_name` and writes it
pub fn save_image(
    root: &Path,
    image: &DynamicImage,
    image_name: &str,
    jpeg_quality: u8,
) -> Result<SaveOutcome, StorageError> {
    let destination = resolve_entry_path(root, image_name)?;
    let encoding = ImageEncoding::for_name(image_name, jpeg_quality)?;

    if entry_exists(&destination) {
        warn!("Image {} already exists in storage, skipping save", image_name);
        return Ok(SaveOutcome::AlreadyExists(destination));
    }

    let data = media::encode(image, encoding)?;

    match filesystem::write_new(&destination, &data) {
        Ok(()) => {
            info!(
                "Saved image {} ({:?}, {} bytes) at {}",
                image_name,
                encoding,
                data.len(),
                destination.display()
            );
            Ok(SaveOutcome::Saved {
                path: destination,
                bytes: data.len() as u64,
            })
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Ok(SaveOutcome::AlreadyExists(destination))
        }
        Err(e) => Err(StorageError::from(e)),
    }
}

/// Returns the path of an existing entry
pub fn get_file(root: &Path, file_name: &str) -> Result<Option<PathBuf>, StorageError> {
    let path = resolve_entry_path(root, file_name)?;
    Ok(entry_exists(&path).then_some(path))
}

/// Reads and decodes a stored image. A missing entry is `Ok(None)`.
pub fn get_image(root: &Path, image_name: &str) -> Result<Option<DynamicImage>, StorageError> {
    let Some(path) = get_file(root, image_name)? else {
        return Ok(None);
    };

    let data = fs::read(&path)?;
    media::decode(&data).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 3, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn test_create_folder_skips_existing_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("taken"), b"file").unwrap();

        let outcome = create_folder(temp.path(), "taken").unwrap();
        assert_eq!(outcome, FolderOutcome::AlreadyExists(temp.path().join("taken")));
        assert!(temp.path().join("taken").is_file());
    }

    #[test]
    fn test_create_folder_under_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("not-created");
        let err = create_folder(&root, "photos").unwrap_err();
        assert!(matches!(err, StorageError::IoError(_)));
    }

    #[test]
    fn test_save_file_from_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = save_file_from(temp.path(), "a.txt", &temp.path().join("gone.tmp")).unwrap_err();
        assert!(matches!(err, StorageError::SourceNotFound(_)));
    }

    #[test]
    fn test_save_file_from_copies_directory_tree() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        fs::create_dir(&root).unwrap();
        let source = temp.path().join("unpacked");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("a.txt"), b"abc").unwrap();

        let outcome = save_file_from(&root, "bundle", &source).unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Saved {
                path: root.join("bundle"),
                bytes: 3
            }
        );
        assert_eq!(fs::read(root.join("bundle").join("a.txt")).unwrap(), b"abc");

        let again = save_file_from(&root, "bundle", &source).unwrap();
        assert_eq!(again, SaveOutcome::AlreadyExists(root.join("bundle")));
    }

    // A dangling symlink is invisible to the existence check but still
    // occupies the name, so the exclusive create loses the race
    #[cfg(unix)]
    #[test]
    fn test_copy_reports_existing_entry_when_exclusive_create_fails() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("download.tmp");
        fs::write(&source, b"payload").unwrap();
        let root = temp.path().join("root");
        fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), root.join("a.txt")).unwrap();

        let outcome = save_file_from(&root, "a.txt", &source).unwrap();
        assert_eq!(outcome, SaveOutcome::AlreadyExists(root.join("a.txt")));
        assert!(!temp.path().join("gone").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_image_reports_existing_entry_when_exclusive_create_fails() {
        let temp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone.png"), temp.path().join("a.png"))
            .unwrap();

        let outcome = save_image(temp.path(), &sample(), "a.png", 80).unwrap();
        assert_eq!(outcome, SaveOutcome::AlreadyExists(temp.path().join("a.png")));
        assert!(!temp.path().join("gone.png").exists());
    }

    #[test]
    fn test_save_image_rejects_name_before_encoding() {
        let temp = TempDir::new().unwrap();
        let err = save_image(temp.path(), &sample(), "../escape.png", 80).unwrap_err();
        assert!(matches!(err, StorageError::InvalidName(_)));
    }

    #[test]
    fn test_get_image_corrupt_entry_is_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("broken.png"), b"not a png").unwrap();
        let err = get_image(temp.path(), "broken.png").unwrap_err();
        assert!(matches!(err, StorageError::Decode(_)));
        assert!(get_image(temp.path(), "absent.png").unwrap().is_none());
    }

    #[test]
    fn test_save_image_into_folder() {
        let temp = TempDir::new().unwrap();
        create_folder(temp.path(), "thumbs").unwrap();

        let outcome = save_image(temp.path(), &sample(), "thumbs/t.png", 80).unwrap();
        assert!(outcome.is_saved());
        assert!(temp.path().join("thumbs").join("t.png").is_file());
    }
}
