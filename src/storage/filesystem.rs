//! File system primitives
//!
//! Single-call wrappers the storage operations are built from. Files are
//! opened with `create_new` so an existing entry is never overwritten.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Check if anything (file, directory or symlink target) exists at `path`
pub fn entry_exists(path: &Path) -> bool {
    path.exists()
}

/// Check if file exists
pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Check if directory exists
pub fn directory_exists(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// Create a single directory; the parent must already exist
pub fn create_directory(path: &Path) -> io::Result<()> {
    fs::create_dir(path)
}

/// Remove a directory and everything below it, or a single file
pub fn remove_entry(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Copy `source` to `destination`, failing with `AlreadyExists` if the
/// destination is present. Returns the number of bytes copied.
pub fn copy_new(source: &Path, destination: &Path) -> io::Result<u64> {
    let mut reader = File::open(source)?;
    let mut writer = create_new(destination)?;

    let copied = io::copy(&mut reader, &mut writer).and_then(|n| {
        writer.flush()?;
        Ok(n)
    });
    if copied.is_err() {
        drop(writer);
        let _ = fs::remove_file(destination);
    }
    copied
}

/// Copy the directory tree at `source` to a new directory at `destination`,
/// failing with `AlreadyExists` if the destination is present. Returns the
/// number of file bytes copied. A failed copy removes what it created.
pub fn copy_tree_new(source: &Path, destination: &Path) -> io::Result<u64> {
    let source_canonical = source.canonicalize()?;
    if let Some(parent) = destination.parent() {
        if parent.canonicalize()?.starts_with(&source_canonical) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "destination lies inside the source tree",
            ));
        }
    }

    fs::create_dir(destination)?;
    let copied = copy_tree_contents(source, destination);
    if copied.is_err() {
        let _ = fs::remove_dir_all(destination);
    }
    copied
}

fn copy_tree_contents(source: &Path, destination: &Path) -> io::Result<u64> {
    let mut total = 0;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target = destination.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            fs::create_dir(&target)?;
            total += copy_tree_contents(&entry.path(), &target)?;
        } else {
            total += copy_new(&entry.path(), &target)?;
        }
    }
    Ok(total)
}

/// Write `data` to a new file at `destination`
pub fn write_new(destination: &Path, data: &[u8]) -> io::Result<()> {
    let mut writer = create_new(destination)?;

    let written = writer.write_all(data).and_then(|_| writer.flush());
    if written.is_err() {
        drop(writer);
        let _ = fs::remove_file(destination);
    }
    written
}

fn create_new(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}
