//! Document storage
//!
//! Manages folders, files and images under a single storage root.

pub mod filesystem;
mod helper;
pub mod operations;
pub mod results;
pub mod validation;

pub use helper::StorageHelper;
pub use results::{DeleteOutcome, FolderOutcome, SaveOutcome};
pub use validation::{MAX_ENTRY_DEPTH, resolve_entry_path};
