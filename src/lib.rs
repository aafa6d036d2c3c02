//! docstore
//!
//! Per-application document storage: folders, copied files and encoded
//! images kept under one storage root.

pub mod bundle;
pub mod config;
pub mod error;
pub mod media;
pub mod storage;
pub mod utils;

pub use bundle::{Bundle, ResourceName};
pub use config::StorageConfig;
pub use error::{ErrorKind, StorageError};
pub use storage::{DeleteOutcome, FolderOutcome, SaveOutcome, StorageHelper};
