//! Configuration management for docstore
//!
//! Settings come from an optional TOML file with `DOCSTORE_*` environment
//! overrides. Everything is resolved once, when the storage helper is built.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bundle::Bundle;
use crate::error::StorageError;
use crate::media::DEFAULT_JPEG_QUALITY;

const DEFAULT_CONFIG_NAME: &str = "docstore";
const ENV_PREFIX: &str = "DOCSTORE";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    /// Storage root; defaults to `<documents>/<app_dir_name>`
    /// Environment: DOCSTORE_STORAGE_ROOT
    #[serde(default)]
    pub storage_root: Option<String>,

    /// Bundle directory; defaults to `resources/` beside the executable
    /// Environment: DOCSTORE_BUNDLE_DIR
    #[serde(default)]
    pub bundle_dir: Option<String>,

    #[serde(default = "default_app_dir_name")]
    pub app_dir_name: String,

    /// Quality used for `.jpg` saves (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Create the storage root when the helper is built from this config
    #[serde(default = "default_create_root")]
    pub create_root: bool,
}

fn default_app_dir_name() -> String {
    DEFAULT_CONFIG_NAME.to_string()
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_create_root() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_root: None,
            bundle_dir: None,
            app_dir_name: default_app_dir_name(),
            jpeg_quality: default_jpeg_quality(),
            create_root: default_create_root(),
        }
    }
}

impl StorageConfig {
    /// Load from `./docstore.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name(DEFAULT_CONFIG_NAME).required(false))
    }

    /// Load from an explicit TOML file with environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: StorageConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(&self.storage_root, Some(root) if root.trim().is_empty()) {
            return Err(ConfigError::Message("storage_root cannot be empty".into()));
        }

        if matches!(&self.bundle_dir, Some(dir) if dir.trim().is_empty()) {
            return Err(ConfigError::Message("bundle_dir cannot be empty".into()));
        }

        if self.app_dir_name.trim().is_empty() {
            return Err(ConfigError::Message("app_dir_name cannot be empty".into()));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Message(
                "jpeg_quality must be between 1 and 100".into(),
            ));
        }

        Ok(())
    }

    /// Resolve the storage root, falling back to the user's documents directory
    pub fn storage_root_path(&self) -> Result<PathBuf, StorageError> {
        if let Some(root) = &self.storage_root {
            return Ok(PathBuf::from(root));
        }
        let documents = dirs::document_dir().ok_or_else(|| {
            StorageError::RootUnavailable("Could not determine documents directory".into())
        })?;
        Ok(documents.join(&self.app_dir_name))
    }

    /// Resolve the bundle, falling back to `resources/` beside the executable
    pub fn bundle(&self) -> Result<Bundle, StorageError> {
        match &self.bundle_dir {
            Some(dir) => Ok(Bundle::new(dir)),
            None => Bundle::beside_executable().ok_or_else(|| {
                StorageError::RootUnavailable("Could not determine executable directory".into())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    const ENV_KEYS: [&str; 3] = [
        "DOCSTORE_STORAGE_ROOT",
        "DOCSTORE_JPEG_QUALITY",
        "DOCSTORE_CREATE_ROOT",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = StorageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.jpeg_quality, 80);
        assert!(config.create_root);
    }

    #[test]
    #[serial]
    fn test_load_from_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docstore.toml");
        fs::write(
            &path,
            "storage_root = \"/srv/docs\"\nbundle_dir = \"/srv/res\"\njpeg_quality = 65\n",
        )
        .unwrap();

        let config = StorageConfig::load_from(&path).unwrap();
        assert_eq!(config.storage_root.as_deref(), Some("/srv/docs"));
        assert_eq!(config.jpeg_quality, 65);
        assert_eq!(config.app_dir_name, "docstore");
        assert_eq!(
            config.storage_root_path().unwrap(),
            PathBuf::from("/srv/docs")
        );
        assert_eq!(config.bundle().unwrap().root(), Path::new("/srv/res"));
    }

    #[test]
    #[serial]
    fn test_out_of_range_quality_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docstore.toml");
        fs::write(&path, "jpeg_quality = 0\n").unwrap();

        assert!(StorageConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_empty_root_is_rejected() {
        let config = StorageConfig {
            storage_root: Some("  ".into()),
            ..StorageConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_missing_file_is_an_error_for_explicit_path() {
        let temp = TempDir::new().unwrap();
        assert!(StorageConfig::load_from(&temp.path().join("absent.toml")).is_err());
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docstore.toml");
        fs::write(&path, "storage_root = \"/srv/docs\"\njpeg_quality = 65\n").unwrap();

        unsafe { std::env::set_var("DOCSTORE_STORAGE_ROOT", "/env/docstore-root") };
        unsafe { std::env::set_var("DOCSTORE_JPEG_QUALITY", "42") };
        unsafe { std::env::set_var("DOCSTORE_CREATE_ROOT", "false") };

        let loaded = StorageConfig::load_from(&path);
        clear_env();

        let config = loaded.unwrap();
        assert_eq!(config.storage_root.as_deref(), Some("/env/docstore-root"));
        assert_eq!(config.jpeg_quality, 42);
        assert!(!config.create_root);
    }
}
