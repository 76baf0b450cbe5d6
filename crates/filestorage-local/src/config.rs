use std::fs;
use std::path::{Path, PathBuf};

use filestorage_core::{StorageError, StorageResult};
use serde::{Deserialize, Serialize};

/// Default permission bits for new bucket directories.
pub const DEFAULT_BUCKET_MODE: u32 = 0o755;

/// Default permission bits for new object files.
pub const DEFAULT_OBJECT_MODE: u32 = 0o644;

/// Configuration for a [`LocalStorage`](crate::LocalStorage).
///
/// Modes are Unix permission bits and are filtered by the process umask,
/// like any `mkdir(2)`/`open(2)`. They are ignored on other platforms.
///
/// ```toml
/// root = "/var/lib/filestorage"
/// bucket_mode = 0o750
/// object_mode = 0o640
/// atomic_writes = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalStorageConfig {
    /// Directory under which every bucket lives. Must already exist.
    pub root: PathBuf,
    /// Permission bits for newly created bucket directories.
    pub bucket_mode: u32,
    /// Permission bits for newly created object files.
    pub object_mode: u32,
    /// Write objects to a temp file in the bucket and rename on success.
    pub atomic_writes: bool,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            bucket_mode: DEFAULT_BUCKET_MODE,
            object_mode: DEFAULT_OBJECT_MODE,
            atomic_writes: false,
        }
    }
}

impl LocalStorageConfig {
    /// Default configuration rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn with_bucket_mode(mut self, mode: u32) -> Self {
        self.bucket_mode = mode;
        self
    }

    pub fn with_object_mode(mut self, mode: u32) -> Self {
        self.object_mode = mode;
        self
    }

    pub fn with_atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }

    /// Parse a configuration from a TOML document. Missing keys take their
    /// default values.
    pub fn from_toml_str(s: &str) -> StorageResult<Self> {
        toml::from_str(s).map_err(|e| StorageError::Config(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    ///
    /// Only parses; the root directory is checked when the storage is
    /// opened.
    pub fn load(path: &Path) -> StorageResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| StorageError::from_io("read", path, e))?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filestorage_core::StorageErrorKind;

    #[test]
    fn default_config() {
        let c = LocalStorageConfig::default();
        assert_eq!(c.root, PathBuf::from("."));
        assert_eq!(c.bucket_mode, 0o755);
        assert_eq!(c.object_mode, 0o644);
        assert!(!c.atomic_writes);
    }

    #[test]
    fn builder_overrides() {
        let c = LocalStorageConfig::new("/srv/data")
            .with_bucket_mode(0o700)
            .with_object_mode(0o600)
            .with_atomic_writes(true);
        assert_eq!(c.root, PathBuf::from("/srv/data"));
        assert_eq!(c.bucket_mode, 0o700);
        assert_eq!(c.object_mode, 0o600);
        assert!(c.atomic_writes);
    }

    #[test]
    fn parse_full_toml() {
        let c = LocalStorageConfig::from_toml_str(
            r#"
            root = "/var/lib/filestorage"
            bucket_mode = 0o750
            object_mode = 0o640
            atomic_writes = true
            "#,
        )
        .unwrap();
        assert_eq!(c.root, PathBuf::from("/var/lib/filestorage"));
        assert_eq!(c.bucket_mode, 0o750);
        assert_eq!(c.object_mode, 0o640);
        assert!(c.atomic_writes);
    }

    #[test]
    fn parse_partial_toml_uses_defaults() {
        let c = LocalStorageConfig::from_toml_str(r#"root = "/data""#).unwrap();
        assert_eq!(c.root, PathBuf::from("/data"));
        assert_eq!(c.bucket_mode, DEFAULT_BUCKET_MODE);
        assert_eq!(c.object_mode, DEFAULT_OBJECT_MODE);
    }

    #[test]
    fn parse_bad_toml_is_config_error() {
        let err = LocalStorageConfig::from_toml_str("bucket_mode = \"rwx\"").unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::Config);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.toml");
        fs::write(&path, "root = \"/data\"\nobject_mode = 0o600\n").unwrap();

        let c = LocalStorageConfig::load(&path).unwrap();
        assert_eq!(c.root, PathBuf::from("/data"));
        assert_eq!(c.object_mode, 0o600);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalStorageConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.is_not_found());
    }
}
