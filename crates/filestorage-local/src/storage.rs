use std::fs::{self, DirBuilder};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use filestorage_core::{validate_bucket_id, Storage, StorageError, StorageResult};
use tracing::info;

use crate::bucket::LocalBucket;
use crate::config::LocalStorageConfig;

/// Storage rooted at a local directory.
///
/// Each bucket is a directory directly under the root and each object a
/// file directly under its bucket. `bucket`, `create_bucket` and
/// `create_or_get_bucket` are serialized by a lock owned by this instance,
/// so concurrent `create_or_get_bucket` calls for the same missing bucket
/// create it exactly once. `remove_bucket` does not take the lock, and
/// nothing here guards against other processes touching the tree.
pub struct LocalStorage {
    config: LocalStorageConfig,
    /// Serializes bucket existence checks and creation.
    lock: Mutex<()>,
}

impl LocalStorage {
    /// Open a storage for `config`. The root must already be a directory;
    /// it is never created here.
    pub fn new(config: LocalStorageConfig) -> StorageResult<Self> {
        let root = &config.root;
        let stats = fs::metadata(root).map_err(|e| StorageError::from_io("stat", root, e))?;
        if !stats.is_dir() {
            return Err(StorageError::NotADirectory { path: root.clone() });
        }
        info!(root = %root.display(), atomic_writes = config.atomic_writes, "local storage opened");
        Ok(Self {
            config,
            lock: Mutex::new(()),
        })
    }

    /// Open a storage at `root` with default modes.
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        Self::new(LocalStorageConfig::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    pub fn config(&self) -> &LocalStorageConfig {
        &self.config
    }

    fn bucket_path(&self, id: &str) -> StorageResult<PathBuf> {
        validate_bucket_id(id)?;
        Ok(self.config.root.join(id))
    }

    /// The guarded value is `()`, so a poisoned lock carries no broken state.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn open_bucket(&self, id: &str, path: PathBuf) -> StorageResult<LocalBucket> {
        LocalBucket::new(id, path, self.config.object_mode, self.config.atomic_writes)
    }

    /// Caller must hold the lock.
    fn create_bucket_locked(&self, id: &str, path: PathBuf) -> StorageResult<LocalBucket> {
        let mut builder = DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.config.bucket_mode);
        }
        builder
            .create(&path)
            .map_err(|e| StorageError::from_io("mkdir", &path, e))?;
        info!(bucket = %id, path = %path.display(), "bucket created");
        self.open_bucket(id, path)
    }
}

impl Storage for LocalStorage {
    type Bucket = LocalBucket;

    fn bucket(&self, id: &str) -> StorageResult<LocalBucket> {
        let path = self.bucket_path(id)?;
        let _guard = self.lock();
        self.open_bucket(id, path)
    }

    fn create_bucket(&self, id: &str) -> StorageResult<LocalBucket> {
        let path = self.bucket_path(id)?;
        let _guard = self.lock();
        self.create_bucket_locked(id, path)
    }

    fn create_or_get_bucket(&self, id: &str) -> StorageResult<LocalBucket> {
        let path = self.bucket_path(id)?;
        let _guard = self.lock();
        match fs::metadata(&path) {
            Ok(_) => self.open_bucket(id, path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.create_bucket_locked(id, path),
            Err(e) => Err(StorageError::from_io("stat", &path, e)),
        }
    }

    fn remove_bucket(&self, id: &str) -> StorageResult<()> {
        let path = self.bucket_path(id)?;
        // Whatever sits at the bucket path goes, directory or not.
        let removed = fs::symlink_metadata(&path).and_then(|stats| {
            if stats.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            }
        });
        match removed {
            Ok(()) => {
                info!(bucket = %id, "bucket removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from_io("remove", &path, e)),
        }
    }
}

impl std::fmt::Debug for LocalStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorage")
            .field("root", &self.config.root)
            .field("bucket_mode", &format_args!("{:#o}", self.config.bucket_mode))
            .field("object_mode", &format_args!("{:#o}", self.config.object_mode))
            .field("atomic_writes", &self.config.atomic_writes)
            .finish()
    }
}
