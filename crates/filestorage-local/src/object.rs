use std::fs::{self, File};
use std::path::{Path, PathBuf};

use filestorage_core::{Metadata, Object, StorageError, StorageResult};
use tracing::debug;

/// A file inside a bucket directory.
///
/// Handles are transient: they hold the path, not an open file, so a handle
/// outlives removal of the file but can no longer be opened.
#[derive(Clone, Debug)]
pub struct LocalObject {
    id: String,
    bucket: String,
    path: PathBuf,
    metadata: Option<Metadata>,
}

impl LocalObject {
    /// Build a handle for `path`, which must exist and be a regular file.
    pub(crate) fn new(bucket: &str, id: &str, path: PathBuf) -> StorageResult<Self> {
        let stats = fs::metadata(&path).map_err(|e| StorageError::from_io("stat", &path, e))?;
        if stats.is_dir() {
            return Err(StorageError::IsADirectory { path });
        }
        Ok(Self {
            id: id.to_string(),
            bucket: bucket.to_string(),
            path,
            metadata: None,
        })
    }

    /// Identifier of the owning bucket.
    pub fn bucket_id(&self) -> &str {
        &self.bucket
    }

    /// Absolute path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Object for LocalObject {
    type Reader = File;

    fn id(&self) -> &str {
        &self.id
    }

    fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    fn open(&self) -> StorageResult<File> {
        File::open(&self.path).map_err(|e| StorageError::from_io("open", &self.path, e))
    }

    fn remove(&self) -> StorageResult<()> {
        fs::remove_file(&self.path).map_err(|e| StorageError::from_io("remove", &self.path, e))?;
        debug!(bucket = %self.bucket, object = %self.id, "object removed");
        Ok(())
    }

    fn url(&self) -> String {
        format!("{}/{}", self.bucket, self.id)
    }
}
