use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use filestorage_core::{
    metadata_is_empty, validate_object_id, Bucket, Metadata, StorageError, StorageResult,
};
use tracing::{debug, warn};

use crate::object::LocalObject;

/// A bucket directory directly under the storage root.
///
/// Constructed by [`LocalStorage`](crate::LocalStorage) on every request;
/// it does not track which objects exist.
#[derive(Clone, Debug)]
pub struct LocalBucket {
    id: String,
    path: PathBuf,
    object_mode: u32,
    atomic_writes: bool,
}

impl LocalBucket {
    /// Build a handle for `path`, which must exist and be a directory.
    pub(crate) fn new(
        id: &str,
        path: PathBuf,
        object_mode: u32,
        atomic_writes: bool,
    ) -> StorageResult<Self> {
        let stats = fs::metadata(&path).map_err(|e| StorageError::from_io("stat", &path, e))?;
        if !stats.is_dir() {
            return Err(StorageError::NotADirectory { path });
        }
        Ok(Self {
            id: id.to_string(),
            path,
            object_mode,
            atomic_writes,
        })
    }

    /// Absolute path of the bucket directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn object_path(&self, id: &str) -> StorageResult<PathBuf> {
        validate_object_id(id)?;
        Ok(self.path.join(id))
    }

    /// Copy straight into the final path. A failed copy leaves nothing
    /// behind, as far as the cleanup can manage.
    fn write_in_place<R: Read>(&self, path: &Path, reader: R, size: u64) -> StorageResult<u64> {
        let mut file = self.create_object_file(path)?;
        match copy_bounded(reader, &mut file, size) {
            Ok(written) => Ok(written),
            Err(e) => {
                drop(file);
                discard_partial(path);
                Err(StorageError::Io {
                    op: "write",
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }
    }

    /// Copy into a temp file in the bucket directory, then rename it over
    /// the final path. A failed copy never touches the final path.
    fn write_atomic<R: Read>(&self, path: &Path, reader: R, size: u64) -> StorageResult<u64> {
        let mut tmp = tempfile::Builder::new()
            .prefix(".put-")
            .tempfile_in(&self.path)
            .map_err(|e| StorageError::from_io("create temp file in", &self.path, e))?;

        let written = copy_bounded(reader, tmp.as_file_mut(), size).map_err(|e| StorageError::Io {
            op: "write",
            path: path.to_path_buf(),
            source: e,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(self.object_mode))
                .map_err(|e| StorageError::from_io("chmod", tmp.path(), e))?;
        }

        tmp.persist(path).map_err(|e| StorageError::Io {
            op: "rename",
            path: path.to_path_buf(),
            source: e.error,
        })?;
        Ok(written)
    }

    fn create_object_file(&self, path: &Path) -> StorageResult<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.object_mode);
        }
        options
            .open(path)
            .map_err(|e| StorageError::from_io("open", path, e))
    }
}

impl Bucket for LocalBucket {
    type Object = LocalObject;

    fn id(&self) -> &str {
        &self.id
    }

    fn object(&self, id: &str) -> StorageResult<LocalObject> {
        let path = self.object_path(id)?;
        LocalObject::new(&self.id, id, path)
    }

    /// A reader shorter than a nonzero `size` is not an error: the object
    /// holds the bytes that were available, unlike a strict `CopyN`-style
    /// copy that fails on early EOF.
    fn put_object<R: Read>(
        &self,
        id: &str,
        reader: R,
        size: u64,
        metadata: Option<&Metadata>,
    ) -> StorageResult<LocalObject> {
        // An empty map carries nothing to persist, so only a populated one
        // is refused.
        if !metadata_is_empty(metadata) {
            return Err(StorageError::Unsupported("metadata not supported"));
        }
        let path = self.object_path(id)?;
        if path.is_dir() {
            return Err(StorageError::IsADirectory { path });
        }

        let written = if self.atomic_writes {
            self.write_atomic(&path, reader, size)?
        } else {
            self.write_in_place(&path, reader, size)?
        };

        debug!(bucket = %self.id, object = %id, bytes = written, "object written");
        LocalObject::new(&self.id, id, path)
    }
}

/// Copy `reader` into `writer`: to exhaustion when `size` is zero,
/// otherwise at most `size` bytes. Returns the number of bytes copied.
pub(crate) fn copy_bounded<R: Read, W: Write>(
    mut reader: R,
    writer: &mut W,
    size: u64,
) -> io::Result<u64> {
    if size == 0 {
        io::copy(&mut reader, writer)
    } else {
        io::copy(&mut reader.take(size), writer)
    }
}

/// Best-effort removal of a partially written object. The copy error is
/// what the caller sees; a failed cleanup is only logged.
fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "failed to remove partial object");
        }
    }
}
