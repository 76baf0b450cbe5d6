use std::io;
use std::path::PathBuf;

/// Errors from storage, bucket and object operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The bucket or object path does not exist.
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A bucket (or storage root) path exists but is not a directory.
    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// An object path resolves to a directory.
    #[error("{} is a directory", path.display())]
    IsADirectory { path: PathBuf },

    /// The bucket directory already exists.
    #[error("already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// The backend cannot honor the request (e.g. persisting metadata).
    #[error("{0}")]
    Unsupported(&'static str),

    /// The identifier cannot be mapped onto a single path component.
    #[error("invalid identifier {id:?}: {reason}")]
    InvalidIdentifier { id: String, reason: String },

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Any other filesystem failure, with the operation that raised it.
    #[error("{op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The kind of a [`StorageError`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageErrorKind {
    NotFound,
    NotADirectory,
    IsADirectory,
    AlreadyExists,
    Unsupported,
    InvalidIdentifier,
    Config,
    Io,
}

impl StorageError {
    /// Wrap an I/O error raised by `op` on `path`.
    ///
    /// `NotFound` and `AlreadyExists` I/O errors are lifted into their own
    /// variants so callers can match on them without inspecting the source.
    pub fn from_io(op: &'static str, path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io {
                op,
                path,
                source: err,
            },
        }
    }

    pub fn kind(&self) -> StorageErrorKind {
        match self {
            Self::NotFound { .. } => StorageErrorKind::NotFound,
            Self::NotADirectory { .. } => StorageErrorKind::NotADirectory,
            Self::IsADirectory { .. } => StorageErrorKind::IsADirectory,
            Self::AlreadyExists { .. } => StorageErrorKind::AlreadyExists,
            Self::Unsupported(_) => StorageErrorKind::Unsupported,
            Self::InvalidIdentifier { .. } => StorageErrorKind::InvalidIdentifier,
            Self::Config(_) => StorageErrorKind::Config,
            Self::Io { .. } => StorageErrorKind::Io,
        }
    }

    /// Returns `true` if the bucket or object does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind() == StorageErrorKind::NotFound
    }
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
