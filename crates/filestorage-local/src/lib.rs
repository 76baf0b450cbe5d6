//! Filesystem backend for the filestorage contracts.
//!
//! Maps the storage model onto a directory tree:
//!
//! ```text
//! <root>/             LocalStorage
//!   <bucket>/         LocalBucket   (one directory per bucket)
//!     <object>        LocalObject   (one regular file per object)
//! ```
//!
//! There are no sidecar files and no index; objects are discovered by
//! path on every lookup.
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//! use filestorage_core::{Bucket, Object, Storage};
//! use filestorage_local::{LocalStorage, LocalStorageConfig};
//!
//! let root = tempfile::tempdir().unwrap();
//! let storage = LocalStorage::new(LocalStorageConfig::new(root.path())).unwrap();
//!
//! let bucket = storage.create_or_get_bucket("b1").unwrap();
//! bucket.put_object("o1", &b"hello"[..], 0, None).unwrap();
//!
//! let mut content = String::new();
//! bucket.object("o1").unwrap().open().unwrap().read_to_string(&mut content).unwrap();
//! assert_eq!(content, "hello");
//! ```
//!
//! # Write semantics
//!
//! Writes go straight to the final path by default: a failed copy removes
//! the partial file on a best-effort basis, but a crash mid-write leaves it
//! in place. Set [`LocalStorageConfig::atomic_writes`] to stage writes in a
//! temp file inside the bucket and rename on success. Metadata cannot be
//! persisted; writes carrying a non-empty map are rejected.

pub mod bucket;
pub mod config;
pub mod object;
pub mod storage;

pub use bucket::LocalBucket;
pub use config::{LocalStorageConfig, DEFAULT_BUCKET_MODE, DEFAULT_OBJECT_MODE};
pub use object::LocalObject;
pub use storage::LocalStorage;
