//! Pluggable object storage contracts.
//!
//! A [`Storage`] owns named [`Bucket`]s, and each bucket owns named
//! [`Object`]s. Backends implement the three traits; callers program
//! against them and never see backend paths or handles.
//!
//! # Modules
//!
//! - [`error`] -- [`StorageError`] and its [`StorageErrorKind`] taxonomy
//! - [`traits`] -- the [`Storage`], [`Bucket`] and [`Object`] contracts
//! - [`metadata`] -- the opaque [`Metadata`] map
//! - [`names`] -- bucket/object identifier validation
//!
//! # Design Rules
//!
//! 1. Handles are transient views; nothing is cached between calls.
//! 2. Errors are returned to the immediate caller, never retried.
//! 3. Identifiers are single path components in every backend.

pub mod error;
pub mod metadata;
pub mod names;
pub mod traits;

pub use error::{StorageError, StorageErrorKind, StorageResult};
pub use metadata::{metadata_is_empty, Metadata};
pub use names::{validate_bucket_id, validate_object_id};
pub use traits::{Bucket, Object, Storage};
