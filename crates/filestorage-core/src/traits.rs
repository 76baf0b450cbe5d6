use std::io::Read;

use crate::error::StorageResult;
use crate::metadata::Metadata;

/// Top-level registry mapping bucket identifiers to backend namespaces.
///
/// Implementations must be thread-safe (`Send + Sync`). Bucket handles are
/// stateless views: every call constructs a fresh one.
pub trait Storage: Send + Sync {
    type Bucket: Bucket;

    /// Get a handle to an existing bucket.
    ///
    /// Fails with `NotFound` if the bucket does not exist.
    fn bucket(&self, id: &str) -> StorageResult<Self::Bucket>;

    /// Create a new bucket.
    ///
    /// Fails with `AlreadyExists` if the bucket already exists.
    fn create_bucket(&self, id: &str) -> StorageResult<Self::Bucket>;

    /// Create the bucket if absent, otherwise return the existing one.
    ///
    /// Concurrent callers asking for the same missing bucket must all
    /// succeed, with exactly one of them creating it.
    fn create_or_get_bucket(&self, id: &str) -> StorageResult<Self::Bucket>;

    /// Remove a bucket and everything in it. Removing a missing bucket
    /// succeeds.
    fn remove_bucket(&self, id: &str) -> StorageResult<()>;
}

/// A namespace of objects.
pub trait Bucket: Send + Sync {
    type Object: Object;

    /// The identifier this bucket was requested with.
    fn id(&self) -> &str;

    /// Look up an existing object.
    fn object(&self, id: &str) -> StorageResult<Self::Object>;

    /// Write an object from `reader`.
    ///
    /// A `size` of zero drains the reader; any other value copies at most
    /// `size` bytes and leaves the rest of the reader unread. Backends that
    /// cannot persist metadata reject a non-empty `metadata` with
    /// `Unsupported` before touching storage.
    fn put_object<R: Read>(
        &self,
        id: &str,
        reader: R,
        size: u64,
        metadata: Option<&Metadata>,
    ) -> StorageResult<Self::Object>;
}

/// One stored object, addressed by identifier within its bucket.
pub trait Object: Send + Sync {
    type Reader: Read;

    /// The identifier this object was requested with.
    fn id(&self) -> &str;

    /// Metadata associated at construction, if any.
    fn metadata(&self) -> Option<&Metadata>;

    /// Open the object's content for reading.
    ///
    /// Fails with `NotFound` if the object was removed after this handle
    /// was created.
    fn open(&self) -> StorageResult<Self::Reader>;

    /// Delete the object. Removing twice is not guaranteed to succeed.
    fn remove(&self) -> StorageResult<()>;

    /// Logical locator `bucket/object`. Not a network address.
    fn url(&self) -> String;
}
