//! Bucket and object identifier validation.
//!
//! A bucket maps to exactly one directory under the storage root and an
//! object to exactly one file under its bucket, so an identifier must be a
//! single, plain path component:
//! - Must be non-empty
//! - Must not be `.` or `..`
//! - Must not contain `/`, `\` or NUL
//! - Must not contain control characters

use crate::error::{StorageError, StorageResult};

/// Characters that would split an identifier into several path components.
const SEPARATORS: &[char] = &['/', '\\', '\0'];

/// Validate a bucket identifier.
///
/// # Examples
///
/// ```
/// use filestorage_core::names::validate_bucket_id;
///
/// assert!(validate_bucket_id("bucket1").is_ok());
/// assert!(validate_bucket_id("").is_err());
/// assert!(validate_bucket_id("../escape").is_err());
/// ```
pub fn validate_bucket_id(id: &str) -> StorageResult<()> {
    validate_component(id, "bucket")
}

/// Validate an object identifier. Same rules as bucket identifiers.
pub fn validate_object_id(id: &str) -> StorageResult<()> {
    validate_component(id, "object")
}

fn validate_component(id: &str, what: &str) -> StorageResult<()> {
    let invalid = |reason: String| StorageError::InvalidIdentifier {
        id: id.to_string(),
        reason,
    };

    if id.is_empty() {
        return Err(invalid(format!("{what} id must not be empty")));
    }

    if id == "." || id == ".." {
        return Err(invalid(format!("{what} id must not be '.' or '..'")));
    }

    if let Some(ch) = id.chars().find(|c| SEPARATORS.contains(c)) {
        return Err(invalid(format!("contains path separator: {ch:?}")));
    }

    if let Some(ch) = id.chars().find(|c| c.is_control()) {
        return Err(invalid(format!("contains control character: {ch:?}")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageErrorKind;

    #[test]
    fn valid_ids() {
        assert!(validate_bucket_id("bucket1").is_ok());
        assert!(validate_bucket_id("bucketID1").is_ok());
        assert!(validate_object_id("object1").is_ok());
        assert!(validate_object_id("report.v2.pdf").is_ok());
        assert!(validate_object_id(".hidden").is_ok());
        assert!(validate_object_id("with space").is_ok());
    }

    #[test]
    fn reject_empty() {
        let err = validate_bucket_id("").unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::InvalidIdentifier);
    }

    #[test]
    fn reject_dot_entries() {
        assert!(validate_bucket_id(".").is_err());
        assert!(validate_bucket_id("..").is_err());
        assert!(validate_object_id("..").is_err());
    }

    #[test]
    fn reject_separators() {
        assert!(validate_bucket_id("a/b").is_err());
        assert!(validate_bucket_id("../escape").is_err());
        assert!(validate_object_id("a\\b").is_err());
        assert!(validate_object_id("nul\0byte").is_err());
    }

    #[test]
    fn reject_control_chars() {
        assert!(validate_object_id("line\nbreak").is_err());
        assert!(validate_object_id("tab\there").is_err());
    }

    #[test]
    fn error_names_the_identifier() {
        let err = validate_object_id("a/b").unwrap_err();
        assert!(err.to_string().contains("\"a/b\""));
    }
}
