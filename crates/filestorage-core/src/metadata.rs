use std::collections::BTreeMap;

/// Opaque key/value metadata attached to an object.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Returns `true` when no metadata was supplied: `None` or an empty map.
pub fn metadata_is_empty(metadata: Option<&Metadata>) -> bool {
    metadata.map_or(true, BTreeMap::is_empty)
}
