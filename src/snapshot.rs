//! Cart Snapshots
//!
//! Persisted form of the cart: `{"version": 1, "items": [...]}`. The bare item
//! array written by earlier storefront builds is still read and migrated in
//! memory; it is never written.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::cart::CartItem;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors decoding or encoding a cart snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored value is not valid JSON or does not match the item shape.
    #[error("malformed cart snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A versioned envelope is missing its version tag.
    #[error("cart snapshot has no version")]
    MissingVersion,

    /// The envelope was written by a format this build does not understand.
    #[error("unsupported cart snapshot version {0}")]
    UnsupportedVersion(u64),

    /// The stored value is neither an envelope nor an item array.
    #[error("cart snapshot must be an object or an array")]
    UnexpectedShape,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    items: &'a [CartItem],
}

#[derive(Deserialize)]
struct Snapshot {
    items: Vec<CartItem>,
}

/// Serialize cart items into the current snapshot format.
///
/// # Errors
///
/// Returns [`SnapshotError::Malformed`] if serialization fails.
pub fn encode(items: &[CartItem]) -> Result<String, SnapshotError> {
    let snapshot = SnapshotRef {
        version: SNAPSHOT_VERSION,
        items,
    };

    Ok(serde_json::to_string(&snapshot)?)
}

/// Parse a stored snapshot back into cart items.
///
/// # Errors
///
/// - [`SnapshotError::Malformed`]: invalid JSON or item fields.
/// - [`SnapshotError::MissingVersion`]: an object without a numeric `version`.
/// - [`SnapshotError::UnsupportedVersion`]: a version other than [`SNAPSHOT_VERSION`].
/// - [`SnapshotError::UnexpectedShape`]: a JSON scalar.
pub fn decode(raw: &str) -> Result<Vec<CartItem>, SnapshotError> {
    let value: Value = serde_json::from_str(raw)?;

    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }

    if !value.is_object() {
        return Err(SnapshotError::UnexpectedShape);
    }

    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .ok_or(SnapshotError::MissingVersion)?;

    if version != u64::from(SNAPSHOT_VERSION) {
        return Err(SnapshotError::UnsupportedVersion(version));
    }

    let snapshot: Snapshot = serde_json::from_value(value)?;

    Ok(snapshot.items)
}
