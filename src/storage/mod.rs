//! Storage
//!
//! A string-keyed slot store, the shape of browser local storage. The cart is
//! written to a single named slot as a serialized snapshot.

use std::io;

use mockall::automock;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Default slot name for the persisted cart.
pub const DEFAULT_CART_KEY: &str = "catalyst_cart";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying IO failure for the named slot.
    #[error("failed to access storage slot {key}: {source}")]
    Io {
        /// Slot name
        key: String,

        /// IO error
        #[source]
        source: io::Error,
    },

    /// Writing the value would exceed the backend's size limit.
    #[error("storage quota exceeded writing {key}: {size} bytes over a {limit} byte limit")]
    QuotaExceeded {
        /// Slot name
        key: String,

        /// Total bytes the store would hold after the write
        size: usize,

        /// Configured limit in bytes
        limit: usize,
    },

    /// The slot name cannot be used by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Key-value slot storage.
#[automock]
pub trait CartStorage {
    /// Read a slot. Absent slots are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the value cannot be stored.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot. Deleting an absent slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be modified.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
