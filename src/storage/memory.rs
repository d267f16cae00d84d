//! In-memory storage

use std::{cell::RefCell, rc::Rc};

use rustc_hash::FxHashMap;

use super::{CartStorage, StorageError};

/// Session-only slot storage.
///
/// Clones share the same slots, so a test can keep a handle while the
/// synchronizer owns another. An optional quota mimics a full browser store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<FxHashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes past `limit` bytes in total.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            slots: Rc::default(),
            quota: Some(limit),
        }
    }

    /// Total bytes held across all slots, keys included.
    pub fn used_bytes(&self) -> usize {
        self.slots
            .borrow()
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            let replaced = self
                .slots
                .borrow()
                .get(key)
                .map_or(0, |existing| key.len() + existing.len());

            let size = self.used_bytes() - replaced + key.len() + value.len();

            if size > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    size,
                    limit,
                });
            }
        }

        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().remove(key);

        Ok(())
    }
}
