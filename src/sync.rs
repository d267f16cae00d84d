//! Persistence Synchronizer
//!
//! Bridges a [`CartStore`] to one slot of a [`CartStorage`] backend. The slot is
//! read once when the synchronizer is attached, and rewritten after every
//! transition except a bulk load. Storage trouble is logged and otherwise
//! ignored; the in-memory cart stays authoritative.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::CartItem,
    snapshot::{self, SnapshotError},
    storage::{CartStorage, StorageError},
    store::{CartEvent, CartListener, CartStore, SubscriptionId},
};

/// Reasons a persisted cart could not be read or written.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored value could not be decoded, or the cart could not be encoded.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// What hydration did to the store.
#[derive(Debug)]
pub enum Hydration {
    /// A stored cart was loaded; holds the number of lines restored.
    Restored(usize),

    /// Nothing was stored; the cart starts empty.
    Empty,

    /// Stored data was unreadable and ignored; the cart starts empty.
    Discarded(SyncError),
}

/// Store listener that keeps a storage slot in step with the cart.
#[derive(Debug)]
pub struct CartSynchronizer<S> {
    storage: S,
    key: String,
}

impl<S: CartStorage + 'static> CartSynchronizer<S> {
    /// Create a synchronizer for the slot named `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Slot name this synchronizer reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Hydrate `store` from storage, then subscribe to it for write-back.
    ///
    /// Consumes the synchronizer so a session hydrates exactly once.
    #[tracing::instrument(name = "cart.sync.attach", skip_all, fields(key = %self.key))]
    pub fn attach(self, store: &mut CartStore) -> (Hydration, SubscriptionId) {
        let hydration = match self.load() {
            Ok(Some(items)) => {
                store.load_bulk(items);

                let lines = store.cart().len();

                info!(lines, "restored persisted cart");

                Hydration::Restored(lines)
            }
            Ok(None) => {
                debug!("no persisted cart");

                Hydration::Empty
            }
            Err(err) => {
                warn!(error = %err, "ignoring unreadable persisted cart");

                Hydration::Discarded(err)
            }
        };

        let subscription = store.subscribe(self);

        (hydration, subscription)
    }

    fn load(&self) -> Result<Option<Vec<CartItem>>, SyncError> {
        let Some(raw) = self.storage.read(&self.key)? else {
            return Ok(None);
        };

        Ok(Some(snapshot::decode(&raw)?))
    }

    #[tracing::instrument(
        name = "cart.sync.write_back",
        skip_all,
        fields(key = %self.key, lines = items.len()),
        err
    )]
    fn write_back(&self, items: &[CartItem]) -> Result<(), SyncError> {
        let encoded = snapshot::encode(items)?;

        self.storage.write(&self.key, &encoded)?;

        debug!(bytes = encoded.len(), "persisted cart");

        Ok(())
    }
}

impl<S: CartStorage + 'static> CartListener for CartSynchronizer<S> {
    fn on_change(&mut self, event: &CartEvent<'_>) {
        if !event.action.persists() {
            return;
        }

        if let Err(err) = self.write_back(event.items) {
            warn!(
                action = %event.action,
                error = %err,
                "failed to persist cart; keeping in-memory cart"
            );
        }
    }
}
