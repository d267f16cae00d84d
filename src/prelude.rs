//! Catalyst prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartAction, CartActionKind, CartItem},
    catalog::{Catalog, CatalogError},
    config::{CartConfig, ConfigError},
    products::{Product, ProductId, ProductsPage},
    snapshot::{SNAPSHOT_VERSION, SnapshotError},
    storage::{CartStorage, DEFAULT_CART_KEY, FileStorage, MemoryStorage, StorageError},
    store::{CartEvent, CartListener, CartStore, SubscriptionId},
    summary::{OrderSummary, SummaryError, default_tax_rate},
    sync::{CartSynchronizer, Hydration, SyncError},
};
