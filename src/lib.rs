//! Catalyst
//!
//! Catalyst is the shopping cart of a storefront: a single-writer cart store with
//! change notification, and a synchronizer that restores the cart from a storage
//! slot at startup and writes it back after every change.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod prelude;
pub mod products;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod summary;
pub mod sync;
