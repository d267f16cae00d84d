//! Cart Actions

use std::fmt;

use crate::{
    cart::CartItem,
    products::{Product, ProductId},
};

/// A requested cart transition.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add one unit of the snapshotted product.
    Add(CartItem),

    /// Remove a product's line.
    Remove(ProductId),

    /// Set a line's quantity; zero or less removes it.
    SetQuantity {
        /// Product to update
        id: ProductId,

        /// New quantity
        quantity: i64,
    },

    /// Add one to a line's quantity.
    Increment(ProductId),

    /// Take one from a line's quantity.
    Decrement(ProductId),

    /// Remove every line.
    Clear,

    /// Replace the cart with previously stored items.
    LoadBulk(Vec<CartItem>),
}

impl CartAction {
    /// Add one unit of `product`.
    pub fn add(product: &Product) -> Self {
        Self::Add(CartItem::snapshot(product))
    }

    /// The kind of transition, without its payload.
    pub fn kind(&self) -> CartActionKind {
        match self {
            Self::Add(_) => CartActionKind::Add,
            Self::Remove(_) => CartActionKind::Remove,
            Self::SetQuantity { .. } => CartActionKind::SetQuantity,
            Self::Increment(_) => CartActionKind::Increment,
            Self::Decrement(_) => CartActionKind::Decrement,
            Self::Clear => CartActionKind::Clear,
            Self::LoadBulk(_) => CartActionKind::LoadBulk,
        }
    }
}

/// Payload-free tag for a [`CartAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartActionKind {
    /// See [`CartAction::Add`]
    Add,
    /// See [`CartAction::Remove`]
    Remove,
    /// See [`CartAction::SetQuantity`]
    SetQuantity,
    /// See [`CartAction::Increment`]
    Increment,
    /// See [`CartAction::Decrement`]
    Decrement,
    /// See [`CartAction::Clear`]
    Clear,
    /// See [`CartAction::LoadBulk`]
    LoadBulk,
}

impl CartActionKind {
    /// Whether the resulting cart should be written back to storage.
    ///
    /// Bulk loads come from storage in the first place.
    pub fn persists(self) -> bool {
        !matches!(self, Self::LoadBulk)
    }

    /// Stable name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::SetQuantity => "set_quantity",
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Clear => "clear",
            Self::LoadBulk => "load_bulk",
        }
    }
}

impl fmt::Display for CartActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
