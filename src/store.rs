//! Cart Store
//!
//! [`CartStore`] owns a [`Cart`] and is the only way to mutate it. Each
//! transition runs to completion and then notifies every registered
//! [`CartListener`] with the kind of action and the resulting items.

use std::fmt;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::{
    cart::{Cart, CartAction, CartActionKind, CartItem},
    products::{Product, ProductId},
};

/// Notification sent to listeners after a transition.
#[derive(Debug, Clone, Copy)]
pub struct CartEvent<'a> {
    /// The transition that just ran
    pub action: CartActionKind,

    /// Cart contents after the transition
    pub items: &'a [CartItem],
}

/// Observer of cart transitions.
pub trait CartListener {
    /// Called once after every transition.
    fn on_change(&mut self, event: &CartEvent<'_>);
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single-writer cart with change notification.
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    listeners: Vec<(SubscriptionId, Box<dyn CartListener>)>,
    next_subscription: u64,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create a store holding an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every subsequent transition.
    pub fn subscribe(&mut self, listener: impl CartListener + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);

        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));

        trace!(subscription = id.0, "cart listener subscribed");

        id
    }

    /// Drop a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();

        self.listeners.retain(|(existing, _)| *existing != id);

        before != self.listeners.len()
    }

    /// Apply an action and notify listeners.
    pub fn dispatch(&mut self, action: CartAction) {
        let kind = action.kind();

        self.cart.apply(action);

        debug!(
            action = %kind,
            lines = self.cart.len(),
            item_count = self.cart.total_item_count(),
            "applied cart action"
        );

        let event = CartEvent {
            action: kind,
            items: self.cart.items(),
        };

        for (_, listener) in &mut self.listeners {
            listener.on_change(&event);
        }
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: &Product) {
        self.dispatch(CartAction::add(product));
    }

    /// Remove a product's line.
    pub fn remove(&mut self, id: ProductId) {
        self.dispatch(CartAction::Remove(id));
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        self.dispatch(CartAction::SetQuantity { id, quantity });
    }

    /// Add one to a line's quantity.
    pub fn increment(&mut self, id: ProductId) {
        self.dispatch(CartAction::Increment(id));
    }

    /// Take one from a line's quantity.
    pub fn decrement(&mut self, id: ProductId) {
        self.dispatch(CartAction::Decrement(id));
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    /// Replace the cart with previously stored items.
    pub fn load_bulk(&mut self, items: Vec<CartItem>) {
        self.dispatch(CartAction::LoadBulk(items));
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current line items.
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// Sum of quantities.
    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    /// Sum of price times quantity.
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }
}
