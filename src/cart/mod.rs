//! Cart
//!
//! The cart is an ordered list of line items keyed by product id. Every
//! transition is total: out-of-range input is normalized instead of rejected,
//! so a cart can never hold a line with a quantity of zero or two lines for the
//! same product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

pub mod action;

pub use action::{CartAction, CartActionKind};

/// A single product's line in the cart.
///
/// Title, price and the other display fields are a snapshot taken when the
/// product was first added; later adds only bump the quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Catalog product id
    pub id: ProductId,

    /// Display name at add-time
    pub title: String,

    /// Unit price at add-time
    pub price: Decimal,

    /// Thumbnail image URI
    pub thumbnail: String,

    /// Units of this product in the cart, always at least one
    pub quantity: u64,

    /// Brand name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Advertised discount, not applied to any totals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<Decimal>,
}

impl CartItem {
    /// Snapshot a catalog product as a new line with a quantity of one.
    pub fn snapshot(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            thumbnail: product.thumbnail.clone(),
            quantity: 1,
            brand: product.brand.clone(),
            discount_percentage: product.discount_percentage,
        }
    }

    /// Price multiplied by quantity.
    pub fn line_subtotal(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Ordered collection of cart line items, unique by product id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart from previously stored items.
    ///
    /// Lines with a zero quantity are dropped and a repeated product id is
    /// folded into its first line, so valid input comes back unchanged.
    pub fn with_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();

        cart.load_bulk(items);

        cart
    }

    /// Apply a single action to the cart.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add(item) => self.add_snapshot(item),
            CartAction::Remove(id) => self.remove(id),
            CartAction::SetQuantity { id, quantity } => self.set_quantity(id, quantity),
            CartAction::Increment(id) => self.increment(id),
            CartAction::Decrement(id) => self.decrement(id),
            CartAction::Clear => self.clear(),
            CartAction::LoadBulk(items) => self.load_bulk(items),
        }
    }

    /// Add one unit of a product.
    ///
    /// An existing line only has its quantity bumped; price and title are not
    /// refreshed from `product`.
    pub fn add(&mut self, product: &Product) {
        self.add_snapshot(CartItem::snapshot(product));
    }

    fn add_snapshot(&mut self, snapshot: CartItem) {
        match self.item_mut(snapshot.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => self.items.push(CartItem {
                quantity: 1,
                ..snapshot
            }),
        }
    }

    /// Remove a product's line. Removing an absent product is a no-op.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
    }

    /// Set a line's quantity exactly.
    ///
    /// A quantity of zero or less removes the line. Absent products are ignored.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        let Some(item) = self.item_mut(id) else {
            return;
        };

        match u64::try_from(quantity) {
            Ok(quantity) if quantity > 0 => item.quantity = quantity,
            _ => self.remove(id),
        }
    }

    /// Add one to a line's quantity.
    pub fn increment(&mut self, id: ProductId) {
        if let Some(item) = self.item_mut(id) {
            item.quantity = item.quantity.saturating_add(1);
        }
    }

    /// Take one from a line's quantity, removing the line when it reaches zero.
    pub fn decrement(&mut self, id: ProductId) {
        match self.item(id).map(|item| item.quantity) {
            Some(quantity) if quantity > 1 => {
                if let Some(item) = self.item_mut(id) {
                    item.quantity = quantity - 1;
                }
            }
            Some(_) => self.remove(id),
            None => {}
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the whole cart with the given items, keeping their order.
    pub fn load_bulk(&mut self, items: impl IntoIterator<Item = CartItem>) {
        self.items.clear();

        for item in items {
            if item.quantity == 0 {
                continue;
            }

            match self.item_mut(item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => self.items.push(item),
            }
        }
    }

    /// Look up a product's line.
    pub fn item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn item_mut(&mut self, id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over line items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn total_item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |total, item| total.saturating_add(item.quantity))
    }

    /// Sum of price times quantity across all lines, unrounded.
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().fold(Decimal::ZERO, |total, item| {
            total.saturating_add(item.line_subtotal())
        })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn product(id: u64, price: Decimal) -> Product {
        Product::new(id, format!("Product {id}"), price)
            .with_thumbnail(format!("https://cdn.example.com/{id}.png"))
    }

    fn line(id: u64, quantity: u64, price: Decimal) -> CartItem {
        CartItem {
            quantity,
            ..CartItem::snapshot(&product(id, price))
        }
    }

    fn ids(cart: &Cart) -> Vec<u64> {
        cart.iter().map(|item| item.id.get()).collect()
    }

    #[test]
    fn add_new_product_appends_single_line() -> TestResult {
        let mut cart = Cart::new();
        let mascara = product(1, Decimal::new(999, 2))
            .with_brand("Essence")
            .with_discount_percentage(Decimal::new(717, 2));

        cart.add(&mascara);

        assert_eq!(cart.len(), 1);

        let item = cart.item(ProductId::new(1)).ok_or("missing line")?;

        assert_eq!(item.quantity, 1);
        assert_eq!(item.title, "Product 1");
        assert_eq!(item.price, Decimal::new(999, 2));
        assert_eq!(item.brand.as_deref(), Some("Essence"));
        assert_eq!(item.discount_percentage, Some(Decimal::new(717, 2)));

        Ok(())
    }

    #[test]
    fn add_existing_product_only_increments_quantity() -> TestResult {
        let mut cart = Cart::new();

        cart.add(&product(1, Decimal::new(1000, 2)));

        let repriced = Product::new(1, "Renamed", Decimal::new(5, 0));

        cart.add(&repriced);

        assert_eq!(cart.len(), 1);

        let item = cart.item(ProductId::new(1)).ok_or("missing line")?;

        assert_eq!(item.quantity, 2);
        assert_eq!(item.title, "Product 1");
        assert_eq!(item.price, Decimal::new(1000, 2));

        Ok(())
    }

    #[test]
    fn repeated_add_totals() {
        let mut cart = Cart::new();
        let product = product(1, Decimal::new(1000, 2));

        cart.add(&product);
        cart.add(&product);

        assert_eq!(cart.items(), &[line(1, 2, Decimal::new(1000, 2))]);
        assert_eq!(cart.subtotal(), Decimal::new(2000, 2));
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn subtotal_sums_price_times_quantity() {
        let cart = Cart::with_items([
            line(1, 2, Decimal::new(1000, 2)),
            line(2, 3, Decimal::new(5000, 2)),
        ]);

        assert_eq!(cart.subtotal(), Decimal::new(17000, 2));
        assert_eq!(cart.total_item_count(), 5);
    }

    #[test]
    fn subtotal_is_not_rounded() {
        let cart = Cart::with_items([
            line(1, 2, Decimal::new(9999, 2)),
            line(2, 3, Decimal::new(12345, 3)),
        ]);

        assert_eq!(cart.subtotal(), Decimal::new(237_015, 3));
    }

    #[test]
    fn discount_percentage_does_not_affect_subtotal() {
        let mut cart = Cart::new();

        cart.add(&product(1, Decimal::new(100, 0)).with_discount_percentage(Decimal::new(50, 0)));

        assert_eq!(cart.subtotal(), Decimal::new(100, 0));
    }

    #[test]
    fn remove_deletes_in_place() {
        let mut cart = Cart::with_items([
            line(1, 1, Decimal::ONE),
            line(2, 1, Decimal::ONE),
            line(3, 1, Decimal::ONE),
        ]);

        cart.remove(ProductId::new(2));

        assert_eq!(ids(&cart), vec![1, 3]);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut once = Cart::with_items([line(1, 1, Decimal::ONE), line(2, 4, Decimal::TEN)]);
        let mut twice = once.clone();

        once.remove(ProductId::new(1));
        twice.remove(ProductId::new(1));
        twice.remove(ProductId::new(1));

        assert_eq!(once, twice);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut cart = Cart::with_items([line(1, 1, Decimal::ONE)]);
        let before = cart.clone();

        cart.remove(ProductId::new(99));

        assert_eq!(cart, before);
    }

    #[test]
    fn set_quantity_sets_exact_value() -> TestResult {
        let mut cart = Cart::with_items([line(1, 1, Decimal::ONE)]);

        cart.set_quantity(ProductId::new(1), 5);

        assert_eq!(cart.item(ProductId::new(1)).ok_or("missing line")?.quantity, 5);

        cart.set_quantity(ProductId::new(1), 1_000_000);

        assert_eq!(
            cart.item(ProductId::new(1)).ok_or("missing line")?.quantity,
            1_000_000
        );

        Ok(())
    }

    #[test]
    fn set_quantity_non_positive_matches_remove() {
        let start = Cart::with_items([
            line(1, 2, Decimal::new(1000, 2)),
            line(2, 3, Decimal::new(5000, 2)),
        ]);

        for quantity in [0, -1, i64::MIN] {
            let mut via_set = start.clone();
            let mut via_remove = start.clone();

            via_set.set_quantity(ProductId::new(1), quantity);
            via_remove.remove(ProductId::new(1));

            assert_eq!(via_set, via_remove, "set_quantity({quantity}) should remove");
            assert_eq!(via_set.items(), &[line(2, 3, Decimal::new(5000, 2))]);
        }
    }

    #[test]
    fn set_quantity_absent_is_noop() {
        let mut cart = Cart::with_items([line(1, 2, Decimal::ONE)]);
        let before = cart.clone();

        cart.set_quantity(ProductId::new(2), 7);
        cart.set_quantity(ProductId::new(2), 0);

        assert_eq!(cart, before);
    }

    #[test]
    fn increment_and_decrement_step_quantity() -> TestResult {
        let mut cart = Cart::with_items([line(1, 2, Decimal::ONE)]);

        cart.increment(ProductId::new(1));

        assert_eq!(cart.item(ProductId::new(1)).ok_or("missing line")?.quantity, 3);

        cart.decrement(ProductId::new(1));
        cart.decrement(ProductId::new(1));

        assert_eq!(cart.item(ProductId::new(1)).ok_or("missing line")?.quantity, 1);

        cart.decrement(ProductId::new(1));

        assert!(cart.is_empty());

        cart.increment(ProductId::new(1));
        cart.decrement(ProductId::new(1));

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn clear_zeroes_selectors() {
        let mut cart = Cart::with_items([line(1, 2, Decimal::TEN), line(2, 1, Decimal::ONE)]);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn load_bulk_round_trips_valid_items() {
        let items = vec![
            line(3, 1, Decimal::new(250, 2)),
            line(1, 4, Decimal::new(1000, 2)),
            line(2, 2, Decimal::new(5, 1)),
        ];
        let mut cart = Cart::with_items([line(9, 9, Decimal::ONE)]);

        cart.load_bulk(items.clone());

        assert_eq!(cart.items(), items.as_slice());
    }

    #[test]
    fn load_bulk_drops_zero_quantities_and_folds_duplicates() {
        let mut cart = Cart::new();

        cart.load_bulk([
            line(1, 2, Decimal::ONE),
            line(2, 0, Decimal::ONE),
            line(3, 1, Decimal::ONE),
            line(1, 3, Decimal::TEN),
        ]);

        assert_eq!(
            cart.items(),
            &[line(1, 5, Decimal::ONE), line(3, 1, Decimal::ONE)]
        );
    }

    #[test]
    fn apply_dispatches_to_transitions() {
        let mut cart = Cart::new();
        let product = product(1, Decimal::TEN);

        cart.apply(CartAction::add(&product));
        cart.apply(CartAction::Increment(product.id));
        cart.apply(CartAction::SetQuantity {
            id: product.id,
            quantity: 4,
        });

        assert_eq!(cart.total_item_count(), 4);

        cart.apply(CartAction::Decrement(product.id));

        assert_eq!(cart.total_item_count(), 3);

        cart.apply(CartAction::Remove(product.id));

        assert!(cart.is_empty());

        cart.apply(CartAction::LoadBulk(vec![line(2, 2, Decimal::ONE)]));

        assert_eq!(cart.len(), 1);

        cart.apply(CartAction::Clear);

        assert!(cart.is_empty());
    }

    #[test]
    fn line_subtotal_multiplies_price_by_quantity() {
        assert_eq!(
            line(1, 3, Decimal::new(1999, 2)).line_subtotal(),
            Decimal::new(5997, 2)
        );
    }
}
