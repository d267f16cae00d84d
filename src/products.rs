//! Products

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog product identifier.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a product id from its raw catalog value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw catalog value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product record as served by the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog id
    pub id: ProductId,

    /// Display name
    pub title: String,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Catalog category slug
    #[serde(default)]
    pub category: String,

    /// Unit price
    pub price: Decimal,

    /// Advertised discount, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<Decimal>,

    /// Average review rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Decimal>,

    /// Units in stock
    #[serde(default)]
    pub stock: u32,

    /// Brand name, when the catalog has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Thumbnail image URI
    #[serde(default)]
    pub thumbnail: String,

    /// Gallery image URIs
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Creates a product with the given id, title and price; everything else is empty.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            price,
            discount_percentage: None,
            rating: None,
            stock: 0,
            brand: None,
            thumbnail: String::new(),
            images: Vec::new(),
        }
    }

    /// Sets the brand.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Sets the thumbnail URI.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    /// Sets the advertised discount percentage.
    #[must_use]
    pub fn with_discount_percentage(mut self, discount: Decimal) -> Self {
        self.discount_percentage = Some(discount);
        self
    }
}

/// One page of a remote product listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductsPage {
    /// Products on this page
    pub products: Vec<Product>,

    /// Total products matching the query
    #[serde(default)]
    pub total: u64,

    /// Offset of the first product on this page
    #[serde(default)]
    pub skip: u64,

    /// Page size requested
    #[serde(default)]
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_id_displays_raw_value() {
        assert_eq!(ProductId::new(42).to_string(), "42");
        assert_eq!(ProductId::from(7).get(), 7);
    }

    #[test]
    fn product_deserializes_from_catalog_json() -> TestResult {
        let json = r#"{
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "Volumizing mascara",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "brand": "Essence",
            "thumbnail": "https://cdn.example.com/1/thumbnail.png",
            "images": ["https://cdn.example.com/1/1.png"]
        }"#;

        let product: Product = serde_json::from_str(json)?;

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::new(999, 2));
        assert_eq!(product.discount_percentage, Some(Decimal::new(717, 2)));
        assert_eq!(product.brand.as_deref(), Some("Essence"));
        assert_eq!(product.images.len(), 1);

        Ok(())
    }

    #[test]
    fn product_tolerates_missing_optional_fields() -> TestResult {
        let product: Product = serde_json::from_str(r#"{"id": 3, "title": "Plain", "price": 5}"#)?;

        assert_eq!(product, Product::new(3, "Plain", Decimal::new(5, 0)));

        Ok(())
    }

    #[test]
    fn products_page_defaults_paging_fields() -> TestResult {
        let page: ProductsPage =
            serde_json::from_str(r#"{"products": [{"id": 1, "title": "A", "price": 1}]}"#)?;

        assert_eq!(page.products.len(), 1);
        assert_eq!(page.total, 0);
        assert_eq!(page.limit, 0);

        Ok(())
    }
}
