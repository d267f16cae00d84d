//! Catalog
//!
//! Products that can be added to the cart. A catalog is loaded from either a
//! remote list response (`{"products": [...], "total": ..}`) saved as JSON, or a
//! YAML fixture with the same shape.

use std::{fs, io, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use tracing::debug;

use crate::{
    products::{Product, ProductId, ProductsPage},
    summary::money,
};

/// Catalog loading and lookup errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file or writing a listing
    #[error("Catalog IO error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML catalog: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither YAML nor JSON
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

/// Products indexed by id, in listing order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from products in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let products: Vec<Product> = products.into_iter().collect();
        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        Ok(Self { products, index })
    }

    /// Parse a YAML catalog fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or contains duplicate ids.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let page: ProductsPage = serde_norway::from_str(yaml)?;

        Self::from_products(page.products)
    }

    /// Parse a JSON product list response.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or contains duplicate ids.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let page: ProductsPage = serde_json::from_str(json)?;

        Self::from_products(page.products)
    }

    /// Load a catalog file, picking the parser from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if its
    /// extension is not `yml`, `yaml` or `json`.
    #[tracing::instrument(name = "cart.catalog.load", skip_all, fields(path = %path.as_ref().display()), err)]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let catalog = match extension.as_str() {
            "yml" | "yaml" => Self::from_yaml_str(&fs::read_to_string(path)?)?,
            "json" => Self::from_json_str(&fs::read_to_string(path)?)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        };

        debug!(products = catalog.len(), "catalog loaded");

        Ok(catalog)
    }

    /// Look up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|position| self.products.get(*position))
    }

    /// Look up a product by id, failing if it is not listed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if no product has this id.
    pub fn product(&self, id: ProductId) -> Result<&Product, CatalogError> {
        self.get(id).ok_or(CatalogError::ProductNotFound(id))
    }

    /// Products in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog lists no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Render the product listing as a table.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if writing to `out` fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        currency: &'static Currency,
    ) -> Result<(), CatalogError> {
        let mut builder = Builder::default();

        builder.push_record(["Id", "Item", "Brand", "Price", "Stock"]);

        for product in &self.products {
            builder.push_record([
                product.id.to_string(),
                product.title.clone(),
                product.brand.clone().unwrap_or_default(),
                money(product.price, currency),
                product.stock.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..), Alignment::right());

        writeln!(out, "{table}")?;

        Ok(())
    }
}
