//! Product sources.

use crate::catalog::{Product, Review};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;
use tracing::debug;

/// Mock catalog bundled with the crate.
const SAMPLE_CATALOG: &str = include_str!("../../data/products.json");

/// Read access to the products a storefront sells.
pub trait ProductCatalog {
    /// All products, in catalog order.
    fn products(&self) -> &[Product];

    /// Look a product up by id.
    fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products().iter().find(|p| &p.id == id)
    }

    /// Distinct categories, in order of first appearance.
    fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in self.products() {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }
}

/// A catalog held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        debug!(count = products.len(), "catalog loaded");
        Ok(Self::new(products))
    }

    /// Parse a JSON array of products whose prices default to `currency`.
    ///
    /// A price that names its own currency keeps it.
    pub fn from_json_in(json: &str, currency: Currency) -> Result<Self, CommerceError> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        let code = serde_json::to_value(currency)?;
        if let Some(products) = value.as_array_mut() {
            for product in products {
                if let Some(price) = product.get_mut("price").and_then(|p| p.as_object_mut()) {
                    price.entry("currency").or_insert_with(|| code.clone());
                }
            }
        }
        let products: Vec<Product> = serde_json::from_value(value)?;
        debug!(count = products.len(), %currency, "catalog loaded");
        Ok(Self::new(products))
    }

    /// The bundled six-product mock catalog.
    pub fn sample() -> Result<Self, CommerceError> {
        Self::from_json(SAMPLE_CATALOG)
    }

    /// The bundled catalog with prices read in `currency`.
    pub fn sample_in(currency: Currency) -> Result<Self, CommerceError> {
        Self::from_json_in(SAMPLE_CATALOG, currency)
    }

    /// Attach a review to a product and refresh its rating.
    pub fn add_review(&mut self, product_id: &ProductId, review: Review) -> Result<(), CommerceError> {
        if !(1..=5).contains(&review.rating) {
            return Err(CommerceError::ValidationError(format!(
                "review rating must be between 1 and 5, got {}",
                review.rating
            )));
        }
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
        product.add_review(review);
        debug!(%product_id, rating = product.rating, "review added");
        Ok(())
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }
}
