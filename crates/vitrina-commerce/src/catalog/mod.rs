//! Product catalog module.
//!
//! Contains product and review types and the read-only catalog provider the
//! storefront is built on.

mod product;
mod provider;

pub use product::{Product, Review};
pub use provider::{InMemoryCatalog, ProductCatalog};
