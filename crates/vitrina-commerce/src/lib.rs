//! Storefront state core for Vitrina.
//!
//! This crate holds the in-memory state behind a small clothing storefront:
//!
//! - **Catalog**: Products and reviews behind a read-only `ProductCatalog`
//! - **Search**: Filters and sort orders over the catalog
//! - **Cart**: Line items keyed by product, size and color, with subtotal and tax
//! - **Favorites**: Favorited products keyed by id
//! - **Checkout**: Three-step flow ending in an order summary
//!
//! Nothing is persisted; a `Storefront` lives as long as its owner.
//!
//! # Example
//!
//! ```rust
//! use vitrina_commerce::prelude::*;
//!
//! let mut store = Storefront::with_sample_catalog()?;
//! store.add_to_cart(&ProductId::new("1"), "M", "Negro", 2)?;
//! store.toggle_favorite_product(&ProductId::new("5"))?;
//!
//! let cart = store.cart();
//! assert_eq!(cart.item_count(), 2);
//! println!("Total: {}", store.formatter().format(&cart.total()?));
//! # Ok::<(), CommerceError>(())
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod favorites;
pub mod search;
pub mod store;

pub use config::StoreConfig;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use store::{Action, Storefront};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{DisplayConfig, StoreConfig};
    pub use crate::error::CommerceError;
    pub use crate::format::DisplayFormatter;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::store::{Action, Storefront};

    // Catalog
    pub use crate::catalog::{InMemoryCatalog, Product, ProductCatalog, Review};

    // Cart
    pub use crate::cart::{Cart, CartPricing, LineItem, LineItemPricing, LineKey};

    // Favorites
    pub use crate::favorites::{FavoriteItem, Favorites};

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutStep, OrderSummary, PaymentDetails, PaymentSummary, ShippingInfo,
    };

    // Search
    pub use crate::search::{Filter, SearchQuery, SortOption};
}
