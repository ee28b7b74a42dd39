//! The storefront state container.
//!
//! A `Storefront` owns the cart, the favorites and the injected catalog. All
//! mutation goes through `&mut self`, so there is exactly one writer and every
//! read sees the latest write.

use crate::cart::{Cart, LineItem, LineKey};
use crate::catalog::{InMemoryCatalog, Product, ProductCatalog};
use crate::checkout::{CheckoutFlow, OrderSummary};
use crate::config::StoreConfig;
use crate::error::CommerceError;
use crate::favorites::{FavoriteItem, Favorites};
use crate::format::DisplayFormatter;
use crate::ids::ProductId;
use crate::search::SearchQuery;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A state change, as dispatched by a UI or replayed from a script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Add a fully described line.
    AddItem(LineItem),
    /// Add a catalog product in the given size and color.
    AddToCart {
        product_id: ProductId,
        size: String,
        color: String,
        #[serde(default = "one")]
        quantity: i64,
    },
    RemoveItem {
        product_id: ProductId,
        size: String,
        color: String,
    },
    UpdateQuantity {
        product_id: ProductId,
        size: String,
        color: String,
        quantity: i64,
    },
    ClearCart,
    /// Toggle a favorite from a display record.
    ToggleFavorite(FavoriteItem),
    /// Toggle a catalog product.
    ToggleFavoriteProduct { product_id: ProductId },
}

fn one() -> i64 {
    1
}

/// Cart, favorites and catalog behind one writer.
#[derive(Debug, Clone)]
pub struct Storefront<C = InMemoryCatalog> {
    config: StoreConfig,
    catalog: C,
    cart: Cart,
    favorites: Favorites,
    formatter: DisplayFormatter,
}

impl<C: ProductCatalog> Storefront<C> {
    /// Create a storefront with an empty cart and no favorites.
    pub fn new(config: StoreConfig, catalog: C) -> Result<Self, CommerceError> {
        config.validate()?;
        if let Some(product) = catalog
            .products()
            .iter()
            .find(|p| p.price.currency != config.currency)
        {
            return Err(CommerceError::ConfigError(format!(
                "product {} is priced in {} but the store currency is {}",
                product.id, product.price.currency, config.currency
            )));
        }
        info!(
            products = catalog.products().len(),
            tax_rate = config.tax_rate,
            currency = %config.currency,
            "storefront ready"
        );
        Ok(Self {
            cart: Cart::new(&config),
            favorites: Favorites::new(),
            formatter: DisplayFormatter::from(&config.display),
            config,
            catalog,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut C {
        &mut self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Formatter for shopper-facing prices.
    pub fn formatter(&self) -> &DisplayFormatter {
        &self.formatter
    }

    /// Run a product search against the catalog.
    pub fn search(&self, query: &SearchQuery) -> Vec<&Product> {
        query.apply(&self.catalog)
    }

    /// Look a product up, failing if it is not in the catalog.
    pub fn product(&self, product_id: &ProductId) -> Result<&Product, CommerceError> {
        self.catalog
            .get(product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))
    }

    /// Add a catalog product to the cart at its list price.
    ///
    /// The size and color must be among those the product offers; a product
    /// with no sizes or colors takes the empty string.
    pub fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        let product = self.product(product_id)?;
        if !product.accepts_size(size) {
            return Err(CommerceError::VariantNotFound {
                product_id: product_id.to_string(),
                detail: format!("size {}", size),
            });
        }
        if !product.accepts_color(color) {
            return Err(CommerceError::VariantNotFound {
                product_id: product_id.to_string(),
                detail: format!("color {}", color),
            });
        }

        let mut item = LineItem::new(
            product.id.clone(),
            product.name.clone(),
            product.price,
            quantity,
            size,
            color,
        );
        if let Some(image) = product.display_image() {
            item = item.with_image(image);
        }
        self.cart.add_item(item)
    }

    pub fn add_item(&mut self, item: LineItem) -> Result<(), CommerceError> {
        self.cart.add_item(item)
    }

    pub fn remove_item(&mut self, key: &LineKey) -> bool {
        self.cart.remove_item(key)
    }

    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> Result<bool, CommerceError> {
        self.cart.update_quantity(key, quantity)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Toggle a favorite from its display record.
    pub fn toggle_favorite(&mut self, item: FavoriteItem) -> bool {
        self.favorites.toggle_favorite(item)
    }

    /// Toggle a catalog product, building its record from the catalog.
    pub fn toggle_favorite_product(&mut self, product_id: &ProductId) -> Result<bool, CommerceError> {
        let product = self.product(product_id)?;
        let mut item = FavoriteItem::new(product.id.clone(), product.name.clone(), product.price);
        if let Some(image) = product.display_image() {
            item = item.with_image(image);
        }
        Ok(self.favorites.toggle_favorite(item))
    }

    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.favorites.is_favorite(product_id)
    }

    /// Apply an action.
    pub fn dispatch(&mut self, action: Action) -> Result<(), CommerceError> {
        debug!(?action, "dispatch");
        match action {
            Action::AddItem(item) => self.add_item(item),
            Action::AddToCart {
                product_id,
                size,
                color,
                quantity,
            } => self.add_to_cart(&product_id, &size, &color, quantity),
            Action::RemoveItem {
                product_id,
                size,
                color,
            } => {
                self.remove_item(&LineKey::new(product_id, size, color));
                Ok(())
            }
            Action::UpdateQuantity {
                product_id,
                size,
                color,
                quantity,
            } => self
                .update_quantity(&LineKey::new(product_id, size, color), quantity)
                .map(|_| ()),
            Action::ClearCart => {
                self.clear_cart();
                Ok(())
            }
            Action::ToggleFavorite(item) => {
                self.toggle_favorite(item);
                Ok(())
            }
            Action::ToggleFavoriteProduct { product_id } => {
                self.toggle_favorite_product(&product_id).map(|_| ())
            }
        }
    }

    /// Start a checkout for the current cart.
    pub fn begin_checkout(&self) -> Result<CheckoutFlow, CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(CheckoutFlow::new())
    }

    /// Place the order for the current cart and empty the cart.
    pub fn place_order(&mut self, flow: &mut CheckoutFlow) -> Result<OrderSummary, CommerceError> {
        let order = flow.place_order(&self.cart)?.clone();
        self.cart.clear();
        Ok(order)
    }
}

impl Storefront<InMemoryCatalog> {
    /// Default configuration over the bundled mock catalog.
    pub fn with_sample_catalog() -> Result<Self, CommerceError> {
        Self::new(StoreConfig::default(), InMemoryCatalog::sample()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn store() -> Storefront {
        Storefront::with_sample_catalog().unwrap()
    }

    #[test]
    fn test_add_to_cart_uses_catalog() {
        let mut store = store();
        store
            .add_to_cart(&ProductId::new("1"), "M", "Negro", 2)
            .unwrap();

        let line = &store.cart().items()[0];
        assert_eq!(line.name, "Camiseta Básica");
        assert_eq!(line.unit_price.amount_cents, 29999);
        assert!(line.image_url.contains("unsplash"));
        assert_eq!(store.cart().subtotal().amount_cents, 59998);
    }

    #[test]
    fn test_add_to_cart_checks_variant() {
        let mut store = store();
        let err = store
            .add_to_cart(&ProductId::new("1"), "XXL", "Negro", 1)
            .unwrap_err();
        assert!(matches!(err, CommerceError::VariantNotFound { .. }));

        let err = store
            .add_to_cart(&ProductId::new("1"), "M", "Rosa", 1)
            .unwrap_err();
        assert!(matches!(err, CommerceError::VariantNotFound { .. }));

        let err = store
            .add_to_cart(&ProductId::new("42"), "M", "Negro", 1)
            .unwrap_err();
        assert_eq!(err, CommerceError::ProductNotFound("42".into()));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_toggle_favorite_product() {
        let mut store = store();
        let id = ProductId::new("5");
        assert!(store.toggle_favorite_product(&id).unwrap());
        assert!(store.is_favorite(&id));
        assert_eq!(store.favorites().get(&id).unwrap().name, "Collar Elegante");

        assert!(!store.toggle_favorite_product(&id).unwrap());
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_dispatch_from_json() {
        let mut store = store();
        let actions: Vec<Action> = serde_json::from_str(
            r#"[
                {"action": "add_item", "product_id": "1", "name": "Camiseta", "unit_price": {"amount_cents": 1000},
                 "quantity": 1, "size": "M", "color": "Negro"},
                {"action": "add_item", "product_id": "1", "name": "Camiseta", "unit_price": {"amount_cents": 1000},
                 "quantity": 2, "size": "M", "color": "Negro"},
                {"action": "toggle_favorite_product", "product_id": "5"},
                {"action": "update_quantity", "product_id": "1", "size": "M", "color": "Negro", "quantity": 4},
                {"action": "add_to_cart", "product_id": "6", "size": "Único", "color": "Marrón"}
            ]"#,
        )
        .unwrap();

        for action in actions {
            store.dispatch(action).unwrap();
        }

        assert_eq!(store.cart().unique_item_count(), 2);
        assert_eq!(store.cart().items()[0].quantity, 4);
        assert_eq!(store.cart().items()[1].quantity, 1);
        assert_eq!(store.cart().subtotal().amount_cents, 4000 + 89999);
        assert!(store.is_favorite(&ProductId::new("5")));
    }

    #[test]
    fn test_remove_action_for_missing_line_is_ok() {
        let mut store = store();
        store
            .dispatch(Action::RemoveItem {
                product_id: ProductId::new("1"),
                size: "M".into(),
                color: "Negro".into(),
            })
            .unwrap();
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_begin_checkout_requires_items() {
        let mut store = store();
        assert_eq!(store.begin_checkout().unwrap_err(), CommerceError::EmptyCart);

        store
            .add_item(LineItem::new("x", "x", Money::new(500, Currency::USD), 1, "M", "Negro"))
            .unwrap();
        assert!(store.begin_checkout().is_ok());
    }

    #[test]
    fn test_add_product_without_variants() {
        let mut products = InMemoryCatalog::sample().unwrap().products().to_vec();
        products.push(Product::new(
            "9",
            "Tarjeta regalo",
            Money::new(5000, Currency::USD),
            "accesorios",
        ));
        let mut store = Storefront::new(StoreConfig::default(), InMemoryCatalog::new(products)).unwrap();

        store.add_to_cart(&ProductId::new("9"), "", "", 1).unwrap();
        assert_eq!(store.cart().get_item(&LineKey::new("9", "", "")).unwrap().quantity, 1);

        let err = store
            .add_to_cart(&ProductId::new("9"), "M", "", 1)
            .unwrap_err();
        assert!(matches!(err, CommerceError::VariantNotFound { .. }));
    }

    #[test]
    fn test_store_currency_applies_to_catalog() {
        let config = StoreConfig::for_currency(Currency::EUR);
        let mut store = Storefront::new(config, InMemoryCatalog::sample_in(Currency::EUR).unwrap()).unwrap();
        store
            .add_to_cart(&ProductId::new("1"), "M", "Negro", 1)
            .unwrap();
        assert_eq!(store.cart().subtotal(), Money::new(29999, Currency::EUR));
        assert_eq!(store.cart().shipping_fee(), Money::new(1000, Currency::EUR));
    }

    #[test]
    fn test_catalog_in_other_currency_rejected() {
        let config = StoreConfig::for_currency(Currency::EUR);
        let err = Storefront::new(config, InMemoryCatalog::sample().unwrap()).unwrap_err();
        assert!(matches!(err, CommerceError::ConfigError(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = StoreConfig {
            tax_rate: -0.1,
            ..StoreConfig::default()
        };
        assert!(Storefront::new(config, InMemoryCatalog::default()).is_err());
    }
}
