//! Favorites store.

use crate::ids::ProductId;
use crate::money::Money;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Display record kept for a favorited product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub image_url: String,
}

impl FavoriteItem {
    pub fn new(product_id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            image_url: String::new(),
        }
    }

    /// Set the display image.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }
}

/// Favorited products keyed by id, in the order they were favorited.
///
/// Membership is the only state: a present key means "favorited".
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Favorites {
    items: IndexMap<ProductId, FavoriteItem>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Favorite the product if absent, unfavorite it if present.
    ///
    /// Returns `true` when the product is favorited afterwards.
    pub fn toggle_favorite(&mut self, item: FavoriteItem) -> bool {
        if self.items.shift_remove(&item.product_id).is_some() {
            debug!(product_id = %item.product_id, "favorite removed");
            false
        } else {
            debug!(product_id = %item.product_id, "favorite added");
            self.items.insert(item.product_id.clone(), item);
            true
        }
    }

    /// All favorites.
    pub fn items(&self) -> &IndexMap<ProductId, FavoriteItem> {
        &self.items
    }

    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.items.contains_key(product_id)
    }

    pub fn get(&self, product_id: &ProductId) -> Option<&FavoriteItem> {
        self.items.get(product_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn record(id: &str) -> FavoriteItem {
        FavoriteItem::new(id, format!("Producto {}", id), Money::new(29999, Currency::USD))
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favorites = Favorites::new();
        assert!(favorites.toggle_favorite(record("5")));
        assert!(favorites.is_favorite(&ProductId::new("5")));
        assert_eq!(favorites.len(), 1);

        assert!(!favorites.toggle_favorite(record("5")));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let mut favorites = Favorites::new();
        favorites.toggle_favorite(record("1"));
        favorites.toggle_favorite(record("3"));
        let before = favorites.clone();

        favorites.toggle_favorite(record("2"));
        favorites.toggle_favorite(record("2"));
        assert_eq!(favorites, before);

        favorites.toggle_favorite(record("1"));
        favorites.toggle_favorite(record("1"));
        let ids: Vec<&str> = favorites.items().keys().map(|k| k.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_removal_keeps_order_of_rest() {
        let mut favorites = Favorites::new();
        for id in ["1", "2", "3"] {
            favorites.toggle_favorite(record(id));
        }
        favorites.toggle_favorite(record("2"));
        let ids: Vec<&str> = favorites.items().keys().map(|k| k.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_record_is_stored() {
        let mut favorites = Favorites::new();
        favorites.toggle_favorite(record("4").with_image("https://img/4.jpg"));
        let stored = favorites.get(&ProductId::new("4")).unwrap();
        assert_eq!(stored.image_url, "https://img/4.jpg");
        assert_eq!(stored.price.amount_cents, 29999);
    }
}
