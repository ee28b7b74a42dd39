//! Cart and line item types.

use crate::cart::{CartPricing, LineItemPricing};
use crate::config::StoreConfig;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Identity of a cart line: product plus the chosen size and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl LineKey {
    pub fn new(
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Selected size.
    pub size: String,
    /// Selected color.
    pub color: String,
    /// Image shown next to the line.
    #[serde(default)]
    pub image_url: String,
}

impl LineItem {
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
            size: size.into(),
            color: color.into(),
            image_url: String::new(),
        }
    }

    /// Set the display image.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// The key this line is stored under.
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Whether this line is stored under `key`.
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// Line total (unit_price * quantity).
    pub fn total_price(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// A shopping cart.
///
/// `subtotal` and `tax` are derived from `items` and recomputed by every
/// mutation, so they are only readable.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    subtotal: Money,
    shipping_fee: Money,
    tax: Money,
    tax_rate: f64,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart priced with `config`.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            items: Vec::new(),
            subtotal: Money::zero(config.currency),
            shipping_fee: config.shipping_fee,
            tax: Money::zero(config.currency),
            tax_rate: config.tax_rate,
            currency: config.currency,
        }
    }

    /// Add an item to the cart.
    ///
    /// A line with the same product, size and color absorbs the quantity;
    /// otherwise the item is appended. Returns an error if:
    /// - Quantity is less than one
    /// - The unit price is negative or in another currency
    /// - The resulting quantity would exceed MAX_QUANTITY_PER_ITEM
    /// - Arithmetic overflow would occur
    ///
    /// The cart is unchanged when an error is returned.
    pub fn add_item(&mut self, item: LineItem) -> Result<(), CommerceError> {
        if item.quantity < 1 {
            warn!(product_id = %item.product_id, quantity = item.quantity, "rejected cart add");
            return Err(CommerceError::InvalidQuantity(item.quantity));
        }
        if item.unit_price.is_negative() {
            warn!(product_id = %item.product_id, price = item.unit_price.amount_cents, "rejected cart add");
            return Err(CommerceError::ValidationError(format!(
                "unit price must not be negative, got {}",
                item.unit_price
            )));
        }
        if item.unit_price.currency != self.currency {
            return Err(CommerceError::ValidationError(format!(
                "price currency {} does not match cart currency {}",
                item.unit_price.currency, self.currency
            )));
        }

        let key = item.key();
        let position = self.items.iter().position(|i| i.matches(&key));
        let new_quantity = match position {
            Some(idx) => self.items[idx]
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?,
            None => item.quantity,
        };

        if new_quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                new_quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let previous = self.items.clone();
        match position {
            Some(idx) => self.items[idx].quantity = new_quantity,
            None => self.items.push(item),
        }
        if let Err(e) = self.recalculate() {
            self.items = previous;
            return Err(e);
        }

        debug!(
            product_id = %key.product_id,
            size = %key.size,
            color = %key.color,
            quantity = new_quantity,
            subtotal = self.subtotal.amount_cents,
            "cart line added"
        );
        Ok(())
    }

    /// Remove the line stored under `key`.
    ///
    /// Returns whether a line was removed; an absent line is a no-op. If the
    /// remaining lines cannot be totalled the line stays and `false` is
    /// returned.
    pub fn remove_item(&mut self, key: &LineKey) -> bool {
        let Some(idx) = self.items.iter().position(|i| i.matches(key)) else {
            return false;
        };
        let removed = self.items.remove(idx);
        if let Err(e) = self.recalculate() {
            warn!(product_id = %key.product_id, error = %e, "cart line kept");
            self.items.insert(idx, removed);
            return false;
        }
        debug!(product_id = %key.product_id, size = %key.size, color = %key.color, "cart line removed");
        true
    }

    /// Set the quantity of the line stored under `key`.
    ///
    /// Unlike `add_item` this replaces the quantity. Returns `Ok(false)` when no
    /// such line exists. Quantities below one are rejected; use `remove_item`
    /// to drop a line.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            warn!(product_id = %key.product_id, quantity, "rejected quantity update");
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let Some(idx) = self.items.iter().position(|i| i.matches(key)) else {
            return Ok(false);
        };

        let previous = self.items[idx].quantity;
        self.items[idx].quantity = quantity;
        if let Err(e) = self.recalculate() {
            self.items[idx].quantity = previous;
            return Err(e);
        }

        debug!(product_id = %key.product_id, quantity, "cart quantity updated");
        Ok(true)
    }

    /// Clear all items from the cart. The shipping fee is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
        self.subtotal = Money::zero(self.currency);
        self.tax = Money::zero(self.currency);
        debug!("cart cleared");
    }

    /// Recompute subtotal and tax from the current lines.
    ///
    /// On error the stored totals are left untouched.
    fn recalculate(&mut self) -> Result<(), CommerceError> {
        let mut subtotal = Money::zero(self.currency);
        for item in &self.items {
            subtotal = subtotal
                .try_add(&item.total_price()?)
                .ok_or(CommerceError::Overflow)?;
        }
        self.tax = subtotal.multiply_decimal(self.tax_rate);
        self.subtotal = subtotal;
        Ok(())
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of unit price times quantity over all lines.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Flat shipping fee.
    pub fn shipping_fee(&self) -> Money {
        self.shipping_fee
    }

    /// Tax on the subtotal.
    pub fn tax(&self) -> Money {
        self.tax
    }

    /// Tax rate applied to the subtotal.
    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Subtotal plus shipping plus tax.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.subtotal
            .try_add(&self.shipping_fee)
            .and_then(|m| m.try_add(&self.tax))
            .ok_or(CommerceError::Overflow)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the line stored under `key`.
    pub fn get_item(&self, key: &LineKey) -> Option<&LineItem> {
        self.items.iter().find(|i| i.matches(key))
    }

    /// Per-line and total pricing breakdown.
    pub fn calculate_pricing(&self) -> Result<CartPricing, CommerceError> {
        let line_items = self
            .items
            .iter()
            .map(|item| {
                Ok(LineItemPricing {
                    key: item.key(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    total: item.total_price()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        Ok(CartPricing {
            subtotal: self.subtotal,
            shipping_total: self.shipping_fee,
            tax_total: self.tax,
            grand_total: self.total()?,
            line_items,
        })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}
