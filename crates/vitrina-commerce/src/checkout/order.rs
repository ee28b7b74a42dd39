//! Order summary produced when checkout completes.

use crate::cart::{Cart, LineItem};
use crate::checkout::{PaymentSummary, ShippingInfo};
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub id: OrderId,
    pub lines: Vec<LineItem>,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    /// subtotal + shipping + tax.
    pub total: Money,
    pub ship_to: ShippingInfo,
    pub payment: PaymentSummary,
    pub placed_at: DateTime<Utc>,
}

impl OrderSummary {
    /// Snapshot `cart` together with the checkout details.
    pub fn from_cart(
        cart: &Cart,
        ship_to: ShippingInfo,
        payment: PaymentSummary,
    ) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(Self {
            id: OrderId::generate(),
            lines: cart.items().to_vec(),
            subtotal: cart.subtotal(),
            shipping: cart.shipping_fee(),
            tax: cart.tax(),
            total: cart.total()?,
            ship_to,
            payment,
            placed_at: Utc::now(),
        })
    }

    /// Total units ordered.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
