//! Cart pricing breakdown.

use crate::cart::LineKey;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// Tax amount.
    pub tax_total: Money,
    /// Final total (subtotal + shipping + tax).
    pub grand_total: Money,
    /// Per-line breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Share of the grand total that is tax, as a percentage.
    pub fn tax_percentage_of_total(&self) -> f64 {
        if self.grand_total.amount_cents == 0 {
            return 0.0;
        }
        (self.tax_total.amount_cents as f64 / self.grand_total.amount_cents as f64) * 100.0
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Line identity.
    pub key: LineKey,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// unit_price * quantity.
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_tax_share() {
        let pricing = CartPricing {
            subtotal: Money::new(10000, Currency::USD),
            shipping_total: Money::new(1000, Currency::USD),
            tax_total: Money::new(1600, Currency::USD),
            grand_total: Money::new(12600, Currency::USD),
            line_items: vec![],
        };
        assert!((pricing.tax_percentage_of_total() - 12.698).abs() < 0.01);
    }
}
