//! Product filter predicates.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A predicate over catalog products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Filter by top-level category.
    Category(String),
    /// Filter by subcategory.
    Subcategory(String),
    /// Filter by list price. A missing or zero bound does not constrain.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Case-insensitive search in name and description.
    Text(String),
    /// Only discounted products.
    OnSale,
    /// Only show in-stock items.
    InStock,
    /// Products offered in this size.
    Size(String),
    /// Products offered in this color.
    Color(String),
    /// Filter by minimum rating.
    Rating { min: f64 },
}

impl Filter {
    /// Create a category filter.
    pub fn category(category: impl Into<String>) -> Self {
        Filter::Category(category.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Whether `product` passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(category) => &product.category == category,
            Filter::Subcategory(subcategory) => &product.subcategory == subcategory,
            Filter::PriceRange { min, max } => {
                let cents = product.price.amount_cents;
                let above_min = min
                    .filter(|m| !m.is_zero())
                    .map_or(true, |m| cents >= m.amount_cents);
                let below_max = max
                    .filter(|m| !m.is_zero())
                    .map_or(true, |m| cents <= m.amount_cents);
                above_min && below_max
            }
            Filter::Text(query) => {
                let needle = query.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            }
            Filter::OnSale => product.is_on_sale(),
            Filter::InStock => product.is_in_stock(),
            Filter::Size(size) => product.offers_size(size),
            Filter::Color(color) => product.offers_color(color),
            Filter::Rating { min } => product.rating >= *min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn product(price_cents: i64) -> Product {
        let mut p = Product::new("1", "Vestido Floral", Money::new(price_cents, Currency::USD), "mujer");
        p.description = "Vestido casual con estampado floral".to_string();
        p.subcategory = "vestidos".to_string();
        p
    }

    #[test]
    fn test_price_range() {
        let p = product(79999);
        let usd = |c| Some(Money::new(c, Currency::USD));

        assert!(Filter::price_range(usd(50000), usd(80000)).matches(&p));
        assert!(!Filter::price_range(usd(80000), None).matches(&p));
        assert!(!Filter::price_range(None, usd(50000)).matches(&p));
    }

    #[test]
    fn test_zero_bound_is_unbounded() {
        let p = product(79999);
        let zero = Some(Money::zero(Currency::USD));
        assert!(Filter::price_range(zero, zero).matches(&p));
    }

    #[test]
    fn test_text_is_case_insensitive() {
        let p = product(1000);
        assert!(Filter::text("FLORAL").matches(&p));
        assert!(Filter::text("casual").matches(&p));
        assert!(!Filter::text("cuero").matches(&p));
    }

    #[test]
    fn test_category_and_subcategory() {
        let p = product(1000);
        assert!(Filter::category("mujer").matches(&p));
        assert!(!Filter::category("hombre").matches(&p));
        assert!(Filter::Subcategory("vestidos".into()).matches(&p));
    }

    #[test]
    fn test_in_stock() {
        let mut p = product(1000);
        assert!(!Filter::InStock.matches(&p));
        p.stock = 1;
        assert!(Filter::InStock.matches(&p));
    }

    #[test]
    fn test_size_and_color() {
        let mut p = product(1000);
        p.sizes = vec!["S".into(), "M".into()];
        p.colors = vec!["Rosa".into()];

        assert!(Filter::Size("M".into()).matches(&p));
        assert!(!Filter::Size("XL".into()).matches(&p));
        assert!(Filter::Color("Rosa".into()).matches(&p));
        assert!(!Filter::Color("rosa".into()).matches(&p));
    }

    #[test]
    fn test_rating_minimum_is_inclusive() {
        let mut p = product(1000);
        p.rating = 4.5;
        assert!(Filter::Rating { min: 4.5 }.matches(&p));
        assert!(Filter::Rating { min: 4.0 }.matches(&p));
        assert!(!Filter::Rating { min: 4.6 }.matches(&p));
    }

    #[test]
    fn test_on_sale() {
        let mut p = product(1000);
        assert!(!Filter::OnSale.matches(&p));
        p.discount = 15;
        assert!(Filter::OnSale.matches(&p));
    }
}
