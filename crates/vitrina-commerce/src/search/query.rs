//! Search query builder.

use crate::catalog::{Product, ProductCatalog};
use crate::error::CommerceError;
use crate::search::Filter;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Newest,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by highest rated.
    Rating,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::Rating => "Highest Rated",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Newest => Ordering::Equal,
            SortOption::PriceAsc => a.price.amount_cents.cmp(&b.price.amount_cents),
            SortOption::PriceDesc => b.price.amount_cents.cmp(&a.price.amount_cents),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(SortOption::Newest),
            "price-asc" | "price-low" => Ok(SortOption::PriceAsc),
            "price-desc" | "price-high" => Ok(SortOption::PriceDesc),
            "rating" => Ok(SortOption::Rating),
            other => Err(CommerceError::ValidationError(format!(
                "unknown sort option: {}",
                other
            ))),
        }
    }
}

/// A product search: AND-ed filters plus a sort order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchQuery {
    /// Text query, also present in `filters` as `Filter::Text`.
    pub query: Option<String>,
    /// Filters to apply.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Blank queries are ignored.
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        let trimmed = q.trim();
        if !trimmed.is_empty() {
            self.query = Some(trimmed.to_string());
            self.filters.push(Filter::Text(trimmed.to_string()));
        }
        self
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Whether `product` passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Matching products from `catalog`, sorted. Ties keep catalog order.
    pub fn apply<'a, C>(&self, catalog: &'a C) -> Vec<&'a Product>
    where
        C: ProductCatalog + ?Sized,
    {
        let mut results: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|p| self.matches(p))
            .collect();
        results.sort_by(|a, b| self.sort.compare(a, b));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::money::{Currency, Money};

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_empty_query_returns_catalog_order() {
        let catalog = InMemoryCatalog::sample().unwrap();
        let results = SearchQuery::new().apply(&catalog);
        assert_eq!(ids(&results), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_category_with_price_sort() {
        let catalog = InMemoryCatalog::sample().unwrap();
        let results = SearchQuery::new()
            .with_filter(Filter::category("accesorios"))
            .with_sort(SortOption::PriceDesc)
            .apply(&catalog);
        assert_eq!(ids(&results), vec!["6", "5"]);
    }

    #[test]
    fn test_price_asc_is_stable() {
        let catalog = InMemoryCatalog::sample().unwrap();
        let results = SearchQuery::new()
            .with_sort(SortOption::PriceAsc)
            .apply(&catalog);
        // "1" and "5" share a price and keep catalog order.
        assert_eq!(ids(&results), vec!["1", "5", "2", "3", "6", "4"]);
    }

    #[test]
    fn test_rating_sort() {
        let catalog = InMemoryCatalog::sample().unwrap();
        let results = SearchQuery::new().with_sort(SortOption::Rating).apply(&catalog);
        assert_eq!(ids(&results), vec!["4", "2", "6", "5", "3", "1"]);
    }

    #[test]
    fn test_text_and_sale_filters() {
        let catalog = InMemoryCatalog::sample().unwrap();
        let results = SearchQuery::new()
            .with_query("cuero")
            .with_filter(Filter::OnSale)
            .apply(&catalog);
        assert_eq!(ids(&results), vec!["6"]);
    }

    #[test]
    fn test_price_range_filter() {
        let catalog = InMemoryCatalog::sample().unwrap();
        let results = SearchQuery::new()
            .with_filter(Filter::price_range(
                Some(Money::new(50000, Currency::USD)),
                Some(Money::new(90000, Currency::USD)),
            ))
            .apply(&catalog);
        assert_eq!(ids(&results), vec!["2", "3", "6"]);
    }

    #[test]
    fn test_variant_and_rating_filters() {
        let catalog = InMemoryCatalog::sample().unwrap();
        let results = SearchQuery::new()
            .with_filter(Filter::Size("M".into()))
            .with_filter(Filter::InStock)
            .apply(&catalog);
        assert_eq!(ids(&results), vec!["1", "3", "4"]);

        let results = SearchQuery::new()
            .with_filter(Filter::Color("Negro".into()))
            .with_filter(Filter::Rating { min: 4.8 })
            .with_sort(SortOption::PriceAsc)
            .apply(&catalog);
        assert_eq!(ids(&results), vec!["2", "6", "4"]);
    }

    #[test]
    fn test_blank_query_ignored() {
        let query = SearchQuery::new().with_query("   ");
        assert!(query.query.is_none());
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_sort_option_parsing() {
        assert_eq!("price-low".parse::<SortOption>().unwrap(), SortOption::PriceAsc);
        assert_eq!("RATING".parse::<SortOption>().unwrap(), SortOption::Rating);
        assert!("cheapest".parse::<SortOption>().is_err());
    }
}
