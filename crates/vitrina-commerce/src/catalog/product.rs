//! Product and review types.

use crate::ids::{ProductId, ReviewId, UserId};
use crate::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// List price.
    pub price: Money,
    /// Image URLs; the first one is shown in listings.
    #[serde(default)]
    pub images: Vec<String>,
    /// Top-level category (e.g., "mujer").
    pub category: String,
    /// Category refinement (e.g., "vestidos").
    #[serde(default)]
    pub subcategory: String,
    /// Sizes offered.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Colors offered.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    /// Shown with a "new" badge.
    #[serde(default)]
    pub is_new: bool,
    /// Discount percentage, 0 to 100.
    #[serde(default)]
    pub discount: u8,
    /// Customer reviews.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Create a product with no variants, images or reviews.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            images: Vec::new(),
            category: category.into(),
            subcategory: String::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            stock: 0,
            rating: 0.0,
            is_new: false,
            discount: 0,
            reviews: Vec::new(),
        }
    }

    /// Check if the product has a discount.
    pub fn is_on_sale(&self) -> bool {
        self.discount > 0
    }

    /// Price after the product discount.
    pub fn discounted_price(&self) -> Money {
        if !self.is_on_sale() {
            return self.price;
        }
        let percent = 100u8.saturating_sub(self.discount.min(100));
        self.price.percentage(f64::from(percent))
    }

    /// Check if any units are in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Image used in listings, favorites and cart lines.
    pub fn display_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Whether a cart line may carry `size`. A product without sizes takes
    /// only the empty size.
    pub fn accepts_size(&self, size: &str) -> bool {
        accepts(&self.sizes, size)
    }

    /// Whether a cart line may carry `color`, under the same rule as sizes.
    pub fn accepts_color(&self, color: &str) -> bool {
        accepts(&self.colors, color)
    }

    /// Append a review and set the rating to the mean of all reviews.
    pub fn add_review(&mut self, review: Review) {
        self.reviews.push(review);
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        self.rating = f64::from(total) / self.reviews.len() as f64;
    }
}

fn accepts(offered: &[String], chosen: &str) -> bool {
    if offered.is_empty() {
        chosen.is_empty()
    } else {
        offered.iter().any(|o| o == chosen)
    }
}

/// A customer review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub user_name: String,
    /// Stars, 1 to 5.
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

impl Review {
    pub fn new(
        user_id: impl Into<UserId>,
        user_name: impl Into<String>,
        rating: u8,
        comment: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: ReviewId::generate(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            rating,
            comment: comment.into(),
            date,
        }
    }
}
