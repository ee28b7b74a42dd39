//! Shopping cart module.
//!
//! Contains the cart store, its line items, and the pricing breakdown.

mod cart;
mod pricing;

pub use cart::{Cart, LineItem, LineKey, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartPricing, LineItemPricing};
