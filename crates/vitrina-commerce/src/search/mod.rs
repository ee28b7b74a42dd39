//! Search module.
//!
//! Contains filter predicates and the query builder applied to a catalog.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{SearchQuery, SortOption};
