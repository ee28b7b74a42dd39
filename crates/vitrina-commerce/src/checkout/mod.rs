//! Checkout module.
//!
//! Contains the three-step checkout flow, the data each step collects, and the
//! order summary it produces.

mod address;
mod flow;
mod order;
mod payment;

pub use address::ShippingInfo;
pub use flow::{CheckoutFlow, CheckoutStep};
pub use order::OrderSummary;
pub use payment::{PaymentDetails, PaymentSummary};
