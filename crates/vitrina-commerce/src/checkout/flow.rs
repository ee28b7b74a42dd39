//! Checkout flow state machine.

use crate::cart::Cart;
use crate::checkout::{OrderSummary, PaymentDetails, PaymentSummary, ShippingInfo};
use crate::ids::CheckoutId;
use crate::CommerceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Shipping information.
    Shipping,
    /// Payment details.
    Payment,
    /// Order review before submission.
    Review,
    /// Order placed.
    Complete,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping Information",
            CheckoutStep::Payment => "Payment Method",
            CheckoutStep::Review => "Confirm Order",
            CheckoutStep::Complete => "Complete",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
            CheckoutStep::Complete => 4,
        }
    }

    /// Number of steps the shopper fills in.
    pub const INPUT_STEPS: u8 = 3;
}

/// Checkout flow state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckoutFlow {
    /// Unique checkout identifier.
    pub id: CheckoutId,
    step: CheckoutStep,
    completed_steps: Vec<CheckoutStep>,
    shipping: Option<ShippingInfo>,
    payment: Option<PaymentSummary>,
    order: Option<OrderSummary>,
    created_at: DateTime<Utc>,
}

impl CheckoutFlow {
    /// Start a checkout at the shipping step.
    pub fn new() -> Self {
        Self {
            id: CheckoutId::generate(),
            step: CheckoutStep::Shipping,
            completed_steps: Vec::new(),
            shipping: None,
            payment: None,
            order: None,
            created_at: Utc::now(),
        }
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Steps already passed.
    pub fn completed_steps(&self) -> &[CheckoutStep] {
        &self.completed_steps
    }

    pub fn shipping(&self) -> Option<&ShippingInfo> {
        self.shipping.as_ref()
    }

    pub fn payment(&self) -> Option<&PaymentSummary> {
        self.payment.as_ref()
    }

    /// The placed order, once complete.
    pub fn order(&self) -> Option<&OrderSummary> {
        self.order.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Record shipping information. Every field is required.
    pub fn set_shipping(&mut self, info: ShippingInfo) -> Result<(), CommerceError> {
        self.ensure_open()?;
        let missing = info.missing_fields();
        if !missing.is_empty() {
            return Err(CommerceError::CheckoutIncomplete(missing.join(", ")));
        }
        self.shipping = Some(info);
        Ok(())
    }

    /// Validate card details and keep their masked summary.
    pub fn set_payment(&mut self, details: &PaymentDetails) -> Result<(), CommerceError> {
        self.ensure_open()?;
        self.payment = Some(details.summarize()?);
        Ok(())
    }

    /// Check if checkout can advance to a step.
    pub fn can_advance_to(&self, step: CheckoutStep) -> bool {
        match step {
            CheckoutStep::Shipping => true,
            CheckoutStep::Payment => self.shipping.is_some(),
            CheckoutStep::Review => {
                self.can_advance_to(CheckoutStep::Payment) && self.payment.is_some()
            }
            CheckoutStep::Complete => self.order.is_some(),
        }
    }

    /// Advance to the next input step.
    ///
    /// Leaving `Review` happens through `place_order`, which needs the cart.
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        let next = match self.step {
            CheckoutStep::Shipping => CheckoutStep::Payment,
            CheckoutStep::Payment => CheckoutStep::Review,
            CheckoutStep::Review | CheckoutStep::Complete => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: self.step.as_str().to_string(),
                    to: "next".to_string(),
                })
            }
        };

        if !self.can_advance_to(next) {
            return Err(CommerceError::CheckoutIncomplete(
                self.missing_for_step(next).join(", "),
            ));
        }

        self.move_to(next);
        Ok(next)
    }

    /// Go back to the previous step.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = match self.step {
            CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Review => CheckoutStep::Payment,
            CheckoutStep::Shipping | CheckoutStep::Complete => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: self.step.as_str().to_string(),
                    to: "previous".to_string(),
                })
            }
        };

        debug!(checkout_id = %self.id, from = self.step.as_str(), to = prev.as_str(), "checkout step back");
        self.step = prev;
        Ok(prev)
    }

    /// Place the order for `cart` from the review step.
    ///
    /// The cart itself is not modified; the storefront clears it afterwards.
    pub fn place_order(&mut self, cart: &Cart) -> Result<&OrderSummary, CommerceError> {
        if self.step != CheckoutStep::Review {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: CheckoutStep::Complete.as_str().to_string(),
            });
        }
        let (Some(ship_to), Some(payment)) = (self.shipping.clone(), self.payment.clone()) else {
            return Err(CommerceError::CheckoutIncomplete(
                self.missing_for_step(CheckoutStep::Review).join(", "),
            ));
        };

        let order = OrderSummary::from_cart(cart, ship_to, payment)?;
        info!(
            checkout_id = %self.id,
            order_id = %order.id,
            items = order.item_count(),
            total = order.total.amount_cents,
            "order placed"
        );
        self.move_to(CheckoutStep::Complete);
        Ok(&*self.order.insert(order))
    }

    /// Check if checkout is complete.
    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Complete
    }

    /// Get progress percentage.
    pub fn progress_percent(&self) -> u8 {
        let done = self.step.number() - 1;
        ((f64::from(done) / f64::from(CheckoutStep::INPUT_STEPS)) * 100.0) as u8
    }

    fn move_to(&mut self, next: CheckoutStep) {
        if !self.completed_steps.contains(&self.step) {
            self.completed_steps.push(self.step);
        }
        debug!(checkout_id = %self.id, from = self.step.as_str(), to = next.as_str(), "checkout step");
        self.step = next;
    }

    fn ensure_open(&self) -> Result<(), CommerceError> {
        if self.is_complete() {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: CheckoutStep::Complete.as_str().to_string(),
                to: "edit".to_string(),
            });
        }
        Ok(())
    }

    /// Get what's missing to advance to a step.
    fn missing_for_step(&self, step: CheckoutStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            CheckoutStep::Payment => {
                if self.shipping.is_none() {
                    missing.push("shipping information");
                }
            }
            CheckoutStep::Review => {
                missing.extend(self.missing_for_step(CheckoutStep::Payment));
                if self.payment.is_none() {
                    missing.push("payment method");
                }
            }
            _ => {}
        }
        missing
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}
