//! Card details collected in the payment step.
//!
//! Nothing is charged. Details are validated for shape and reduced to a
//! masked summary; the full number and CVV are dropped.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Card details as typed by the shopper.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PaymentDetails {
    pub card_name: String,
    pub card_number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvv: String,
}

impl PaymentDetails {
    /// Validate the details and keep only what the order needs.
    pub fn summarize(&self) -> Result<PaymentSummary, CommerceError> {
        if self.card_name.trim().is_empty() {
            return Err(invalid("name on card is required"));
        }

        let digits: String = self.card_number.chars().filter(|c| *c != ' ').collect();
        if !(13..=19).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("card number must have 13 to 19 digits"));
        }

        let (month, year) = parse_expiry(&self.expiry)?;

        if !(3..=4).contains(&self.cvv.len()) || !self.cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("CVV must have 3 or 4 digits"));
        }

        Ok(PaymentSummary {
            card_name: self.card_name.trim().to_string(),
            last4: digits[digits.len() - 4..].to_string(),
            expiry_month: month,
            expiry_year: year,
        })
    }
}

fn parse_expiry(expiry: &str) -> Result<(u8, u8), CommerceError> {
    let (mm, yy) = expiry
        .trim()
        .split_once('/')
        .ok_or_else(|| invalid("expiry must be MM/YY"))?;
    let two_digits = |part: &str| part.len() == 2 && part.chars().all(|c| c.is_ascii_digit());
    if !two_digits(mm) || !two_digits(yy) {
        return Err(invalid("expiry must be MM/YY"));
    }
    let month: u8 = mm.parse().map_err(|_| invalid("expiry must be MM/YY"))?;
    let year: u8 = yy.parse().map_err(|_| invalid("expiry must be MM/YY"))?;
    if !(1..=12).contains(&month) {
        return Err(invalid("expiry month must be 01 to 12"));
    }
    Ok((month, year))
}

fn invalid(msg: &str) -> CommerceError {
    CommerceError::ValidationError(msg.to_string())
}

/// What is kept of the card after the payment step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentSummary {
    pub card_name: String,
    pub last4: String,
    pub expiry_month: u8,
    pub expiry_year: u8,
}

impl PaymentSummary {
    /// e.g. `**** **** **** 4242`.
    pub fn masked_number(&self) -> String {
        format!("**** **** **** {}", self.last4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> PaymentDetails {
        PaymentDetails {
            card_name: "Juan Pérez".into(),
            card_number: "4242 4242 4242 4242".into(),
            expiry: "08/27".into(),
            cvv: "123".into(),
        }
    }

    #[test]
    fn test_summary_masks_number() {
        let summary = card().summarize().unwrap();
        assert_eq!(summary.last4, "4242");
        assert_eq!(summary.masked_number(), "**** **** **** 4242");
        assert_eq!((summary.expiry_month, summary.expiry_year), (8, 27));
    }

    #[test]
    fn test_rejects_short_number() {
        let mut details = card();
        details.card_number = "4242".into();
        assert!(details.summarize().is_err());
    }

    #[test]
    fn test_rejects_bad_expiry() {
        for expiry in ["13/27", "8/27", "0827", "aa/bb", "+1/25", "01/+5"] {
            let mut details = card();
            details.expiry = expiry.into();
            assert!(details.summarize().is_err(), "accepted {}", expiry);
        }
    }

    #[test]
    fn test_rejects_bad_cvv() {
        let mut details = card();
        details.cvv = "12".into();
        assert!(details.summarize().is_err());
        details.cvv = "12a".into();
        assert!(details.summarize().is_err());
    }

    #[test]
    fn test_requires_name() {
        let mut details = card();
        details.card_name = " ".into();
        assert!(details.summarize().is_err());
    }
}
