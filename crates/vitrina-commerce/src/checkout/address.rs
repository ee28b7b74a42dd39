//! Shipping information collected in the first checkout step.

use serde::{Deserialize, Serialize};

/// Where and to whom an order ships.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShippingInfo {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Street address.
    pub address1: String,
    /// City.
    pub city: String,
    /// State or department.
    pub state: String,
    /// Postal code.
    pub zip: String,
    /// Contact phone.
    pub phone: String,
}

impl ShippingInfo {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!("{}, {}, {} {}", self.address1, self.city, self.state, self.zip)
    }

    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("address", &self.address1),
            ("city", &self.city),
            ("state", &self.state),
            ("postal code", &self.zip),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Check every required field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
