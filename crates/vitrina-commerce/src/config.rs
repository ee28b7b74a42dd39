//! Storefront configuration.

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Tax rate applied to the cart subtotal.
pub const DEFAULT_TAX_RATE: f64 = 0.16;

/// Flat shipping fee, in minor units of the store currency.
pub const DEFAULT_SHIPPING_FEE_CENTS: i64 = 1000;

/// Base-to-display conversion rate used by the product pages.
pub const DEFAULT_DISPLAY_RATE: f64 = 4000.0;

/// Pricing and display settings for a storefront.
///
/// When a file leaves out the shipping fee, or its currency, the fee is read in
/// the store currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoreConfigFile")]
pub struct StoreConfig {
    /// Currency catalog prices are expressed in.
    pub currency: Currency,

    /// Fraction of the subtotal charged as tax.
    pub tax_rate: f64,

    /// Flat shipping fee added to every order.
    pub shipping_fee: Money,

    /// How amounts are shown to shoppers.
    pub display: DisplayConfig,
}

/// `StoreConfig` as written in a config file.
#[derive(Deserialize)]
struct StoreConfigFile {
    #[serde(default)]
    currency: Currency,
    #[serde(default = "default_tax_rate")]
    tax_rate: f64,
    #[serde(default)]
    shipping_fee: Option<FeeFile>,
    #[serde(default)]
    display: DisplayConfig,
}

#[derive(Deserialize)]
struct FeeFile {
    amount_cents: i64,
    #[serde(default)]
    currency: Option<Currency>,
}

impl From<StoreConfigFile> for StoreConfig {
    fn from(file: StoreConfigFile) -> Self {
        let shipping_fee = match file.shipping_fee {
            Some(fee) => Money::new(fee.amount_cents, fee.currency.unwrap_or(file.currency)),
            None => Money::new(DEFAULT_SHIPPING_FEE_CENTS, file.currency),
        };
        Self {
            currency: file.currency,
            tax_rate: file.tax_rate,
            shipping_fee,
            display: file.display,
        }
    }
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::for_currency(Currency::USD)
    }
}

impl StoreConfig {
    /// Default settings with prices and shipping in `currency`.
    pub fn for_currency(currency: Currency) -> Self {
        Self {
            currency,
            tax_rate: DEFAULT_TAX_RATE,
            shipping_fee: Money::new(DEFAULT_SHIPPING_FEE_CENTS, currency),
            display: DisplayConfig::default(),
        }
    }

    /// Check the configured values are usable.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !(0.0..1.0).contains(&self.tax_rate) {
            return Err(CommerceError::ConfigError(format!(
                "tax_rate must be in [0, 1), got {}",
                self.tax_rate
            )));
        }
        if self.shipping_fee.is_negative() {
            return Err(CommerceError::ConfigError(format!(
                "shipping_fee must not be negative, got {}",
                self.shipping_fee
            )));
        }
        if self.shipping_fee.currency != self.currency {
            return Err(CommerceError::ConfigError(format!(
                "shipping_fee currency {} does not match store currency {}",
                self.shipping_fee.currency, self.currency
            )));
        }
        if !(self.display.rate.is_finite() && self.display.rate > 0.0) {
            return Err(CommerceError::ConfigError(format!(
                "display.rate must be positive, got {}",
                self.display.rate
            )));
        }
        Ok(())
    }
}

/// Display currency settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency shown to shoppers.
    #[serde(default = "default_display_currency")]
    pub currency: Currency,

    /// Fixed conversion rate from the store currency.
    #[serde(default = "default_display_rate")]
    pub rate: f64,

    /// Thousands separator.
    #[serde(default = "default_grouping")]
    pub grouping_separator: char,
}

fn default_display_currency() -> Currency {
    Currency::COP
}

fn default_display_rate() -> f64 {
    DEFAULT_DISPLAY_RATE
}

fn default_grouping() -> char {
    '.'
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_display_currency(),
            rate: DEFAULT_DISPLAY_RATE,
            grouping_separator: default_grouping(),
        }
    }
}
