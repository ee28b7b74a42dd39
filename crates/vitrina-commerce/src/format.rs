//! Shopper-facing price formatting.
//!
//! Catalog prices live in the store currency; shoppers see them converted at a
//! fixed rate, rounded to whole units and grouped by thousands
//! (`29.99` becomes `$119.960`).

use crate::config::DisplayConfig;
use crate::money::{Currency, Money};

/// Converts and renders amounts in the display currency.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFormatter {
    rate: f64,
    currency: Currency,
    grouping_separator: char,
}

impl DisplayFormatter {
    pub fn new(rate: f64, currency: Currency) -> Self {
        Self {
            rate,
            currency,
            grouping_separator: '.',
        }
    }

    /// Use a different thousands separator.
    pub fn with_grouping_separator(mut self, separator: char) -> Self {
        self.grouping_separator = separator;
        self
    }

    /// The currency amounts are rendered in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Convert to whole display units.
    pub fn convert(&self, amount: &Money) -> i64 {
        (amount.to_decimal() * self.rate).round() as i64
    }

    /// Render an amount, e.g. `$1.199.960`.
    pub fn format(&self, amount: &Money) -> String {
        let units = self.convert(amount);
        let sign = if units < 0 { "-" } else { "" };
        format!(
            "{}{}{}",
            sign,
            self.currency.symbol(),
            group_digits(units.unsigned_abs(), self.grouping_separator)
        )
    }
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for DisplayFormatter {
    fn from(config: &DisplayConfig) -> Self {
        Self::new(config.rate, config.currency).with_grouping_separator(config.grouping_separator)
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
