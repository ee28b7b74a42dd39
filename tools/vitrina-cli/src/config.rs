//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vitrina_commerce::catalog::InMemoryCatalog;
use vitrina_commerce::{Currency, StoreConfig};

/// File names searched for, in order, in each directory up the tree.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["vitrina.toml", ".vitrina.toml", "vitrina.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Pricing and display settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Where products come from.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text; `.json` paths are JSON, anything else is TOML.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Catalog source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON product list; the bundled sample catalog when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl CatalogConfig {
    /// Load the configured catalog, resolving relative paths against `base`.
    ///
    /// Prices that do not name a currency are read in `currency`.
    pub fn load(&self, base: &Path, currency: Currency) -> Result<InMemoryCatalog> {
        match &self.path {
            None => InMemoryCatalog::sample_in(currency).context("Failed to load the bundled catalog"),
            Some(path) => {
                let full = base.join(path);
                let content = std::fs::read_to_string(&full)
                    .with_context(|| format!("Failed to read catalog: {}", full.display()))?;
                InMemoryCatalog::from_json_in(&content, currency)
                    .with_context(|| format!("Failed to parse catalog: {}", full.display()))
            }
        }
    }
}

/// Generate a default vitrina.toml config file.
pub fn generate_default_config() -> String {
    r#"# Vitrina storefront configuration

[store]
currency = "USD"
tax_rate = 0.16

[store.shipping_fee]
amount_cents = 1000
currency = "USD"

[store.display]
currency = "COP"
rate = 4000.0
grouping_separator = "."

[catalog]
# JSON product list; the bundled sample catalog is used when unset.
# path = "products.json"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrina_commerce::catalog::ProductCatalog;
    use vitrina_commerce::Money;

    #[test]
    fn test_generated_config_matches_defaults() {
        let config = CliConfig::parse("vitrina.toml", &generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CliConfig::parse(
            "vitrina.toml",
            r#"
            [store]
            tax_rate = 0.19
            "#,
        )
        .unwrap();
        assert_eq!(config.store.tax_rate, 0.19);
        assert_eq!(config.store.shipping_fee, Money::new(1000, Currency::USD));
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_json_config() {
        let config = CliConfig::parse(
            "vitrina.json",
            r#"{"store": {"shipping_fee": {"amount_cents": 0}}, "catalog": {"path": "p.json"}}"#,
        )
        .unwrap();
        assert!(config.store.shipping_fee.is_zero());
        assert_eq!(config.catalog.path.as_deref(), Some("p.json"));
    }

    #[test]
    fn test_store_currency_setting() {
        let config = CliConfig::parse(
            "vitrina.toml",
            r#"
            [store]
            currency = "EUR"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.shipping_fee, Money::new(1000, Currency::EUR));

        let catalog = config
            .catalog
            .load(&std::env::temp_dir(), config.store.currency)
            .unwrap();
        assert!(catalog
            .products()
            .iter()
            .all(|p| p.price.currency == Currency::EUR));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(CliConfig::parse("vitrina.toml", "[store\ntax_rate = ").is_err());
    }
}
