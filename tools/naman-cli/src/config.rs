//! CLI configuration.

use anyhow::{Context, Result};
use naman_store::config::StoreConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding the durable cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    /// Store settings: storage key and quantity ceilings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Standalone store config (TOML, or JSON by extension) that replaces
    /// the `[store]` table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_file: Option<String>,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: CliConfig = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config
            .store
            .validate()
            .with_context(|| format!("Invalid config: {}", path))?;
        Ok(config)
    }
}

/// Generate a default naman.toml config file.
pub fn generate_default_config() -> String {
    let store = StoreConfig::default();
    format!(
        r#"# Naman storefront configuration

# data_dir = "~/.local/share/naman"
# store_file = "store.json"

[store]
storage_key = "{key}"

[store.limits]
max_meter_order_quantity = {meter:?}
max_piece_order_quantity = {piece:?}
"#,
        key = store.storage_key,
        meter = store.limits.max_meter_order_quantity,
        piece = store.limits.max_piece_order_quantity,
    )
}
