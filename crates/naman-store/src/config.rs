//! Quantity ceilings and storage settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cart::SellingMode;
use crate::error::ConfigError;

/// Largest quantity of a meter-sold item a single cart line may hold.
pub const MAX_METER_ORDER_QUANTITY: f64 = 500.0;

/// Largest quantity of a piece-sold item a single cart line may hold.
pub const MAX_PIECE_ORDER_QUANTITY: f64 = 1000.0;

/// Durable storage slot holding the cart's items.
pub const CART_STORAGE_KEY: &str = "naman-cart";

/// Per-selling-mode quantity ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantityLimits {
    #[serde(default = "default_max_meter")]
    pub max_meter_order_quantity: f64,
    #[serde(default = "default_max_piece")]
    pub max_piece_order_quantity: f64,
}

fn default_max_meter() -> f64 {
    MAX_METER_ORDER_QUANTITY
}

fn default_max_piece() -> f64 {
    MAX_PIECE_ORDER_QUANTITY
}

impl QuantityLimits {
    /// Create limits from explicit ceilings.
    pub fn new(max_meter_order_quantity: f64, max_piece_order_quantity: f64) -> Self {
        Self {
            max_meter_order_quantity,
            max_piece_order_quantity,
        }
    }

    /// Ceiling for the given selling mode.
    pub fn max_for(&self, mode: SellingMode) -> f64 {
        match mode {
            SellingMode::Meter => self.max_meter_order_quantity,
            SellingMode::Piece => self.max_piece_order_quantity,
        }
    }

    /// Check that both ceilings are positive finite numbers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("max_meter_order_quantity", self.max_meter_order_quantity),
            ("max_piece_order_quantity", self.max_piece_order_quantity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidLimit { name, value });
            }
        }
        Ok(())
    }
}

impl Default for QuantityLimits {
    fn default() -> Self {
        Self::new(MAX_METER_ORDER_QUANTITY, MAX_PIECE_ORDER_QUANTITY)
    }
}

/// Settings for the client-side stores.
///
/// ```toml
/// storage_key = "naman-cart"
///
/// [limits]
/// max_meter_order_quantity = 500.0
/// max_piece_order_quantity = 1000.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Durable storage slot for the cart.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Quantity ceilings.
    #[serde(default)]
    pub limits: QuantityLimits,
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            limits: QuantityLimits::default(),
        }
    }
}

impl StoreConfig {
    /// Override the quantity ceilings.
    pub fn with_limits(mut self, limits: QuantityLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Override the storage slot.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        if path.extension().map_or(false, |e| e == "json") {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    /// Check the storage key and limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        self.limits.validate()
    }
}
