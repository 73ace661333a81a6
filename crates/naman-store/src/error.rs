//! Store error types.
//!
//! Cart and UI operations never fail; the only fallible surface is loading
//! configuration.

use thiserror::Error;

/// Errors that can occur while loading store configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse error.
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A quantity ceiling is not a positive finite number.
    #[error("Invalid quantity limit {name}: {value}")]
    InvalidLimit { name: &'static str, value: f64 },

    /// The storage key is empty.
    #[error("Storage key must not be empty")]
    EmptyStorageKey,
}
