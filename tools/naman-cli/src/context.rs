//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use naman_storage::FileStorage;
use naman_store::cart::CartStore;
use naman_store::config::StoreConfig;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["naman.toml", ".naman.toml", "naman.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory holding the durable cart.
    pub data_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, data_dir: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        if let Some(file) = config.store_file.as_deref() {
            let path = resolve_path(&cwd, file);
            config.store = StoreConfig::load(&path)
                .with_context(|| format!("Failed to load store config: {}", path.display()))?;
        }

        let data_dir = match data_dir.or(config.data_dir.as_deref()) {
            Some(dir) => resolve_path(&cwd, dir),
            None => dirs_path().join("naman"),
        };

        Ok(Self {
            config,
            output,
            cwd,
            data_dir,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Build the cart store over the data directory and load what is stored.
    pub fn open_cart(&self) -> Result<CartStore<FileStorage>> {
        let storage = FileStorage::open(&self.data_dir).with_context(|| {
            format!("Failed to open cart storage at {}", self.data_dir.display())
        })?;
        tracing::debug!(
            data_dir = %self.data_dir.display(),
            key = %self.config.store.storage_key,
            "opening cart"
        );
        let mut cart = CartStore::with_config(storage, self.config.store.clone());
        cart.hydrate();
        Ok(cart)
    }
}

/// Resolve a path relative to the working directory, expanding a leading `~`.
fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
