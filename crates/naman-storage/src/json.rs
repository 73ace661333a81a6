//! Typed wrapper over a [`Storage`] medium with automatic serialization.

use crate::{Storage, StorageError};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe store over any [`Storage`] medium.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone, Default)]
pub struct JsonStore<S> {
    storage: S,
}

impl<S: Storage> JsonStore<S> {
    /// Wrap a storage medium.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Borrow the underlying medium.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// text is not a valid encoding of `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use naman_storage::{JsonStore, MemoryStorage};
    /// let store = JsonStore::new(MemoryStorage::new());
    /// let missing: Option<Vec<u32>> = store.get("naman-cart").unwrap();
    /// assert!(missing.is_none());
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.storage.get_item(key)? {
            Some(text) => {
                let value: T = serde_json::from_str(&text)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the store.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let text = serde_json::to_string(value)?;
        self.storage.set_item(key, &text)
    }
}
