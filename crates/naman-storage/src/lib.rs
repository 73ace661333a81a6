//! Durable client-side key-value storage for the Naman storefront.
//!
//! The storefront keeps a handful of values (the shopping cart, mostly) in a
//! medium that survives restarts of the client. This crate provides that
//! medium behind the [`Storage`] trait, plus a typed JSON wrapper.
//!
//! # Example
//!
//! ```rust
//! use naman_storage::{JsonStore, MemoryStorage};
//!
//! let store = JsonStore::new(MemoryStorage::new());
//! store.set("naman-cart", &vec!["fabric-01".to_string()]).unwrap();
//!
//! let cart: Option<Vec<String>> = store.get("naman-cart").unwrap();
//! assert_eq!(cart, Some(vec!["fabric-01".to_string()]));
//! ```

mod error;
mod file;
mod json;
mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use json::JsonStore;
pub use memory::MemoryStorage;

/// A string key-value medium.
///
/// Mirrors the browser `localStorage` surface: values are opaque strings and
/// every call may fail (quota, I/O, a store that cannot be opened).
pub trait Storage {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// All keys currently present, sorted.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStorage, JsonStore, MemoryStorage, Storage, StorageError};
}
