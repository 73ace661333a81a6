//! In-process storage medium.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::{Storage, StorageError};

#[derive(Debug, Default)]
struct Slots {
    values: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl Slots {
    /// Bytes used by every slot except `skip`.
    fn used_except(&self, skip: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != skip)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

/// Storage held in memory for the lifetime of the process.
///
/// Clones share the same slots, the way two scripts on one origin share a
/// browser's `localStorage`. An optional byte quota (keys plus values) makes
/// writes fail once the medium is full.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<Slots>>,
}

impl MemoryStorage {
    /// Create an empty, unbounded medium.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty medium that holds at most `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        let storage = Self::default();
        storage.slots.borrow_mut().quota = Some(quota);
        storage
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.slots.borrow().values.len()
    }

    /// Whether no keys are present.
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().values.is_empty()
    }

    /// Remove every key.
    pub fn clear(&self) {
        self.slots.borrow_mut().values.clear();
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().values.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.borrow_mut();
        if let Some(quota) = slots.quota {
            let needed = slots.used_except(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        slots.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().values.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.slots.borrow().values.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slots() {
        let a = MemoryStorage::new();
        let b = a.clone();

        a.set_item("naman-cart", "[]").unwrap();
        assert_eq!(b.get_item("naman-cart").unwrap().as_deref(), Some("[]"));

        b.remove_item("naman-cart").unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        let storage = MemoryStorage::with_quota(16);
        storage.set_item("cart", "[1,2]").unwrap();

        let err = storage.set_item("cart", "[1,2,3,4,5,6,7,8]").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 16, .. }));

        // Previous value survives the failed write.
        assert_eq!(storage.get_item("cart").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "123456789").unwrap();
        storage.set_item("k", "987654321").unwrap();
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_keys_sorted() {
        let storage = MemoryStorage::new();
        storage.set_item("b", "2").unwrap();
        storage.set_item("a", "1").unwrap();
        assert_eq!(storage.keys().unwrap(), vec!["a", "b"]);
    }
}
