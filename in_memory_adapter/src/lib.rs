use std::collections::BTreeMap;
use std::sync::Mutex;

use store_adapter::store::{Store, StoreError};

/// In-memory store with the same observable contract as the persistent one
/// (ascending key order, previous-value semantics), minus durability.
/// Used to build isolated instances in tests.
#[derive(Debug, Default)]
pub struct InMemoryStore<T> {
    entries: Mutex<BTreeMap<String, T>>,
}

impl<T> InMemoryStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<T> Store<T> for InMemoryStore<T>
where
    T: Clone + Send + Sync,
{
    fn insert(&self, key: &str, value: &T) -> Result<Option<T>, StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.insert(key.to_string(), value.clone()))
    }

    fn get(&self, key: &str) -> Result<Option<T>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.remove(key))
    }

    fn values(&self) -> Result<Vec<T>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let store = InMemoryStore::new();

        assert!(store.insert("a", &1).unwrap().is_none());
        assert_eq!(store.insert("a", &2).unwrap(), Some(1));
        assert_eq!(store.get("a").unwrap(), Some(2));
        assert_eq!(store.remove("a").unwrap(), Some(2));
        assert!(store.remove("a").unwrap().is_none());
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn values_follow_key_order() {
        let store = InMemoryStore::new();
        store.insert("b", &2).unwrap();
        store.insert("a", &1).unwrap();
        store.insert("c", &3).unwrap();

        assert_eq!(store.values().unwrap(), vec![1, 2, 3]);
    }
}
