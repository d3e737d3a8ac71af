use std::sync::{Mutex, MutexGuard};

use store_adapter::store::{BoxedStore, StoreError};
use uuid::Uuid;

/// Current time in milliseconds since epoch, the timestamp unit of all records.
pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Entity repository over an injected store.
///
/// Mutations take the per-repository write lock so that the get-merge-reinsert
/// update path is a single critical section under concurrent requests.
pub struct EntityRepo<T> {
    pub(crate) store: BoxedStore<T>,
    pub(crate) write_lock: Mutex<()>,
}

impl<T> std::fmt::Debug for EntityRepo<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRepo").finish_non_exhaustive()
    }
}

impl<T> EntityRepo<T> {
    #[must_use]
    pub fn new(store: BoxedStore<T>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// All records, in store key order
    /// # Errors
    /// - Returns `StoreError` if the store fails
    pub fn get_all(&self) -> Result<Vec<T>, StoreError> {
        self.store.values()
    }

    /// Get a record by id, `None` if absent
    /// # Errors
    /// - Returns `StoreError` if the store fails
    pub fn get(&self, id: &Uuid) -> Result<Option<T>, StoreError> {
        self.store.get(&id.to_string())
    }

    /// Delete a record by id, returning the removed record; `None` if absent,
    /// including on repeated deletes
    /// # Errors
    /// - Returns `StoreError` if the store fails
    pub fn delete(&self, id: &Uuid) -> Result<Option<T>, StoreError> {
        let _guard = self.lock_writes();
        self.store.remove(&id.to_string())
    }

    pub(crate) fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}
