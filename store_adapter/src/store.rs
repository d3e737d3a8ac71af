use redb::{Database, ReadableTable, TableDefinition};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] redb::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<redb::DatabaseError> for StoreError {
    fn from(error: redb::DatabaseError) -> Self {
        StoreError::Storage(error.into())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(error: redb::TransactionError) -> Self {
        StoreError::Storage(error.into())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(error: redb::TableError) -> Self {
        StoreError::Storage(error.into())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(error: redb::StorageError) -> Self {
        StoreError::Storage(error.into())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(error: redb::CommitError) -> Self {
        StoreError::Storage(error.into())
    }
}

/// Durable ordered map from string keys to values of a fixed shape.
///
/// `values()` yields entries in ascending key order; the order is stable for
/// a fixed key set but not part of the public API contract.
pub trait Store<T>: Send + Sync {
    /// Insert or overwrite the value at `key`, returning the previous value
    /// if one was stored
    /// # Errors
    /// - Returns `StoreError` if the storage medium fails
    fn insert(&self, key: &str, value: &T) -> Result<Option<T>, StoreError>;
    /// Get the value at `key`; a missing key is `None`, never an error
    /// # Errors
    /// - Returns `StoreError` if the storage medium fails
    fn get(&self, key: &str) -> Result<Option<T>, StoreError>;
    /// Remove the entry at `key` if present, returning the removed value.
    /// Removing an absent key is a no-op yielding `None`
    /// # Errors
    /// - Returns `StoreError` if the storage medium fails
    fn remove(&self, key: &str) -> Result<Option<T>, StoreError>;
    /// All stored values in key order
    /// # Errors
    /// - Returns `StoreError` if the storage medium fails
    fn values(&self) -> Result<Vec<T>, StoreError>;
}

/// Boxed store for injection into the repository layer.
pub type BoxedStore<T> = Box<dyn Store<T>>;

/// Open (or create) the redb database file at `path`, creating parent
/// directories as needed. The returned handle is shared between the stores
/// living in the same file.
/// # Errors
/// - Returns `StoreError` if the file cannot be created or opened
pub fn open_database(path: &Path) -> Result<Arc<Database>, StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db = Database::create(path)?;
    tracing::debug!("Opened database at {}", path.display());
    Ok(Arc::new(db))
}

/// Generic persistent store backed by one redb table, values stored as JSON.
///
/// Every mutating call runs in its own write transaction and commits before
/// returning, so contents survive process restart with no explicit flush.
#[derive(Clone)]
pub struct RedbStore<T> {
    db: Arc<Database>,
    table: String,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> std::fmt::Debug for RedbStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl<T> RedbStore<T> {
    /// Create a store over the named table of `db`, creating the table if it
    /// does not exist yet so later reads never observe a missing table.
    /// # Errors
    /// - Returns `StoreError` if the table cannot be created
    pub fn new(db: Arc<Database>, table: &str) -> Result<Self, StoreError> {
        let store = Self {
            db,
            table: table.to_string(),
            _phantom: std::marker::PhantomData,
        };

        let txn = store.db.begin_write()?;
        txn.open_table(store.definition())?;
        txn.commit()?;

        Ok(store)
    }

    fn definition(&self) -> TableDefinition<'_, &'static str, &'static [u8]> {
        TableDefinition::new(&self.table)
    }
}

impl<T> Store<T> for RedbStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn insert(&self, key: &str, value: &T) -> Result<Option<T>, StoreError> {
        let data = serde_json::to_vec(value)?;
        let txn = self.db.begin_write()?;
        let previous = {
            let mut table = txn.open_table(self.definition())?;
            match table.insert(key, data.as_slice())? {
                Some(guard) => Some(serde_json::from_slice(guard.value())?),
                None => None,
            }
        };
        txn.commit()?;

        Ok(previous)
    }

    fn get(&self, key: &str) -> Result<Option<T>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(self.definition())?;

        match table.get(key)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    fn remove(&self, key: &str) -> Result<Option<T>, StoreError> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut table = txn.open_table(self.definition())?;
            match table.remove(key)? {
                Some(guard) => Some(serde_json::from_slice(guard.value())?),
                None => None,
            }
        };
        txn.commit()?;

        Ok(removed)
    }

    fn values(&self) -> Result<Vec<T>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(self.definition())?;

        let mut values = Vec::new();
        for entry in table.iter()? {
            let (_, guard) = entry?;
            values.push(serde_json::from_slice(guard.value())?);
        }

        Ok(values)
    }
}
