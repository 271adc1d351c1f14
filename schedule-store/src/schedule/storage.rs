//! redb-based key-value storage for merchant schedule documents
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `schedule_documents` | storage key | JSON `{shifts, staff}` bytes | One document per merchant |
//!
//! The storage layer only moves bytes. Parsing, and the fail-soft handling
//! of malformed documents, belongs to the store.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::AppError;
use shared::models::StorageKey;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// key = `merchantScheduleData_{merchant}`, value = UTF-8 JSON document
const DOCUMENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("schedule_documents");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::storage(err.to_string())
    }
}

/// Schedule document storage backed by redb
#[derive(Clone)]
pub struct ScheduleStorage {
    db: Arc<Database>,
}

impl ScheduleStorage {
    /// Open or create the database at the given path
    ///
    /// Commits are durable once `commit()` returns (redb's default
    /// `Durability::Immediate`).
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(DOCUMENTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Raw document bytes; `None` when the merchant has never saved
    pub fn load(&self, key: &StorageKey) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DOCUMENTS_TABLE)?;
        let value = table.get(key.as_str())?.map(|guard| guard.value().to_vec());
        Ok(value)
    }

    /// Overwrite the merchant's document
    pub fn save(&self, key: &StorageKey, document: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(DOCUMENTS_TABLE)?;
            table.insert(key.as_str(), document)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Returns whether a document was present
    pub fn remove(&self, key: &StorageKey) -> StorageResult<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(DOCUMENTS_TABLE)?;
            table.remove(key.as_str())?.is_some()
        };
        write_txn.commit()?;
        Ok(removed)
    }

    /// Storage keys of every saved document
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DOCUMENTS_TABLE)?;
        let mut keys = Vec::new();
        for entry in table.iter()? {
            let (key, _) = entry?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MerchantIdentity;

    fn key(merchant: &str) -> StorageKey {
        MerchantIdentity::with_id(merchant).storage_key().unwrap()
    }

    #[test]
    fn test_absent_key_loads_none() {
        let storage = ScheduleStorage::open_in_memory().unwrap();
        assert!(storage.load(&key("m1")).unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites_and_is_scoped_per_merchant() {
        let storage = ScheduleStorage::open_in_memory().unwrap();
        storage.save(&key("m1"), b"first").unwrap();
        storage.save(&key("m1"), b"second").unwrap();
        storage.save(&key("m2"), b"other").unwrap();

        assert_eq!(storage.load(&key("m1")).unwrap().unwrap(), b"second");
        assert_eq!(storage.load(&key("m2")).unwrap().unwrap(), b"other");

        let mut keys = storage.keys().unwrap();
        keys.sort();
        assert_eq!(
            keys,
            vec!["merchantScheduleData_m1", "merchantScheduleData_m2"]
        );
    }

    #[test]
    fn test_remove() {
        let storage = ScheduleStorage::open_in_memory().unwrap();
        storage.save(&key("m1"), b"{}").unwrap();
        assert!(storage.remove(&key("m1")).unwrap());
        assert!(!storage.remove(&key("m1")).unwrap());
        assert!(storage.load(&key("m1")).unwrap().is_none());
    }
}
