//! # Receipt Store
//!
//! The identifier → [`ScoreRecord`] mapping behind the service.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ReceiptService                                                        │
//! │       │                                                                 │
//! │       │  store.insert(record) / store.get(&id)                         │
//! │       ▼                                                                 │
//! │  trait ReceiptStore  ◄── the only seam; scoring never sees it          │
//! │       │                                                                 │
//! │       ├── MemoryStore      RwLock<HashMap>  (process lifetime)         │
//! │       └── (persistent backend later, same trait)                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! `MemoryStore` uses a `RwLock` because lookups vastly outnumber inserts:
//! 1. Many concurrent `get` calls share the read lock
//! 2. `insert` takes the write lock for a single `HashMap` insert
//! 3. Records are fully built before insert, so a reader sees either
//!    nothing or the complete record
//!
//! Locks are never held across an `.await`; the store is synchronous.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use points_core::{ReceiptId, ScoreRecord};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Store Trait
// =============================================================================

/// Storage for processed receipts.
///
/// ## Invariants
/// - An inserted id maps to the same record for the store's lifetime
/// - `insert` never overwrites; a second insert of the same id fails
/// - There is no update or delete
pub trait ReceiptStore: Send + Sync {
    /// Stores a new record.
    ///
    /// ## Errors
    /// [`StoreError::DuplicateId`] if the id is already present.
    fn insert(&self, record: ScoreRecord) -> StoreResult<()>;

    /// Fetches a record by id.
    ///
    /// ## Errors
    /// [`StoreError::NotFound`] if the id is unknown.
    fn get(&self, id: &ReceiptId) -> StoreResult<ScoreRecord>;

    /// Number of stored records.
    fn len(&self) -> StoreResult<usize>;

    /// True when nothing has been processed yet.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Process-lifetime store; starts empty, dropped with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<ReceiptId, ScoreRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl ReceiptStore for MemoryStore {
    fn insert(&self, record: ScoreRecord) -> StoreResult<()> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;

        match records.entry(record.id) {
            Entry::Occupied(existing) => Err(StoreError::DuplicateId {
                id: existing.key().to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    fn get(&self, id: &ReceiptId) -> StoreResult<ScoreRecord> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;

        records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id.to_string()))
    }

    fn len(&self) -> StoreResult<usize> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use points_core::{Item, Receipt};

    fn record(points: u64) -> ScoreRecord {
        let receipt = Receipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            items: vec![Item::new("Mountain Dew 12PK", "6.49")],
            total: "6.49".to_string(),
        };
        ScoreRecord::new(ReceiptId::new(), points, receipt)
    }

    #[test]
    fn test_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty().unwrap());
        assert_eq!(store.len().unwrap(), 0);
    }

    #[test]
    fn test_insert_then_get() {
        let store = MemoryStore::new();
        let rec = record(28);
        let id = rec.id;

        store.insert(rec.clone()).unwrap();

        assert_eq!(store.get(&id).unwrap(), rec);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get(&ReceiptId::new()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_insert_never_overwrites() {
        let store = MemoryStore::new();
        let first = record(10);
        let mut second = record(99);
        second.id = first.id;

        store.insert(first.clone()).unwrap();
        let err = store.insert(second).unwrap_err();

        assert!(matches!(err, StoreError::DuplicateId { .. }));
        assert_eq!(store.get(&first.id).unwrap().points, 10);
    }
}
