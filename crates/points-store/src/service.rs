//! # Receipt Service
//!
//! The two operations the HTTP layer calls: `process` and `lookup`.
//!
//! ## Process Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  process_json(body)                                                     │
//! │       │                                                                 │
//! │       ├── Receipt::from_json ──────── fails → MalformedInput            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  process(receipt)                                                       │
//! │       │                                                                 │
//! │       ├── strict policy? validate_receipt ── fails → Validation         │
//! │       │                                                                 │
//! │       ├── ReceiptId::new()           fresh UUID v4                      │
//! │       ├── points_breakdown(&receipt) pure, synchronous                  │
//! │       ├── store.insert(record)       all-or-nothing                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(id)                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use points_core::{
    points_breakdown, validate_receipt, CoreError, Receipt, ReceiptId, ScoreRecord,
    ValidationPolicy,
};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::ReceiptStore;

/// Times a fresh id is drawn again after a (practically impossible) clash.
const MAX_ID_ATTEMPTS: usize = 3;

// =============================================================================
// Service
// =============================================================================

/// Scores receipts and remembers the result per identifier.
///
/// Generic over the store so tests and a future persistent backend can be
/// swapped in without touching the scoring engine.
#[derive(Debug)]
pub struct ReceiptService<S> {
    store: S,
    policy: ValidationPolicy,
}

impl<S: ReceiptStore> ReceiptService<S> {
    /// Creates a service with the lenient policy.
    pub fn new(store: S) -> Self {
        ReceiptService {
            store,
            policy: ValidationPolicy::Lenient,
        }
    }

    /// Sets how malformed amounts, dates and times are handled.
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decodes a JSON body and processes it.
    ///
    /// ## Errors
    /// - `Core(MalformedInput)` if the body is not a Receipt document
    /// - everything [`ReceiptService::process`] can return
    pub fn process_json(&self, body: &[u8]) -> StoreResult<ReceiptId> {
        let receipt = Receipt::from_json(body).map_err(|e| {
            warn!(error = %e, "Rejected malformed receipt");
            e
        })?;
        self.process(receipt)
    }

    /// Scores a receipt, stores the result and returns its new identifier.
    ///
    /// ## Errors
    /// - `Core(Validation)` under the strict policy
    /// - `LockPoisoned` if the store is unusable
    pub fn process(&self, receipt: Receipt) -> StoreResult<ReceiptId> {
        if self.policy.is_strict() {
            validate_receipt(&receipt).map_err(|e| {
                warn!(error = %e, retailer = %receipt.retailer, "Receipt failed validation");
                StoreError::Core(CoreError::from(e))
            })?;
        }

        let breakdown = points_breakdown(&receipt);
        let points = breakdown.total();
        debug!(?breakdown, "Scored receipt");

        let mut record = ScoreRecord::new(ReceiptId::new(), points, receipt);
        let mut attempt = 1;
        loop {
            let id = record.id;
            match self.store.insert(record.clone()) {
                Ok(()) => {
                    info!(id = %id, points, "Processed receipt");
                    return Ok(id);
                }
                Err(StoreError::DuplicateId { .. }) if attempt < MAX_ID_ATTEMPTS => {
                    warn!(id = %id, attempt, "Receipt id collision, drawing a new id");
                    record.id = ReceiptId::new();
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Returns the points stored for `id`.
    ///
    /// ## Errors
    /// `NotFound` for ids this process never issued, including text that is
    /// not a UUID.
    pub fn lookup(&self, id: &str) -> StoreResult<u64> {
        self.record(id).map(|record| record.points)
    }

    /// Returns the full stored record for `id`.
    ///
    /// `id` must be spelled exactly as `process` returned it.
    pub fn record(&self, id: &str) -> StoreResult<ScoreRecord> {
        let receipt_id: ReceiptId = id.parse().map_err(|_| StoreError::not_found(id))?;
        self.store.get(&receipt_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use points_core::{compute_points, Item};
    use std::collections::HashSet;
    use std::sync::Arc;

    const TARGET_JSON: &str = r#"{
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
            {"shortDescription": "Emils Cheese Pizza", "price": "12.25"},
            {"shortDescription": "Knorr Creamy Chicken", "price": "1.26"},
            {"shortDescription": "Doritos Nacho Cheese", "price": "3.35"},
            {"shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00"}
        ],
        "total": "35.35"
    }"#;

    fn gatorade_receipt() -> Receipt {
        Receipt {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: "2022-03-20".to_string(),
            purchase_time: "14:33".to_string(),
            items: vec![Item::new("Gatorade", "2.25"); 4],
            total: "9.00".to_string(),
        }
    }

    fn service() -> ReceiptService<MemoryStore> {
        ReceiptService::new(MemoryStore::new())
    }

    #[test]
    fn test_process_json_then_lookup() {
        let service = service();
        let id = service.process_json(TARGET_JSON.as_bytes()).unwrap();

        assert_eq!(service.lookup(&id.to_string()).unwrap(), 28);
    }

    #[test]
    fn test_lookup_matches_compute_points() {
        let service = service();
        let receipt = gatorade_receipt();
        let expected = compute_points(&receipt);

        let id = service.process(receipt.clone()).unwrap();

        assert_eq!(service.lookup(&id.to_string()).unwrap(), expected);
        assert_eq!(expected, 109);

        let record = service.record(&id.to_string()).unwrap();
        assert_eq!(record.receipt, receipt);
    }

    #[test]
    fn test_lookup_unknown_id() {
        let service = service();
        assert!(matches!(
            service.lookup(&ReceiptId::new().to_string()),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            service.lookup("definitely-not-an-id"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_lookup_requires_issued_spelling() {
        let service = service();
        let id = service.process(gatorade_receipt()).unwrap().to_string();

        let spellings = [
            id.to_uppercase(),
            id.replace('-', ""),
            format!("{{{}}}", id),
            format!("urn:uuid:{}", id),
        ];
        for spelling in &spellings {
            assert!(matches!(
                service.lookup(spelling),
                Err(StoreError::NotFound { .. })
            ));
        }
        assert_eq!(service.lookup(&id).unwrap(), 109);
    }

    #[test]
    fn test_process_json_malformed() {
        let service = service();
        let err = service.process_json(br#"{"retailer": 7}"#).unwrap_err();

        assert!(matches!(err, StoreError::Core(CoreError::MalformedInput(_))));
        assert!(service.store().is_empty().unwrap());
    }

    #[test]
    fn test_ids_are_unique() {
        let service = service();
        let ids: HashSet<ReceiptId> = (0..500)
            .map(|_| service.process(gatorade_receipt()).unwrap())
            .collect();

        assert_eq!(ids.len(), 500);
        assert_eq!(service.store().len().unwrap(), 500);
    }

    #[test]
    fn test_lenient_policy_accepts_bad_fields() {
        let service = service();
        let mut receipt = gatorade_receipt();
        receipt.total = "nine dollars".to_string();

        let id = service.process(receipt).unwrap();
        // 14 + 50 + 25 + 10 + 0 + 0 + 10: the bad total scores as 0.00
        assert_eq!(service.lookup(&id.to_string()).unwrap(), 109);
    }

    #[test]
    fn test_strict_policy_rejects_bad_fields() {
        let service = service().with_policy(ValidationPolicy::Strict);
        let mut receipt = gatorade_receipt();
        receipt.total = "nine dollars".to_string();

        let err = service.process(receipt).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert!(service.store().is_empty().unwrap());

        assert!(service.process(gatorade_receipt()).is_ok());
    }

    #[test]
    fn test_concurrent_processing() {
        let service = Arc::new(service());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    (0..50)
                        .map(|_| service.process(gatorade_receipt()).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert_eq!(service.lookup(&id.to_string()).unwrap(), 109);
                ids.insert(id);
            }
        }

        assert_eq!(ids.len(), 400);
    }

    /// Reports the first insert as a clash, then behaves like MemoryStore.
    struct ClashingStore {
        inner: MemoryStore,
        clashed: std::sync::atomic::AtomicBool,
    }

    impl ReceiptStore for ClashingStore {
        fn insert(&self, record: ScoreRecord) -> StoreResult<()> {
            if !self.clashed.swap(true, std::sync::atomic::Ordering::SeqCst) {
                return Err(StoreError::DuplicateId {
                    id: record.id.to_string(),
                });
            }
            self.inner.insert(record)
        }

        fn get(&self, id: &ReceiptId) -> StoreResult<ScoreRecord> {
            self.inner.get(id)
        }

        fn len(&self) -> StoreResult<usize> {
            self.inner.len()
        }
    }

    #[test]
    fn test_id_clash_draws_new_id() {
        let service = ReceiptService::new(ClashingStore {
            inner: MemoryStore::new(),
            clashed: std::sync::atomic::AtomicBool::new(false),
        });

        let id = service.process(gatorade_receipt()).unwrap();

        assert_eq!(service.store().len().unwrap(), 1);
        assert_eq!(service.lookup(&id.to_string()).unwrap(), 109);
    }
}
