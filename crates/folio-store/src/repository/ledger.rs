//! # Ledger Store
//!
//! Persistence for the append-only transaction ledger, plus the
//! transaction-id generator.
//!
//! ## Transaction IDs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Transaction ID Scheme                              │
//! │                                                                         │
//! │  1718049600123-000042                                                   │
//! │  └─────┬─────┘ └──┬──┘                                                  │
//! │   timestamp    sequence                                                 │
//! │   (millis,     (strictly increasing,                                    │
//! │    never       zero-padded to 6)                                        │
//! │    decreasing)                                                          │
//! │                                                                         │
//! │  Uniqueness comes from the sequence alone; the timestamp is for humans  │
//! │  reading the ledger. On every load the generator re-seeds from the      │
//! │  highest sequence (and timestamp) found in the persisted ids, so a      │
//! │  process restart can never re-issue an id the ledger already holds.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Load Policy
//! Two loads exist because the ledger has two kinds of consumer:
//! - [`LedgerStore::load`] (strict) for checkout, which appends and must not
//!   lose records it failed to decode
//! - [`LedgerStore::load_tolerant`] for the report rebuild, which is
//!   read-only and can exclude malformed records as long as it reports them

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use folio_core::types::Transaction;

use crate::error::StoreResult;
use crate::file::{FileStore, Loaded};

// =============================================================================
// Transaction ID Generator
// =============================================================================

/// Generates ledger-unique transaction ids.
///
/// Thread-safe via atomics; shared by clones of the owning [`LedgerStore`].
#[derive(Debug, Default)]
pub struct TransactionIdGen {
    /// Last issued (or observed) sequence number.
    seq: AtomicU64,

    /// Floor for the timestamp component. Never decreases, so a clock that
    /// jumps backwards cannot produce an id that sorts before an earlier one.
    last_millis: AtomicI64,
}

impl TransactionIdGen {
    /// Creates a generator with no history observed.
    pub fn new() -> Self {
        TransactionIdGen::default()
    }

    /// Raises the generator's floors from one persisted id.
    ///
    /// Ids that don't match the `<millis>-<seq>` shape are ignored; they
    /// can't collide with generated ids anyway.
    pub fn observe(&self, id: &str) {
        let Some((millis, seq)) = id.rsplit_once('-') else {
            return;
        };

        if let Ok(seq) = seq.parse::<u64>() {
            self.seq.fetch_max(seq, Ordering::Relaxed);
        }
        if let Ok(millis) = millis.parse::<i64>() {
            self.last_millis.fetch_max(millis, Ordering::Relaxed);
        }
    }

    /// Issues the next id: current wall-clock millis (floored so it never
    /// runs backwards) plus the next sequence number.
    pub fn next(&self) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;

        let now = Utc::now().timestamp_millis();
        let prev = self.last_millis.fetch_max(now, Ordering::Relaxed);
        let millis = prev.max(now);

        format!("{millis}-{seq:06}")
    }
}

// =============================================================================
// Ledger Store
// =============================================================================

/// Repository for the transaction ledger resource.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    files: FileStore,
    resource: String,
    ids: Arc<TransactionIdGen>,
}

impl LedgerStore {
    /// Creates a ledger store over the shared file store.
    pub fn new(files: FileStore) -> Self {
        let resource = files.config().ledger_file.clone();
        LedgerStore {
            files,
            resource,
            ids: Arc::new(TransactionIdGen::new()),
        }
    }

    /// The resource file name this store reads and writes.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// True if the ledger resource exists on disk.
    ///
    /// The report rebuild branches on this: a ledger that has never been
    /// created means "nothing to aggregate", not "aggregate nothing".
    pub async fn exists(&self) -> bool {
        self.files.exists(&self.resource).await
    }

    /// Loads the full history strictly. Absent resource → empty history.
    ///
    /// Every decoded id re-seeds the id generator, extending id uniqueness
    /// across process restarts.
    pub async fn load(&self) -> StoreResult<Vec<Transaction>> {
        let history: Vec<Transaction> = self.files.load_strict(&self.resource).await?;

        for txn in &history {
            self.ids.observe(&txn.id);
        }

        debug!(count = history.len(), "Loaded ledger");
        Ok(history)
    }

    /// Loads the full history tolerantly, excluding malformed records.
    ///
    /// The rejected records have already been logged individually; the
    /// caller is responsible for surfacing the count (the rebuild outcome
    /// carries it).
    pub async fn load_tolerant(&self) -> StoreResult<Loaded<Transaction>> {
        let loaded: Loaded<Transaction> = self.files.load(&self.resource).await?;

        for txn in &loaded.records {
            self.ids.observe(&txn.id);
        }

        Ok(loaded)
    }

    /// Issues the next ledger-unique transaction id.
    ///
    /// Call after [`LedgerStore::load`] (checkout always does) so the
    /// generator has observed the persisted high-water marks.
    pub fn next_transaction_id(&self) -> String {
        self.ids.next()
    }

    /// Appends transactions: `history` (the ledger as returned by
    /// [`LedgerStore::load`]) is written back unchanged with `new_txns` at
    /// the end, as one atomic snapshot.
    pub async fn append(
        &self,
        mut history: Vec<Transaction>,
        new_txns: Vec<Transaction>,
    ) -> StoreResult<()> {
        let appended = new_txns.len();
        history.extend(new_txns);

        self.files.save(&self.resource, &history).await?;

        info!(appended, total = history.len(), "Appended transactions to ledger");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::StoreConfig;
    use folio_core::date::TxnDate;
    use folio_core::money::Money;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn txn(id: &str) -> Transaction {
        Transaction::new(
            id.to_string(),
            "alice",
            TxnDate::from_ymd(2024, 1, 15).unwrap(),
            "Dune",
            1,
            Money::from_cents(1000),
        )
    }

    async fn ledger_store(dir: &TempDir) -> LedgerStore {
        let files = FileStore::new(StoreConfig::new(dir.path())).await.unwrap();
        LedgerStore::new(files)
    }

    fn split(id: &str) -> (i64, u64) {
        let (millis, seq) = id.rsplit_once('-').unwrap();
        (millis.parse().unwrap(), seq.parse().unwrap())
    }

    #[test]
    fn test_id_format() {
        let ids = TransactionIdGen::new();
        let id = ids.next();

        let (millis, seq) = split(&id);
        assert!(millis > 0);
        assert_eq!(seq, 1);

        // Sequence is zero-padded to six digits
        let suffix = id.rsplit_once('-').unwrap().1;
        assert_eq!(suffix.len(), 6);
        assert_eq!(suffix, "000001");
    }

    #[test]
    fn test_sequence_strictly_increases() {
        let ids = TransactionIdGen::new();
        let seqs: Vec<u64> = (0..5).map(|_| split(&ids.next()).1).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_ids_unique_in_bulk() {
        let ids = TransactionIdGen::new();
        let issued: HashSet<String> = (0..1000).map(|_| ids.next()).collect();
        assert_eq!(issued.len(), 1000);
    }

    #[test]
    fn test_observe_seeds_sequence() {
        let ids = TransactionIdGen::new();
        ids.observe("1700000000000-000007");
        ids.observe("1700000000000-000002");

        let (_, seq) = split(&ids.next());
        assert_eq!(seq, 8);
    }

    #[test]
    fn test_observe_floors_timestamp() {
        let ids = TransactionIdGen::new();
        // A persisted id from a machine whose clock ran ahead
        ids.observe("9999999999999-000001");

        let (millis, _) = split(&ids.next());
        assert!(millis >= 9_999_999_999_999);
    }

    #[test]
    fn test_observe_ignores_foreign_id_shapes() {
        let ids = TransactionIdGen::new();
        ids.observe("not-an-id");
        ids.observe("");

        let (_, seq) = split(&ids.next());
        assert_eq!(seq, 1);
    }

    #[tokio::test]
    async fn test_absent_ledger_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = ledger_store(&dir).await;

        assert!(!store.exists().await);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_existing_order() {
        let dir = TempDir::new().unwrap();
        let store = ledger_store(&dir).await;

        let history = store.load().await.unwrap();
        store
            .append(history, vec![txn("1-000001"), txn("1-000002")])
            .await
            .unwrap();

        let history = store.load().await.unwrap();
        store.append(history, vec![txn("1-000003")]).await.unwrap();

        let final_history = store.load().await.unwrap();
        let ids: Vec<&str> = final_history.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1-000001", "1-000002", "1-000003"]);
    }

    #[tokio::test]
    async fn test_load_reseeds_ids_across_restart() {
        let dir = TempDir::new().unwrap();

        // First process: write three transactions with generated ids
        {
            let store = ledger_store(&dir).await;
            let history = store.load().await.unwrap();
            let new_txns: Vec<Transaction> =
                (0..3).map(|_| txn(&store.next_transaction_id())).collect();
            store.append(history, new_txns).await.unwrap();
        }

        // Second process: a fresh store over the same directory
        let store = ledger_store(&dir).await;
        let history = store.load().await.unwrap();
        assert_eq!(history.len(), 3);

        let max_persisted_seq = history.iter().map(|t| split(&t.id).1).max().unwrap();
        let (_, next_seq) = split(&store.next_transaction_id());
        assert!(next_seq > max_persisted_seq);
    }

    #[tokio::test]
    async fn test_strict_load_errors_on_malformed_record() {
        let dir = TempDir::new().unwrap();
        let store = ledger_store(&dir).await;

        let raw = r#"[
            {"id": "1-000001", "username": "alice", "date": "01-15-2024",
             "book_title": "Dune", "quantity": 1,
             "unit_price_cents": 1000, "total_cents": 1000},
            {"id": "1-000002", "username": "bob", "date": "02-30-2024",
             "book_title": "Dune", "quantity": 1,
             "unit_price_cents": 1000, "total_cents": 1000}
        ]"#;
        tokio::fs::write(dir.path().join("transactions.json"), raw)
            .await
            .unwrap();

        // The second record's date is calendar-impossible
        assert!(store.load().await.is_err());

        let loaded = store.load_tolerant().await.unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.rejected.len(), 1);
        assert_eq!(loaded.rejected[0].index, 1);
    }
}
