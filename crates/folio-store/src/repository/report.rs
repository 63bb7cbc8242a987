//! # Report Store
//!
//! Persistence for the derived sales report.
//!
//! ## Write-Whole Semantics
//! The report is a projection of the ledger, rebuilt from scratch on every
//! aggregation run. The store therefore only ever replaces the resource
//! wholesale - there is no append or in-place update, and a stale report is
//! simply overwritten. The stored record sequence is the report's year
//! nodes.

use tracing::debug;

use folio_core::report::{SalesReport, YearSales};

use crate::error::StoreResult;
use crate::file::FileStore;

/// Repository for the sales report resource.
#[derive(Debug, Clone)]
pub struct ReportStore {
    files: FileStore,
    resource: String,
}

impl ReportStore {
    /// Creates a report store over the shared file store.
    pub fn new(files: FileStore) -> Self {
        let resource = files.config().report_file.clone();
        ReportStore { files, resource }
    }

    /// The resource file name this store reads and writes.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// True if a report has ever been written.
    pub async fn exists(&self) -> bool {
        self.files.exists(&self.resource).await
    }

    /// Replaces the persisted report with `report`, wholesale.
    pub async fn save(&self, report: &SalesReport) -> StoreResult<()> {
        debug!(years = report.years.len(), "Saving sales report");
        self.files.save(&self.resource, &report.years).await
    }

    /// Loads the persisted report. Absent resource → empty report.
    ///
    /// The engine never reads this back (rebuilds always start from the
    /// ledger); it exists for external consumers and for verification.
    pub async fn load(&self) -> StoreResult<SalesReport> {
        let years: Vec<YearSales> = self.files.load_strict(&self.resource).await?;
        Ok(SalesReport { years })
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
    use folio_core::types::Transaction;
    use tempfile::TempDir;

    fn sample_report() -> SalesReport {
        let txns = vec![
            Transaction::new(
                "1-000001".to_string(),
                "alice",
                TxnDate::from_ymd(2024, 1, 15).unwrap(),
                "Dune",
                2,
                Money::from_cents(1000),
            ),
            Transaction::new(
                "1-000002".to_string(),
                "bob",
                TxnDate::from_ymd(2023, 1, 10).unwrap(),
                "Neuromancer",
                1,
                Money::from_cents(1500),
            ),
        ];
        SalesReport::from_transactions(&txns)
    }

    async fn report_store(dir: &TempDir) -> ReportStore {
        let files = FileStore::new(StoreConfig::new(dir.path())).await.unwrap();
        ReportStore::new(files)
    }

    #[tokio::test]
    async fn test_absent_report_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = report_store(&dir).await;

        assert!(!store.exists().await);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = report_store(&dir).await;

        let report = sample_report();
        store.save(&report).await.unwrap();

        assert!(store.exists().await);
        assert_eq!(store.load().await.unwrap(), report);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_report() {
        let dir = TempDir::new().unwrap();
        let store = report_store(&dir).await;

        store.save(&sample_report()).await.unwrap();

        let smaller = SalesReport::from_transactions(&[Transaction::new(
            "1-000009".to_string(),
            "carol",
            TxnDate::from_ymd(2025, 6, 1).unwrap(),
            "Dune",
            1,
            Money::from_cents(1000),
        )]);
        store.save(&smaller).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, smaller);
        assert_eq!(loaded.years.len(), 1);
        assert_eq!(loaded.years[0].year, "2025");
    }
}
