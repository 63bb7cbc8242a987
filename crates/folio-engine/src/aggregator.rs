//! # Sales Aggregator
//!
//! Rebuilds the persisted sales report from the transaction ledger.
//!
//! ## Rebuild Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Report Rebuild                                   │
//! │                                                                         │
//! │  rebuild()                                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ledger file exists? ──── no ──► RebuildOutcome::Skipped                │
//! │       │                          (no report written or deleted)         │
//! │      yes                                                                │
//! │       ▼                                                                 │
//! │  load ledger (tolerant: malformed records logged + excluded)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SalesReport::from_transactions  ──  pure, deterministic                │
//! │       │                              year ► month ► day roll-ups       │
//! │       ▼                                                                 │
//! │  save report (whole snapshot, atomic)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RebuildOutcome::Rebuilt { transactions, rejected, report }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Idempotence
//! The report is a pure function of the ledger. Rebuilding twice over an
//! unchanged ledger produces byte-identical output; the previous report
//! file is never read, only replaced.

use tracing::{info, warn};

use folio_core::report::SalesReport;
use folio_store::{LedgerStore, ReportStore};

use crate::error::EngineResult;

// =============================================================================
// Rebuild Outcome
// =============================================================================

/// What a rebuild call did.
#[derive(Debug, Clone, PartialEq)]
pub enum RebuildOutcome {
    /// The ledger resource does not exist; nothing was aggregated and no
    /// report was written. A missing ledger means no sales have ever been
    /// recorded, which is not the same as an empty one.
    Skipped,

    /// The report was rebuilt from the ledger and saved.
    Rebuilt(RebuildSummary),
}

impl RebuildOutcome {
    /// True if the rebuild was skipped over a missing ledger.
    pub fn is_skipped(&self) -> bool {
        matches!(self, RebuildOutcome::Skipped)
    }
}

/// Counters and result of a completed rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct RebuildSummary {
    /// Transactions that entered the aggregation.
    pub transactions: usize,

    /// Malformed ledger records excluded from the aggregation.
    pub rejected: usize,

    /// The report that was saved.
    pub report: SalesReport,
}

// =============================================================================
// Sales Aggregator
// =============================================================================

/// Derives the sales report from the transaction ledger.
///
/// The aggregator only reads the ledger, so it tolerates malformed records:
/// they are excluded and counted rather than aborting the rebuild. Writers
/// of the ledger are strict about the same records (see the store docs).
#[derive(Debug, Clone)]
pub struct SalesAggregator {
    ledger: LedgerStore,
    report: ReportStore,
}

impl SalesAggregator {
    /// Creates an aggregator over the ledger and report stores.
    pub fn new(ledger: LedgerStore, report: ReportStore) -> Self {
        SalesAggregator { ledger, report }
    }

    /// Rebuilds the sales report from the full ledger and saves it.
    ///
    /// ## Rules
    /// - Ledger file absent: returns [`RebuildOutcome::Skipped`] without
    ///   writing anything
    /// - Malformed ledger records: excluded from the aggregation, counted
    ///   in the summary
    /// - The saved report replaces any previous one wholesale
    pub async fn rebuild(&self) -> EngineResult<RebuildOutcome> {
        if !self.ledger.exists().await {
            info!(resource = %self.ledger.resource(), "No transaction ledger; skipping report rebuild");
            return Ok(RebuildOutcome::Skipped);
        }

        let loaded = self.ledger.load_tolerant().await?;
        if !loaded.is_clean() {
            warn!(
                resource = %self.ledger.resource(),
                rejected = loaded.rejected.len(),
                "Excluding malformed ledger records from the report"
            );
        }

        let report = SalesReport::from_transactions(&loaded.records);
        self.report.save(&report).await?;

        info!(
            transactions = loaded.records.len(),
            rejected = loaded.rejected.len(),
            total = %report.total_revenue(),
            "Sales report rebuilt"
        );

        Ok(RebuildOutcome::Rebuilt(RebuildSummary {
            transactions: loaded.records.len(),
            rejected: loaded.rejected.len(),
            report,
        }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
