//! # Sales Report Module
//!
//! Pure aggregation of the transaction ledger into the hierarchical sales
//! report: year → month → day → individual sales, with revenue roll-ups at
//! the month and year levels.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sales Report Aggregation                            │
//! │                                                                         │
//! │  Ledger (append order)          Grouping (BTreeMap)                     │
//! │  ──────────────────────         ────────────────────                    │
//! │  01-15-2024  $20.00   ──┐                                               │
//! │  02-20-2024  $30.00   ──┼──►   "2023" ──► "01" ──► "10" ──► [$15.00]    │
//! │  01-10-2023  $15.00   ──┘      "2024" ──► "01" ──► "15" ──► [$20.00]    │
//! │                                        └─► "02" ──► "20" ──► [$30.00]   │
//! │                                                                         │
//! │  Roll-ups:                                                              │
//! │    month "2024-01" = $20.00      year "2023" = $15.00                   │
//! │    month "2024-02" = $30.00      year "2024" = $50.00                   │
//! │                                                                         │
//! │  Keys are zero-padded, so lexical BTreeMap order == chronological.      │
//! │  Within a day, ledger order is preserved.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//! [`SalesReport::from_transactions`] is a pure function: no clock, no I/O,
//! no randomness. The same ledger always yields the same report, down to the
//! serialized bytes, which is what makes report rebuilds idempotent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Transaction;

// =============================================================================
// Report Tree Types
// =============================================================================

/// One sale as it appears in the report: the transaction projected down to
/// the fields the report consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesEntry {
    /// Ledger id of the source transaction.
    pub transaction_id: String,

    /// Title sold.
    pub book_title: String,

    /// Units sold.
    pub quantity: u32,

    /// Unit price in cents at sale time.
    pub unit_price_cents: i64,

    /// Line total in cents.
    pub total_cents: i64,
}

impl SalesEntry {
    /// Projects a ledger transaction into its report entry.
    pub fn from_transaction(txn: &Transaction) -> Self {
        SalesEntry {
            transaction_id: txn.id.clone(),
            book_title: txn.book_title.clone(),
            quantity: txn.quantity,
            unit_price_cents: txn.unit_price_cents,
            total_cents: txn.total_cents,
        }
    }

    /// Returns the line total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// All sales on one calendar day, in ledger order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySales {
    /// 2-digit day key ("05").
    pub day: String,

    /// The day's sales, in the order they entered the ledger.
    pub entries: Vec<SalesEntry>,
}

/// All sales in one calendar month, with the month's revenue total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSales {
    /// 2-digit month key ("01").
    pub month: String,

    /// Month revenue in cents: Σ entry totals across all days.
    pub total_revenue_cents: i64,

    /// Days with at least one sale, ascending.
    pub days: Vec<DaySales>,
}

impl MonthSales {
    /// Returns the month's revenue as a Money type.
    #[inline]
    pub fn total_revenue(&self) -> Money {
        Money::from_cents(self.total_revenue_cents)
    }
}

/// All sales in one calendar year, with the year's revenue total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSales {
    /// 4-digit year key ("2024").
    pub year: String,

    /// Year revenue in cents: Σ month revenues.
    pub total_revenue_cents: i64,

    /// Months with at least one sale, ascending.
    pub months: Vec<MonthSales>,
}

impl YearSales {
    /// Returns the year's revenue as a Money type.
    #[inline]
    pub fn total_revenue(&self) -> Money {
        Money::from_cents(self.total_revenue_cents)
    }
}

// =============================================================================
// Sales Report
// =============================================================================

/// The derived sales report: the whole ledger grouped by year/month/day.
///
/// Rebuilt wholesale from the ledger; never updated incrementally. Periods
/// with no sales simply don't appear - there are no zero-revenue filler
/// nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    /// Years with at least one sale, ascending by 4-digit key.
    pub years: Vec<YearSales>,
}

impl SalesReport {
    /// Builds the report from the full transaction history.
    ///
    /// ## Properties
    /// - **Deterministic**: same ledger in, same report out
    /// - **Idempotent**: rebuilding from an unchanged ledger yields an
    ///   identical report (byte-identical once serialized)
    /// - **Revenue-conserving**: every roll-up is an exact integer sum of
    ///   the level below it
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::date::TxnDate;
    /// use folio_core::money::Money;
    /// use folio_core::report::SalesReport;
    /// use folio_core::types::Transaction;
    ///
    /// let txn = Transaction::new(
    ///     "1700000000000-000001".to_string(),
    ///     "alice",
    ///     "01-15-2024".parse::<TxnDate>().unwrap(),
    ///     "Dune",
    ///     2,
    ///     Money::from_cents(1000),
    /// );
    ///
    /// let report = SalesReport::from_transactions(&[txn]);
    /// assert_eq!(report.years.len(), 1);
    /// assert_eq!(report.years[0].year, "2024");
    /// assert_eq!(report.years[0].total_revenue(), Money::from_cents(2000));
    /// ```
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        // Group into year → month → day, preserving ledger order per day.
        // BTreeMap keys are zero-padded strings, so iteration order is
        // already chronological.
        let mut tree: BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<SalesEntry>>>> =
            BTreeMap::new();

        for txn in transactions {
            tree.entry(txn.date.year_key())
                .or_default()
                .entry(txn.date.month_key())
                .or_default()
                .entry(txn.date.day_key())
                .or_default()
                .push(SalesEntry::from_transaction(txn));
        }

        let years = tree
            .into_iter()
            .map(|(year, months)| {
                let months: Vec<MonthSales> = months
                    .into_iter()
                    .map(|(month, days)| {
                        let days: Vec<DaySales> = days
                            .into_iter()
                            .map(|(day, entries)| DaySales { day, entries })
                            .collect();

                        let total_revenue_cents = days
                            .iter()
                            .flat_map(|d| d.entries.iter())
                            .map(|e| e.total_cents)
                            .sum();

                        MonthSales {
                            month,
                            total_revenue_cents,
                            days,
                        }
                    })
                    .collect();

                let total_revenue_cents = months.iter().map(|m| m.total_revenue_cents).sum();

                YearSales {
                    year,
                    total_revenue_cents,
                    months,
                }
            })
            .collect();

        SalesReport { years }
    }

    /// Revenue per year, keyed by 4-digit year ("2024").
    pub fn revenue_by_year(&self) -> BTreeMap<String, Money> {
        self.years
            .iter()
            .map(|y| (y.year.clone(), y.total_revenue()))
            .collect()
    }

    /// Revenue per month, keyed by "YYYY-MM" ("2024-01").
    pub fn revenue_by_month(&self) -> BTreeMap<String, Money> {
        self.years
            .iter()
            .flat_map(|y| {
                y.months
                    .iter()
                    .map(|m| (format!("{}-{}", y.year, m.month), m.total_revenue()))
            })
            .collect()
    }

    /// Grand total revenue across all years.
    pub fn total_revenue(&self) -> Money {
        self.years.iter().map(|y| y.total_revenue()).sum()
    }

    /// Number of individual sales in the report.
    pub fn entry_count(&self) -> usize {
        self.years
            .iter()
            .flat_map(|y| y.months.iter())
            .flat_map(|m| m.days.iter())
            .map(|d| d.entries.len())
            .sum()
    }

    /// True if the report covers no sales at all.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
