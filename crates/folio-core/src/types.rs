//! # Domain Types
//!
//! Core domain types used throughout Folio.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │    CartLine     │   │   Transaction   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  title (key)    │   │  title          │   │  id (ledger)    │       │
//! │  │  author, genre  │   │  quantity       │   │  username, date │       │
//! │  │  stock (u32)    │   └─────────────────┘   │  book_title     │       │
//! │  │  price_cents    │                         │  quantity       │       │
//! │  └─────────────────┘                         │  unit_price     │       │
//! │                                              │  total_amount   │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   └─────────────────┘       │
//! │  │   LineOutcome   │   │ CheckoutReceipt │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Purchased      │   │  per-line       │                             │
//! │  │  NotFound       │   │  results +      │                             │
//! │  │  Insufficient   │   │  grand total    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Semantics
//! A [`Transaction`] freezes the unit price and line total at the moment of
//! sale. Later catalog price changes never rewrite history: the ledger is
//! append-only and the sales report is derived from these frozen values.

use serde::{Deserialize, Serialize};

use crate::date::TxnDate;
use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_quantity, validate_title};

// =============================================================================
// Book
// =============================================================================

/// A title in the bookstore catalog.
///
/// ## Identity
/// The title is the business key. Lookups compare titles
/// case-insensitively; see [`crate::catalog::Catalog::find_by_title`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Display title - also the lookup key.
    pub title: String,

    /// Author name as recorded in the catalog.
    pub author: String,

    /// Genre shelf label (e.g., "Science Fiction").
    pub genre: String,

    /// Publication year as recorded in the catalog (kept verbatim).
    pub year: String,

    /// Units on hand. `u32` makes negative stock unrepresentable.
    pub stock: u32,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,
}

impl Book {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether `quantity` units can be taken from stock.
    #[inline]
    pub fn in_stock(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }

    /// Removes `quantity` units from stock.
    ///
    /// The caller must have checked [`Book::in_stock`] first; taking more
    /// than is on hand is a programming error, not a runtime condition,
    /// so this panics rather than saturating or going negative.
    pub fn take_stock(&mut self, quantity: u32) {
        assert!(
            self.stock >= quantity,
            "take_stock({quantity}) with only {} on hand for {:?}",
            self.stock,
            self.title
        );
        self.stock -= quantity;
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One requested line of a checkout cart: a title and a quantity.
///
/// Construction and deserialization both funnel through the same
/// validation, so a line obtained through either path never carries an
/// empty title or a zero/oversized quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCartLine")]
pub struct CartLine {
    /// Requested title (trimmed).
    pub title: String,

    /// Requested quantity (1..=[`crate::MAX_LINE_QUANTITY`]).
    pub quantity: u32,
}

impl CartLine {
    /// Creates a validated cart line.
    ///
    /// ## Rules
    /// - Title must be non-empty after trimming
    /// - Quantity must be between 1 and [`crate::MAX_LINE_QUANTITY`]
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::types::CartLine;
    ///
    /// let line = CartLine::new("Dune", 2).unwrap();
    /// assert_eq!(line.title, "Dune");
    ///
    /// assert!(CartLine::new("", 2).is_err());
    /// assert!(CartLine::new("Dune", 0).is_err());
    /// ```
    pub fn new(title: &str, quantity: u32) -> Result<Self, ValidationError> {
        validate_title(title)?;
        validate_quantity(quantity)?;
        Ok(CartLine {
            title: title.trim().to_string(),
            quantity,
        })
    }
}

/// Wire shape for [`CartLine`]. Deserialization goes through
/// [`CartLine::new`], so a line decoded from external input obeys the
/// same rules as a constructed one.
#[derive(Deserialize)]
struct RawCartLine {
    title: String,
    quantity: u32,
}

impl TryFrom<RawCartLine> for CartLine {
    type Error = ValidationError;

    fn try_from(raw: RawCartLine) -> Result<Self, Self::Error> {
        CartLine::new(&raw.title, raw.quantity)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// One durable purchase record in the ledger.
///
/// Immutable once written: the unit price and total are the values in force
/// when the sale happened, never recomputed from the current catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Ledger-unique identifier: `<millis>-<seq:06>`.
    pub id: String,

    /// Account the purchase was made under.
    pub username: String,

    /// Calendar date of the sale.
    pub date: TxnDate,

    /// Title purchased (frozen at sale time).
    pub book_title: String,

    /// Units purchased.
    pub quantity: u32,

    /// Unit price in cents at sale time.
    pub unit_price_cents: i64,

    /// Line total in cents: `unit_price_cents * quantity`, frozen at creation.
    pub total_cents: i64,
}

impl Transaction {
    /// Builds a transaction, freezing `total = unit_price * quantity`.
    pub fn new(
        id: String,
        username: &str,
        date: TxnDate,
        book_title: &str,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        let total = unit_price * quantity;
        Transaction {
            id,
            username: username.to_string(),
            date,
            book_title: book_title.to_string(),
            quantity,
            unit_price_cents: unit_price.cents(),
            total_cents: total.cents(),
        }
    }

    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the frozen line total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Checkout Outcomes
// =============================================================================

/// What happened to one cart line during checkout.
///
/// A line failing is data, not an error: the checkout continues with the
/// remaining lines and the caller sees exactly which lines went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineOutcome {
    /// The line was sold: stock decremented, transaction recorded.
    Purchased {
        /// Ledger id of the recorded transaction.
        transaction_id: String,
        /// Stock remaining after the decrement.
        remaining_stock: u32,
    },

    /// No catalog entry matches the requested title.
    NotFound,

    /// The title exists but has fewer units than requested.
    InsufficientStock {
        /// Units currently on hand (unchanged by this checkout).
        available: u32,
    },
}

impl LineOutcome {
    /// True if this line resulted in a sale.
    #[inline]
    pub fn is_purchased(&self) -> bool {
        matches!(self, LineOutcome::Purchased { .. })
    }
}

/// One cart line paired with its checkout outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineResult {
    /// Requested title, as submitted.
    pub title: String,

    /// Requested quantity.
    pub quantity: u32,

    /// What happened to the line.
    pub outcome: LineOutcome,
}

/// The full result of one checkout call.
///
/// ## Shape
/// ```text
/// CheckoutReceipt
/// ├── username, date          who and when
/// ├── lines[]                 one LineResult per submitted cart line
/// ├── transactions[]          the durable records written to the ledger
/// └── total_cents             Σ total of the purchased lines
/// ```
///
/// An all-failed cart still produces a receipt (empty `transactions`,
/// zero total); checkout never fails wholesale over per-line problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    /// Account that checked out.
    pub username: String,

    /// Date stamped onto the recorded transactions.
    pub date: TxnDate,

    /// Per-line results, in cart order.
    pub lines: Vec<LineResult>,

    /// Transactions durably appended to the ledger by this checkout.
    pub transactions: Vec<Transaction>,

    /// Grand total of the purchased lines, in cents.
    pub total_cents: i64,
}

impl CheckoutReceipt {
    /// Returns the grand total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Number of lines that resulted in a sale.
    pub fn purchased_count(&self) -> usize {
        self.lines.iter().filter(|l| l.outcome.is_purchased()).count()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
