//! # Purchase Processor
//!
//! The checkout pipeline: validate the cart, then run one critical section
//! that loads the catalog and ledger, applies the cart line by line, and
//! writes both snapshots back in a fixed order.
//!
//! ## Checkout Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Pipeline                                │
//! │                                                                         │
//! │  checkout(username, cart)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Pre-flight validation (no lock, no I/O)                                │
//! │  ├── username non-empty, within length limit                            │
//! │  ├── cart within max_cart_lines                                         │
//! │  └── every line quantity within 1..=max_line_quantity                   │
//! │       │                                                                 │
//! │       ▼ ──────────────── CRITICAL SECTION ─────────────────┐            │
//! │  lock the store pair                                       │            │
//! │       │                                                    │            │
//! │       ▼                                                    │            │
//! │  load catalog (strict)    load ledger (strict, seeds ids)  │            │
//! │       │                                                    │            │
//! │       ▼                                                    │            │
//! │  for each cart line:                                       │            │
//! │  ├── no such title        ──► LineOutcome::NotFound        │            │
//! │  ├── stock < quantity     ──► LineOutcome::Insufficient    │            │
//! │  └── otherwise: decrement stock, record transaction        │            │
//! │       │                        (price frozen at sale)      │            │
//! │       ▼                                                    │            │
//! │  save catalog  ──►  append ledger   (THIS ORDER)           │            │
//! │       │                                                    │            │
//! │       ▼ ◄──────────────────────────────────────────────────┘            │
//! │  CheckoutReceipt (per-line outcomes + recorded transactions)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Catalog Before Ledger?
//! The two saves are sequential, so a crash between them leaves one file
//! updated. Catalog-first means the surviving state has the stock already
//! decremented but no transaction recorded: a lost sale record. The other
//! order could record a sale whose stock was never taken, and a later
//! checkout could sell the same copy twice. Losing a revenue record is
//! recoverable; overselling inventory is not.

use tokio::sync::Mutex;
use tracing::{debug, info};

use folio_core::date::TxnDate;
use folio_core::money::Money;
use folio_core::types::{CartLine, CheckoutReceipt, LineOutcome, LineResult, Transaction};
use folio_core::validation::validate_username;
use folio_core::ValidationError;
use folio_store::{CatalogStore, LedgerStore};

use crate::config::CheckoutSettings;
use crate::error::EngineResult;

// =============================================================================
// Store State
// =============================================================================

/// The catalog + ledger pair a checkout mutates.
///
/// Owned by the processor and only reachable through its mutex, so the
/// load-mutate-save cycle over the two files is always serialized.
#[derive(Debug)]
struct StoreState {
    catalog: CatalogStore,
    ledger: LedgerStore,
}

// =============================================================================
// Purchase Processor
// =============================================================================

/// Runs checkouts against the catalog and ledger stores.
///
/// One processor guards one store pair. Concurrent `checkout` calls queue
/// on the internal mutex; each one sees the stock left by the previous,
/// which is what makes overselling impossible.
#[derive(Debug)]
pub struct PurchaseProcessor {
    state: Mutex<StoreState>,
    settings: CheckoutSettings,
}

impl PurchaseProcessor {
    /// Creates a processor with default checkout limits.
    pub fn new(catalog: CatalogStore, ledger: LedgerStore) -> Self {
        Self::with_settings(catalog, ledger, CheckoutSettings::default())
    }

    /// Creates a processor with explicit checkout limits.
    pub fn with_settings(
        catalog: CatalogStore,
        ledger: LedgerStore,
        settings: CheckoutSettings,
    ) -> Self {
        PurchaseProcessor {
            state: Mutex::new(StoreState { catalog, ledger }),
            settings,
        }
    }

    /// The checkout limits this processor enforces.
    pub fn settings(&self) -> &CheckoutSettings {
        &self.settings
    }

    /// Checks out a cart dated today.
    ///
    /// See [`PurchaseProcessor::checkout_on`] for the full contract.
    pub async fn checkout(
        &self,
        username: &str,
        cart: &[CartLine],
    ) -> EngineResult<CheckoutReceipt> {
        self.checkout_on(username, TxnDate::today(), cart).await
    }

    /// Checks out a cart with an explicit transaction date.
    ///
    /// ## Per-Line Outcomes
    /// A line that cannot be sold (unknown title, short stock) does not
    /// fail the checkout: it is reported in the receipt and the remaining
    /// lines still go through. Only invalid input (bad username, oversized
    /// cart, a zero or over-limit quantity) rejects the whole call, and
    /// that happens before any file is touched.
    ///
    /// ## Durability
    /// On return, both snapshots are written: the catalog with decremented
    /// stock first, then the ledger with the new transactions appended. An
    /// all-failed cart writes nothing.
    pub async fn checkout_on(
        &self,
        username: &str,
        date: TxnDate,
        cart: &[CartLine],
    ) -> EngineResult<CheckoutReceipt> {
        debug!(username = %username, lines = cart.len(), "Checkout requested");

        // Pre-flight validation: reject before touching any state
        validate_username(username)?;
        let username = username.trim();

        if cart.len() > self.settings.max_cart_lines {
            return Err(ValidationError::OutOfRange {
                field: "cart lines".to_string(),
                min: 0,
                max: self.settings.max_cart_lines as i64,
            }
            .into());
        }

        for line in cart {
            // A zero can only arrive by bypassing CartLine::new; refuse it
            // here too so it never reaches the ledger as a no-op sale
            if line.quantity == 0 || line.quantity > self.settings.max_line_quantity {
                return Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: self.settings.max_line_quantity as i64,
                }
                .into());
            }
        }

        // Critical section: one checkout at a time per store pair
        let state = self.state.lock().await;

        let mut catalog = state.catalog.load().await?;
        let history = state.ledger.load().await?;

        let mut results = Vec::with_capacity(cart.len());
        let mut new_txns = Vec::new();

        for line in cart {
            let outcome = match catalog.find_by_title_mut(&line.title) {
                None => {
                    debug!(title = %line.title, "Cart line missed the catalog");
                    LineOutcome::NotFound
                }
                Some(book) if !book.in_stock(line.quantity) => {
                    debug!(
                        title = %book.title,
                        requested = line.quantity,
                        available = book.stock,
                        "Cart line exceeds stock on hand"
                    );
                    LineOutcome::InsufficientStock {
                        available: book.stock,
                    }
                }
                Some(book) => {
                    // Freeze the price before mutating anything
                    let unit_price = book.price();
                    book.take_stock(line.quantity);

                    let id = state.ledger.next_transaction_id();
                    let txn = Transaction::new(
                        id.clone(),
                        username,
                        date,
                        &book.title,
                        line.quantity,
                        unit_price,
                    );

                    debug!(
                        transaction_id = %id,
                        title = %book.title,
                        quantity = line.quantity,
                        remaining = book.stock,
                        "Cart line sold"
                    );

                    let remaining = book.stock;
                    new_txns.push(txn);
                    LineOutcome::Purchased {
                        transaction_id: id,
                        remaining_stock: remaining,
                    }
                }
            };

            results.push(LineResult {
                title: line.title.clone(),
                quantity: line.quantity,
                outcome,
            });
        }

        // An all-failed cart changes nothing, so write nothing
        if new_txns.is_empty() {
            debug!(username = %username, lines = cart.len(), "No purchasable lines; nothing written");
            return Ok(CheckoutReceipt {
                username: username.to_string(),
                date,
                lines: results,
                transactions: Vec::new(),
                total_cents: 0,
            });
        }

        let total: Money = new_txns.iter().map(Transaction::total).sum();

        // Catalog first, then ledger (see module docs for the ordering)
        state.catalog.save(&catalog).await?;
        state.ledger.append(history, new_txns.clone()).await?;

        info!(
            username = %username,
            purchased = new_txns.len(),
            missed = results.len() - new_txns.len(),
            total = %total,
            "Checkout complete"
        );

        Ok(CheckoutReceipt {
            username: username.to_string(),
            date,
            lines: results,
            transactions: new_txns,
            total_cents: total.cents(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
