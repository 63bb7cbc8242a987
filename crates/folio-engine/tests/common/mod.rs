//! Common test utilities for folio-engine integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use tempfile::TempDir;

use folio_core::types::{Book, CartLine};
use folio_core::Catalog;
use folio_engine::{PurchaseProcessor, SalesAggregator};
use folio_store::file::StoreConfig;
use folio_store::{CatalogStore, FileStore, LedgerStore, ReportStore};

/// Test harness: a fresh data directory with every engine piece wired up.
pub struct TestHarness {
    /// Temporary data directory (kept alive for the test duration).
    pub _temp_dir: TempDir,
    /// The shared file store over the temp directory.
    pub files: FileStore,
    /// Catalog store handle (same files as the processor's).
    pub catalog: CatalogStore,
    /// Ledger store handle (shares the id generator with the processor's).
    pub ledger: LedgerStore,
    /// Report store handle.
    pub report: ReportStore,
    /// The checkout pipeline under test.
    pub processor: PurchaseProcessor,
    /// The report rebuild pipeline under test.
    pub aggregator: SalesAggregator,
}

impl TestHarness {
    /// Creates a harness with the standard test shelf.
    pub async fn new() -> Self {
        Self::with_books(standard_shelf()).await
    }

    /// Creates a harness with a caller-picked catalog.
    pub async fn with_books(books: Vec<Book>) -> Self {
        let harness = Self::empty().await;
        harness
            .catalog
            .save(&Catalog::from_books(books))
            .await
            .expect("Failed to seed catalog");
        harness
    }

    /// Creates a harness with no catalog file at all.
    pub async fn empty() -> Self {
        folio_engine::init_tracing();

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let files = FileStore::new(StoreConfig::new(temp_dir.path()))
            .await
            .expect("Failed to open file store");

        let catalog = CatalogStore::new(files.clone());
        let ledger = LedgerStore::new(files.clone());
        let report = ReportStore::new(files.clone());

        let processor = PurchaseProcessor::new(catalog.clone(), ledger.clone());
        let aggregator = SalesAggregator::new(ledger.clone(), report.clone());

        Self {
            _temp_dir: temp_dir,
            files,
            catalog,
            ledger,
            report,
            processor,
            aggregator,
        }
    }

    /// Current stock of a title, per the persisted catalog.
    pub async fn stock_of(&self, title: &str) -> u32 {
        self.catalog
            .load()
            .await
            .expect("Failed to load catalog")
            .find_by_title(title)
            .unwrap_or_else(|| panic!("{title} not in catalog"))
            .stock
    }
}

/// The shelf most tests start from.
pub fn standard_shelf() -> Vec<Book> {
    vec![
        book("Dune", "Frank Herbert", "Science Fiction", "1965", 5, 1000),
        book("Hyperion", "Dan Simmons", "Science Fiction", "1989", 7, 1000),
        book("Neuromancer", "William Gibson", "Science Fiction", "1984", 4, 1500),
        book(
            "The Left Hand of Darkness",
            "Ursula K. Le Guin",
            "Science Fiction",
            "1969",
            2,
            1250,
        ),
    ]
}

/// Shorthand book constructor.
pub fn book(
    title: &str,
    author: &str,
    genre: &str,
    year: &str,
    stock: u32,
    price_cents: i64,
) -> Book {
    Book {
        title: title.to_string(),
        author: author.to_string(),
        genre: genre.to_string(),
        year: year.to_string(),
        stock,
        price_cents,
    }
}

/// Shorthand cart line constructor (panics on invalid input).
pub fn line(title: &str, quantity: u32) -> CartLine {
    CartLine::new(title, quantity).expect("invalid cart line in test")
}
