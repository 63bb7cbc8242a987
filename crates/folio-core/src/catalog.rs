//! # Catalog Module
//!
//! The in-memory book catalog: an owned collection of [`Book`] records with
//! the title-lookup and stock-mutation rules checkout depends on.
//!
//! ## Lookup Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Lookup Semantics                           │
//! │                                                                         │
//! │  find_by_title("dune")                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Compare case-insensitively against every entry, in catalog order       │
//! │       │                                                                 │
//! │       ├── "Dune"    → MATCH (first match wins)                          │
//! │       ├── "DUNE"    → never reached if an earlier entry matched         │
//! │       └── no match  → None (caller decides: NotFound outcome)           │
//! │                                                                         │
//! │  Duplicate titles are tolerated; the first catalog entry shadows the    │
//! │  rest. Catalog order is snapshot order, so the rule is deterministic.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation
//! Stock only changes through [`Book::take_stock`] on a book borrowed via
//! [`Catalog::find_by_title_mut`]. There is no other mutation path, which is
//! what makes "stock never goes negative" enforceable in one place.

use serde::{Deserialize, Serialize};

use crate::types::Book;

// =============================================================================
// Catalog
// =============================================================================

/// The owned set of books available for sale.
///
/// A `Catalog` is a point-in-time snapshot: the store layer loads one,
/// checkout mutates it, and the store layer writes the whole thing back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog { books: Vec::new() }
    }

    /// Builds a catalog from loaded records, preserving their order.
    pub fn from_books(books: Vec<Book>) -> Self {
        Catalog { books }
    }

    /// Finds a book by title, case-insensitively. First match wins.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::catalog::Catalog;
    /// use folio_core::types::Book;
    ///
    /// let catalog = Catalog::from_books(vec![Book {
    ///     title: "Dune".to_string(),
    ///     author: "Frank Herbert".to_string(),
    ///     genre: "Science Fiction".to_string(),
    ///     year: "1965".to_string(),
    ///     stock: 5,
    ///     price_cents: 1000,
    /// }]);
    ///
    /// assert!(catalog.find_by_title("dune").is_some());
    /// assert!(catalog.find_by_title("DUNE").is_some());
    /// assert!(catalog.find_by_title("Duna").is_none());
    /// ```
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        let wanted = title.to_lowercase();
        self.books
            .iter()
            .find(|b| b.title.to_lowercase() == wanted)
    }

    /// Mutable variant of [`Catalog::find_by_title`], for stock updates.
    pub fn find_by_title_mut(&mut self, title: &str) -> Option<&mut Book> {
        let wanted = title.to_lowercase();
        self.books
            .iter_mut()
            .find(|b| b.title.to_lowercase() == wanted)
    }

    /// Adds a book to the end of the catalog.
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// The books in catalog (= snapshot) order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// True if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
