//! # Catalog Store
//!
//! Persistence for the book catalog.
//!
//! ## Load Policy
//! The catalog store is a *mutating* store: checkout loads the catalog,
//! decrements stock, and saves the whole snapshot back. Loads are therefore
//! strict - a malformed book record aborts the operation instead of being
//! dropped by the next save. See the crate docs on strict vs tolerant loads.

use tracing::debug;

use folio_core::catalog::Catalog;
use folio_core::types::Book;

use crate::error::StoreResult;
use crate::file::FileStore;

/// Repository for the catalog resource.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    files: FileStore,
    resource: String,
}

impl CatalogStore {
    /// Creates a catalog store over the shared file store.
    pub fn new(files: FileStore) -> Self {
        let resource = files.config().catalog_file.clone();
        CatalogStore { files, resource }
    }

    /// The resource file name this store reads and writes.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// True if the catalog resource exists on disk.
    pub async fn exists(&self) -> bool {
        self.files.exists(&self.resource).await
    }

    /// Loads the catalog. Absent resource → empty catalog.
    ///
    /// Strict: any malformed book record is an error.
    pub async fn load(&self) -> StoreResult<Catalog> {
        let books: Vec<Book> = self.files.load_strict(&self.resource).await?;
        debug!(count = books.len(), "Loaded catalog");
        Ok(Catalog::from_books(books))
    }

    /// Saves the whole catalog snapshot.
    pub async fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        debug!(count = catalog.len(), "Saving catalog");
        self.files.save(&self.resource, catalog.books()).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
