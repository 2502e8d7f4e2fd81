//! Atomically swappable catalog holder.
//!
//! Searches run against an `Arc<Catalog>` snapshot. A reload builds the new
//! catalog completely, then swaps it in under a short write lock, so a search
//! never sees a half-loaded catalog and in-flight searches keep the one they
//! started with.

use std::path::Path;
use std::sync::Arc;

use citeseek_types::CatalogError;
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::catalog::{Catalog, CatalogStats};
use crate::loader::load_catalog;

/// Shared handle to the current catalog.
#[derive(Debug, Default)]
pub struct CatalogCell {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogCell {
    /// Wraps an already built catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog to run the next search against.
    #[inline]
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.current.read())
    }

    /// Installs `catalog`, returning the one it replaced.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let records = catalog.len();
        let previous = std::mem::replace(&mut *self.current.write(), Arc::new(catalog));
        info!(records, "catalog replaced");
        previous
    }

    /// Loads `dir` with the current configuration and swaps it in.
    ///
    /// # Errors
    ///
    /// On any load failure the current catalog stays in place.
    pub fn reload(&self, dir: &Path) -> Result<CatalogStats, CatalogError> {
        let config = *self.snapshot().config();
        match load_catalog(dir, config) {
            Ok(catalog) => {
                let stats = catalog.stats();
                self.replace(catalog);
                Ok(stats)
            }
            Err(err) => {
                warn!(error = %err, "reload failed, keeping current catalog");
                Err(err)
            }
        }
    }
}
