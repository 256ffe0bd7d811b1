//! Coverage catalog state.
//!
//! Keeps the loaded catalog alongside shared handles to its descriptors so
//! panels can hold on to the content they show.

use rpress::{Catalog, ContentDescriptor};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The catalog shown on the coverage wall.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Catalog,
    items: Vec<Arc<ContentDescriptor>>,
    /// File the catalog came from (None for the built-in catalog)
    source: Option<PathBuf>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(Catalog::builtin(), None)
    }
}

impl CatalogState {
    pub fn new(catalog: Catalog, source: Option<PathBuf>) -> Self {
        let items = catalog.items().iter().cloned().map(Arc::new).collect();
        Self { catalog, items, source }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared descriptors in catalog order.
    pub fn items(&self) -> &[Arc<ContentDescriptor>] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<Arc<ContentDescriptor>> {
        self.items.iter().find(|item| item.id == id).cloned()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
