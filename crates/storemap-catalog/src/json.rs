//! JSON catalog export reader.
//!
//! Reads a document of the shape
//!
//! ```json
//! {
//!   "products": [{ "id": 1, "sku": "ABC", "url_key": "shoe", "updated_at": "2019-03-22 15:31:00" }],
//!   "categories": [{ "id": 7, "url_key": "shoes", "url_path": "men/shoes" }]
//! }
//! ```
//!
//! Disabled products and inactive categories are filtered out.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::{CatalogError, CatalogReader, Category, Product};

/// Catalog backed by a JSON export file.
///
/// The file is re-read on every call, so the product and category reads are
/// separate snapshots.
#[derive(Debug)]
pub struct JsonCatalog {
    path: PathBuf,
}

/// On-disk export layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogExport {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl JsonCatalog {
    /// Create a reader for the export at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the export file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_export(&self) -> Result<CatalogExport, CatalogError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl CatalogReader for JsonCatalog {
    fn active_products(&self) -> Result<Vec<Product>, CatalogError> {
        let export = self.read_export()?;
        let total = export.products.len();
        let products: Vec<Product> = export.products.into_iter().filter(|p| p.enabled).collect();
        tracing::debug!(
            path = %self.path.display(),
            total,
            active = products.len(),
            "Loaded products"
        );
        Ok(products)
    }

    fn active_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let export = self.read_export()?;
        let total = export.categories.len();
        let categories: Vec<Category> = export
            .categories
            .into_iter()
            .filter(|c| c.is_active)
            .collect();
        tracing::debug!(
            path = %self.path.display(),
            total,
            active = categories.len(),
            "Loaded categories"
        );
        Ok(categories)
    }
}
