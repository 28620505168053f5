//! Catalog projections, reader trait and error type.
//!
//! [`Product`] and [`Category`] carry only the columns the sitemap needs.
//! Text columns that are missing in the source become empty strings; URL
//! generation concatenates them as-is.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::de;

/// Read-only product projection.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Product {
    /// Entity id.
    #[serde(deserialize_with = "de::entity_id")]
    pub id: u64,
    /// Stock keeping unit.
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub sku: String,
    /// URL key (last URL segment).
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub url_key: String,
    /// Last modification time.
    #[serde(default, deserialize_with = "de::timestamp")]
    pub updated_at: Option<NaiveDateTime>,
    /// Whether the product is enabled for the storefront.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Product {
    /// Create an enabled product without a modification time.
    #[must_use]
    pub fn new(id: u64, sku: impl Into<String>, url_key: impl Into<String>) -> Self {
        Self {
            id,
            sku: sku.into(),
            url_key: url_key.into(),
            updated_at: None,
            enabled: true,
        }
    }

    /// Set the modification time.
    #[must_use]
    pub fn with_updated_at(mut self, updated_at: NaiveDateTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }
}

/// Read-only category projection.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Entity id.
    #[serde(deserialize_with = "de::entity_id")]
    pub id: u64,
    /// URL key (last URL segment).
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub url_key: String,
    /// Full URL path including parent categories (e.g. "men/shoes").
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub url_path: String,
    /// Last modification time.
    #[serde(default, deserialize_with = "de::timestamp")]
    pub updated_at: Option<NaiveDateTime>,
    /// Whether the category is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Category {
    /// Create an active category without a modification time.
    #[must_use]
    pub fn new(id: u64, url_key: impl Into<String>, url_path: impl Into<String>) -> Self {
        Self {
            id,
            url_key: url_key.into(),
            url_path: url_path.into(),
            updated_at: None,
            is_active: true,
        }
    }

    /// Set the modification time.
    #[must_use]
    pub fn with_updated_at(mut self, updated_at: NaiveDateTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }
}

fn default_true() -> bool {
    true
}

/// Error from a catalog backend.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog source could not be read.
    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        /// Catalog source path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog source is not valid JSON or has the wrong shape.
    #[error("Invalid catalog {}: {source}", path.display())]
    Parse {
        /// Catalog source path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Backend-specific failure.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Source of the active catalog.
///
/// Both methods return items in the backend's native order; the sitemap keeps
/// that order. Calls are independent snapshots, no consistency is promised
/// between the product and category reads.
pub trait CatalogReader: Send + Sync {
    /// Return all products visible on the storefront.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the backend cannot be read.
    fn active_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Return all active categories.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the backend cannot be read.
    fn active_categories(&self) -> Result<Vec<Category>, CatalogError>;
}
