//! Catalog reader abstraction for storemap.
//!
//! The sitemap job never talks to the store database directly. It reads the
//! active product and category sets through the [`CatalogReader`] trait, which
//! keeps URL generation testable and lets the catalog come from any backend.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Product`] and [`Category`] read-only projections
//! - [`CatalogReader`] trait with `active_products()` and `active_categories()`
//! - [`JsonCatalog`] reading a JSON catalog export
//! - [`MockCatalog`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use storemap_catalog::{CatalogReader, JsonCatalog};
//!
//! let catalog = JsonCatalog::new("var/export/catalog.json");
//! for product in catalog.active_products()? {
//!     println!("{} {}", product.sku, product.url_key);
//! }
//! ```

mod catalog;
mod de;
mod json;
#[cfg(feature = "mock")]
mod mock;

pub use catalog::{CatalogError, CatalogReader, Category, Product};
pub use json::JsonCatalog;
#[cfg(feature = "mock")]
pub use mock::MockCatalog;
