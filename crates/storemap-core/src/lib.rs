//! Catalog URL building and XML sitemap generation.
//!
//! The crate is organized leaf-first:
//!
//! - [`provider`]: [`ConfigProvider`] trait and the per-run [`SitemapConfig`]
//! - [`fs`]: [`Filesystem`] trait with the [`LocalFilesystem`] backend
//! - [`url`]: pure product/category URL builders
//! - [`sitemap`]: [`SitemapWriter`] accumulating entries and writing XML
//! - [`job`]: [`GenerateSitemap`], the single scheduled entry point
//!
//! # Example
//!
//! ```ignore
//! use storemap_catalog::JsonCatalog;
//! use storemap_config::Config;
//! use storemap_core::{GenerateSitemap, LocalFilesystem};
//!
//! let config = Config::load(None, None)?;
//! let catalog = JsonCatalog::new(&config.catalog_resolved.path);
//! let summary = GenerateSitemap::new(&config, &catalog, &LocalFilesystem).execute()?;
//! println!("{} URLs in {}", summary.url_count, summary.index_path.display());
//! ```

pub mod fs;
pub mod job;
pub mod provider;
pub mod sitemap;
pub mod url;

pub use fs::{FileSystemError, FileSystemErrorKind, Filesystem, LocalFilesystem};
pub use job::{GenerateSitemap, JobError};
pub use provider::{ConfigProvider, SitemapConfig};
pub use sitemap::{ChangeFrequency, SiteEntry, SitemapError, SitemapSummary, SitemapWriter};
