//! Scheduled sitemap generation.
//!
//! [`GenerateSitemap`] runs the whole pipeline once: resolve settings, make
//! sure the output directory exists, collect homepage, category and product
//! entries, and write the files. The first error aborts the run; nothing is
//! retried and files already written are not cleaned up.

use chrono::Local;
use storemap_catalog::{CatalogError, CatalogReader};

use crate::fs::{FileSystemError, Filesystem};
use crate::provider::{ConfigProvider, SitemapConfig};
use crate::sitemap::{ChangeFrequency, SiteEntry, SitemapError, SitemapSummary, SitemapWriter};
use crate::url::{HOMEPAGE_URL, category_url, product_url};

/// Permissions of a newly created output directory.
pub const OUTPUT_DIR_MODE: u32 = 0o775;

/// Base name of the generated sitemap files.
pub const SITEMAP_FILENAME: &str = "sitemap";

/// Priority of every entry written by the job.
const ENTRY_PRIORITY: f32 = 1.0;

/// Error aborting a sitemap run.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Cannot prepare output directory: {0}")]
    FileSystem(#[from] FileSystemError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Sitemap(#[from] SitemapError),
}

/// Sitemap generation job.
///
/// Collaborators are passed in explicitly; the job keeps no state between runs.
pub struct GenerateSitemap<'a> {
    config: &'a dyn ConfigProvider,
    catalog: &'a dyn CatalogReader,
    filesystem: &'a dyn Filesystem,
}

impl<'a> GenerateSitemap<'a> {
    /// Create a job over the given collaborators.
    #[must_use]
    pub fn new(
        config: &'a dyn ConfigProvider,
        catalog: &'a dyn CatalogReader,
        filesystem: &'a dyn Filesystem,
    ) -> Self {
        Self {
            config,
            catalog,
            filesystem,
        }
    }

    /// Run the job once.
    ///
    /// # Errors
    ///
    /// Returns [`JobError`] if the output directory cannot be created, the
    /// catalog cannot be read, or a sitemap file cannot be written.
    pub fn execute(&self) -> Result<SitemapSummary, JobError> {
        let settings = SitemapConfig::resolve(self.config);
        tracing::info!(
            base_url = %settings.base_url,
            output_dir = %settings.output_dir.display(),
            "Generating sitemap"
        );

        if !self.filesystem.is_directory(&settings.output_dir) {
            self.filesystem
                .create_directory(&settings.output_dir, OUTPUT_DIR_MODE)?;
        }

        let mut sitemap = SitemapWriter::new(settings.base_url.as_str(), &settings.output_dir)
            .with_filename(SITEMAP_FILENAME);

        add_homepage(&mut sitemap);
        self.add_categories(&mut sitemap, &settings)?;
        self.add_products(&mut sitemap, &settings)?;

        let summary = sitemap.create_sitemap_index(&settings.base_url, Local::now().date_naive())?;
        Ok(summary)
    }

    fn add_categories(
        &self,
        sitemap: &mut SitemapWriter,
        settings: &SitemapConfig,
    ) -> Result<(), JobError> {
        let categories = self.catalog.active_categories()?;
        tracing::info!(count = categories.len(), "Adding categories");

        for category in &categories {
            sitemap.add_item(catalog_entry(
                category_url(category, settings),
                category.updated_at,
            ));
        }
        Ok(())
    }

    fn add_products(
        &self,
        sitemap: &mut SitemapWriter,
        settings: &SitemapConfig,
    ) -> Result<(), JobError> {
        let products = self.catalog.active_products()?;
        tracing::info!(count = products.len(), "Adding products");

        for product in &products {
            sitemap.add_item(catalog_entry(
                product_url(product, settings),
                product.updated_at,
            ));
        }
        Ok(())
    }
}

fn add_homepage(sitemap: &mut SitemapWriter) {
    sitemap.add_item(SiteEntry::new(HOMEPAGE_URL).with_priority(ENTRY_PRIORITY));
}

fn catalog_entry(url: String, updated_at: Option<chrono::NaiveDateTime>) -> SiteEntry {
    SiteEntry::new(url)
        .with_priority(ENTRY_PRIORITY)
        .with_change_frequency(ChangeFrequency::Daily)
        .with_last_modified(updated_at)
}
