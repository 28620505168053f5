//! XML sitemap assembly.
//!
//! [`SitemapWriter`] collects [`SiteEntry`] values in memory and, on
//! [`create_sitemap_index`](SitemapWriter::create_sitemap_index), writes them
//! as one or more `<urlset>` files plus a `<sitemapindex>` referencing them.
//!
//! Output layout for the default `sitemap` filename:
//!
//! ```text
//! {output_dir}/
//! +-- sitemap.xml        # index
//! +-- sitemap-1.xml      # first 50 000 URLs
//! +-- sitemap-2.xml      # next segment, only when needed
//! ```

mod entry;
mod writer;
mod xml;

pub use entry::{ChangeFrequency, DEFAULT_PRIORITY, SiteEntry};
pub use writer::{
    DEFAULT_FILENAME, MAX_FILE_SIZE, MAX_URLS_PER_FILE, SitemapError, SitemapSummary,
    SitemapWriter,
};
