//! Sitemap file writer.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::entry::SiteEntry;
use super::xml;

/// Maximum number of URLs in one sitemap file (sitemap protocol limit).
pub const MAX_URLS_PER_FILE: usize = 50_000;

/// Maximum uncompressed size of one sitemap file (sitemap protocol limit).
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Default base name of the generated files.
pub const DEFAULT_FILENAME: &str = "sitemap";

/// Error while writing sitemap files.
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// A sitemap or index file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A segment file left over from an earlier run could not be removed.
    #[error("Failed to remove stale {}: {source}", path.display())]
    Remove {
        /// Stale file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// XML encoding failed.
    #[error("Failed to encode sitemap XML: {0}")]
    Encode(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SitemapError {
    pub(super) fn encode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Encode(Box::new(err))
    }
}

/// Files produced by [`SitemapWriter::create_sitemap_index`].
#[derive(Debug, PartialEq, Eq)]
pub struct SitemapSummary {
    /// Path of the index file.
    pub index_path: PathBuf,
    /// Paths of the URL set files, in index order.
    pub sitemap_paths: Vec<PathBuf>,
    /// Number of URLs written across all files.
    pub url_count: usize,
}

/// Accumulates sitemap entries and writes them as XML files.
///
/// Adding entries only touches memory; nothing is written until
/// [`create_sitemap_index`](Self::create_sitemap_index).
///
/// # Example
///
/// ```ignore
/// use storemap_core::{ChangeFrequency, SiteEntry, SitemapWriter};
///
/// let mut sitemap = SitemapWriter::new("https://shop.example.com", "pub/vsf");
/// sitemap.add_item(SiteEntry::new("/"));
/// sitemap.add_item(
///     SiteEntry::new("/c/shoes")
///         .with_priority(1.0)
///         .with_change_frequency(ChangeFrequency::Daily),
/// );
/// let summary = sitemap.create_sitemap_index("https://shop.example.com", today)?;
/// ```
#[derive(Debug)]
pub struct SitemapWriter {
    base_url: String,
    output_dir: PathBuf,
    filename: String,
    max_urls_per_file: usize,
    max_file_size: usize,
    entries: Vec<SiteEntry>,
}

impl SitemapWriter {
    /// Create a writer prefixing every entry URL with `base_url` and writing
    /// into `output_dir`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            output_dir: output_dir.into(),
            filename: DEFAULT_FILENAME.to_owned(),
            max_urls_per_file: MAX_URLS_PER_FILE,
            max_file_size: MAX_FILE_SIZE,
            entries: Vec::new(),
        }
    }

    /// Set the base file name (without extension).
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Cap the number of URLs per file. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_max_urls_per_file(mut self, max: usize) -> Self {
        self.max_urls_per_file = max.max(1);
        self
    }

    /// Cap the byte size of each file.
    ///
    /// A single entry larger than the cap still gets a file of its own.
    #[must_use]
    pub fn with_max_file_size(mut self, max: usize) -> Self {
        self.max_file_size = max;
        self
    }

    /// Append an entry.
    pub fn add_item(&mut self, entry: SiteEntry) {
        self.entries.push(entry);
    }

    /// Entries added so far, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[SiteEntry] {
        &self.entries
    }

    /// Number of entries added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path of the index file.
    #[must_use]
    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.xml", self.filename))
    }

    /// Write all entries and the index referencing them.
    ///
    /// Index locations are `{domain}/{file name}`; `lastmod` is stamped on
    /// every index record. Segment files numbered past the last one written
    /// (left by an earlier, larger run) are removed once the index is in
    /// place. Files written before a failure are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`SitemapError`] if encoding or any file write fails.
    pub fn create_sitemap_index(
        &self,
        domain: &str,
        lastmod: NaiveDate,
    ) -> Result<SitemapSummary, SitemapError> {
        let segments = self.render_segments()?;
        let domain = domain.trim_end_matches('/');

        let mut sitemap_paths = Vec::with_capacity(segments.len());
        let mut locations = Vec::with_capacity(segments.len());
        for (number, segment) in (1..).zip(&segments) {
            let name = format!("{}-{number}.xml", self.filename);
            let path = self.output_dir.join(&name);
            write_file(&path, &segment.bytes)?;
            tracing::debug!(path = %path.display(), urls = segment.url_count, "Wrote sitemap file");

            sitemap_paths.push(path);
            locations.push(format!("{domain}/{name}"));
        }

        let index_path = self.index_path();
        write_file(&index_path, &xml::sitemap_index(&locations, lastmod)?)?;
        self.remove_stale_segments(sitemap_paths.len() + 1)?;
        tracing::info!(
            path = %index_path.display(),
            files = sitemap_paths.len(),
            urls = self.entries.len(),
            "Wrote sitemap index"
        );

        Ok(SitemapSummary {
            index_path,
            sitemap_paths,
            url_count: self.entries.len(),
        })
    }

    /// Delete `{filename}-{n}.xml` for `n` from `first` upward until a number
    /// is missing.
    fn remove_stale_segments(&self, first: usize) -> Result<(), SitemapError> {
        for number in first.. {
            let path = self.output_dir.join(format!("{}-{number}.xml", self.filename));
            if !path.is_file() {
                break;
            }
            std::fs::remove_file(&path).map_err(|source| SitemapError::Remove {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "Removed stale sitemap file");
        }
        Ok(())
    }

    /// Render entries into complete URL set documents, splitting on the URL
    /// and byte caps. Always yields at least one document.
    fn render_segments(&self) -> Result<Vec<Segment>, SitemapError> {
        let header = xml::urlset_header()?;
        let footer = xml::urlset_footer()?;

        let mut segments = Vec::new();
        let mut current = Segment::start(&header);
        for entry in &self.entries {
            let fragment = xml::url_fragment(entry, &self.base_url)?;
            let full = current.url_count >= self.max_urls_per_file
                || current.bytes.len() + fragment.len() + footer.len() > self.max_file_size;
            if full && current.url_count > 0 {
                segments.push(current.finish(&footer));
                current = Segment::start(&header);
            }
            current.push(&fragment);
        }
        segments.push(current.finish(&footer));
        Ok(segments)
    }
}

/// One URL set document under construction.
struct Segment {
    bytes: Vec<u8>,
    url_count: usize,
}

impl Segment {
    fn start(header: &[u8]) -> Self {
        Self {
            bytes: header.to_vec(),
            url_count: 0,
        }
    }

    fn push(&mut self, fragment: &[u8]) {
        self.bytes.extend_from_slice(fragment);
        self.url_count += 1;
    }

    fn finish(mut self, footer: &[u8]) -> Self {
        self.bytes.extend_from_slice(footer);
        self
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), SitemapError> {
    std::fs::write(path, bytes).map_err(|source| SitemapError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sitemap::ChangeFrequency;

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    /// Extract `<loc>` values in document order.
    fn locs(xml: &str) -> Vec<String> {
        xml.split("<loc>")
            .skip(1)
            .filter_map(|rest| rest.split("</loc>").next())
            .map(ToOwned::to_owned)
            .collect()
    }

    #[test]
    fn test_add_item_keeps_order_in_memory() {
        let mut sitemap = SitemapWriter::new("https://shop.example.com", "/unused");
        assert!(sitemap.is_empty());

        sitemap.add_item(SiteEntry::new("/"));
        sitemap.add_item(SiteEntry::new("/c/shoes"));

        let urls: Vec<&str> = sitemap.entries().iter().map(SiteEntry::url).collect();
        assert_eq!(urls, vec!["/", "/c/shoes"]);
        assert_eq!(sitemap.len(), 2);
    }

    #[test]
    fn test_writes_single_file_and_index() {
        let temp = tempfile::tempdir().unwrap();
        let mut sitemap = SitemapWriter::new("https://shop.example.com", temp.path());
        sitemap.add_item(SiteEntry::new("/"));
        sitemap.add_item(
            SiteEntry::new("/c/shoes")
                .with_priority(1.0)
                .with_change_frequency(ChangeFrequency::Daily),
        );

        let summary = sitemap
            .create_sitemap_index("https://shop.example.com", run_date())
            .unwrap();

        assert_eq!(summary, SitemapSummary {
            index_path: temp.path().join("sitemap.xml"),
            sitemap_paths: vec![temp.path().join("sitemap-1.xml")],
            url_count: 2,
        });
        assert_eq!(locs(&read(&summary.sitemap_paths[0])), vec![
            "https://shop.example.com/",
            "https://shop.example.com/c/shoes"
        ]);

        let index = read(&summary.index_path);
        assert_eq!(locs(&index), vec!["https://shop.example.com/sitemap-1.xml"]);
        assert!(index.contains("<lastmod>2024-05-01</lastmod>"));
    }

    #[test]
    fn test_empty_sitemap_still_has_one_file() {
        let temp = tempfile::tempdir().unwrap();
        let sitemap = SitemapWriter::new("https://shop.example.com", temp.path());

        let summary = sitemap
            .create_sitemap_index("https://shop.example.com", run_date())
            .unwrap();

        assert_eq!(summary.sitemap_paths.len(), 1);
        assert_eq!(summary.url_count, 0);
        let content = read(&summary.sitemap_paths[0]);
        assert!(content.contains("<urlset"));
        assert!(locs(&content).is_empty());
    }

    #[test]
    fn test_splits_on_url_cap() {
        let temp = tempfile::tempdir().unwrap();
        let mut sitemap =
            SitemapWriter::new("https://shop.example.com", temp.path()).with_max_urls_per_file(2);
        for i in 0..5 {
            sitemap.add_item(SiteEntry::new(format!("/p/{i}")));
        }

        let summary = sitemap
            .create_sitemap_index("https://shop.example.com/", run_date())
            .unwrap();

        assert_eq!(summary.sitemap_paths, vec![
            temp.path().join("sitemap-1.xml"),
            temp.path().join("sitemap-2.xml"),
            temp.path().join("sitemap-3.xml"),
        ]);
        let all: Vec<String> = summary
            .sitemap_paths
            .iter()
            .flat_map(|path| locs(&read(path)))
            .collect();
        let expected: Vec<String> = (0..5)
            .map(|i| format!("https://shop.example.com/p/{i}"))
            .collect();
        assert_eq!(all, expected);

        assert_eq!(locs(&read(&summary.index_path)), vec![
            "https://shop.example.com/sitemap-1.xml",
            "https://shop.example.com/sitemap-2.xml",
            "https://shop.example.com/sitemap-3.xml",
        ]);
    }

    #[test]
    fn test_splits_on_size_cap() {
        let temp = tempfile::tempdir().unwrap();
        let header = xml::urlset_header().unwrap().len();
        let footer = xml::urlset_footer().unwrap().len();
        let fragment = xml::url_fragment(&SiteEntry::new("/p/0"), "https://shop.example.com")
            .unwrap()
            .len();
        // Room for exactly two fragments per file.
        let cap = header + footer + 2 * fragment;

        let mut sitemap =
            SitemapWriter::new("https://shop.example.com", temp.path()).with_max_file_size(cap);
        for i in 0..4 {
            sitemap.add_item(SiteEntry::new(format!("/p/{i}")));
        }

        let summary = sitemap
            .create_sitemap_index("https://shop.example.com", run_date())
            .unwrap();

        assert_eq!(summary.sitemap_paths.len(), 2);
        for path in &summary.sitemap_paths {
            assert!(std::fs::metadata(path).unwrap().len() as usize <= cap);
            assert_eq!(locs(&read(path)).len(), 2);
        }
    }

    #[test]
    fn test_oversized_entry_gets_own_file() {
        let temp = tempfile::tempdir().unwrap();
        let mut sitemap =
            SitemapWriter::new("https://shop.example.com", temp.path()).with_max_file_size(10);
        sitemap.add_item(SiteEntry::new("/a"));
        sitemap.add_item(SiteEntry::new("/b"));

        let summary = sitemap
            .create_sitemap_index("https://shop.example.com", run_date())
            .unwrap();

        assert_eq!(summary.sitemap_paths.len(), 2);
        assert_eq!(summary.url_count, 2);
    }

    #[test]
    fn test_custom_filename() {
        let temp = tempfile::tempdir().unwrap();
        let sitemap =
            SitemapWriter::new("https://shop.example.com", temp.path()).with_filename("catalog");

        let summary = sitemap
            .create_sitemap_index("https://shop.example.com", run_date())
            .unwrap();

        assert_eq!(summary.index_path, temp.path().join("catalog.xml"));
        assert_eq!(summary.sitemap_paths, vec![temp.path().join("catalog-1.xml")]);
    }

    #[test]
    fn test_smaller_run_removes_stale_segments() {
        let temp = tempfile::tempdir().unwrap();
        let mut large =
            SitemapWriter::new("https://shop.example.com", temp.path()).with_max_urls_per_file(1);
        for i in 0..3 {
            large.add_item(SiteEntry::new(format!("/p/{i}")));
        }
        large
            .create_sitemap_index("https://shop.example.com", run_date())
            .unwrap();
        assert!(temp.path().join("sitemap-3.xml").is_file());

        let mut small = SitemapWriter::new("https://shop.example.com", temp.path());
        small.add_item(SiteEntry::new("/"));
        let summary = small
            .create_sitemap_index("https://shop.example.com", run_date())
            .unwrap();

        assert_eq!(summary.sitemap_paths, vec![temp.path().join("sitemap-1.xml")]);
        assert!(!temp.path().join("sitemap-2.xml").exists());
        assert!(!temp.path().join("sitemap-3.xml").exists());
    }

    #[test]
    fn test_stale_cleanup_ignores_other_filenames() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("catalog-2.xml"), "").unwrap();
        let sitemap = SitemapWriter::new("https://shop.example.com", temp.path());

        sitemap
            .create_sitemap_index("https://shop.example.com", run_date())
            .unwrap();

        assert!(temp.path().join("catalog-2.xml").is_file());
    }

    #[test]
    fn test_missing_output_dir_is_write_error() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("missing");
        let sitemap = SitemapWriter::new("https://shop.example.com", &missing);

        let err = sitemap
            .create_sitemap_index("https://shop.example.com", run_date())
            .unwrap_err();

        assert!(matches!(err, SitemapError::Write { ref path, .. } if path.starts_with(&missing)));
        assert!(err.to_string().contains("sitemap-1.xml"));
    }
}
