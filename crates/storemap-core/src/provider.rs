//! Configuration provider trait and per-run sitemap settings.
//!
//! [`ConfigProvider`] is the narrow view of store configuration the job needs.
//! [`SitemapConfig`] is resolved from it once at job start and then passed to
//! the URL builders, so scoped lookups happen exactly once per run.

use std::path::PathBuf;

use storemap_config::Config;

/// Scoped configuration key holding the product URL suffix.
pub const PRODUCT_URL_SUFFIX_KEY: &str = "catalog/seo/product_url_suffix";

/// Scoped configuration key holding the category URL suffix.
pub const CATEGORY_URL_SUFFIX_KEY: &str = "catalog/seo/category_url_suffix";

/// Store configuration consumed by the sitemap job.
pub trait ConfigProvider {
    /// Public storefront URL.
    fn base_url(&self) -> String;

    /// Directory receiving the sitemap files.
    fn output_folder(&self) -> PathBuf;

    /// Whether catalog URLs omit the `p/` and `c/` prefixes.
    fn short_urls_enabled(&self) -> bool;

    /// Whether product URLs omit the SKU segment.
    fn exclude_sku_enabled(&self) -> bool;

    /// Whether category URLs use the full URL path instead of the URL key.
    fn use_category_url_path(&self) -> bool;

    /// Whether category URLs end with `-{id}`.
    fn category_id_suffix_enabled(&self) -> bool;

    /// Store-scoped value for `key`, `None` when unset.
    fn scoped_value(&self, key: &str) -> Option<String>;
}

impl ConfigProvider for Config {
    fn base_url(&self) -> String {
        self.storefront.url.clone()
    }

    fn output_folder(&self) -> PathBuf {
        self.sitemap_resolved.output_dir()
    }

    fn short_urls_enabled(&self) -> bool {
        self.storefront.short_catalog_urls
    }

    fn exclude_sku_enabled(&self) -> bool {
        self.storefront.exclude_product_skus
    }

    fn use_category_url_path(&self) -> bool {
        self.storefront.category_url_path
    }

    fn category_id_suffix_enabled(&self) -> bool {
        self.storefront.category_id_suffix
    }

    fn scoped_value(&self, key: &str) -> Option<String> {
        Config::scoped_value(self, key).map(ToOwned::to_owned)
    }
}

/// Settings for one sitemap run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SitemapConfig {
    /// Storefront URL without trailing slash.
    pub base_url: String,
    /// Directory receiving the sitemap files.
    pub output_dir: PathBuf,
    /// Omit `p/` and `c/` prefixes.
    pub short_urls_enabled: bool,
    /// Omit the SKU segment from product URLs.
    pub exclude_sku_from_product_url: bool,
    /// Use `url_path` instead of `url_key` for categories.
    pub use_category_url_path: bool,
    /// Append `-{id}` to category URLs.
    pub append_category_id_suffix: bool,
    /// Suffix appended to product URLs (e.g. ".html").
    pub product_url_suffix: String,
    /// Suffix appended to category URLs.
    pub category_url_suffix: String,
}

impl SitemapConfig {
    /// Resolve all settings from `provider`.
    ///
    /// Missing URL suffixes resolve to the empty string.
    pub fn resolve(provider: &dyn ConfigProvider) -> Self {
        Self {
            base_url: provider.base_url().trim_end_matches('/').to_owned(),
            output_dir: provider.output_folder(),
            short_urls_enabled: provider.short_urls_enabled(),
            exclude_sku_from_product_url: provider.exclude_sku_enabled(),
            use_category_url_path: provider.use_category_url_path(),
            append_category_id_suffix: provider.category_id_suffix_enabled(),
            product_url_suffix: provider
                .scoped_value(PRODUCT_URL_SUFFIX_KEY)
                .unwrap_or_default(),
            category_url_suffix: provider
                .scoped_value(CATEGORY_URL_SUFFIX_KEY)
                .unwrap_or_default(),
        }
    }
}
