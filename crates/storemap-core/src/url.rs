//! Storefront URL builders.
//!
//! Pure functions from a catalog item and the run's [`SitemapConfig`] to a
//! root-relative URL. Empty `sku`, `url_key` or `url_path` values are not
//! rejected; they simply leave an empty segment in the URL.

use storemap_catalog::{Category, Product};

use crate::provider::SitemapConfig;

/// URL of the storefront homepage.
pub const HOMEPAGE_URL: &str = "/";

/// Build the URL of a product page.
///
/// `/p/{sku}/{url_key}{suffix}` by default; `p/` disappears with short URLs
/// and the SKU segment disappears when SKUs are excluded.
pub fn product_url(product: &Product, config: &SitemapConfig) -> String {
    let prefix = if config.short_urls_enabled { "" } else { "p/" };

    let mut url = if config.exclude_sku_from_product_url {
        format!("/{prefix}{}", product.url_key)
    } else {
        format!("/{prefix}{}/{}", product.sku, product.url_key)
    };
    url.push_str(&config.product_url_suffix);
    url
}

/// Build the URL of a category page.
///
/// `/c/{url_key}{suffix}` by default; `c/` disappears with short URLs,
/// `url_path` replaces `url_key` when enabled, and `-{id}` is inserted before
/// the suffix when category id suffixes are enabled.
pub fn category_url(category: &Category, config: &SitemapConfig) -> String {
    let prefix = if config.short_urls_enabled { "" } else { "c/" };
    let segment = if config.use_category_url_path {
        &category.url_path
    } else {
        &category.url_key
    };

    let mut url = format!("/{prefix}{segment}");
    if config.append_category_id_suffix {
        url.push('-');
        url.push_str(&category.id.to_string());
    }
    url.push_str(&config.category_url_suffix);
    url
}
