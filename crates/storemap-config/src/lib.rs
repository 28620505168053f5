//! Configuration management for storemap.
//!
//! Parses `storemap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `storefront.url`
//! - `sitemap.folder`
//! - `catalog.path`
//!
//! ## Scoped values
//!
//! The `[scope]` table holds store-scoped settings keyed by their platform
//! path, e.g. `"catalog/seo/product_url_suffix" = ".html"`. Lookups of
//! missing keys return `None`; callers choose their own fallback.

mod expand;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override storefront base URL.
    pub base_url: Option<String>,
    /// Override the sitemap output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the catalog export path.
    pub catalog_path: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "storemap.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storefront URL options.
    pub storefront: StorefrontConfig,
    /// Sitemap output location (paths are relative strings from TOML).
    sitemap: SitemapConfigRaw,
    /// Catalog source (paths are relative strings from TOML).
    catalog: CatalogConfigRaw,
    /// Store-scoped values keyed by configuration path.
    pub scope: HashMap<String, String>,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub sitemap_resolved: OutputConfig,
    /// Resolved catalog configuration (set after loading).
    #[serde(skip)]
    pub catalog_resolved: CatalogConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Storefront URL options.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Public storefront URL, used as the prefix of every sitemap location.
    pub url: String,
    /// Drop the `p/` and `c/` prefixes from catalog URLs.
    pub short_catalog_urls: bool,
    /// Leave the SKU segment out of product URLs.
    pub exclude_product_skus: bool,
    /// Build category URLs from the full `url_path` instead of `url_key`.
    pub category_url_path: bool,
    /// Append `-{id}` to category URLs.
    pub category_id_suffix: bool,
}

/// Raw sitemap configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SitemapConfigRaw {
    pub_dir: Option<String>,
    folder: Option<String>,
}

/// Resolved sitemap output location.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Public web root of the store.
    pub pub_dir: PathBuf,
    /// Folder below `pub_dir` receiving the sitemap files.
    pub folder: String,
    /// Explicit output directory (CLI override), bypasses `pub_dir` + `folder`.
    pub output_dir: Option<PathBuf>,
}

impl OutputConfig {
    /// Directory the sitemap files are written to.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        // A leading slash would make `join` discard pub_dir.
        self.pub_dir.join(self.folder.trim_start_matches('/'))
    }
}

/// Raw catalog configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogConfigRaw {
    path: Option<String>,
}

/// Resolved catalog source.
#[derive(Debug, Default)]
pub struct CatalogConfig {
    /// JSON catalog export.
    pub path: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`storefront.url`").
        field: String,
        /// Error message (e.g., "${`STORE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `storemap.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, and the
    /// result is validated last so that a CLI `--base-url` can stand in for a
    /// missing `storefront.url`.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Look up a store-scoped value.
    ///
    /// Empty strings are treated as unset.
    #[must_use]
    pub fn scoped_value(&self, key: &str) -> Option<&str> {
        self.scope
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.storefront.url.clone_from(base_url);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.sitemap_resolved.output_dir = Some(output_dir.clone());
        }
        if let Some(catalog_path) = &settings.catalog_path {
            self.catalog_resolved.path.clone_from(catalog_path);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            storefront: StorefrontConfig::default(),
            sitemap: SitemapConfigRaw::default(),
            catalog: CatalogConfigRaw::default(),
            scope: HashMap::new(),
            sitemap_resolved: OutputConfig {
                pub_dir: base.join("pub"),
                folder: String::new(),
                output_dir: None,
            },
            catalog_resolved: CatalogConfig {
                path: base.join("catalog.json"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.storefront.url, "storefront.url")?;
        require_http_url(&self.storefront.url, "storefront.url")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.storefront.url = expand::expand_env(&self.storefront.url, "storefront.url")?;

        if let Some(ref folder) = self.sitemap.folder {
            self.sitemap.folder = Some(expand::expand_env(folder, "sitemap.folder")?);
        }
        if let Some(ref path) = self.catalog.path {
            self.catalog.path = Some(expand::expand_env(path, "catalog.path")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.sitemap_resolved = OutputConfig {
            pub_dir: resolve(self.sitemap.pub_dir.as_deref(), "pub"),
            folder: self.sitemap.folder.clone().unwrap_or_default(),
            output_dir: None,
        };
        self.catalog_resolved = CatalogConfig {
            path: resolve(self.catalog.path.as_deref(), "catalog.json"),
        };
    }
}
