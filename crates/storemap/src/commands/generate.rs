//! `storemap generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use storemap_catalog::JsonCatalog;
use storemap_config::{CliSettings, Config};
use storemap_core::{ConfigProvider, GenerateSitemap, LocalFilesystem, SitemapSummary};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Storefront base URL (overrides config).
    #[arg(long, env = "STOREMAP_BASE_URL")]
    base_url: Option<String>,

    /// Directory to write the sitemap files to (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Catalog export file (overrides config).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover storemap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl GenerateArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base_url: self.base_url,
            output_dir: self.output_dir,
            catalog_path: self.catalog,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!("Storefront: {}", config.base_url()));
        output.info(&format!(
            "Catalog: {}",
            config.catalog_resolved.path.display()
        ));

        let summary = generate(&config)?;

        output.success(&format!(
            "Wrote {} URLs to {}",
            summary.url_count,
            summary.index_path.display()
        ));
        for path in &summary.sitemap_paths {
            output.detail(&path.display().to_string());
        }
        Ok(())
    }
}

fn generate(config: &Config) -> Result<SitemapSummary, CliError> {
    let catalog = JsonCatalog::new(&config.catalog_resolved.path);
    let summary = GenerateSitemap::new(config, &catalog, &LocalFilesystem).execute()?;
    Ok(summary)
}
