//! CLI error types.

use storemap_config::ConfigError;
use storemap_core::JobError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Job(#[from] JobError),
}
