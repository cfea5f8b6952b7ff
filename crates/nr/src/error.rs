//! CLI error types.

use nr_block::ClipboardError;
use nr_config::ConfigError;
use nr_highlight::RegistryError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid code block: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Clipboard(#[from] ClipboardError),
}
