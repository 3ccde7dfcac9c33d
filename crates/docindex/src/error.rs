//! CLI error types.

use docindex_config::ConfigError;
use docindex_tree::{LoadError, LookupError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Lookup(#[from] LookupError),

    #[error("Serialization failed: {0}")]
    Serialize(String),

    #[error("{0}")]
    Validation(String),
}
