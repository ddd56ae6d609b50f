//! CLI error types.

use docnav_config::ConfigError;
use docnav_nav::NavError;
use docnav_search::SearchError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Nav(#[from] NavError),

    #[error("{0}")]
    Search(#[from] SearchError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
