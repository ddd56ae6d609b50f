//! Navigation error types.

use std::path::PathBuf;

/// Error produced while loading a site map.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Site map text is not valid YAML or JSON.
    #[error("Site map parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Site map has a node that is neither a page path nor a directory.
    #[error("Malformed site map at {key_path}: expected a page path or a directory, found {found}")]
    MalformedSiteMap {
        /// Slash-joined keys leading to the offending node.
        key_path: String,
        /// Short description of what was found instead.
        found: &'static str,
    },
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceDirNotFound(PathBuf),
    /// I/O error while scanning sources.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
