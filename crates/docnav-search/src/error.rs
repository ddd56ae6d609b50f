//! Search error types.

use std::path::PathBuf;

/// Error produced while loading a corpus, building the index or querying it.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Two documents share the same href.
    #[error("Duplicate search document href: {0}")]
    DuplicateHref(String),
    /// A document has an empty href.
    #[error("Search document #{0} has an empty href")]
    EmptyHref(usize),
    /// Corpus text is not valid YAML or JSON.
    #[error("Corpus parse error in {}: {source}", .path.display())]
    Parse {
        /// Corpus file, or `<inline>` for in-memory text.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: serde_yaml::Error,
    },
    /// The full-text index failed to build or execute a query.
    #[error("Search index error: {0}")]
    Index(#[from] tantivy::TantivyError),
    /// I/O error reading a corpus file.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// Corpus file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
