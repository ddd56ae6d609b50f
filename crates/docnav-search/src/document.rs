//! Search documents and the corpus they form.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// A searchable document. `href` is its unique key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Full link target, also the result key.
    pub href: String,
    /// Page title, boosted over the body.
    pub title: String,
    /// Page summary text.
    #[serde(default)]
    pub body: String,
}

impl SearchDocument {
    /// Create a document.
    pub fn new(href: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// The fixed set of documents a search index is built from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<SearchDocument>,
}

impl Corpus {
    /// Create a corpus from documents, keeping their order.
    pub fn new(documents: Vec<SearchDocument>) -> Self {
        Self { documents }
    }

    /// The hand-authored corpus shipped with the site.
    pub fn builtin() -> Self {
        Self::new(vec![
            SearchDocument::new(
                "http://aparapi.com/index.html",
                "Overview",
                "An overview of the Aparapi project",
            ),
            SearchDocument::new(
                "http://aparapi.com/introduction/getting-started.html",
                "Getting Started",
                "Describes how to get up and running using Aparapi",
            ),
            SearchDocument::new(
                "http://aparapi.com/introduction/about.html",
                "About",
                "Background information on Aparapi",
            ),
        ])
    }

    /// Parse a YAML or JSON list of documents.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if the text is not a list of documents.
    pub fn parse_str(text: &str) -> Result<Self, SearchError> {
        Self::parse(text, Path::new("<inline>"))
    }

    /// Load a YAML or JSON corpus file.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Io`] if the file cannot be read and
    /// [`SearchError::Parse`] if it is not a list of documents.
    pub fn load(path: &Path) -> Result<Self, SearchError> {
        let text = std::fs::read_to_string(path).map_err(|source| SearchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, SearchError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let documents: Option<Vec<SearchDocument>> =
            serde_yaml::from_str(text).map_err(|source| SearchError::Parse {
                path: PathBuf::from(path),
                source,
            })?;
        Ok(Self::new(documents.unwrap_or_default()))
    }

    /// Documents in corpus order.
    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when the corpus has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
