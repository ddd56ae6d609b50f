//! Site map discovery by filesystem walking.
//!
//! Directories become [`DirectoryNode`]s keyed by their name and files become
//! page leaves keyed by their file name, with source paths relative to the
//! source root. Hidden entries are skipped. Entries are sorted by name, then
//! promoted files (e.g. `index.html.haml`) are moved to the front of their
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::NavError;
use crate::node::{DirectoryNode, PageLeaf, SiteNode};

/// Builds a site map from a source directory.
pub struct Scanner {
    source_dir: PathBuf,
    promote_files: Vec<String>,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory to scan
    /// * `promote_files` - File names listed first in their directory
    pub fn new(source_dir: PathBuf, promote_files: Vec<String>) -> Self {
        Self {
            source_dir,
            promote_files,
        }
    }

    /// Scan the source directory into a root [`DirectoryNode`].
    ///
    /// # Errors
    ///
    /// Returns [`NavError::SourceDirNotFound`] if the source directory is
    /// missing and [`NavError::Io`] if a directory cannot be read.
    pub fn scan(&self) -> Result<DirectoryNode, NavError> {
        if !self.source_dir.is_dir() {
            return Err(NavError::SourceDirNotFound(self.source_dir.clone()));
        }
        let root = self.scan_directory(&self.source_dir, "", None)?;
        debug!(
            source_dir = %self.source_dir.display(),
            pages = root.pages().len(),
            "Scanned site map"
        );
        Ok(root)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        prefix: &str,
        name: Option<String>,
    ) -> Result<DirectoryNode, NavError> {
        // Collect entries with cached file_type to avoid repeated stat calls
        let mut entries: Vec<(String, bool)> = fs::read_dir(dir_path)?
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                (e.file_name().to_string_lossy().into_owned(), is_dir)
            })
            .filter(|(name, _)| !name.starts_with('.'))
            .collect();

        entries.sort_by(|(a, _), (b, _)| {
            self.promote_rank(a)
                .cmp(&self.promote_rank(b))
                .then_with(|| a.cmp(b))
        });

        let mut dir = DirectoryNode {
            name,
            children: Vec::with_capacity(entries.len()),
        };

        for (entry_name, is_dir) in entries {
            let rel_path = if prefix.is_empty() {
                entry_name.clone()
            } else {
                format!("{prefix}/{entry_name}")
            };

            let node = if is_dir {
                let sub = self.scan_directory(
                    &dir_path.join(&entry_name),
                    &rel_path,
                    Some(entry_name.clone()),
                )?;
                SiteNode::Directory(sub)
            } else {
                SiteNode::Page(PageLeaf::new(rel_path))
            };
            dir.push(entry_name, node);
        }

        Ok(dir)
    }

    /// Position in the promote list, or past its end for ordinary entries.
    fn promote_rank(&self, name: &str) -> usize {
        self.promote_files
            .iter()
            .position(|p| p == name)
            .unwrap_or(self.promote_files.len())
    }
}
