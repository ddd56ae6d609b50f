//! YAML front matter at the top of page sources.
//!
//! A page may open with a block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Getting Started with Aparapi
//! ---
//! %h1 ...
//! ```
//!
//! Only `title` is read; other keys are ignored.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

const DELIMITER: &str = "---";

/// Page-level settings declared in front matter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FrontMatter {
    /// Display title overriding the one derived from the file name.
    #[serde(default)]
    pub title: Option<String>,
}

impl FrontMatter {
    /// Parse the front matter block of `content`.
    ///
    /// Returns the default (no title) when there is no block or the block
    /// is not valid YAML.
    pub fn parse(content: &str) -> Self {
        let Some(block) = front_matter_block(content) else {
            return Self::default();
        };
        if block.trim().is_empty() {
            return Self::default();
        }
        serde_yaml::from_str(block).unwrap_or_else(|e| {
            debug!(error = %e, "Ignoring malformed front matter");
            Self::default()
        })
    }

    /// Read the front matter of the file at `path`.
    ///
    /// Unreadable files yield the default.
    pub fn read(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No front matter read");
                Self::default()
            }
        }
    }
}

/// Text between the opening and closing `---` lines, if `content` opens with one.
fn front_matter_block(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let start = first.len();
    let mut end = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some(&content[start..end]);
        }
        end += line.len();
    }
    None
}
