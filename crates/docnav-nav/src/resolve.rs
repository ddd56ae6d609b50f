//! Page resolution for navigation leaves.
//!
//! Leaves hold *source* paths (`introduction/about.html.haml`). Before a leaf
//! can be linked it is mapped to its published path (`introduction/about.html`)
//! and looked up among the published pages.

use std::collections::HashMap;
use std::path::Path;

use crate::front_matter::FrontMatter;
use crate::node::DirectoryNode;
use crate::render::format_directory_name;

/// Template extensions stripped from source paths, outermost first.
const TEMPLATE_EXTENSIONS: &[&str] = &[
    "haml", "erb", "slim", "liquid", "builder", "md", "markdown", "adoc",
];

/// A page leaf resolved against the published site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPage {
    /// Absolute link target (leading slash).
    pub url: String,
    /// Display title.
    pub title: String,
    /// True when this is the page currently being viewed.
    pub is_current: bool,
}

/// Looks up published pages by source path.
pub trait PageResolver {
    /// Resolve a leaf's source path, `None` if no published page matches.
    fn resolve(&self, source_path: &str) -> Option<ResolvedPage>;
}

/// Convert a source path to its post-build path.
///
/// Template extensions are stripped from the end and `page_extension` is
/// appended unless the result already ends with it.
///
/// # Examples
///
/// ```
/// use docnav_nav::published_path;
///
/// assert_eq!(published_path("introduction/about.html.haml", ".html"), "introduction/about.html");
/// assert_eq!(published_path("guides/setup.adoc", ".html"), "guides/setup.html");
/// assert_eq!(published_path("index.html", ".html"), "index.html");
/// ```
pub fn published_path(source_path: &str, page_extension: &str) -> String {
    let mut path = source_path.trim_start_matches('/').to_owned();

    while let Some((stem, ext)) = path.rsplit_once('.') {
        let is_template = TEMPLATE_EXTENSIONS
            .iter()
            .any(|t| t.eq_ignore_ascii_case(ext));
        if !is_template || stem.is_empty() || stem.ends_with('/') {
            break;
        }
        let stem_len = stem.len();
        path.truncate(stem_len);
    }

    if !path.ends_with(page_extension) {
        path.push_str(page_extension);
    }
    path
}

/// Published pages of a site plus the page currently being viewed.
#[derive(Clone, Debug)]
pub struct Sitemap {
    page_extension: String,
    /// Published path (no leading slash) to title.
    pages: HashMap<String, String>,
    current: Option<String>,
}

impl Sitemap {
    /// Create an empty sitemap publishing pages with `page_extension`.
    pub fn new(page_extension: impl Into<String>) -> Self {
        Self {
            page_extension: page_extension.into(),
            pages: HashMap::new(),
            current: None,
        }
    }

    /// Publish every leaf of a site map, titled after its file name.
    pub fn from_site_map(root: &DirectoryNode, page_extension: &str) -> Self {
        Self::publish(root, page_extension, |_| None)
    }

    /// Publish every leaf of a site map whose sources live in `source_dir`.
    ///
    /// A `title` in the page's front matter wins; pages without one, or
    /// whose source cannot be read, are titled after their file name.
    pub fn from_sources(root: &DirectoryNode, source_dir: &Path, page_extension: &str) -> Self {
        Self::publish(root, page_extension, |source_path| {
            FrontMatter::read(&source_dir.join(source_path)).title
        })
    }

    fn publish<F>(root: &DirectoryNode, page_extension: &str, declared_title: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut sitemap = Self::new(page_extension);
        for leaf in root.pages() {
            let path = published_path(&leaf.source_path, page_extension);
            let title = declared_title(&leaf.source_path)
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| title_from_path(&path, page_extension));
            sitemap.pages.insert(path, title);
        }
        sitemap
    }

    /// Register a published page.
    pub fn add_page(&mut self, path: impl Into<String>, title: impl Into<String>) {
        let path: String = path.into();
        self.pages
            .insert(path.trim_start_matches('/').to_owned(), title.into());
    }

    /// Builder form of [`add_page`](Self::add_page).
    #[must_use]
    pub fn with_page(mut self, path: impl Into<String>, title: impl Into<String>) -> Self {
        self.add_page(path, title);
        self
    }

    /// Set the page being viewed, by published path.
    #[must_use]
    pub fn with_current(mut self, path: &str) -> Self {
        self.set_current(Some(path));
        self
    }

    /// Replace the page being viewed.
    pub fn set_current(&mut self, path: Option<&str>) {
        self.current = path.map(|p| p.trim_start_matches('/').to_owned());
    }

    /// Number of published pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no page is published.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageResolver for Sitemap {
    fn resolve(&self, source_path: &str) -> Option<ResolvedPage> {
        let path = published_path(source_path, &self.page_extension);
        let title = self.pages.get(&path)?;
        Some(ResolvedPage {
            url: format!("/{path}"),
            title: title.clone(),
            is_current: self.current.as_deref() == Some(path.as_str()),
        })
    }
}

/// Fallback title from a published path: `intro/getting-started.html` -> `Getting Started`.
fn title_from_path(path: &str, page_extension: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = file.strip_suffix(page_extension).unwrap_or(file);
    format_directory_name(stem)
}
