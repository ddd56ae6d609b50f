//! Site map tree.
//!
//! A site map is a tree of [`SiteNode`]s rooted at an unnamed
//! [`DirectoryNode`]. Children keep insertion order, which is also the
//! rendering order.

/// A node of the site map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteNode {
    /// A single documentation page.
    Page(PageLeaf),
    /// A directory of pages and sub-directories.
    Directory(DirectoryNode),
}

/// A page leaf, identified by its source path relative to the source root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLeaf {
    /// Source path, e.g. `introduction/about.html.haml`.
    pub source_path: String,
}

/// A directory with ordered, keyed children.
///
/// The root directory has no name; every other directory is named by the
/// key its parent stores it under.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Directory name, `None` for the root.
    pub name: Option<String>,
    /// Children in insertion order.
    pub children: Vec<(String, SiteNode)>,
}

impl PageLeaf {
    /// Create a page leaf for `source_path`.
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
        }
    }
}

impl DirectoryNode {
    /// Create an empty root directory.
    pub fn root() -> Self {
        Self::default()
    }

    /// Create an empty named directory.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            children: Vec::new(),
        }
    }

    /// True for the unnamed top of the tree.
    pub fn is_root(&self) -> bool {
        self.name.is_none()
    }

    /// Append a page leaf under `key`.
    #[must_use]
    pub fn with_page(mut self, key: impl Into<String>, source_path: impl Into<String>) -> Self {
        self.push(key, SiteNode::Page(PageLeaf::new(source_path)));
        self
    }

    /// Append a sub-directory under its own name.
    ///
    /// An unnamed directory is stored under an empty key.
    #[must_use]
    pub fn with_directory(mut self, dir: DirectoryNode) -> Self {
        let key = dir.name.clone().unwrap_or_default();
        self.push(key, SiteNode::Directory(dir));
        self
    }

    /// Append a child under `key`, keeping insertion order.
    pub fn push(&mut self, key: impl Into<String>, node: SiteNode) {
        self.children.push((key.into(), node));
    }

    /// Iterate over every page leaf in rendering order.
    pub fn pages(&self) -> Vec<&PageLeaf> {
        let mut out = Vec::new();
        collect_pages(self, &mut out);
        out
    }
}

fn collect_pages<'a>(dir: &'a DirectoryNode, out: &mut Vec<&'a PageLeaf>) {
    for (_, child) in &dir.children {
        match child {
            SiteNode::Page(page) => out.push(page),
            SiteNode::Directory(sub) => collect_pages(sub, out),
        }
    }
}

impl From<DirectoryNode> for SiteNode {
    fn from(dir: DirectoryNode) -> Self {
        Self::Directory(dir)
    }
}

impl From<PageLeaf> for SiteNode {
    fn from(page: PageLeaf) -> Self {
        Self::Page(page)
    }
}
