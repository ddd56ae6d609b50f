//! Collapsible navigation rendering.
//!
//! Every entry is wrapped in its own accordion so the page script can expand
//! directories independently:
//!
//! ```html
//! <li class="no-padding"><ul class="collapsible collapsible-accordion">
//!   <li class="bold"><a class="collapsible-header waves-effect waves-teal">Introduction</a>
//!     <div class="collapsible-body"><ul>
//!       <li class="no-padding"><ul class="collapsible collapsible-accordion">
//!         <li class="bold"><a href="/introduction/about.html">About</a></li>
//!       </ul></li>
//!     </ul></div>
//!   </li>
//! </ul></li>
//! ```
//!
//! (whitespace added for readability; the renderer emits none).

use tracing::debug;

use crate::html::escape_html;
use crate::node::{DirectoryNode, PageLeaf, SiteNode};
use crate::resolve::PageResolver;

const ENTRY_OPEN: &str =
    r#"<li class="no-padding"><ul class="collapsible collapsible-accordion">"#;
const ENTRY_CLOSE: &str = "</ul></li>";

/// Maximum directory depth to render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Depth {
    /// Render the whole tree.
    #[default]
    Unbounded,
    /// Render directories only while `level + 1 <= limit`.
    Limit(usize),
}

impl Depth {
    /// Whether a directory rendered at `level` may emit its entry.
    fn admits(self, level: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Limit(limit) => level < limit,
        }
    }
}

impl From<Option<usize>> for Depth {
    fn from(limit: Option<usize>) -> Self {
        limit.map_or(Self::Unbounded, Self::Limit)
    }
}

/// Renders a site map into nested collapsible list markup.
///
/// Output depends only on the tree and the resolver, so rendering the same
/// snapshot twice yields identical markup.
pub struct TreeRenderer<'a, R: PageResolver + ?Sized> {
    resolver: &'a R,
}

impl<'a, R: PageResolver + ?Sized> TreeRenderer<'a, R> {
    /// Create a renderer resolving leaves through `resolver`.
    pub fn new(resolver: &'a R) -> Self {
        Self { resolver }
    }

    /// Render a tree from its root.
    pub fn render(&self, node: &SiteNode, max_depth: Depth) -> String {
        self.render_at(node, max_depth, None, 0)
    }

    /// Render `node` as the child stored under `key` at nesting `level`.
    ///
    /// A directory with no key is treated as the root: its children are
    /// rendered at `level + 1` without a wrapping entry.
    pub fn render_at(
        &self,
        node: &SiteNode,
        max_depth: Depth,
        key: Option<&str>,
        level: usize,
    ) -> String {
        let mut out = String::new();
        self.render_node(node, max_depth, key, level, &mut out);
        out
    }

    fn render_node(
        &self,
        node: &SiteNode,
        max_depth: Depth,
        key: Option<&str>,
        level: usize,
        out: &mut String,
    ) {
        match (node, key) {
            (SiteNode::Page(leaf), _) => self.render_page(leaf, out),
            (SiteNode::Directory(dir), None) => {
                self.render_children(dir, max_depth, level, out);
            }
            (SiteNode::Directory(dir), Some(key)) => {
                if max_depth.admits(level) {
                    self.render_directory(dir, key, max_depth, level, out);
                }
            }
        }
    }

    fn render_children(
        &self,
        dir: &DirectoryNode,
        max_depth: Depth,
        level: usize,
        out: &mut String,
    ) {
        for (child_key, child) in &dir.children {
            self.render_node(child, max_depth, Some(child_key), level + 1, out);
        }
    }

    fn render_page(&self, leaf: &PageLeaf, out: &mut String) {
        let Some(page) = self.resolver.resolve(&leaf.source_path) else {
            debug!(source_path = %leaf.source_path, "Dropping unresolved navigation leaf");
            return;
        };

        let class = if page.is_current { "bold active" } else { "bold" };
        out.push_str(ENTRY_OPEN);
        out.push_str(&format!(
            r#"<li class="{class}"><a href="{}">{}</a></li>"#,
            escape_html(&page.url),
            escape_html(&page.title)
        ));
        out.push_str(ENTRY_CLOSE);
    }

    fn render_directory(
        &self,
        dir: &DirectoryNode,
        key: &str,
        max_depth: Depth,
        level: usize,
        out: &mut String,
    ) {
        out.push_str(ENTRY_OPEN);
        out.push_str(r#"<li class="bold"><a class="collapsible-header waves-effect waves-teal">"#);
        out.push_str(&escape_html(&format_directory_name(key)));
        out.push_str(r#"</a><div class="collapsible-body"><ul>"#);
        self.render_children(dir, max_depth, level, out);
        out.push_str("</ul></div></li>");
        out.push_str(ENTRY_CLOSE);
    }
}

/// Display name for a directory key: separators become spaces and each word
/// is capitalized.
///
/// # Examples
///
/// ```
/// use docnav_nav::format_directory_name;
///
/// assert_eq!(format_directory_name("getting-started"), "Getting Started");
/// assert_eq!(format_directory_name("api_reference"), "Api Reference");
/// ```
pub fn format_directory_name(key: &str) -> String {
    key.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
