//! Site map model and collapsible navigation rendering for docnav.
//!
//! This crate provides:
//! - [`SiteNode`]: the hierarchical site map (directories and page leaves)
//! - [`parse_site_map`] and [`Scanner`]: site map sources (YAML/JSON text or a
//!   source directory)
//! - [`Sitemap`]: the published-page lookup used to resolve leaves, titled
//!   from page [`FrontMatter`] when sources are at hand
//! - [`TreeRenderer`]: nested collapsible navigation markup
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), docnav_nav::NavError> {
//! use docnav_nav::{Depth, Sitemap, TreeRenderer, parse_site_map};
//!
//! let root = parse_site_map("introduction:\n  about.html.haml: introduction/about.html.haml\n")?;
//! let sitemap = Sitemap::from_site_map(&root, ".html").with_current("introduction/about.html");
//!
//! let html = TreeRenderer::new(&sitemap).render(&root.into(), Depth::Unbounded);
//! assert!(html.contains(r#"<a href="/introduction/about.html">About</a>"#));
//! # Ok(())
//! # }
//! ```

mod error;
mod front_matter;
mod html;
mod node;
mod parse;
mod render;
mod resolve;
mod scanner;

pub use error::NavError;
pub use front_matter::FrontMatter;
pub use html::escape_html;
pub use node::{DirectoryNode, PageLeaf, SiteNode};
pub use parse::parse_site_map;
pub use render::{Depth, TreeRenderer, format_directory_name};
pub use resolve::{PageResolver, ResolvedPage, Sitemap, published_path};
pub use scanner::Scanner;
