//! Site map parsing from YAML or JSON text.
//!
//! A mapping is a directory, a string is a page source path:
//!
//! ```yaml
//! index.html.haml: index.html.haml
//! introduction:
//!   getting-started.html.haml: introduction/getting-started.html.haml
//! ```
//!
//! JSON is accepted as well since it is valid YAML. Key order is preserved.

use serde_yaml::{Mapping, Value};

use crate::error::NavError;
use crate::node::{DirectoryNode, PageLeaf, SiteNode};

/// Parse a site map document into its root directory.
///
/// An empty document yields an empty root.
///
/// # Errors
///
/// Returns [`NavError::Parse`] for invalid YAML/JSON and
/// [`NavError::MalformedSiteMap`] when a node is neither a string nor a
/// mapping, or a key is not a scalar.
pub fn parse_site_map(text: &str) -> Result<DirectoryNode, NavError> {
    if text.trim().is_empty() {
        return Ok(DirectoryNode::root());
    }
    let value: Value = serde_yaml::from_str(text)?;
    match value {
        Value::Null => Ok(DirectoryNode::root()),
        Value::Mapping(mapping) => parse_directory(None, &mapping, ""),
        other => Err(NavError::MalformedSiteMap {
            key_path: "/".to_owned(),
            found: describe(&other),
        }),
    }
}

fn parse_directory(
    name: Option<String>,
    mapping: &Mapping,
    key_path: &str,
) -> Result<DirectoryNode, NavError> {
    let mut dir = DirectoryNode {
        name,
        children: Vec::with_capacity(mapping.len()),
    };

    for (key, value) in mapping {
        let key = scalar_key(key).ok_or_else(|| NavError::MalformedSiteMap {
            key_path: format!("{key_path}/?"),
            found: "a non-scalar key",
        })?;
        let child_path = format!("{key_path}/{key}");

        let node = match value {
            Value::String(source_path) => SiteNode::Page(PageLeaf::new(source_path.clone())),
            Value::Mapping(children) => {
                SiteNode::Directory(parse_directory(Some(key.clone()), children, &child_path)?)
            }
            other => {
                return Err(NavError::MalformedSiteMap {
                    key_path: child_path,
                    found: describe(other),
                });
            }
        };
        dir.push(key, node);
    }

    Ok(dir)
}

/// Keys may be plain scalars such as `2016` or `true` in hand-written YAML.
fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
