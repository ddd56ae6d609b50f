//! Ranked queries and result labels.

use docnav_config::Config;
use serde::Serialize;
use tracing::debug;

use crate::document::Corpus;
use crate::error::SearchError;
use crate::index::SearchIndex;

/// A rendered search result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    /// Display label, the page file name without extension.
    pub label: String,
    /// Full link target.
    pub href: String,
}

/// Query behavior shared by the engine and the widget.
#[derive(Clone, Debug)]
pub struct QueryOptions {
    /// Site origin stripped from hrefs when building labels.
    pub origin: String,
    /// Page extension stripped from labels.
    pub page_extension: String,
    /// Maximum number of results returned.
    pub max_results: usize,
    /// Queries shorter than this (in characters) return nothing.
    pub min_query_len: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            origin: "http://localhost/".to_owned(),
            page_extension: ".html".to_owned(),
            max_results: 6,
            min_query_len: 2,
        }
    }
}

impl From<&Config> for QueryOptions {
    fn from(config: &Config) -> Self {
        Self {
            origin: config.site_resolved.origin.clone(),
            page_extension: config.site_resolved.page_extension.clone(),
            max_results: config.search_resolved.max_results,
            min_query_len: config.search_resolved.min_query_len,
        }
    }
}

/// A search index plus the rules turning hits into [`ResultItem`]s.
#[derive(Debug)]
pub struct SearchEngine {
    index: SearchIndex,
    options: QueryOptions,
}

impl SearchEngine {
    /// Build the index for `corpus`.
    ///
    /// # Errors
    ///
    /// Propagates index construction errors.
    pub fn new(corpus: &Corpus, options: QueryOptions) -> Result<Self, SearchError> {
        Ok(Self {
            index: SearchIndex::build(corpus)?,
            options,
        })
    }

    /// Query options in effect.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// True if `query` is long enough to be sent to the index.
    pub fn accepts(&self, query: &str) -> bool {
        query.chars().count() >= self.options.min_query_len
    }

    /// Ranked results for `query`, at most `max_results` of them.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Index`] if the index fails to run the query.
    pub fn search(&self, query: &str) -> Result<Vec<ResultItem>, SearchError> {
        if !self.accepts(query) {
            return Ok(Vec::new());
        }

        let options = &self.options;
        let results: Vec<ResultItem> = self
            .index
            .search(query)?
            .into_iter()
            .take(options.max_results)
            .map(|hit| ResultItem {
                label: result_label(&hit.href, &options.origin, &options.page_extension),
                href: hit.href,
            })
            .collect();

        debug!(query, results = results.len(), "Search query");
        Ok(results)
    }
}

/// Derive a display label from a result href.
///
/// The origin prefix is stripped, then everything up to the last `/`, then
/// the page extension and anything after it.
///
/// # Examples
///
/// ```
/// use docnav_search::result_label;
///
/// let origin = "http://aparapi.com/";
/// assert_eq!(result_label("http://aparapi.com/index.html", origin, ".html"), "index");
/// assert_eq!(
///     result_label("http://aparapi.com/introduction/getting-started.html", origin, ".html"),
///     "getting-started"
/// );
/// ```
pub fn result_label(href: &str, origin: &str, page_extension: &str) -> String {
    let path = href.strip_prefix(origin).unwrap_or(href);
    let name = path
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(path);
    if page_extension.is_empty() {
        return name.to_owned();
    }
    name.split(page_extension).next().unwrap_or(name).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SearchDocument;
    use pretty_assertions::assert_eq;

    fn aparapi_options() -> QueryOptions {
        QueryOptions {
            origin: "http://aparapi.com/".to_owned(),
            ..QueryOptions::default()
        }
    }

    fn large_corpus() -> Corpus {
        Corpus::new(
            (0..10)
                .map(|i| {
                    SearchDocument::new(
                        format!("http://aparapi.com/kernels/kernel-{i}.html"),
                        format!("Kernel {i}"),
                        "GPU kernel notes",
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_overview_example() {
        let engine = SearchEngine::new(&Corpus::builtin(), aparapi_options()).unwrap();

        let results = engine.search("overview").unwrap();

        assert_eq!(
            results,
            vec![ResultItem {
                label: "index".to_owned(),
                href: "http://aparapi.com/index.html".to_owned(),
            }]
        );
    }

    #[test]
    fn test_short_queries_return_nothing() {
        let engine = SearchEngine::new(&Corpus::builtin(), aparapi_options()).unwrap();
        assert!(engine.search("").unwrap().is_empty());
        assert!(engine.search("a").unwrap().is_empty());
        assert!(!engine.accepts("o"));
        assert!(engine.accepts("ov"));
    }

    #[test]
    fn test_two_characters_is_enough() {
        let engine = SearchEngine::new(&Corpus::builtin(), aparapi_options()).unwrap();
        let labels: Vec<String> = engine
            .search("ab")
            .unwrap()
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec!["about".to_owned()]);
    }

    #[test]
    fn test_results_truncated_to_max() {
        let engine = SearchEngine::new(&large_corpus(), aparapi_options()).unwrap();
        assert_eq!(engine.search("kernel").unwrap().len(), 6);
    }

    #[test]
    fn test_results_truncated_to_custom_max() {
        let options = QueryOptions {
            max_results: 2,
            ..aparapi_options()
        };
        let engine = SearchEngine::new(&large_corpus(), options).unwrap();
        assert_eq!(engine.search("kernel").unwrap().len(), 2);
    }

    #[test]
    fn test_result_label_without_origin() {
        assert_eq!(
            result_label(
                "https://mirror.example.com/docs/faq.html",
                "http://aparapi.com/",
                ".html"
            ),
            "faq"
        );
    }

    #[test]
    fn test_result_label_trailing_slash() {
        assert_eq!(
            result_label("http://aparapi.com/guides/", "http://aparapi.com/", ".html"),
            "guides"
        );
    }

    #[test]
    fn test_result_label_cuts_at_extension() {
        assert_eq!(
            result_label(
                "http://aparapi.com/a/page.html#intro",
                "http://aparapi.com/",
                ".html"
            ),
            "page"
        );
    }

    #[test]
    fn test_result_item_serializes() {
        let item = ResultItem {
            label: "about".to_owned(),
            href: "http://aparapi.com/introduction/about.html".to_owned(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["label"], "about");
        assert_eq!(json["href"], "http://aparapi.com/introduction/about.html");
    }
}
