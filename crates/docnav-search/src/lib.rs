//! Client-side search for docnav.
//!
//! This crate provides:
//! - [`Corpus`] and [`SearchIndex`]: an in-RAM tantivy index over a fixed
//!   set of documents, with title matches boosted over body matches
//! - [`SearchEngine`]: ranked, truncated queries producing [`ResultItem`]s
//! - [`SearchWidget`]: the search box state machine (debounced querying,
//!   keyboard and mouse selection) driving a [`ResultsView`]
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), docnav_search::SearchError> {
//! use docnav_search::{Corpus, QueryOptions, SearchEngine};
//!
//! let options = QueryOptions {
//!     origin: "http://aparapi.com/".to_owned(),
//!     ..QueryOptions::default()
//! };
//! let engine = SearchEngine::new(&Corpus::builtin(), options)?;
//!
//! let results = engine.search("overview")?;
//! assert_eq!(results[0].label, "index");
//! assert_eq!(results[0].href, "http://aparapi.com/index.html");
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod debouncer;
mod document;
mod error;
mod index;
mod query;
mod selection;
mod view;
mod widget;

pub use analyzer::tokenize;
pub use debouncer::Debouncer;
pub use document::{Corpus, SearchDocument};
pub use error::SearchError;
pub use index::{BODY_BOOST, SearchHit, SearchIndex, TITLE_BOOST};
pub use query::{QueryOptions, ResultItem, SearchEngine, result_label};
pub use selection::Selection;
pub use view::{
    FOCUSED_CLASS, HtmlResultsView, INPUT_ID, RESULTS_CONTAINER_CLASS, ResultsView,
    render_results,
};
pub use widget::{Key, KeyHandling, SearchWidget, WidgetOptions, WidgetState};
