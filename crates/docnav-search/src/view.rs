//! View layer between the widget and the page.
//!
//! The widget only talks to a [`ResultsView`]; a browser binding would
//! implement it over the DOM. [`HtmlResultsView`] keeps the same state in
//! memory and renders markup with [`render_results`].

use std::fmt::Write as _;

use docnav_nav::escape_html;

use crate::query::ResultItem;

/// Id of the search text input.
pub const INPUT_ID: &str = "search";
/// Class of the element holding rendered results.
pub const RESULTS_CONTAINER_CLASS: &str = "search-results";
/// Class marking the focused result and the focused input container.
pub const FOCUSED_CLASS: &str = "focused";

/// Named accessors the widget uses to mutate the page.
pub trait ResultsView {
    /// Replace the rendered result list.
    fn set_results(&mut self, items: &[ResultItem]);

    /// Move the "focused" mark to `index`, or remove it.
    fn set_focused_result(&mut self, index: Option<usize>);

    /// Toggle the focused affordance on the input's container.
    fn set_container_focused(&mut self, focused: bool);

    /// Empty the text input.
    fn clear_input(&mut self);

    /// Take keyboard focus away from the text input.
    fn blur_input(&mut self);

    /// Navigate the page to `href`.
    fn navigate(&mut self, href: &str);
}

/// Render the result list markup.
///
/// ```
/// use docnav_search::{ResultItem, render_results};
///
/// let items = [ResultItem { label: "index".into(), href: "/index.html".into() }];
/// assert_eq!(
///     render_results(&items, Some(0)),
///     r#"<div class="search-results"><a class="focused" href="/index.html">index</a></div>"#
/// );
/// ```
pub fn render_results(items: &[ResultItem], focused: Option<usize>) -> String {
    let mut html = format!(r#"<div class="{RESULTS_CONTAINER_CLASS}">"#);
    for (i, item) in items.iter().enumerate() {
        let class = if focused == Some(i) {
            format!(r#" class="{FOCUSED_CLASS}""#)
        } else {
            String::new()
        };
        let _ = write!(
            html,
            r#"<a{class} href="{}">{}</a>"#,
            escape_html(&item.href),
            escape_html(&item.label)
        );
    }
    html.push_str("</div>");
    html
}

/// In-memory [`ResultsView`].
#[derive(Debug, Default)]
pub struct HtmlResultsView {
    items: Vec<ResultItem>,
    focused: Option<usize>,
    input: String,
    input_focused: bool,
    container_focused: bool,
    location: Option<String>,
}

impl HtmlResultsView {
    /// Empty view with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current result list markup.
    pub fn markup(&self) -> String {
        render_results(&self.items, self.focused)
    }

    /// Rendered results.
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// Result carrying the focused mark.
    pub fn focused_result(&self) -> Option<&ResultItem> {
        self.focused.and_then(|i| self.items.get(i))
    }

    /// Text in the input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Simulate typing: replace the input text and give it focus.
    pub fn type_text(&mut self, text: &str) {
        text.clone_into(&mut self.input);
        self.input_focused = true;
    }

    /// True while the input has keyboard focus.
    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    /// True while the container shows the focused affordance.
    pub fn container_focused(&self) -> bool {
        self.container_focused
    }

    /// Last navigation target.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl ResultsView for HtmlResultsView {
    fn set_results(&mut self, items: &[ResultItem]) {
        self.items = items.to_vec();
        self.focused = None;
    }

    fn set_focused_result(&mut self, index: Option<usize>) {
        self.focused = index.filter(|&i| i < self.items.len());
    }

    fn set_container_focused(&mut self, focused: bool) {
        self.container_focused = focused;
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn blur_input(&mut self) {
        self.input_focused = false;
    }

    fn navigate(&mut self, href: &str) {
        self.location = Some(href.to_owned());
    }
}
