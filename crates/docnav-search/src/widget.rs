//! Search box state machine.
//!
//! [`SearchWidget`] reacts to input events forwarded by the host event loop
//! and mutates the page through a [`ResultsView`]. Time is passed in by the
//! caller; the host calls [`SearchWidget::tick`] once
//! [`SearchWidget::pending_deadline`] has passed to run the debounced query.

use std::time::{Duration, Instant};

use docnav_config::Config;
use tracing::{debug, warn};

use crate::debouncer::Debouncer;
use crate::document::Corpus;
use crate::error::SearchError;
use crate::query::{QueryOptions, ResultItem, SearchEngine};
use crate::selection::Selection;
use crate::view::ResultsView;

/// Observable widget state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetState {
    /// Input not focused and empty.
    Idle,
    /// Input focused with no results shown.
    FocusedEmpty,
    /// Input focused with at least one result shown.
    FocusedWithResults,
}

/// Keys the widget distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    ArrowUp,
    ArrowDown,
    /// Any key that edits the query.
    Other,
}

impl Key {
    /// Enter and the arrows select results and never trigger a query.
    pub fn is_navigation(self) -> bool {
        matches!(self, Self::Enter | Self::ArrowUp | Self::ArrowDown)
    }
}

impl From<&str> for Key {
    /// Map a DOM `KeyboardEvent.key` value.
    fn from(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            _ => Self::Other,
        }
    }
}

/// What the host should do with the native key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyHandling {
    /// Suppress the browser's default action (caret movement, submit).
    PreventDefault,
    /// Let the event through.
    Pass,
}

/// Widget tuning.
#[derive(Clone, Debug)]
pub struct WidgetOptions {
    /// Query and result options.
    pub query: QueryOptions,
    /// Quiet period before a typed query runs.
    pub debounce: Duration,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            query: QueryOptions::default(),
            debounce: Duration::from_millis(100),
        }
    }
}

impl From<&Config> for WidgetOptions {
    fn from(config: &Config) -> Self {
        Self {
            query: QueryOptions::from(config),
            debounce: config.search_resolved.debounce,
        }
    }
}

/// The live search box.
#[derive(Debug)]
pub struct SearchWidget<V: ResultsView> {
    engine: SearchEngine,
    view: V,
    debouncer: Debouncer<String>,
    selection: Selection,
    results: Vec<ResultItem>,
    state: WidgetState,
}

impl<V: ResultsView> SearchWidget<V> {
    /// Build the index and attach to `view`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be built from `corpus`.
    pub fn init(corpus: &Corpus, options: WidgetOptions, view: V) -> Result<Self, SearchError> {
        let engine = SearchEngine::new(corpus, options.query)?;
        debug!(debounce_ms = options.debounce.as_millis(), "Search widget ready");
        Ok(Self {
            engine,
            view,
            debouncer: Debouncer::new(options.debounce),
            selection: Selection::default(),
            results: Vec::new(),
            state: WidgetState::Idle,
        })
    }

    /// Guarded startup: load the corpus and build the widget.
    ///
    /// Any failure is logged and disables search instead of propagating, so
    /// the rest of the page keeps working.
    pub fn start<F>(load: F, options: WidgetOptions, view: V) -> Option<Self>
    where
        F: FnOnce() -> Result<Corpus, SearchError>,
    {
        match load().and_then(|corpus| Self::init(&corpus, options, view)) {
            Ok(widget) => Some(widget),
            Err(e) => {
                warn!(error = %e, "Search disabled");
                None
            }
        }
    }

    /// Detach and return the view.
    pub fn teardown(self) -> V {
        self.view
    }

    /// Current state.
    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// Results currently shown.
    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    /// Result carrying the focused mark.
    pub fn focused_result(&self) -> Option<&ResultItem> {
        self.selection.focused().and_then(|i| self.results.get(i))
    }

    /// When the pending query is due, if one is scheduled.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// The attached view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the attached view.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The input gained focus.
    pub fn on_focus(&mut self) {
        self.view.set_container_focused(true);
        self.state = self.focused_state();
    }

    /// The input lost focus while holding `value`.
    pub fn on_blur(&mut self, value: &str) {
        if value.is_empty() {
            self.view.set_container_focused(false);
            self.state = WidgetState::Idle;
        }
    }

    /// Key released in the input, which now holds `value`.
    ///
    /// Editing keys schedule a debounced query; queries too short to run
    /// clear the results immediately. Navigation keys are handled by
    /// [`SearchWidget::key_down`] and ignored here.
    pub fn key_up(&mut self, key: Key, value: &str, now: Instant) -> KeyHandling {
        if key.is_navigation() {
            return KeyHandling::Pass;
        }
        match key {
            Key::Escape => self.reset(),
            _ if self.engine.accepts(value) => {
                self.debouncer.schedule(value.to_owned(), now);
            }
            _ => {
                self.debouncer.cancel();
                self.show(Vec::new());
            }
        }
        KeyHandling::Pass
    }

    /// Key pressed in the input. Handles result selection and activation.
    pub fn key_down(&mut self, key: Key) -> KeyHandling {
        match key {
            Key::ArrowDown => {
                self.selection.move_down(self.results.len());
                self.view.set_focused_result(self.selection.focused());
            }
            Key::ArrowUp => {
                self.selection.move_up();
                self.view.set_focused_result(self.selection.focused());
            }
            Key::Enter => self.activate(),
            Key::Escape | Key::Other => return KeyHandling::Pass,
        }
        KeyHandling::PreventDefault
    }

    /// Run the pending query if its quiet period has ended.
    ///
    /// Returns true if a query ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(query) = self.debouncer.drain_ready(now) else {
            return false;
        };
        match self.engine.search(&query) {
            Ok(results) => self.show(results),
            Err(e) => {
                warn!(error = %e, query, "Search query failed");
                self.show(Vec::new());
            }
        }
        true
    }

    /// A rendered result was clicked.
    pub fn click_result(&mut self, index: usize) {
        if let Some(item) = self.results.get(index) {
            debug!(href = %item.href, "Search result clicked");
            self.view.navigate(&item.href);
        }
    }

    /// The activation icon was clicked.
    pub fn click_icon(&mut self) {
        self.activate();
    }

    fn activate(&mut self) {
        let Some(index) = self.selection.activation_target(self.results.len()) else {
            return;
        };
        let href = &self.results[index].href;
        debug!(href = %href, "Search result activated");
        self.view.navigate(href);
    }

    /// Replace the whole result list.
    fn show(&mut self, results: Vec<ResultItem>) {
        self.results = results;
        self.selection.clear();
        self.view.set_results(&self.results);
        self.state = self.focused_state();
    }

    fn reset(&mut self) {
        self.debouncer.cancel();
        self.view.clear_input();
        self.show(Vec::new());
        self.view.blur_input();
        self.on_blur("");
    }

    fn focused_state(&self) -> WidgetState {
        if self.results.is_empty() {
            WidgetState::FocusedEmpty
        } else {
            WidgetState::FocusedWithResults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SearchDocument;
    use crate::view::HtmlResultsView;
    use pretty_assertions::assert_eq;

    const DEBOUNCE: Duration = Duration::from_millis(100);

    /// Counts calls on top of the in-memory view.
    #[derive(Debug, Default)]
    struct RecordingView {
        inner: HtmlResultsView,
        set_results_calls: usize,
    }

    impl ResultsView for RecordingView {
        fn set_results(&mut self, items: &[ResultItem]) {
            self.set_results_calls += 1;
            self.inner.set_results(items);
        }

        fn set_focused_result(&mut self, index: Option<usize>) {
            self.inner.set_focused_result(index);
        }

        fn set_container_focused(&mut self, focused: bool) {
            self.inner.set_container_focused(focused);
        }

        fn clear_input(&mut self) {
            self.inner.clear_input();
        }

        fn blur_input(&mut self) {
            self.inner.blur_input();
        }

        fn navigate(&mut self, href: &str) {
            self.inner.navigate(href);
        }
    }

    fn options() -> WidgetOptions {
        WidgetOptions {
            query: QueryOptions {
                origin: "http://aparapi.com/".to_owned(),
                ..QueryOptions::default()
            },
            debounce: DEBOUNCE,
        }
    }

    fn widget() -> SearchWidget<RecordingView> {
        SearchWidget::init(&Corpus::builtin(), options(), RecordingView::default()).unwrap()
    }

    /// Type `text` one character at a time, 30ms apart, starting at `start`.
    /// Returns the time of the last keystroke.
    fn type_slowly(
        widget: &mut SearchWidget<RecordingView>,
        text: &str,
        start: Instant,
    ) -> Instant {
        let mut at = start;
        for end in 1..=text.len() {
            at = start + Duration::from_millis(30 * (end as u64 - 1));
            widget.tick(at);
            widget.view_mut().inner.type_text(&text[..end]);
            widget.key_up(Key::Other, &text[..end], at);
        }
        at
    }

    fn search(widget: &mut SearchWidget<RecordingView>, text: &str) {
        let start = Instant::now();
        widget.on_focus();
        widget.view_mut().inner.type_text(text);
        widget.key_up(Key::Other, text, start);
        assert!(widget.tick(start + DEBOUNCE));
    }

    fn labels(widget: &SearchWidget<RecordingView>) -> Vec<&str> {
        widget.results().iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn test_starts_idle() {
        let widget = widget();
        assert_eq!(widget.state(), WidgetState::Idle);
        assert!(widget.results().is_empty());
        assert_eq!(widget.pending_deadline(), None);
    }

    #[test]
    fn test_focus_and_blur_when_empty() {
        let mut widget = widget();

        widget.on_focus();
        assert_eq!(widget.state(), WidgetState::FocusedEmpty);
        assert!(widget.view().inner.container_focused());

        widget.on_blur("");
        assert_eq!(widget.state(), WidgetState::Idle);
        assert!(!widget.view().inner.container_focused());
    }

    #[test]
    fn test_blur_with_text_keeps_state() {
        let mut widget = widget();
        search(&mut widget, "overview");

        widget.on_blur("overview");

        assert_eq!(widget.state(), WidgetState::FocusedWithResults);
        assert!(widget.view().inner.container_focused());
    }

    #[test]
    fn test_fast_typing_runs_one_query_with_final_text() {
        let mut widget = widget();
        widget.on_focus();
        let start = Instant::now();

        let last = type_slowly(&mut widget, "overvi", start);

        // Only the one-character prefix cleared results so far
        assert_eq!(widget.view().set_results_calls, 1);
        assert_eq!(widget.pending_deadline(), Some(last + DEBOUNCE));
        assert!(!widget.tick(last + Duration::from_millis(99)));

        assert!(widget.tick(last + DEBOUNCE));
        assert_eq!(widget.view().set_results_calls, 2);
        assert_eq!(labels(&widget), vec!["index"]);
        assert_eq!(widget.state(), WidgetState::FocusedWithResults);

        assert!(!widget.tick(last + DEBOUNCE * 3));
        assert_eq!(widget.view().set_results_calls, 2);
    }

    #[test]
    fn test_short_query_clears_immediately() {
        let mut widget = widget();
        search(&mut widget, "aparapi");
        assert_eq!(widget.results().len(), 3);

        let now = Instant::now();
        widget.key_up(Key::Other, "a", now);

        assert!(widget.results().is_empty());
        assert!(widget.view().inner.items().is_empty());
        assert_eq!(widget.state(), WidgetState::FocusedEmpty);
        assert_eq!(widget.pending_deadline(), None);
    }

    #[test]
    fn test_short_query_cancels_pending() {
        let mut widget = widget();
        widget.on_focus();
        let now = Instant::now();

        widget.key_up(Key::Other, "ov", now);
        widget.key_up(Key::Other, "o", now + Duration::from_millis(10));

        assert!(!widget.tick(now + DEBOUNCE * 2));
        assert!(widget.results().is_empty());
    }

    #[test]
    fn test_no_hits_is_focused_empty() {
        let mut widget = widget();
        search(&mut widget, "zebra");
        assert!(widget.results().is_empty());
        assert_eq!(widget.state(), WidgetState::FocusedEmpty);
    }

    #[test]
    fn test_navigation_keys_do_not_query() {
        let mut widget = widget();
        widget.on_focus();
        let now = Instant::now();

        for key in [Key::Enter, Key::ArrowUp, Key::ArrowDown] {
            assert_eq!(widget.key_up(key, "overview", now), KeyHandling::Pass);
        }

        assert_eq!(widget.pending_deadline(), None);
        assert!(!widget.tick(now + DEBOUNCE));
    }

    #[test]
    fn test_arrow_selection() {
        let mut widget = widget();
        search(&mut widget, "aparapi");
        assert_eq!(widget.focused_result(), None);

        assert_eq!(widget.key_down(Key::ArrowDown), KeyHandling::PreventDefault);
        assert_eq!(widget.focused_result(), Some(&widget.results()[0]));

        widget.key_down(Key::ArrowDown);
        widget.key_down(Key::ArrowDown);
        widget.key_down(Key::ArrowDown);
        assert_eq!(widget.focused_result(), Some(&widget.results()[2]));
        assert_eq!(
            widget.view().inner.focused_result(),
            Some(&widget.results()[2])
        );

        assert_eq!(widget.key_down(Key::ArrowUp), KeyHandling::PreventDefault);
        assert_eq!(widget.focused_result(), Some(&widget.results()[1]));

        widget.key_down(Key::ArrowUp);
        widget.key_down(Key::ArrowUp);
        assert_eq!(widget.focused_result(), None);
        assert_eq!(widget.view().inner.focused_result(), None);
    }

    #[test]
    fn test_other_keys_pass_on_key_down() {
        let mut widget = widget();
        assert_eq!(widget.key_down(Key::Other), KeyHandling::Pass);
        assert_eq!(widget.key_down(Key::Escape), KeyHandling::Pass);
    }

    #[test]
    fn test_enter_activates_first_when_nothing_focused() {
        let mut widget = widget();
        search(&mut widget, "overview");

        assert_eq!(widget.key_down(Key::Enter), KeyHandling::PreventDefault);

        assert_eq!(
            widget.view().inner.location(),
            Some("http://aparapi.com/index.html")
        );
    }

    #[test]
    fn test_enter_activates_focused() {
        let mut widget = widget();
        search(&mut widget, "aparapi");
        widget.key_down(Key::ArrowDown);
        widget.key_down(Key::ArrowDown);
        let expected = widget.results()[1].href.clone();

        widget.key_down(Key::Enter);

        assert_eq!(widget.view().inner.location(), Some(expected.as_str()));
    }

    #[test]
    fn test_enter_without_results_does_nothing() {
        let mut widget = widget();
        widget.on_focus();
        widget.key_down(Key::Enter);
        assert_eq!(widget.view().inner.location(), None);
    }

    #[test]
    fn test_icon_click_activates() {
        let mut widget = widget();
        search(&mut widget, "about");

        widget.click_icon();

        assert_eq!(
            widget.view().inner.location(),
            Some("http://aparapi.com/introduction/about.html")
        );
    }

    #[test]
    fn test_result_click_navigates_directly() {
        let mut widget = widget();
        search(&mut widget, "aparapi");
        let expected = widget.results()[2].href.clone();

        widget.click_result(2);
        assert_eq!(widget.view().inner.location(), Some(expected.as_str()));

        widget.click_result(10);
        assert_eq!(widget.view().inner.location(), Some(expected.as_str()));
    }

    #[test]
    fn test_escape_resets_everything() {
        let mut widget = widget();
        search(&mut widget, "aparapi");
        widget.key_down(Key::ArrowDown);
        let now = Instant::now();
        widget.key_up(Key::Other, "aparapi gpu", now);

        widget.key_up(Key::Escape, "aparapi gpu", now);

        assert!(widget.results().is_empty());
        assert_eq!(widget.focused_result(), None);
        assert_eq!(widget.state(), WidgetState::Idle);
        assert_eq!(widget.pending_deadline(), None);
        let view = &widget.view().inner;
        assert_eq!(view.input(), "");
        assert!(!view.input_focused());
        assert!(!view.container_focused());
        assert!(view.items().is_empty());
    }

    #[test]
    fn test_escape_from_idle() {
        let mut widget = widget();
        widget.key_up(Key::Escape, "", Instant::now());
        assert_eq!(widget.state(), WidgetState::Idle);
        assert!(widget.results().is_empty());
    }

    #[test]
    fn test_results_capped_at_six() {
        let corpus = Corpus::new(
            (0..9)
                .map(|i| {
                    SearchDocument::new(
                        format!("http://aparapi.com/kernels/k{i}.html"),
                        format!("Kernel {i}"),
                        "",
                    )
                })
                .collect(),
        );
        let mut widget = SearchWidget::init(&corpus, options(), RecordingView::default()).unwrap();

        search(&mut widget, "kernel");

        assert_eq!(widget.results().len(), 6);
        assert_eq!(widget.view().inner.items().len(), 6);
    }

    #[test]
    fn test_new_results_replace_old_and_clear_focus() {
        let mut widget = widget();
        search(&mut widget, "aparapi");
        widget.key_down(Key::ArrowDown);

        search(&mut widget, "about");

        assert_eq!(labels(&widget), vec!["about"]);
        assert_eq!(widget.focused_result(), None);
    }

    #[test]
    fn test_start_disables_on_error() {
        let widget = SearchWidget::start(
            || Err(SearchError::EmptyHref(0)),
            options(),
            HtmlResultsView::new(),
        );
        assert!(widget.is_none());

        let corpus = Corpus::new(vec![
            SearchDocument::new("/a.html", "A", ""),
            SearchDocument::new("/a.html", "B", ""),
        ]);
        let widget = SearchWidget::start(|| Ok(corpus), options(), HtmlResultsView::new());
        assert!(widget.is_none());
    }

    #[test]
    fn test_start_and_teardown() {
        let mut widget =
            SearchWidget::start(|| Ok(Corpus::builtin()), options(), HtmlResultsView::new())
                .unwrap();
        widget.on_focus();

        let view = widget.teardown();
        assert!(view.container_focused());
    }

    #[test]
    fn test_options_from_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("docnav.toml");
        std::fs::write(
            &path,
            r#"
[site]
origin = "http://aparapi.com/"

[search]
debounce_ms = 250
max_results = 2
min_query_len = 3
"#,
        )
        .unwrap();
        let config = Config::load(Some(&path), None).unwrap();

        let options = WidgetOptions::from(&config);
        assert_eq!(options.debounce, Duration::from_millis(250));
        assert_eq!(options.query.origin, "http://aparapi.com/");
        assert_eq!(options.query.max_results, 2);
        assert_eq!(options.query.min_query_len, 3);

        let mut widget =
            SearchWidget::init(&Corpus::builtin(), options, RecordingView::default()).unwrap();
        widget.on_focus();
        let now = Instant::now();

        widget.key_up(Key::Other, "ap", now);
        assert_eq!(widget.pending_deadline(), None);

        widget.key_up(Key::Other, "aparapi", now);
        assert_eq!(widget.pending_deadline(), Some(now + Duration::from_millis(250)));
        assert!(!widget.tick(now + DEBOUNCE));
        assert!(widget.tick(now + Duration::from_millis(250)));
        assert_eq!(widget.results().len(), 2);
    }

    #[test]
    fn test_key_from_dom_name() {
        assert_eq!(Key::from("Escape"), Key::Escape);
        assert_eq!(Key::from("Enter"), Key::Enter);
        assert_eq!(Key::from("ArrowUp"), Key::ArrowUp);
        assert_eq!(Key::from("Down"), Key::ArrowDown);
        assert_eq!(Key::from("a"), Key::Other);
        assert!(Key::Enter.is_navigation());
        assert!(!Key::Escape.is_navigation());
    }
}
