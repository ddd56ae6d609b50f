//! `docnav search` and `docnav results` command implementations.

use std::path::{Path, PathBuf};

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_search::{
    Corpus, HtmlResultsView, QueryOptions, ResultItem, ResultsView, SearchEngine,
};
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Query arguments shared by search commands.
#[derive(Args)]
pub(crate) struct QueryArgs {
    /// Search query.
    pub(crate) query: String,

    /// Search corpus file, YAML or JSON (overrides config; default: built-in corpus).
    #[arg(long)]
    pub(crate) corpus: Option<PathBuf>,

    /// Site origin stripped from result labels (overrides config).
    #[arg(long)]
    pub(crate) origin: Option<String>,
}

impl QueryArgs {
    /// Load configuration and run the query.
    fn run(
        &self,
        config_path: Option<&Path>,
        output: &Output,
    ) -> Result<Vec<ResultItem>, CliError> {
        let cli_settings = CliSettings {
            origin: self.origin.clone(),
            corpus: self.corpus.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let engine = build_engine(&config)?;

        if !engine.accepts(&self.query) {
            output.warning(&format!(
                "Query must be at least {} characters",
                engine.options().min_query_len
            ));
        }
        Ok(engine.search(&self.query)?)
    }
}

/// Arguments for the search command.
#[derive(Args)]
pub(crate) struct SearchArgs {
    #[command(flatten)]
    pub(crate) query: QueryArgs,

    /// Print results as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

impl SearchArgs {
    /// Execute the search command.
    pub(crate) fn execute(
        self,
        config_path: Option<&Path>,
        output: &Output,
    ) -> Result<(), CliError> {
        let results = self.query.run(config_path, output)?;

        if self.json {
            output.result(&serde_json::to_string_pretty(&results)?);
            return Ok(());
        }

        if results.is_empty() {
            output.info("No results");
        }
        for item in &results {
            output.hit(&item.label, &item.href);
        }
        Ok(())
    }
}

/// Arguments for the results command.
#[derive(Args)]
pub(crate) struct ResultsArgs {
    #[command(flatten)]
    pub(crate) query: QueryArgs,

    /// Index of the result to mark focused.
    #[arg(long)]
    pub(crate) focused: Option<usize>,
}

impl ResultsArgs {
    /// Execute the results command.
    pub(crate) fn execute(
        self,
        config_path: Option<&Path>,
        output: &Output,
    ) -> Result<(), CliError> {
        let results = self.query.run(config_path, output)?;
        output.result(&results_markup(&results, self.focused));
        Ok(())
    }
}

/// Render `results` through the in-memory view, marking `focused`.
fn results_markup(results: &[ResultItem], focused: Option<usize>) -> String {
    let mut view = HtmlResultsView::new();
    view.set_results(results);
    view.set_focused_result(focused);
    view.markup()
}

/// Build the search engine from the configured corpus.
fn build_engine(config: &Config) -> Result<SearchEngine, CliError> {
    let search = &config.search_resolved;
    let corpus = match &search.corpus {
        Some(path) => {
            info!(path = %path.display(), "Loading search corpus");
            Corpus::load(path)?
        }
        None => Corpus::builtin(),
    };

    Ok(SearchEngine::new(&corpus, QueryOptions::from(config))?)
}
