//! docnav CLI - documentation navigation and search.
//!
//! Provides commands for:
//! - `nav`: Render the navigation tree of a site
//! - `search`: Query the search corpus
//! - `results`: Render search results markup

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{NavArgs, ResultsArgs, SearchArgs};
use error::CliError;
use output::Output;

/// docnav - documentation navigation and search.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the navigation fragment.
    Nav(NavArgs),
    /// Print ranked search results.
    Search(SearchArgs),
    /// Print search results markup.
    Results(ResultsArgs),
}

impl Cli {
    fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.config.as_deref();
        match self.command {
            Commands::Nav(args) => args.execute(config, output),
            Commands::Search(args) => args.execute(config, output),
            Commands::Results(args) => args.execute(config, output),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.execute(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
