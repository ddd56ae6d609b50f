//! `docnav nav` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_nav::{
    Depth, DirectoryNode, Scanner, SiteNode, Sitemap, TreeRenderer, parse_site_map,
};
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Site map file, YAML or JSON (overrides config; default: scan source directory).
    #[arg(long)]
    pub(crate) sitemap: Option<PathBuf>,

    /// Page source directory to scan (overrides config).
    #[arg(short, long)]
    pub(crate) source_dir: Option<PathBuf>,

    /// Published path of the page being viewed, e.g. `introduction/about.html`.
    #[arg(long)]
    pub(crate) current: Option<String>,

    /// Maximum directory nesting to render (overrides config).
    #[arg(short = 'd', long)]
    pub(crate) max_depth: Option<usize>,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the site map cannot be read.
    pub(crate) fn execute(
        self,
        config_path: Option<&Path>,
        output: &Output,
    ) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            sitemap: self.sitemap.clone(),
            max_depth: self.max_depth,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let html = self.render(&config)?;
        if html.is_empty() {
            output.warning("Navigation is empty");
        }
        output.result(&html);
        Ok(())
    }

    /// Load the site map and render the navigation fragment.
    fn render(&self, config: &Config) -> Result<String, CliError> {
        let site = &config.site_resolved;
        let root = load_site_map(config)?;

        let mut sitemap = Sitemap::from_sources(&root, &site.source_dir, &site.page_extension);
        sitemap.set_current(self.current.as_deref());
        info!(pages = sitemap.len(), "Resolved site pages");

        let depth = Depth::from(config.navigation.max_depth);
        Ok(TreeRenderer::new(&sitemap).render(&SiteNode::from(root), depth))
    }
}

/// Read the configured site map file, or scan the source directory.
fn load_site_map(config: &Config) -> Result<DirectoryNode, CliError> {
    let site = &config.site_resolved;
    if let Some(path) = &site.sitemap {
        info!(path = %path.display(), "Reading site map");
        let text = std::fs::read_to_string(path)?;
        return Ok(parse_site_map(&text)?);
    }

    info!(source_dir = %site.source_dir.display(), "Scanning source directory");
    let scanner = Scanner::new(site.source_dir.clone(), site.promote_files.clone());
    Ok(scanner.scan()?)
}
