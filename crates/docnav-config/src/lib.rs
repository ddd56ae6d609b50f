//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.origin`
//! - `site.source_dir`
//! - `site.sitemap`
//! - `search.corpus`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site origin.
    pub origin: Option<String>,
    /// Override page source directory.
    pub source_dir: Option<PathBuf>,
    /// Override site map file.
    pub sitemap: Option<PathBuf>,
    /// Override search corpus file.
    pub corpus: Option<PathBuf>,
    /// Override maximum navigation depth.
    pub max_depth: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Navigation rendering configuration.
    pub navigation: NavigationConfig,
    /// Search configuration (paths are relative strings from TOML).
    search: SearchConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved search configuration (set after loading).
    #[serde(skip)]
    pub search_resolved: SearchConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    origin: Option<String>,
    page_extension: Option<String>,
    source_dir: Option<String>,
    sitemap: Option<String>,
    promote_files: Option<Vec<String>>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug)]
pub struct SiteConfig {
    /// Published site origin, stripped from search hits to build labels.
    pub origin: String,
    /// Extension of published pages.
    pub page_extension: String,
    /// Directory holding page sources, scanned when no site map file is set.
    pub source_dir: PathBuf,
    /// Explicit site map file (YAML or JSON).
    pub sitemap: Option<PathBuf>,
    /// File names moved to the front of their directory when scanning.
    pub promote_files: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost/".to_owned(),
            page_extension: ".html".to_owned(),
            source_dir: PathBuf::from("source"),
            sitemap: None,
            promote_files: vec!["index.html.haml".to_owned()],
        }
    }
}

/// Navigation rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Deepest directory level rendered. `None` renders the whole tree.
    pub max_depth: Option<usize>,
}

/// Raw search configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SearchConfigRaw {
    corpus: Option<String>,
    debounce_ms: Option<u64>,
    max_results: Option<usize>,
    min_query_len: Option<usize>,
}

/// Resolved search configuration.
#[derive(Debug)]
pub struct SearchConfig {
    /// Corpus file (YAML or JSON list of documents). `None` uses the built-in corpus.
    pub corpus: Option<PathBuf>,
    /// Quiet period before a typed query runs.
    pub debounce: Duration,
    /// Maximum number of rendered results.
    pub max_results: usize,
    /// Shortest query that is sent to the index.
    pub min_query_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            corpus: None,
            debounce: Duration::from_millis(100),
            max_results: 6,
            min_query_len: 2,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.origin`").
        field: String,
        /// Error message (e.g., "${`DOCS_ORIGIN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(origin) = &settings.origin {
            self.site_resolved.origin.clone_from(origin);
        }
        if let Some(source_dir) = &settings.source_dir {
            self.site_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(sitemap) = &settings.sitemap {
            self.site_resolved.sitemap = Some(sitemap.clone());
        }
        if let Some(corpus) = &settings.corpus {
            self.search_resolved.corpus = Some(corpus.clone());
        }
        if let Some(max_depth) = settings.max_depth {
            self.navigation.max_depth = Some(max_depth);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            navigation: NavigationConfig::default(),
            search: SearchConfigRaw::default(),
            site_resolved: SiteConfig {
                source_dir: base.join("source"),
                ..SiteConfig::default()
            },
            search_resolved: SearchConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_search()?;
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        let site = &self.site_resolved;
        require_non_empty(&site.origin, "site.origin")?;
        require_http_url(&site.origin, "site.origin")?;

        if !site.page_extension.starts_with('.') || site.page_extension.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "site.page_extension must look like \".html\", got {:?}",
                site.page_extension
            )));
        }

        Ok(())
    }

    /// Validate search configuration.
    fn validate_search(&self) -> Result<(), ConfigError> {
        if self.search_resolved.max_results == 0 {
            return Err(ConfigError::Validation(
                "search.max_results must be greater than 0".to_owned(),
            ));
        }
        if self.search_resolved.min_query_len == 0 {
            return Err(ConfigError::Validation(
                "search.min_query_len must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let expand_opt = |value: &mut Option<String>, field: &str| -> Result<(), ConfigError> {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
            Ok(())
        };

        expand_opt(&mut self.site.origin, "site.origin")?;
        expand_opt(&mut self.site.source_dir, "site.source_dir")?;
        expand_opt(&mut self.site.sitemap, "site.sitemap")?;
        expand_opt(&mut self.search.corpus, "search.corpus")?;

        Ok(())
    }

    /// Resolve raw values against defaults, making paths absolute relative
    /// to the config directory.
    fn resolve(&mut self, config_dir: &Path) {
        let defaults = SiteConfig::default();
        let site = &self.site;

        self.site_resolved = SiteConfig {
            origin: site.origin.clone().unwrap_or(defaults.origin),
            page_extension: site
                .page_extension
                .clone()
                .unwrap_or(defaults.page_extension),
            source_dir: config_dir.join(site.source_dir.as_deref().unwrap_or("source")),
            sitemap: site.sitemap.as_deref().map(|p| config_dir.join(p)),
            promote_files: site
                .promote_files
                .clone()
                .unwrap_or(defaults.promote_files),
        };

        let defaults = SearchConfig::default();
        let search = &self.search;

        self.search_resolved = SearchConfig {
            corpus: search.corpus.as_deref().map(|p| config_dir.join(p)),
            debounce: search
                .debounce_ms
                .map_or(defaults.debounce, Duration::from_millis),
            max_results: search.max_results.unwrap_or(defaults.max_results),
            min_query_len: search.min_query_len.unwrap_or(defaults.min_query_len),
        };
    }
}
