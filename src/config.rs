use crate::search::{Highlighter, SearchConfig, DEFAULT_ARCHIVE, DEFAULT_SIZE_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an extra configuration file
pub const CONFIG_PATH_ENV: &str = "BILL_SEARCH_CONFIG";

/// Prefix for configuration environment variables
pub const ENV_PREFIX: &str = "BILL_SEARCH";

const DEFAULT_CONFIG_PATH: &str = "config/bill-search.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data source configuration
    #[serde(default)]
    pub source: SourceConfig,

    /// Matching configuration
    #[serde(default)]
    pub search: MatchConfig,

    /// Output configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment, reading `extra_file`
    /// (which must exist) after the optional file named by `BILL_SEARCH_CONFIG`
    pub fn load_with(extra_file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut builder = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            // Override with environment variables (prefix: BILL_SEARCH__)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Settings for the search service
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            archive_path: self.source.archive_path.clone(),
            case_insensitive: self.search.case_insensitive,
            size_limit: self.search.size_limit,
            highlighter: Highlighter::new(
                self.display.highlight_start.clone(),
                self.display.highlight_end.clone(),
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Zip archive searched when no path is given on the command line
    #[serde(default = "default_archive_path")]
    pub archive_path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            archive_path: default_archive_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Case-insensitive matching by default
    #[serde(default)]
    pub case_insensitive: bool,

    /// Compiled expression size limit (bytes)
    #[serde(default = "default_size_limit")]
    pub size_limit: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            size_limit: default_size_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Emitted before each highlighted match
    #[serde(default = "default_highlight_start")]
    pub highlight_start: String,

    /// Emitted after each highlighted match
    #[serde(default = "default_highlight_end")]
    pub highlight_end: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            highlight_start: default_highlight_start(),
            highlight_end: default_highlight_end(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

// Default value functions
fn default_archive_path() -> PathBuf {
    PathBuf::from(DEFAULT_ARCHIVE)
}

fn default_size_limit() -> usize {
    DEFAULT_SIZE_LIMIT
}

fn default_highlight_start() -> String {
    crate::search::UNDERLINE.to_string()
}

fn default_highlight_end() -> String {
    crate::search::END_UNDERLINE.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}
