//! Command-line surface
//!
//! Argument parsing and report rendering around [`SearchService`]. The
//! binary only loads configuration, sets up logging and calls [`run`].

mod report;

pub use report::{write_json_report, write_text_report};

use crate::config::Config;
use crate::error::Result;
use crate::search::{SearchMode, SearchQuery, SearchService};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,

    /// Pretty-printed JSON response
    Json,
}

/// Search a collection of Senate resolution bills.
///
/// SEARCH_EXPR is the regular expression used to find matching bills.
///
/// Examples:
///     bill-search "American \w+ Bureau"
///     bill-search --show_text "American \w+ Bureau"
#[derive(Parser, Debug)]
#[command(name = "bill-search", version, verbatim_doc_comment)]
pub struct Cli {
    /// Regular expression used to find matching bills
    #[arg(value_name = "SEARCH_EXPR")]
    pub search_expr: String,

    /// Archive to search, if not the configured default
    #[arg(long = "file_dir", visible_alias = "file-dir", value_name = "PATH")]
    pub file_dir: Option<PathBuf>,

    /// Print each bill's summary with the matching sections highlighted
    #[arg(long = "show_text", visible_alias = "show-text", overrides_with = "no_text")]
    pub show_text: bool,

    /// Print bill identifiers only (default)
    #[arg(long = "no_text", visible_alias = "no-text", overrides_with = "show_text")]
    pub no_text: bool,

    /// Match without regard to letter case
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Additional configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn mode(&self) -> SearchMode {
        if self.show_text {
            SearchMode::Detailed
        } else {
            SearchMode::Simple
        }
    }

    /// Build the search request described by the arguments
    pub fn query(&self) -> SearchQuery {
        let mut query = SearchQuery::new(self.search_expr.clone()).with_mode(self.mode());
        if let Some(path) = &self.file_dir {
            query = query.with_archive(path.clone());
        }
        if self.ignore_case {
            query = query.with_case_insensitive(true);
        }
        query
    }
}

/// Run one search and write the report to `out`
pub fn run<W: Write>(cli: &Cli, config: &Config, out: &mut W) -> Result<()> {
    let service = SearchService::new(config.search_config());
    let response = service.search(&cli.query())?;

    match cli.format {
        OutputFormat::Text => write_text_report(&service, &response, out)?,
        OutputFormat::Json => write_json_report(&response, out)?,
    }
    out.flush()?;
    Ok(())
}
