//! Search configuration

use crate::search::highlight::Highlighter;
use crate::search::query::DEFAULT_SIZE_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Archive searched when no path is given
pub const DEFAULT_ARCHIVE: &str = "Data Engineering Deliverable - BILLSTATUS-116-sres.zip";

/// Search service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Path to the zip archive of bill-status documents
    pub archive_path: PathBuf,

    /// Match without regard to case unless a query says otherwise
    pub case_insensitive: bool,

    /// Upper bound on the compiled size of an expression, in bytes
    pub size_limit: usize,

    /// Markers placed around matches in detailed output
    pub highlighter: Highlighter,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            archive_path: PathBuf::from(DEFAULT_ARCHIVE),
            case_insensitive: false,
            size_limit: DEFAULT_SIZE_LIMIT,
            highlighter: Highlighter::default(),
        }
    }
}

/// Builder for SearchConfig
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn archive_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.archive_path = path.into();
        self
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.config.case_insensitive = enabled;
        self
    }

    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.config.size_limit = bytes;
        self
    }

    pub fn highlighter(mut self, highlighter: Highlighter) -> Self {
        self.config.highlighter = highlighter;
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
