//! Main search service implementation

use crate::search::config::SearchConfig;
use crate::search::document::BillId;
use crate::search::error::SearchResult;
use crate::search::query::{MatchSpan, Matcher, SearchMode, SearchQuery};
use crate::search::source::{BillArchive, ExtractionStats};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// A single search result hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Bill identifier
    pub id: BillId,

    /// Cleaned summary text
    pub text: String,

    /// Match positions (detailed mode only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<MatchSpan>,
}

/// Search response with results and metadata
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Archive that was searched
    pub archive: PathBuf,

    /// Expression that was executed
    pub expr: String,

    /// Reporting detail
    pub mode: SearchMode,

    /// Matching records, sorted by bill number
    pub hits: Vec<SearchHit>,

    /// Number of matching records
    pub total_hits: usize,

    /// What happened to each archive entry
    pub stats: ExtractionStats,

    /// Search execution time in milliseconds
    pub search_time_ms: u64,
}

/// Main search service
#[derive(Debug, Clone, Default)]
pub struct SearchService {
    config: SearchConfig,
}

impl SearchService {
    /// Create a new search service
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Archive a query will read: its own override or the configured one
    pub fn archive_path<'a>(&'a self, query: &'a SearchQuery) -> &'a Path {
        query
            .archive_path
            .as_deref()
            .unwrap_or(self.config.archive_path.as_path())
    }

    /// Compile the query's expression with the configured options
    pub fn matcher(&self, query: &SearchQuery) -> SearchResult<Matcher> {
        Matcher::builder(&query.expr)
            .case_insensitive(query.case_insensitive.unwrap_or(self.config.case_insensitive))
            .size_limit(self.config.size_limit)
            .build()
    }

    /// Search the archive for records whose summary matches the query.
    ///
    /// The archive is opened and the expression compiled before any entry is
    /// read, so neither failure leaves a partial result behind.
    pub fn search(&self, query: &SearchQuery) -> SearchResult<SearchResponse> {
        let start_time = Instant::now();

        let archive = BillArchive::open(self.archive_path(query))?;
        let archive_path = archive.path().to_path_buf();
        let matcher = self.matcher(query)?;

        let mut records = archive.records();
        let mut hits: Vec<SearchHit> = match query.mode {
            SearchMode::Simple => matcher
                .simple_matches(&mut records)
                .into_iter()
                .map(|(id, text)| SearchHit {
                    id,
                    text,
                    spans: Vec::new(),
                })
                .collect(),
            SearchMode::Detailed => matcher
                .matches_with_substrings(&mut records)
                .into_iter()
                .map(|(id, (text, spans))| SearchHit { id, text, spans })
                .collect(),
        };
        let stats = records.stats();
        drop(records);

        hits.sort_by(|a, b| a.id.cmp(&b.id));

        let search_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            archive = %archive_path.display(),
            expr = %query.expr,
            mode = ?query.mode,
            hits = hits.len(),
            entries = stats.entries_seen,
            skipped = stats.skipped(),
            search_time_ms,
            "Search completed"
        );

        Ok(SearchResponse {
            archive: archive_path,
            expr: query.expr.clone(),
            mode: query.mode,
            total_hits: hits.len(),
            hits,
            stats,
            search_time_ms,
        })
    }

    /// Render a hit's text with its matches highlighted
    pub fn highlight(&self, hit: &SearchHit) -> String {
        self.config.highlighter.display(&hit.text, &hit.spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::error::SearchError;
    use tempfile::TempDir;

    #[test]
    fn test_search_missing_archive() {
        let dir = TempDir::new().unwrap();
        let service = SearchService::default();
        let query = SearchQuery::new("anything").with_archive(dir.path().join("nope.zip"));

        let err = service.search(&query).unwrap_err();
        assert!(matches!(err, SearchError::ArchiveNotFound(_)));
    }

    #[test]
    fn test_query_archive_overrides_config() {
        let service = SearchService::new(SearchConfig {
            archive_path: PathBuf::from("configured.zip"),
            ..Default::default()
        });

        let plain = SearchQuery::new("x");
        assert_eq!(service.archive_path(&plain), Path::new("configured.zip"));

        let overridden = SearchQuery::new("x").with_archive("override.zip");
        assert_eq!(service.archive_path(&overridden), Path::new("override.zip"));
    }

    #[test]
    fn test_query_case_flag_overrides_config() {
        let service = SearchService::new(SearchConfig {
            case_insensitive: true,
            ..Default::default()
        });

        assert!(service.matcher(&SearchQuery::new("abc")).unwrap().is_match("ABC"));
        assert!(!service
            .matcher(&SearchQuery::new("abc").with_case_insensitive(false))
            .unwrap()
            .is_match("ABC"));
    }
}
