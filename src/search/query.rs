//! Search query compilation and record matching

use crate::search::document::{BillId, BillRecord};
use crate::search::error::{SearchError, SearchResult};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;
use std::path::PathBuf;

/// Default limit on the size of a compiled expression (10 MiB)
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// How much detail a search reports per matching record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Identifier only; one match per record is enough
    #[default]
    Simple,

    /// Text plus the position of every match
    Detailed,
}

/// A half-open `[start, end)` range of one match, in characters of the
/// record's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Byte offsets of this span within `text`, clamped to its length
    pub fn byte_range(&self, text: &str) -> Range<usize> {
        let byte_at = |chars: usize| {
            text.char_indices()
                .nth(chars)
                .map_or(text.len(), |(offset, _)| offset)
        };
        let start = byte_at(self.start);
        start..byte_at(self.end).max(start)
    }
}

impl From<Range<usize>> for MatchSpan {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Records whose text matched, keyed by identifier
pub type SimpleMatches = HashMap<BillId, String>;

/// Records whose text matched, with every match position
pub type DetailedMatches = HashMap<BillId, (String, Vec<MatchSpan>)>;

/// A compiled search expression
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile `expr` with default options
    pub fn new(expr: &str) -> SearchResult<Self> {
        Self::builder(expr).build()
    }

    pub fn builder(expr: &str) -> MatcherBuilder {
        MatcherBuilder::new(expr)
    }

    /// The expression as written
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the expression matches anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// All non-overlapping, leftmost-first matches in `text`, in order
    pub fn find_spans(&self, text: &str) -> Vec<MatchSpan> {
        let mut spans = Vec::new();
        let (mut byte_pos, mut char_pos) = (0, 0);

        for m in self.regex.find_iter(text) {
            let start = char_pos + text[byte_pos..m.start()].chars().count();
            let end = start + m.as_str().chars().count();
            spans.push(MatchSpan::new(start, end));
            byte_pos = m.end();
            char_pos = end;
        }
        spans
    }

    /// Keep the records whose text matches
    pub fn simple_matches<I>(&self, records: I) -> SimpleMatches
    where
        I: IntoIterator<Item = BillRecord>,
    {
        records
            .into_iter()
            .filter(|record| self.is_match(&record.text))
            .map(|record| (record.id, record.text))
            .collect()
    }

    /// Keep the records with at least one match, along with every match span
    pub fn matches_with_substrings<I>(&self, records: I) -> DetailedMatches
    where
        I: IntoIterator<Item = BillRecord>,
    {
        records
            .into_iter()
            .filter_map(|record| {
                let spans = self.find_spans(&record.text);
                if spans.is_empty() {
                    None
                } else {
                    Some((record.id, (record.text, spans)))
                }
            })
            .collect()
    }
}

/// Builder for [`Matcher`]
#[derive(Debug, Clone)]
pub struct MatcherBuilder {
    expr: String,
    case_insensitive: bool,
    size_limit: usize,
}

impl MatcherBuilder {
    pub fn new(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            case_insensitive: false,
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    pub fn size_limit(mut self, bytes: usize) -> Self {
        self.size_limit = bytes;
        self
    }

    /// Compile the expression; fails before any text is scanned
    pub fn build(self) -> SearchResult<Matcher> {
        let regex = RegexBuilder::new(&self.expr)
            .case_insensitive(self.case_insensitive)
            .size_limit(self.size_limit)
            .build()
            .map_err(SearchError::from)?;
        Ok(Matcher { regex })
    }
}

/// One search request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Regular expression to search summaries for
    pub expr: String,

    /// Reporting detail
    pub mode: SearchMode,

    /// Archive to search instead of the configured one
    pub archive_path: Option<PathBuf>,

    /// Case-insensitive matching; `None` uses the configured default
    pub case_insensitive: Option<bool>,
}

impl SearchQuery {
    /// Create a new simple-mode query
    pub fn new(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            mode: SearchMode::default(),
            archive_path: None,
            case_insensitive: None,
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn detailed(self) -> Self {
        self.with_mode(SearchMode::Detailed)
    }

    pub fn with_archive(mut self, path: impl Into<PathBuf>) -> Self {
        self.archive_path = Some(path.into());
        self
    }

    pub fn with_case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = Some(enabled);
        self
    }
}
