//! Regular-expression search over zipped bill-status archives
//!
//! The search pipeline has four stages:
//!
//! - **Extraction**: [`BillArchive`] iterates the XML entries of a zip file and
//!   yields one [`BillRecord`] per well-formed bill that has a summary
//! - **Cleaning**: summary HTML is stripped of tags and entities on the way out
//! - **Matching**: a compiled [`Matcher`] filters the records, optionally
//!   reporting every [`MatchSpan`]
//! - **Highlighting**: [`Highlighter`] wraps each span in terminal markers
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │           Search Service API                     │
//! ├─────────────────────────────────────────────────┤
//! │  - search()        - highlight()                │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │           Matcher                                │
//! ├─────────────────────────────────────────────────┤
//! │  - simple_matches()                             │
//! │  - matches_with_substrings()                    │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │           Bill Archive (lazy records)            │
//! ├─────────────────────────────────────────────────┤
//! │  - zip entry → XML parse → clean_text()         │
//! │  - malformed / summary-less entries skipped     │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use bill_search::search::{SearchConfig, SearchQuery, SearchService};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let search = SearchService::new(SearchConfig::default());
//!
//!     let query = SearchQuery::new(r"American \w+ Bureau").detailed();
//!     let results = search.search(&query)?;
//!     println!("Found {} bills", results.total_hits);
//!
//!     for hit in &results.hits {
//!         println!("{}", hit.id);
//!         print!("{}", search.highlight(hit));
//!     }
//!
//!     Ok(())
//! }
//! ```

mod clean;
mod config;
mod document;
mod error;
mod highlight;
mod query;
mod service;
mod source;

pub use clean::clean_text;
pub use config::{SearchConfig, SearchConfigBuilder, DEFAULT_ARCHIVE};
pub use document::{BillDocument, BillId, BillRecord};
pub use error::{SearchError, SearchResult, SkipReason};
pub use highlight::{display_matching_substring, Highlighter, END_UNDERLINE, UNDERLINE};
pub use query::{
    DetailedMatches, MatchSpan, Matcher, MatcherBuilder, SearchMode, SearchQuery, SimpleMatches,
    DEFAULT_SIZE_LIMIT,
};
pub use service::{SearchHit, SearchResponse, SearchService};
pub use source::{BillArchive, BillRecords, ExtractionStats};
