//! Archive data source
//!
//! A [`BillArchive`] wraps a zip file of bill-status XML documents. Turning it
//! into [`BillRecords`] gives a lazy iterator that reads, parses and cleans one
//! entry at a time. The iterator owns the open archive, so the file handle is
//! released as soon as the iterator is dropped, whether or not it ran to the
//! end.

use crate::search::document::{BillDocument, BillRecord};
use crate::search::error::{SearchError, SearchResult, SkipReason};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// Upper bound on the buffer reserved up front for one entry
const MAX_PREALLOCATION: usize = 1 << 20;

/// Counters collected while iterating an archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// Archive entries visited
    pub entries_seen: usize,

    /// Records yielded
    pub records_yielded: usize,

    /// Entries that could not be read from the archive
    pub unreadable: usize,

    /// Entries that were not well-formed XML
    pub malformed: usize,

    /// Entries without billNumber or billType
    pub missing_identifier: usize,

    /// Entries without any summary text
    pub missing_summary: usize,
}

impl ExtractionStats {
    /// Total entries skipped for any reason
    pub fn skipped(&self) -> usize {
        self.unreadable + self.malformed + self.missing_identifier + self.missing_summary
    }

    fn record_skip(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::Unreadable(_) => self.unreadable += 1,
            SkipReason::MalformedXml(_) => self.malformed += 1,
            SkipReason::MissingIdentifier => self.missing_identifier += 1,
            SkipReason::NoSummary => self.missing_summary += 1,
        }
    }
}

/// A zip archive of bill-status documents
#[derive(Debug)]
pub struct BillArchive {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl BillArchive {
    /// Open the archive at `path`
    pub fn open(path: impl AsRef<Path>) -> SearchResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !Self::exists(&path) {
            return Err(SearchError::ArchiveNotFound(path));
        }

        let file = File::open(&path).map_err(|e| SearchError::ArchiveUnreadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let archive = ZipArchive::new(file).map_err(|e| SearchError::ArchiveUnreadable {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), entries = archive.len(), "Opened archive");

        Ok(Self { path, archive })
    }

    /// Whether a file exists at `path`
    pub fn exists(path: impl AsRef<Path>) -> bool {
        path.as_ref().exists()
    }

    /// Location of the archive
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries in the archive, including ones that will be skipped
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// Consume the archive into a lazy record iterator
    pub fn records(self) -> BillRecords {
        BillRecords {
            archive: self.archive,
            next_index: 0,
            stats: ExtractionStats::default(),
        }
    }

    /// Read and parse the entry at `index`
    fn read_entry(archive: &mut ZipArchive<File>, index: usize) -> Result<BillRecord, SkipReason> {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| SkipReason::Unreadable(e.to_string()))?;

        // Declared sizes come from the archive and are only a hint.
        let capacity = usize::try_from(entry.size())
            .map_or(MAX_PREALLOCATION, |size| size.min(MAX_PREALLOCATION));
        let mut bytes = Vec::with_capacity(capacity);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| SkipReason::Unreadable(e.to_string()))?;

        BillDocument::parse(&bytes)?.into_record()
    }
}

/// Lazy, forward-only iterator of records in an archive
#[derive(Debug)]
pub struct BillRecords {
    archive: ZipArchive<File>,
    next_index: usize,
    stats: ExtractionStats,
}

impl BillRecords {
    /// Counters for the entries visited so far
    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }
}

impl Iterator for BillRecords {
    type Item = BillRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_index < self.archive.len() {
            let index = self.next_index;
            self.next_index += 1;
            self.stats.entries_seen += 1;

            match BillArchive::read_entry(&mut self.archive, index) {
                Ok(record) => {
                    self.stats.records_yielded += 1;
                    return Some(record);
                }
                Err(reason) => {
                    debug!(entry = index, reason = %reason, "Skipping archive entry");
                    self.stats.record_skip(&reason);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.archive.len() - self.next_index))
    }
}
