//! Common test utilities for archive-based tests
//!
//! Builds small bill-status zip archives on disk so the search pipeline can
//! be exercised end to end.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// A bill-status document with one summary
pub fn bill_xml(bill_type: &str, number: &str, summary_html: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<billStatus>
  <bill>
    <billNumber>{number}</billNumber>
    <updateDate>2019-01-30T18:25:41Z</updateDate>
    <billType>{bill_type}</billType>
    <summaries>
      <billSummaries>
        <item>
          <name>Introduced in Senate</name>
          <actionDate>2019-01-29</actionDate>
          <text><![CDATA[{summary_html}]]></text>
        </item>
      </billSummaries>
    </summaries>
    <title>Resolution {number}</title>
  </bill>
</billStatus>"#
    )
}

/// A bill-status document with no summaries
pub fn bill_without_summary(bill_type: &str, number: &str) -> String {
    format!(
        "<billStatus><bill><billNumber>{number}</billNumber><billType>{bill_type}</billType>\
         <summaries><billSummaries/></summaries></bill></billStatus>"
    )
}

/// Collects entries and writes them to a zip archive
#[derive(Default)]
pub struct ArchiveBuilder {
    directories: Vec<String>,
    entries: Vec<(String, Vec<u8>)>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bill(self, bill_type: &str, number: &str, summary_html: &str) -> Self {
        let name = format!("BILLSTATUS-116{}{}.xml", bill_type.to_lowercase(), number);
        self.entry(&name, bill_xml(bill_type, number, summary_html))
    }

    pub fn entry(mut self, name: &str, body: impl Into<Vec<u8>>) -> Self {
        self.entries.push((name.to_string(), body.into()));
        self
    }

    pub fn directory(mut self, name: &str) -> Self {
        self.directories.push(name.to_string());
        self
    }

    pub fn write(self, dir: &TempDir, file_name: &str) -> PathBuf {
        let path = dir.path().join(file_name);
        let mut writer = ZipWriter::new(File::create(&path).unwrap());

        for name in &self.directories {
            writer
                .add_directory(name.as_str(), SimpleFileOptions::default())
                .unwrap();
        }
        for (name, body) in &self.entries {
            writer
                .start_file(name.as_str(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body).unwrap();
        }
        writer.finish().unwrap();
        path
    }
}

/// Summary text of SRES 39 after cleaning
pub const FARM_BUREAU_SUMMARY: &str =
    "Recognizes the American Farm Bureau Federation on its 100th anniversary & its service to farmers.";

/// A small Senate-resolution archive.
///
/// Eight entries yield five records. The directory entry and one truncated
/// document are malformed, and one bill has no summary.
pub fn sample_archive(dir: &TempDir) -> PathBuf {
    ArchiveBuilder::new()
        .directory("BILLSTATUS-116-sres/")
        .bill(
            "SRES",
            "100",
            "<p>Designates the week of March 3 through March 9, 2019, as National Farm Safety Week.</p>",
        )
        .bill(
            "SRES",
            "39",
            "<p>Recognizes the American Farm Bureau Federation on its 100th anniversary &amp; its service to farmers.</p>",
        )
        .bill(
            "SRES",
            "7",
            "<p>Honors the American Legion on its centennial.</p>\n<p>Second paragraph.</p>",
        )
        .entry("BILLSTATUS-116sres8.xml", "<billStatus><bill><billNumber>8</billNumber>")
        .entry("BILLSTATUS-116sres9.xml", bill_without_summary("SRES", "9"))
        .bill(
            "SRES",
            "12",
            "<p>Calling on the Census Bureau to count every person in the American census.</p>",
        )
        .bill(
            "SRES",
            "250",
            "<p>Expresses support for the designation of National Caf&eacute; Day.</p>",
        )
        .write(dir, "BILLSTATUS-116-sres.zip")
}
