use crate::error::Result;
use crate::search::{SearchMode, SearchResponse, SearchService};
use std::io::Write;

/// Write the human-readable report.
///
/// Hits are already sorted by bill number. In detailed mode each identifier
/// is followed by its highlighted summary and a blank line.
pub fn write_text_report<W: Write>(
    service: &SearchService,
    response: &SearchResponse,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Searching through {}\n", response.archive.display())?;
    writeln!(out, "Number of bills that match: {}\n", response.total_hits)?;

    for hit in &response.hits {
        writeln!(out, "{}", hit.id)?;
        if response.mode == SearchMode::Detailed {
            writeln!(out, "{}", service.highlight(hit))?;
        }
    }
    Ok(())
}

/// Write the response as pretty-printed JSON
pub fn write_json_report<W: Write>(response: &SearchResponse, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, response)?;
    writeln!(out)?;
    Ok(())
}
