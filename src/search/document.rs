//! Bill documents and the records extracted from them

use crate::search::clean::clean_text;
use crate::search::error::SkipReason;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

const BILL_NUMBER: &[u8] = b"billNumber";
const BILL_TYPE: &[u8] = b"billType";
const BILL_SUMMARIES: &[u8] = b"billSummaries";
const SUMMARY_ITEM: &[u8] = b"item";
const SUMMARY_TEXT: &[u8] = b"text";

/// Bill identifier, displayed as `"<TYPE> <NUMBER>"` (e.g. `SRES 39`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BillId {
    /// Bill type (SRES, HR, S, ...)
    pub bill_type: String,

    /// Bill number as written in the document
    pub bill_number: String,
}

impl BillId {
    pub fn new(bill_type: impl Into<String>, bill_number: impl Into<String>) -> Self {
        Self {
            bill_type: bill_type.into(),
            bill_number: bill_number.into(),
        }
    }

    /// Numeric value of the bill number, if it is one
    pub fn number(&self) -> Option<u64> {
        self.bill_number.parse().ok()
    }
}

impl fmt::Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.bill_type, self.bill_number)
    }
}

impl Serialize for BillId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Orders by bill number ascending. Non-numeric numbers sort after numeric
/// ones; ties fall back to type, then to the raw number text.
impl Ord for BillId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.number(), other.number()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| self.bill_type.cmp(&other.bill_type))
        .then_with(|| self.bill_number.cmp(&other.bill_number))
    }
}

impl PartialOrd for BillId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A searchable record: a bill identifier plus its first cleaned summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillRecord {
    pub id: BillId,
    pub text: String,
}

impl BillRecord {
    pub fn new(id: BillId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// The fields of one bill-status document that the search cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillDocument {
    /// Text of the first `billNumber` element
    pub bill_number: Option<String>,

    /// Text of the first `billType` element
    pub bill_type: Option<String>,

    /// Cleaned `billSummaries/item/text` values, in document order
    pub summaries: Vec<String>,
}

impl BillDocument {
    /// Parse a bill-status XML document.
    ///
    /// The whole document is read so that malformed markup anywhere in it is
    /// rejected, not only in the parts that are extracted.
    pub fn parse(xml: &[u8]) -> Result<Self, SkipReason> {
        let xml = std::str::from_utf8(xml)
            .map_err(|e| SkipReason::MalformedXml(format!("invalid utf-8: {}", e)))?;
        BillParser::default().run(xml)
    }

    /// Turn the document into a record, using only the first summary
    pub fn into_record(self) -> Result<BillRecord, SkipReason> {
        let (bill_type, bill_number) = match (self.bill_type, self.bill_number) {
            (Some(t), Some(n)) => (t, n),
            _ => return Err(SkipReason::MissingIdentifier),
        };

        let text = self
            .summaries
            .into_iter()
            .next()
            .ok_or(SkipReason::NoSummary)?;

        Ok(BillRecord::new(BillId::new(bill_type, bill_number), text))
    }
}

/// What an open element's text should be stored as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    BillNumber,
    BillType,
    /// Summary text inside the n-th `billSummaries` element
    Summary(usize),
}

#[derive(Debug)]
struct Frame {
    name: Vec<u8>,
    /// Set once a child element opens; later character data is tail text
    has_child: bool,
    /// Ordinal when this element is a `billSummaries`
    summaries_ordinal: Option<usize>,
    capture: Option<Capture>,
    text: String,
}

#[derive(Debug, Default)]
struct BillParser {
    stack: Vec<Frame>,
    root_seen: bool,
    root_closed: bool,
    number_claimed: bool,
    type_claimed: bool,
    summaries_seen: usize,
    bill_number: Option<String>,
    bill_type: Option<String>,
    summaries: Vec<(usize, String)>,
}

impl BillParser {
    fn run(mut self, xml: &str) -> Result<BillDocument, SkipReason> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        loop {
            match reader.read_event()? {
                Event::Start(e) => self.open(&e)?,
                Event::Empty(e) => {
                    self.open(&e)?;
                    self.close(e.name().as_ref())?;
                }
                Event::End(e) => self.close(e.name().as_ref())?,
                Event::Text(t) => {
                    let text = t.unescape()?;
                    self.character_data(&text)?;
                }
                Event::CData(c) => {
                    let text = std::str::from_utf8(&c)
                        .map_err(|e| SkipReason::MalformedXml(format!("invalid utf-8: {}", e)))?;
                    self.character_data(text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !self.root_seen {
            return Err(SkipReason::MalformedXml("no element found".into()));
        }
        if !self.stack.is_empty() {
            return Err(SkipReason::MalformedXml("unclosed element".into()));
        }

        let mut summaries = self.summaries;
        // Group by billSummaries element, keeping item order inside each group.
        summaries.sort_by_key(|(ordinal, _)| *ordinal);

        Ok(BillDocument {
            bill_number: self.bill_number,
            bill_type: self.bill_type,
            summaries: summaries.into_iter().map(|(_, raw)| clean_text(&raw)).collect(),
        })
    }

    fn open(&mut self, element: &BytesStart<'_>) -> Result<(), SkipReason> {
        if self.root_closed {
            return Err(SkipReason::MalformedXml(
                "junk after document element".into(),
            ));
        }
        self.root_seen = true;

        let mut attributes = element.attributes();
        attributes.with_checks(true);
        for attribute in attributes {
            let attribute = attribute
                .map_err(|e| SkipReason::MalformedXml(format!("bad attribute: {}", e)))?;
            attribute.unescape_value()?;
        }

        let name = element.name().as_ref().to_vec();
        let capture = self.capture_for(&name);

        let summaries_ordinal = if name == BILL_SUMMARIES {
            self.summaries_seen += 1;
            Some(self.summaries_seen - 1)
        } else {
            None
        };

        if let Some(parent) = self.stack.last_mut() {
            parent.has_child = true;
        }

        self.stack.push(Frame {
            name,
            has_child: false,
            summaries_ordinal,
            capture,
            text: String::new(),
        });
        Ok(())
    }

    fn capture_for(&mut self, name: &[u8]) -> Option<Capture> {
        if name == BILL_NUMBER && !self.number_claimed {
            self.number_claimed = true;
            return Some(Capture::BillNumber);
        }
        if name == BILL_TYPE && !self.type_claimed {
            self.type_claimed = true;
            return Some(Capture::BillType);
        }
        if name == SUMMARY_TEXT {
            if let [.., grandparent, parent] = self.stack.as_slice() {
                if parent.name == SUMMARY_ITEM {
                    return grandparent.summaries_ordinal.map(Capture::Summary);
                }
            }
        }
        None
    }

    fn close(&mut self, name: &[u8]) -> Result<(), SkipReason> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| SkipReason::MalformedXml("unmatched end tag".into()))?;

        if frame.name != name {
            return Err(SkipReason::MalformedXml(format!(
                "mismatched tag: expected </{}>",
                String::from_utf8_lossy(&frame.name)
            )));
        }

        match frame.capture {
            Some(Capture::BillNumber) => self.bill_number = Some(frame.text.trim().to_string()),
            Some(Capture::BillType) => self.bill_type = Some(frame.text.trim().to_string()),
            Some(Capture::Summary(ordinal)) => self.summaries.push((ordinal, frame.text)),
            None => {}
        }

        if self.stack.is_empty() {
            self.root_closed = true;
        }
        Ok(())
    }

    fn character_data(&mut self, text: &str) -> Result<(), SkipReason> {
        match self.stack.last_mut() {
            Some(frame) => {
                if frame.capture.is_some() && !frame.has_child {
                    frame.text.push_str(text);
                }
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(SkipReason::MalformedXml(
                "text outside of document element".into(),
            )),
        }
    }
}
