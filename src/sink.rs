//! Output of flattened reaction records.
//!
//! `CsvSink` writes the spreadsheet-compatible format: comma separated,
//! fields quoted only when they contain a comma, a double quote or a line
//! break, embedded quotes doubled.

use std::borrow::Cow;
use std::io::Write;

use crate::error::ExportResult;
use crate::flatten::FlatRecord;

/// Header line written before the first record.
pub const CSV_HEADER: &str = "#channel,sender,reactor,reaction,timestamp";

/// Destination for flattened records.
pub trait RecordSink {
    fn write_header(&mut self) -> ExportResult<()>;

    fn write_record(&mut self, record: &FlatRecord) -> ExportResult<()>;

    /// Push buffered output through; called once per page.
    fn flush(&mut self) -> ExportResult<()> {
        Ok(())
    }
}

/// Collects records in memory.
impl RecordSink for Vec<FlatRecord> {
    fn write_header(&mut self) -> ExportResult<()> {
        Ok(())
    }

    fn write_record(&mut self, record: &FlatRecord) -> ExportResult<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// CSV writer over any byte stream.
pub struct CsvSink<W: Write> {
    out: W,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_header(&mut self) -> ExportResult<()> {
        writeln!(self.out, "{}", CSV_HEADER)?;
        Ok(())
    }

    fn write_record(&mut self, record: &FlatRecord) -> ExportResult<()> {
        writeln!(
            self.out,
            "{},{},{},{},{}",
            escape_field(&record.channel_name),
            escape_field(&record.sender_name),
            escape_field(&record.reactor_name),
            escape_field(&record.emoji_name),
            record.timestamp
        )?;
        Ok(())
    }

    fn flush(&mut self) -> ExportResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Quote a field if it needs quoting.
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
