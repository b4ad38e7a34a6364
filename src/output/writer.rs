//! Record writers
//!
//! CSV output is streamed page by page. JSON output is held in memory until
//! close, since the whole run becomes one array.

use crate::error::{Error, Result};
use crate::types::{JsonValue, OutputFormat, Record};
use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Destination for fetched records
pub trait RecordSink {
    /// Write one page of records, in order
    fn write_page(&mut self, records: Vec<Record>) -> Result<()>;

    /// Flush everything and release the underlying writer
    fn close(self: Box<Self>) -> Result<usize>;
}

/// Create the output file and wrap it in the sink for `format`.
///
/// The file is truncated if it already exists.
pub fn open_sink(
    path: impl AsRef<Path>,
    format: OutputFormat,
    pretty: bool,
) -> Result<Box<dyn RecordSink>> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);

    Ok(match format {
        OutputFormat::Csv => Box::new(CsvSink::new(writer)),
        OutputFormat::Json => Box::new(JsonSink::new(writer).pretty(pretty)),
    })
}

// ============================================================================
// CSV
// ============================================================================

/// CSV writer with every field quoted.
///
/// The header is taken from the keys of the first record written.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
    rows_written: usize,
}

impl<W: Write> CsvSink<W> {
    /// Create a new CSV sink
    pub fn new(inner: W) -> Self {
        let writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .flexible(true)
            .from_writer(inner);

        Self {
            writer,
            header_written: false,
            rows_written: 0,
        }
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_page(&mut self, records: Vec<Record>) -> Result<()> {
        let Some(first) = records.first() else {
            return Ok(());
        };

        if !self.header_written {
            self.writer.write_record(first.keys())?;
            self.header_written = true;
        }

        for record in &records {
            self.writer.write_record(record.values().map(render_field))?;
        }

        self.rows_written += records.len();
        Ok(())
    }

    fn close(mut self: Box<Self>) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }
}

/// Text of one CSV field.
///
/// Strings are written raw and null as an empty field. Everything else uses
/// its compact JSON form.
pub fn render_field(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// JSON
// ============================================================================

/// JSON writer producing a single array of records
pub struct JsonSink<W: Write> {
    inner: W,
    records: Vec<Record>,
    pretty: bool,
}

impl<W: Write> JsonSink<W> {
    /// Create a new JSON sink writing compact output
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            records: Vec::new(),
            pretty: false,
        }
    }

    /// Indent the output
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Write the array and return the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.write_array()?;
        Ok(self.inner)
    }

    fn write_array(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.inner, &self.records)?;
        } else {
            serde_json::to_writer(&mut self.inner, &self.records)?;
        }
        self.inner.flush()?;
        Ok(())
    }
}

impl<W: Write> RecordSink for JsonSink<W> {
    fn write_page(&mut self, records: Vec<Record>) -> Result<()> {
        self.records.extend(records);
        Ok(())
    }

    fn close(mut self: Box<Self>) -> Result<usize> {
        self.write_array()?;
        Ok(self.records.len())
    }
}
