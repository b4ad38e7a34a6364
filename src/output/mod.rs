//! Output module
//!
//! Writes fetched records to the output file.
//!
//! # Overview
//!
//! - `CsvSink` - header from the first record, one fully quoted row per record
//! - `JsonSink` - one JSON array holding every record of the run

mod writer;

pub use writer::{open_sink, render_field, CsvSink, JsonSink, RecordSink};
