//! Record loader for the comma-separated stock table.
//!
//! Each non-empty line is `symbol,name,price,pe_ratio,ev_to_ebit`.
//! Lines that don't parse are skipped; a missing file is an empty table.

use crate::models::Record;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Number of comma-separated fields on a record line.
pub const FIELD_COUNT: usize = 5;

/// Why a single line was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordParseError {
    #[error("expected 5 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// Parse one line into a record.
pub fn parse_line(line: &str) -> Result<Record, RecordParseError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(RecordParseError::FieldCount(fields.len()));
    }

    Ok(Record::new(
        fields[0],
        fields[1],
        parse_number("price", fields[2])?,
        parse_number("P/E ratio", fields[3])?,
        parse_number("EV/EBIT", fields[4])?,
    ))
}

/// Parse a numeric field, rejecting NaN and infinities.
fn parse_number(field: &'static str, raw: &str) -> Result<f64, RecordParseError> {
    let invalid = || RecordParseError::InvalidNumber {
        field,
        value: raw.to_string(),
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Decode one raw line, dropping a trailing carriage return.
fn decode_line(raw: &[u8]) -> Result<&str, RecordParseError> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    std::str::from_utf8(raw).map_err(|_| RecordParseError::InvalidUtf8)
}

/// Read records from any buffered source, keeping only lines that parse.
///
/// Lines are read as raw bytes so a badly encoded line is skipped like
/// any other malformed line instead of aborting the read.
pub fn read_records<R: BufRead>(reader: R) -> io::Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let parsed = decode_line(&raw).and_then(|line| {
            if line.trim().is_empty() {
                Ok(None)
            } else {
                parse_line(line).map(Some)
            }
        });

        match parsed {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => {
                skipped += 1;
                debug!("Skipping line {}: {}", index + 1, e);
            }
        }
    }

    if skipped > 0 {
        debug!("Discarded {} malformed line(s)", skipped);
    }

    Ok(records)
}

/// Load records from a file.
///
/// A file that does not exist yields an empty list. Any other I/O
/// failure is returned as an error.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Data file not found: {} (continuing with no records)", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to open data file: {}", path.display()));
        }
    };

    let records = read_records(BufReader::new(file))
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
