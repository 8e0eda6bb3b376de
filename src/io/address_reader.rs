//! Tabular address input
//!
//! Parses a CSV stream with a header row into `AddressRow`s. The whole input
//! is parsed before any row is handed out, so malformed input fails the run
//! before a single remote call is made.
//!
//! # Headers
//!
//! Header names are normalized the way a symbol header converter does it:
//! lowercased, stripped of punctuation, trimmed, and inner whitespace replaced
//! by `_`. `"Street, City, Zip Code"` yields `street`, `city`, `zip_code`.
//!
//! # Field values
//!
//! Values are kept exactly as parsed. `" Columbus"` stays `" Columbus"`.

use crate::types::{AddressError, AddressRow};
use csv::{ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use std::io::Read;

/// Column holding the street line
pub const STREET_COLUMN: &str = "street";
/// Column holding the city
pub const CITY_COLUMN: &str = "city";
/// Column holding the ZIP code
pub const ZIP_CODE_COLUMN: &str = "zip_code";

/// Fully parsed address input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressTable {
    rows: Vec<AddressRow>,
}

impl AddressTable {
    /// Parse an input stream
    ///
    /// Empty input yields an empty table.
    ///
    /// # Errors
    ///
    /// - `MalformedInput` for invalid UTF-8, an unterminated quoted field,
    ///   rows whose field count differs from the header, or a header missing
    ///   one of the `street`, `city`, `zip_code` columns
    /// - `IoError` if the stream cannot be read
    pub fn from_reader<R: Read>(mut input: R) -> Result<Self, AddressError> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;

        let text = String::from_utf8(bytes)
            .map_err(|e| AddressError::malformed_input(None, &format!("input is not UTF-8: {}", e)))?;

        Self::parse(&text)
    }

    /// Parse CSV text
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        check_quoting(text)?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::None)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();
        let street = column_index(&headers, STREET_COLUMN)?;
        let city = column_index(&headers, CITY_COLUMN)?;
        let zip_code = column_index(&headers, ZIP_CODE_COLUMN)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(AddressRow {
                street: record.get(street).unwrap_or_default().to_string(),
                city: record.get(city).unwrap_or_default().to_string(),
                zip_code: record.get(zip_code).unwrap_or_default().to_string(),
                original: render_record(&record)?,
            });
        }

        Ok(AddressTable { rows })
    }

    pub fn rows(&self) -> &[AddressRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AddressRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Normalize a header name into a symbolic field name
pub fn normalize_header(header: &str) -> String {
    let kept: String = header
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

fn column_index(headers: &[String], column: &str) -> Result<usize, AddressError> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| {
            AddressError::malformed_input(Some(1), &format!("missing required column '{}'", column))
        })
}

/// Position of the scanner relative to the current field
#[derive(Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    /// Inside a quoted field opened on the given line
    Quoted(u64),
    /// Just read a quote inside a quoted field: either an escape or the close
    QuoteInQuoted(u64),
}

/// Reject quoting the csv crate would silently accept
///
/// A quote may only open a field. Inside a quoted field `""` is an escaped
/// quote and the closing quote must be followed by a delimiter, a line break
/// or the end of input. A quoted field left open at the end of input is
/// reported at the line where it was opened.
fn check_quoting(text: &str) -> Result<(), AddressError> {
    let mut line = 1;
    let mut state = QuoteState::FieldStart;

    for c in text.chars() {
        state = match (state, c) {
            (QuoteState::FieldStart, '"') => QuoteState::Quoted(line),
            (QuoteState::FieldStart | QuoteState::Unquoted | QuoteState::QuoteInQuoted(_), ',') => {
                QuoteState::FieldStart
            }
            (QuoteState::FieldStart | QuoteState::Unquoted | QuoteState::QuoteInQuoted(_), '\r') => {
                QuoteState::FieldStart
            }
            (QuoteState::FieldStart | QuoteState::Unquoted | QuoteState::QuoteInQuoted(_), '\n') => {
                line += 1;
                QuoteState::FieldStart
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, _) if c != '"' => QuoteState::Unquoted,
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => {
                return Err(AddressError::malformed_input(
                    Some(line),
                    "quote inside an unquoted field",
                ));
            }
            (QuoteState::Quoted(opened_at), '"') => QuoteState::QuoteInQuoted(opened_at),
            (QuoteState::Quoted(opened_at), '\n') => {
                line += 1;
                QuoteState::Quoted(opened_at)
            }
            (QuoteState::Quoted(opened_at), _) => QuoteState::Quoted(opened_at),
            (QuoteState::QuoteInQuoted(opened_at), '"') => QuoteState::Quoted(opened_at),
            (QuoteState::QuoteInQuoted(_), _) => {
                return Err(AddressError::malformed_input(
                    Some(line),
                    "unexpected character after closing quote",
                ));
            }
        };
    }

    match state {
        QuoteState::Quoted(opened_at) => Err(AddressError::malformed_input(
            Some(opened_at),
            "unterminated quoted field",
        )),
        _ => Ok(()),
    }
}

/// Render a record back to a single CSV line, quoting only where needed
fn render_record(record: &StringRecord) -> Result<String, AddressError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(record)
        .map_err(|e| AddressError::IoError {
            message: format!("Failed to render row: {}", e),
        })?;

    let bytes = writer.into_inner().map_err(|e| AddressError::IoError {
        message: format!("Failed to render row: {}", e),
    })?;

    let line = String::from_utf8(bytes).map_err(|e| AddressError::IoError {
        message: format!("Failed to render row: {}", e),
    })?;

    Ok(line.trim().to_string())
}
