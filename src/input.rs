//! CSV loading for both pipeline stages.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use tracing::debug;

use crate::error::{PipelineError, Result};

/// An in-memory table of string cells with normalized header names.
///
/// Every row has exactly `columns.len()` cells; short rows are padded with
/// empty cells and surplus cells are discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Borrows one column as a list of cells.
    pub fn column(&self, column: usize) -> Vec<&str> {
        self.rows.iter().map(|r| r[column].as_str()).collect()
    }

    /// Parses one column as numbers, see [`parse_number`].
    pub fn numeric_column(&self, column: usize) -> NumericColumn {
        let mut values = Vec::with_capacity(self.rows.len());
        let mut non_numeric = 0;
        for row in &self.rows {
            match parse_number(&row[column]) {
                Cell::Number(v) => values.push(Some(v)),
                Cell::Missing => values.push(None),
                Cell::Text => {
                    non_numeric += 1;
                    values.push(None);
                }
            }
        }
        NumericColumn {
            values,
            non_numeric,
        }
    }
}

/// A column of optional numbers, with a count of cells that held text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericColumn {
    pub values: Vec<Option<f64>>,
    pub non_numeric: usize,
}

/// Classification of a single numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Number(f64),
    Missing,
    Text,
}

static MISSING_TOKENS: &[&str] = &["", "na", "n/a", "nan", "-nan", "null", "none", "#n/a"];

/// Parses a numeric cell. Blank cells and the usual missing-value markers are
/// [`Cell::Missing`], as are non-finite numbers; anything else that does not
/// parse is [`Cell::Text`].
pub fn parse_number(value: &str) -> Cell {
    let trimmed = value.trim();
    if MISSING_TOKENS
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
    {
        return Cell::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        Ok(_) => Cell::Missing,
        Err(_) => Cell::Text,
    }
}

/// Decodes a field as UTF-8, or as Latin-1 when it is not valid UTF-8.
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Reads a CSV table from any reader, normalizing headers with `normalize`.
pub fn read_table<R: Read>(reader: R, normalize: fn(&str) -> String) -> csv::Result<RawTable> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let columns: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| normalize(decode_field(h).trim_start_matches('\u{feff}')))
        .collect();

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    while rdr.read_byte_record(&mut record)? {
        let mut row: Vec<String> = record.iter().take(columns.len()).map(decode_field).collect();
        row.resize(columns.len(), String::new());
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

/// Opens and reads a CSV file, see [`read_table`].
pub fn load_table(path: &Path, normalize: fn(&str) -> String) -> Result<RawTable> {
    let file = File::open(path).map_err(|e| PipelineError::ReadInput {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    let table = read_table(file, normalize).map_err(|source| PipelineError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    if table.columns.is_empty() {
        return Err(PipelineError::EmptyInput {
            path: path.to_path_buf(),
        });
    }

    debug!(
        path = %path.display(),
        columns = table.columns.len(),
        rows = table.rows.len(),
        "Loaded CSV table"
    );
    Ok(table)
}
