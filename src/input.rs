use crate::error::InputError;
use crate::grammar::Grammar;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Column holding the benchmark case name.
pub const NAME_COLUMN: &str = "name";

/// Unit of a throughput measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    OpsPerSec,
    ItemsPerSec,
}

impl Unit {
    pub fn label(&self) -> &'static str {
        match self {
            Unit::OpsPerSec => "ops/s",
            Unit::ItemsPerSec => "items/s",
        }
    }
}

/// One row of benchmark output
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub case_name: String,
    /// `None` when the runner reported something other than a finite number
    pub measured_value: Option<f64>,
    pub unit: Unit,
}

/// Coerce a throughput cell to a number. Empty cells, error strings, NaN and
/// infinities all count as missing.
pub fn parse_measurement(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Load every row of a benchmark results file.
pub fn load_records(path: &Path, grammar: Grammar) -> Result<Vec<RawRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open benchmark results {}", path.display()))?;
    read_records(file, &path.display().to_string(), grammar)
}

/// Read rows from any CSV source. Both required columns are checked before
/// the first row is read.
pub fn read_records<R: Read>(reader: R, source: &str, grammar: Grammar) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", source))?
        .clone();

    let value_column = grammar.throughput_column();
    let name_idx = column_index(&headers, NAME_COLUMN, source)?;
    let value_idx = column_index(&headers, value_column, source)?;

    let unit = grammar.unit();
    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read row {} of {}", row + 1, source))?;

        let case_name = record.get(name_idx).ok_or_else(|| InputError::ShortRow {
            path: source.to_string(),
            row: row + 1,
            column: NAME_COLUMN,
        })?;

        // Failed runs may leave trailing cells off entirely.
        let measured_value = record.get(value_idx).and_then(parse_measurement);

        records.push(RawRecord {
            case_name: case_name.to_string(),
            measured_value,
            unit,
        });
    }

    debug!(source, rows = records.len(), column = value_column, "loaded benchmark rows");
    Ok(records)
}

fn column_index(
    headers: &csv::StringRecord,
    column: &'static str,
    source: &str,
) -> Result<usize, InputError> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| InputError::MissingColumn {
            path: source.to_string(),
            column,
        })
}
