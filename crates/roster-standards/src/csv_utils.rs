//! Shared CSV utilities for loading lookup files.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, StandardsError};

/// One data row keyed by header; values trimmed.
pub type CsvRow = BTreeMap<String, String>;

/// Read a CSV file into a vector of row maps.
///
/// Handles BOM characters in the header and trims whitespace from values.
/// Returns the header names alongside the rows.
pub fn read_csv_rows(path: &Path) -> Result<(Vec<String>, Vec<CsvRow>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| StandardsError::csv(path, source))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| StandardsError::csv(path, source))?
        .iter()
        .map(|header| header.trim().trim_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| StandardsError::csv(path, source))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers.get(idx).map_or("", String::as_str).to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok((headers, rows))
}

/// Fails unless every column in `required` is present.
pub fn require_columns(path: &Path, headers: &[String], required: &[&str]) -> Result<()> {
    for column in required {
        if !headers.iter().any(|header| header == column) {
            return Err(StandardsError::MissingColumn {
                path: path.to_path_buf(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

/// Get a field value from a row, returning empty string if not present.
pub fn get_field<'a>(row: &'a CsvRow, key: &str) -> &'a str {
    row.get(key).map_or("", String::as_str)
}
