//! Concatenating several input files into one source table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{info, info_span};

use roster_model::{CellValue, RowRef, SourceRow, SourceTable};

use crate::csv_table::{CsvTable, read_csv_table};
use crate::error::{IngestError, Result};

/// Index of the `nth` (0-based) column named `name`.
fn nth_position(headers: &[String], name: &str, nth: usize) -> Option<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, header)| *header == name)
        .nth(nth)
        .map(|(idx, _)| idx)
}

/// Row-concatenates tables under the union of their headers.
///
/// Headers keep first-seen order; a table lacking a header contributes blank
/// cells for it. A header repeated within one file stays a separate column,
/// and the k-th occurrence in every file feeds the same merged column. Each
/// row remembers its source index and 1-based data row number.
pub fn merge_tables(tables: Vec<(String, CsvTable)>) -> SourceTable {
    let mut merged = SourceTable::default();
    for (_, table) in &tables {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for header in &table.headers {
            let occurrence = seen.entry(header.as_str()).or_insert(0);
            *occurrence += 1;
            let present = merged.headers.iter().filter(|h| *h == header).count();
            if present < *occurrence {
                merged.headers.push(header.clone());
            }
        }
    }
    for (source_index, (name, table)) in tables.into_iter().enumerate() {
        let positions: Vec<Option<usize>> = merged
            .headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                let nth = merged.headers[..column]
                    .iter()
                    .filter(|h| *h == header)
                    .count();
                nth_position(&table.headers, header, nth)
            })
            .collect();
        for (row_idx, row) in table.rows.into_iter().enumerate() {
            let cells = positions
                .iter()
                .map(|position| {
                    position
                        .and_then(|idx| row.get(idx))
                        .map_or(CellValue::Missing, |value| CellValue::from_text(value))
                })
                .collect();
            merged.rows.push(SourceRow {
                origin: RowRef::new(source_index, row_idx + 1),
                cells,
            });
        }
        merged.sources.push(name);
    }
    merged
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

/// Reads and merges every input file.
pub fn read_sources(paths: &[PathBuf]) -> Result<SourceTable> {
    let span = info_span!("ingest", files = paths.len());
    let _guard = span.enter();
    if paths.is_empty() {
        return Err(IngestError::NoInputs);
    }
    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.is_file() {
            return Err(IngestError::MissingFile(path.clone()));
        }
        info!(path = %path.display(), "reading input file");
        let table = read_csv_table(path)?;
        info!(rows = table.rows.len(), columns = table.headers.len(), "read input file");
        tables.push((display_name(path), table));
    }
    if tables.len() > 1 {
        info!(files = tables.len(), "merging input files");
    }
    let merged = merge_tables(tables);
    info!(rows = merged.row_count(), "total rows after merge");
    Ok(merged)
}
