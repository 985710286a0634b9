//! Generic tabular input: ordered named columns, ordered rows of cells.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single input cell as delivered by a tabular reader.
///
/// CSV readers only ever produce `Text` and `Missing`; spreadsheet readers may
/// hand over native numbers (day serials) and date/time values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
    Missing,
}

impl CellValue {
    /// Builds a cell from raw reader text, mapping blank text to `Missing`.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim().trim_matches('\u{feff}');
        if trimmed.is_empty() {
            Self::Missing
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(value) => value.is_nan(),
            Self::DateTime(_) => false,
        }
    }

    /// Renders the cell as text for text-oriented fields (names, ids, phones).
    ///
    /// Whole numbers render without a fractional part so that a numeric
    /// identity cell keeps its digits intact.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Text(text) => Some(text.clone()),
            Self::Number(value) if value.is_nan() => None,
            Self::Number(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    Some(format!("{}", *value as i64))
                } else {
                    Some(value.to_string())
                }
            }
            Self::DateTime(value) => Some(value.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

/// Position of a row in the merged input: which source and which data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowRef {
    /// Index into [`SourceTable::sources`].
    pub source_index: usize,
    /// 1-based data row number within that source (header excluded).
    pub row_number: usize,
}

impl RowRef {
    pub fn new(source_index: usize, row_number: usize) -> Self {
        Self {
            source_index,
            row_number,
        }
    }
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{}", self.source_index, self.row_number)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub origin: RowRef,
    pub cells: Vec<CellValue>,
}

impl SourceRow {
    pub fn cell(&self, column: usize) -> &CellValue {
        const MISSING: &CellValue = &CellValue::Missing;
        self.cells.get(column).unwrap_or(MISSING)
    }
}

/// One or more concatenated input files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTable {
    /// Display names of the sources, indexed by [`RowRef::source_index`].
    pub sources: Vec<String>,
    pub headers: Vec<String>,
    pub rows: Vec<SourceRow>,
}

impl SourceTable {
    /// Builds a single-source table from header names and text rows.
    pub fn from_text_rows(
        source: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| SourceRow {
                origin: RowRef::new(0, idx + 1),
                cells: row.iter().map(|value| CellValue::from_text(value)).collect(),
            })
            .collect();
        Self {
            sources: vec![source.into()],
            headers,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn source_name(&self, origin: RowRef) -> &str {
        self.sources
            .get(origin.source_index)
            .map_or("unknown", String::as_str)
    }
}
