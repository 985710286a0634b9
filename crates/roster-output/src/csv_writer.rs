//! Frame to CSV serialization.

use std::fs;
use std::path::Path;

use csv::WriterBuilder;
use polars::prelude::{AnyValue, DataFrame};

use roster_common::{any_to_string, column_names};

use crate::error::{OutputError, Result};

/// Writes `df` as UTF-8 CSV with a header row; nulls become empty cells.
///
/// Returns the number of data rows written.
pub fn write_frame_csv(path: &Path, df: &DataFrame) -> Result<usize> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let csv_error = |source: csv::Error| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new().from_path(path).map_err(csv_error)?;

    let names = column_names(df);
    writer.write_record(&names).map_err(csv_error)?;

    let columns = names
        .iter()
        .map(|name| df.column(name))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|source| OutputError::Frame {
            path: path.to_path_buf(),
            source,
        })?;
    let mut record = Vec::with_capacity(columns.len());
    for idx in 0..df.height() {
        record.clear();
        for column in &columns {
            record.push(any_to_string(column.get(idx).unwrap_or(AnyValue::Null)));
        }
        writer.write_record(&record).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(df.height())
}
