//! Output file naming.

use std::path::{Path, PathBuf};

use roster_model::Bucket;

use crate::error::{OutputError, Result};

/// Default output when several inputs are merged.
pub const MERGED_OUTPUT_FILE: &str = "merged_cleaned.csv";

/// `<input_stem>_cleaned.csv` next to a single input, `merged_cleaned.csv`
/// in the working directory otherwise.
pub fn default_output_path(inputs: &[PathBuf]) -> PathBuf {
    match inputs {
        [single] => {
            let stem = single
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_string());
            single.with_file_name(format!("{stem}_cleaned.csv"))
        }
        _ => PathBuf::from(MERGED_OUTPUT_FILE),
    }
}

/// Accepts only `.csv` destinations (case-insensitive).
pub fn validate_output_path(path: &Path) -> Result<()> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(())
    } else {
        Err(OutputError::UnsupportedFormat {
            path: path.to_path_buf(),
        })
    }
}

/// Refuses to touch any existing bucket file of `cleaned` unless `overwrite`
/// is set. Side files count too: a run may replace or remove them.
pub fn check_output_targets(cleaned: &Path, overwrite: bool) -> Result<()> {
    validate_output_path(cleaned)?;
    if overwrite {
        return Ok(());
    }
    for bucket in Bucket::ALL {
        let path = bucket_output_path(cleaned, bucket);
        if path.exists() {
            return Err(OutputError::AlreadyExists(path));
        }
    }
    Ok(())
}

/// File for `bucket`, derived from the cleaned output path:
/// `<stem>_excluded.csv`, `<stem>_duplicate_phone.csv`, `<stem>_incomplete_name.csv`.
pub fn bucket_output_path(cleaned: &Path, bucket: Bucket) -> PathBuf {
    if bucket == Bucket::Cleaned {
        return cleaned.to_path_buf();
    }
    let stem = cleaned
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = cleaned
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());
    cleaned.with_file_name(format!("{stem}_{}.{extension}", bucket.as_str()))
}
