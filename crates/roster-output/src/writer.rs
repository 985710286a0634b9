//! Writing all bucket tables of one run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span};

use roster_core::BucketFrames;
use roster_model::Bucket;

use crate::csv_writer::write_frame_csv;
use crate::error::{OutputError, Result};
use crate::paths::{bucket_output_path, check_output_targets};

/// One file written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub bucket: Bucket,
    pub path: PathBuf,
    pub rows: usize,
}

/// Writes the cleaned table to `cleaned_path` (always, even when empty) and
/// each side table next to it when it has rows.
///
/// Every bucket path is checked before anything is written. A side file left
/// by an earlier run whose bucket is now empty is removed, so the files on
/// disk always match this run's classification.
pub fn write_outputs(
    frames: &BucketFrames,
    cleaned_path: &Path,
    overwrite: bool,
) -> Result<Vec<WrittenFile>> {
    check_output_targets(cleaned_path, overwrite)?;
    info_span!("output", path = %cleaned_path.display()).in_scope(|| {
        let start = Instant::now();
        let mut written = Vec::new();
        for bucket in Bucket::ALL {
            let df = frames.get(bucket);
            let path = bucket_output_path(cleaned_path, bucket);
            if bucket != Bucket::Cleaned && df.height() == 0 {
                if path.exists() {
                    fs::remove_file(&path).map_err(|source| OutputError::Io {
                        path: path.clone(),
                        source,
                    })?;
                    info!(%bucket, path = %path.display(), "removed stale side table");
                } else {
                    debug!(%bucket, "no rows; skipping side table");
                }
                continue;
            }
            let rows = write_frame_csv(&path, df)?;
            info!(%bucket, rows, path = %path.display(), "wrote table");
            written.push(WrittenFile { bucket, path, rows });
        }
        debug!(duration_ms = start.elapsed().as_millis(), "output complete");
        Ok(written)
    })
}
