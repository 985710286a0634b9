use std::path::PathBuf;

use roster_model::BucketCounts;
use roster_output::WrittenFile;

#[derive(Debug)]
pub struct CleanResult {
    /// Display names of the merged inputs.
    pub sources: Vec<String>,
    pub input_rows: usize,
    /// Cleaned output path; set even on a dry run.
    pub output: PathBuf,
    pub written: Vec<WrittenFile>,
    pub counts: BucketCounts,
    pub dry_run: bool,
}
