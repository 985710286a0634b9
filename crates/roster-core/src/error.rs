use polars::prelude::PolarsError;
use thiserror::Error;

use roster_map::MapError;

/// Structural failures that abort a run. Field-level problems never land here.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input contains no data rows")]
    NoRows,

    #[error(transparent)]
    Columns(#[from] MapError),

    #[error("failed to build {bucket} frame: {source}")]
    Frame {
        bucket: String,
        #[source]
        source: PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
