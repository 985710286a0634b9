use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no input files provided")]
    NoInputs,

    #[error("cannot find input file: {0}")]
    MissingFile(PathBuf),

    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("input file has no header row: {0}")]
    NoHeader(PathBuf),
}

pub type Result<T> = std::result::Result<T, IngestError>;
