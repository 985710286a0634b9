//! Output of the four bucket tables as CSV files.

pub mod csv_writer;
pub mod error;
pub mod paths;
pub mod writer;

pub use csv_writer::write_frame_csv;
pub use error::{OutputError, Result};
pub use paths::{
    MERGED_OUTPUT_FILE, bucket_output_path, check_output_targets, default_output_path,
    validate_output_path,
};
pub use writer::{WrittenFile, write_outputs};
