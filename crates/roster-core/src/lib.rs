//! Record building, deduplication, classification and tagging.

pub mod context;
pub mod dedupe;
pub mod error;
pub mod frame_builder;
pub mod pipeline;
pub mod records;
pub mod tags;

pub use context::ProcessingContext;
pub use dedupe::classify;
pub use error::{PipelineError, Result};
pub use frame_builder::{BucketFrames, OutputColumn, build_bucket_frame, output_columns};
pub use pipeline::{PipelineOutput, run_pipeline};
pub use records::{build_record, build_records};
pub use tags::{apply_tags, derive_tags};
