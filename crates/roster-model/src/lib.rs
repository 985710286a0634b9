pub mod bucket;
pub mod error;
pub mod fields;
pub mod options;
pub mod record;
pub mod table;
pub mod tags;

pub use bucket::{Bucket, BucketCounts, Classification, ClassifiedRecord, ExclusionReason};
pub use error::{ModelError, Result};
pub use fields::LogicalField;
pub use options::{
    ANONYMOUS_CALLER_MARKER, DEFAULT_DB_OFFSET_MINUTES, IdentityRule, OutputOptions, PhoneRule,
    PipelineOptions, RequiredFieldMode, ValidationPolicy,
};
pub use record::{Gender, NormalizedRecord};
pub use table::{CellValue, RowRef, SourceRow, SourceTable};
pub use tags::{BASELINE_TAGS, TagKind, TagSet};
