//! Batch pipeline over one merged source table.
//!
//! Stages run in order:
//! 1. **Resolve**: map input headers to logical fields
//! 2. **Normalize**: build one normalized record per row
//! 3. **Classify**: deduplicate and route into buckets, then derive tags
//! 4. **Frames**: build one output frame per bucket
//!
//! Only structural problems (no rows, unresolvable required column, frame
//! construction) return an error.

use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use roster_map::ColumnResolver;
use roster_model::{BucketCounts, Classification, PipelineOptions, SourceTable};
use roster_standards::Lookups;

use crate::context::ProcessingContext;
use crate::dedupe::classify;
use crate::error::{PipelineError, Result};
use crate::frame_builder::BucketFrames;
use crate::records::build_records;
use crate::tags::apply_tags;

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub classification: Classification,
    pub frames: BucketFrames,
    pub counts: BucketCounts,
}

/// Runs the pipeline with the built-in column aliases.
pub fn run_pipeline(
    table: &SourceTable,
    options: &PipelineOptions,
    lookups: &Lookups,
) -> Result<PipelineOutput> {
    if table.is_empty() {
        return Err(PipelineError::NoRows);
    }
    let ctx = ProcessingContext::new(options, lookups);

    let resolution = info_span!("resolve").in_scope(|| {
        let start = Instant::now();
        let resolution = ColumnResolver::new().resolve(&table.headers);
        debug!(duration_ms = start.elapsed().as_millis(), "resolve complete");
        resolution
    })?;

    let records = info_span!("normalize", rows = table.row_count()).in_scope(|| {
        let start = Instant::now();
        let records = build_records(table, &resolution, &ctx);
        debug!(duration_ms = start.elapsed().as_millis(), "normalize complete");
        records
    });

    let classification = info_span!("classify").in_scope(|| {
        let start = Instant::now();
        let mut classification = classify(records, options);
        apply_tags(&mut classification, &lookups.tags);
        debug!(duration_ms = start.elapsed().as_millis(), "classify complete");
        classification
    });

    let counts = classification.counts();
    if counts.source_rows == table.row_count() {
        debug!(rows = counts.source_rows, "every input row accounted for");
    } else {
        warn!(
            input_rows = table.row_count(),
            accounted = counts.source_rows,
            "row accounting mismatch"
        );
    }
    if counts.dropped > 0 {
        info!(rows = counts.dropped, "rows dropped by required-field policy");
    }

    let frames = BucketFrames::build(&classification, &options.output)?;
    info!(
        cleaned = counts.cleaned,
        excluded = counts.excluded,
        duplicate_phone = counts.duplicate_phone,
        incomplete_name = counts.incomplete_name,
        "pipeline complete"
    );
    Ok(PipelineOutput {
        classification,
        frames,
        counts,
    })
}
