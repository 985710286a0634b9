//! Turning resolved source rows into normalized records.

use tracing::debug;

use roster_common::normalize_text;
use roster_map::ColumnResolution;
use roster_model::{CellValue, LogicalField, NormalizedRecord, SourceRow, SourceTable};
use roster_transform::{clean_identity_number, clean_phone, parse_visit_instant, split_full_name};

use crate::context::ProcessingContext;

fn text_value(cell: &CellValue) -> Option<String> {
    cell.as_text().as_deref().and_then(normalize_text)
}

/// Builds the normalized record for one row.
///
/// Fields are cleaned independently: an invalid identity number, phone or date
/// becomes `None` and never prevents the other fields from being filled.
pub fn build_record(
    row: &SourceRow,
    resolution: &ColumnResolution,
    ctx: &ProcessingContext<'_>,
) -> NormalizedRecord {
    let policy = ctx.policy();
    let mut record = NormalizedRecord::new(row.origin);

    record.identity_number = text_value(resolution.value(row, LogicalField::IdentityNumber))
        .and_then(|raw| clean_identity_number(&raw, policy.identity));

    record.full_name_raw = text_value(resolution.value(row, LogicalField::FullName));
    let parts = split_full_name(record.full_name_raw.as_deref());
    record.first_name = parts.first;
    record.last_name = parts.last;

    record.phone = text_value(resolution.value(row, LogicalField::Phone))
        .and_then(|raw| clean_phone(&raw, policy.phone));

    if ctx.output().include_gender {
        record.gender = record
            .first_name
            .as_deref()
            .and_then(|first| ctx.lookups.genders.detect(first));
    }

    record.visit_instant = parse_visit_instant(resolution.value(row, LogicalField::VisitDate));
    record.status_raw = text_value(resolution.value(row, LogicalField::Status));
    record.appointment_type_raw = text_value(resolution.value(row, LogicalField::AppointmentType));
    record.clinic_raw = text_value(resolution.value(row, LogicalField::Clinic));
    record
}

/// Builds records for every row, in table order.
pub fn build_records(
    table: &SourceTable,
    resolution: &ColumnResolution,
    ctx: &ProcessingContext<'_>,
) -> Vec<NormalizedRecord> {
    let records: Vec<NormalizedRecord> = table
        .rows
        .iter()
        .map(|row| build_record(row, resolution, ctx))
        .collect();
    debug!(
        rows = records.len(),
        with_identity = records.iter().filter(|r| r.identity_number.is_some()).count(),
        with_phone = records.iter().filter(|r| r.phone.is_some()).count(),
        with_visit = records.iter().filter(|r| r.visit_instant.is_some()).count(),
        "normalized records"
    );
    records
}
