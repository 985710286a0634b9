//! Output frame construction.
//!
//! Column order is the import contract and must not change.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use roster_model::{Bucket, Classification, ClassifiedRecord, OutputOptions};
use roster_transform::{
    format_visit_date, format_visit_date_db, format_visit_date_ui, format_visit_datetime_ui,
};

use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputColumn {
    FullName,
    NationalId,
    FirstName,
    LastName,
    Gender,
    Mobile,
    VisitDate,
    VisitDateUi,
    VisitDateTimeUi,
    VisitDateDb,
    Tags,
}

impl OutputColumn {
    pub fn name(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::NationalId => "national_id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Gender => "gender",
            Self::Mobile => "mobile",
            Self::VisitDate => "visit_date",
            Self::VisitDateUi => "visit_date_ui",
            Self::VisitDateTimeUi => "visit_datetime_ui",
            Self::VisitDateDb => "visit_date_db",
            Self::Tags => "tags",
        }
    }

    /// Cell value for one record; `None` renders as an empty cell.
    fn value(self, entry: &ClassifiedRecord, options: &OutputOptions) -> Option<String> {
        let record = &entry.record;
        let visit = record.visit_instant.as_ref();
        match self {
            Self::FullName => record.display_name(),
            Self::NationalId => record.identity_number.clone(),
            Self::FirstName => record.first_name.clone(),
            Self::LastName => record.last_name.clone(),
            Self::Gender => record.gender.map(|gender| gender.as_str().to_string()),
            Self::Mobile => record.phone.clone(),
            Self::VisitDate => visit.map(format_visit_date),
            Self::VisitDateUi => visit.map(format_visit_date_ui),
            Self::VisitDateTimeUi => visit.map(format_visit_datetime_ui),
            Self::VisitDateDb => {
                visit.and_then(|instant| format_visit_date_db(instant, options.db_utc_offset_minutes))
            }
            Self::Tags => Some(record.tags.to_import_string()).filter(|tags| !tags.is_empty()),
        }
    }
}

/// Columns of a bucket's table, in contract order.
pub fn output_columns(bucket: Bucket, options: &OutputOptions) -> Vec<OutputColumn> {
    let mut columns = Vec::with_capacity(11);
    if bucket == Bucket::Excluded {
        columns.push(OutputColumn::FullName);
    }
    columns.extend([
        OutputColumn::NationalId,
        OutputColumn::FirstName,
        OutputColumn::LastName,
    ]);
    if options.include_gender {
        columns.push(OutputColumn::Gender);
    }
    columns.extend([OutputColumn::Mobile, OutputColumn::VisitDate]);
    if options.include_display_dates {
        columns.extend([
            OutputColumn::VisitDateUi,
            OutputColumn::VisitDateTimeUi,
            OutputColumn::VisitDateDb,
        ]);
    }
    columns.push(OutputColumn::Tags);
    columns
}

/// Builds the frame for one bucket. An empty bucket yields a frame with the
/// right columns and no rows.
pub fn build_bucket_frame(
    bucket: Bucket,
    entries: &[ClassifiedRecord],
    options: &OutputOptions,
) -> Result<DataFrame> {
    let columns: Vec<Column> = output_columns(bucket, options)
        .into_iter()
        .map(|column| {
            let values: Vec<Option<String>> = entries
                .iter()
                .map(|entry| column.value(entry, options))
                .collect();
            Series::new(column.name().into(), values).into_column()
        })
        .collect();
    DataFrame::new(columns).map_err(|source| PipelineError::Frame {
        bucket: bucket.as_str().to_string(),
        source,
    })
}

/// One frame per output bucket.
#[derive(Debug, Clone)]
pub struct BucketFrames {
    pub cleaned: DataFrame,
    pub excluded: DataFrame,
    pub duplicate_phone: DataFrame,
    pub incomplete_name: DataFrame,
}

impl BucketFrames {
    pub fn build(classification: &Classification, options: &OutputOptions) -> Result<Self> {
        Ok(Self {
            cleaned: build_bucket_frame(Bucket::Cleaned, &classification.cleaned, options)?,
            excluded: build_bucket_frame(Bucket::Excluded, &classification.excluded, options)?,
            duplicate_phone: build_bucket_frame(
                Bucket::DuplicatePhone,
                &classification.duplicate_phone,
                options,
            )?,
            incomplete_name: build_bucket_frame(
                Bucket::IncompleteName,
                &classification.incomplete_name,
                options,
            )?,
        })
    }

    pub fn get(&self, bucket: Bucket) -> &DataFrame {
        match bucket {
            Bucket::Cleaned => &self.cleaned,
            Bucket::Excluded => &self.excluded,
            Bucket::DuplicatePhone => &self.duplicate_phone,
            Bucket::IncompleteName => &self.incomplete_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use roster_common::{column_names, column_values};
    use roster_model::{Gender, NormalizedRecord, RowRef, TagSet};

    use super::*;

    fn entry() -> ClassifiedRecord {
        let mut record = NormalizedRecord::new(RowRef::new(0, 1));
        record.identity_number = Some("0123456789".to_string());
        record.full_name_raw = Some("علی رضایی".to_string());
        record.first_name = Some("علی".to_string());
        record.last_name = Some("رضایی".to_string());
        record.gender = Some(Gender::Male);
        record.phone = Some("09121234567".to_string());
        record.visit_instant = NaiveDate::from_ymd_opt(2024, 3, 24)
            .unwrap()
            .and_hms_opt(10, 30, 0);
        record.tags = TagSet::baseline();
        ClassifiedRecord::single(record)
    }

    #[test]
    fn full_column_set() {
        let names: Vec<&str> = output_columns(Bucket::Cleaned, &OutputOptions::default())
            .into_iter()
            .map(OutputColumn::name)
            .collect();
        assert_eq!(
            names,
            [
                "national_id",
                "first_name",
                "last_name",
                "gender",
                "mobile",
                "visit_date",
                "visit_date_ui",
                "visit_datetime_ui",
                "visit_date_db",
                "tags"
            ]
        );
    }

    #[test]
    fn excluded_leads_with_full_name() {
        let names: Vec<&str> = output_columns(Bucket::Excluded, &OutputOptions::minimal())
            .into_iter()
            .map(OutputColumn::name)
            .collect();
        assert_eq!(
            names,
            [
                "full_name",
                "national_id",
                "first_name",
                "last_name",
                "mobile",
                "visit_date",
                "tags"
            ]
        );
    }

    #[test]
    fn frame_values() {
        let df = build_bucket_frame(Bucket::Cleaned, &[entry()], &OutputOptions::default())
            .expect("build frame");
        assert_eq!(df.height(), 1);
        assert_eq!(column_names(&df).len(), 10);
        let value = |name: &str| column_values(&df, name).expect("column")[0].clone();
        assert_eq!(value("gender").as_deref(), Some("male"));
        assert_eq!(value("visit_date").as_deref(), Some("2024-03-24"));
        assert_eq!(value("visit_date_ui").as_deref(), Some("1403/01/05"));
        assert_eq!(value("visit_datetime_ui").as_deref(), Some("1403/01/05 10:30"));
        assert_eq!(
            value("visit_date_db").as_deref(),
            Some("2024-03-24T10:30:00+03:30")
        );
        assert_eq!(value("tags").as_deref(), Some("noor_hospital_queue,patient,"));
    }

    #[test]
    fn absent_visit_is_empty_everywhere() {
        let mut entry = entry();
        entry.record.visit_instant = None;
        let df = build_bucket_frame(Bucket::Cleaned, &[entry], &OutputOptions::default())
            .expect("build frame");
        for name in ["visit_date", "visit_date_ui", "visit_datetime_ui", "visit_date_db"] {
            assert_eq!(column_values(&df, name).expect("column")[0], None, "{name}");
        }
    }

    #[test]
    fn empty_bucket_keeps_columns() {
        let df = build_bucket_frame(Bucket::IncompleteName, &[], &OutputOptions::minimal())
            .expect("build frame");
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 6);
    }
}
