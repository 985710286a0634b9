//! End-to-end runs of the batch pipeline over in-memory tables.

use roster_common::column_values;
use roster_core::{PipelineError, run_pipeline};
use roster_map::MapError;
use roster_model::{
    Bucket, ExclusionReason, LogicalField, PipelineOptions, RequiredFieldMode, RowRef,
    SourceTable,
};
use roster_standards::Lookups;

const HEADERS: [&str; 7] = [
    "کد ملی",
    "نام و نام خانوادگی",
    "موبایل",
    "تاریخ اخذ",
    "وضعیت",
    "نوع",
    "درمانگاه",
];

fn table(rows: &[[&str; 7]]) -> SourceTable {
    SourceTable::from_text_rows(
        "queue.csv",
        HEADERS.iter().map(|h| (*h).to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect(),
    )
}

fn roster() -> SourceTable {
    table(&[
        // Newer visit, incomplete name.
        ["0123456789", "ع", "09121111111", "1403/01/10", "چاپ نوبت", "", ""],
        // Older visit, complete name.
        ["0123456789", "علی رضایی", "09120000001", "1403/01/05", "ثبت نوبت", "", ""],
        ["1234567891", "مریم احمدی", "09351234567", "1403/02/01", "", "", ""],
        ["2234567890", "حسن کریمی", "+98 935 123 4567", "2024-04-02", "", "", ""],
        ["", "رضا محمدی", "09127777777", "", "", "", ""],
        ["3334567893", "کاربر تلفنی", "09120000009", "", "", "", ""],
        ["0123456788", "سارا کاظمی", "09128888888", "", "", "", ""],
        ["1231231238", "رض", "09124444444", "", "", "", ""],
    ])
}

#[test]
fn test_name_completion_keeps_newest_fields() {
    let output = run_pipeline(&roster(), &PipelineOptions::default(), &Lookups::builtin())
        .expect("pipeline runs");
    let cleaned = &output.classification.cleaned;
    assert_eq!(cleaned.len(), 1);

    let survivor = &cleaned[0];
    assert_eq!(survivor.record.first_name.as_deref(), Some("علی"));
    assert_eq!(survivor.record.last_name.as_deref(), Some("رضایی"));
    assert_eq!(survivor.record.phone.as_deref(), Some("09121111111"));
    assert_eq!(survivor.sources, vec![RowRef::new(0, 1), RowRef::new(0, 2)]);
    assert_eq!(
        survivor.record.tags.to_import_string(),
        "noor_hospital_queue,patient,showup_patient,"
    );

    let visit = column_values(&output.frames.cleaned, "visit_date").expect("visit_date");
    assert_eq!(visit, vec![Some("2024-03-29".to_string())]);
    let tags = column_values(&output.frames.cleaned, "tags").expect("tags");
    assert_eq!(
        tags,
        vec![Some("noor_hospital_queue,patient,showup_patient,".to_string())]
    );
}

#[test]
fn test_shared_phone_moves_both_identities() {
    let output = run_pipeline(&roster(), &PipelineOptions::default(), &Lookups::builtin())
        .expect("pipeline runs");
    let ids: Vec<Option<String>> = output
        .classification
        .duplicate_phone
        .iter()
        .map(|entry| entry.record.identity_number.clone())
        .collect();
    assert_eq!(
        ids,
        vec![Some("1234567891".to_string()), Some("2234567890".to_string())]
    );
}

#[test]
fn test_side_buckets_and_reasons() {
    let output = run_pipeline(&roster(), &PipelineOptions::default(), &Lookups::builtin())
        .expect("pipeline runs");
    let reasons: Vec<(RowRef, Option<ExclusionReason>)> = output
        .classification
        .excluded
        .iter()
        .map(|entry| (entry.record.origin, entry.exclusion))
        .collect();
    assert_eq!(
        reasons,
        vec![
            (RowRef::new(0, 5), Some(ExclusionReason::MissingIdentity)),
            (RowRef::new(0, 7), Some(ExclusionReason::MissingIdentity)),
            (RowRef::new(0, 6), Some(ExclusionReason::AnonymousCaller)),
        ]
    );
    assert_eq!(output.classification.incomplete_name.len(), 1);
    assert_eq!(
        output.classification.incomplete_name[0].record.origin,
        RowRef::new(0, 8)
    );

    let full_names = column_values(&output.frames.excluded, "full_name").expect("full_name");
    assert_eq!(full_names[0].as_deref(), Some("رضا محمدی"));
    assert_eq!(output.frames.get(Bucket::Excluded).height(), 3);
}

#[test]
fn test_bucket_counts_snapshot() {
    let output = run_pipeline(&roster(), &PipelineOptions::default(), &Lookups::builtin())
        .expect("pipeline runs");
    let counts = serde_json::to_value(&output.counts).expect("serialize counts");
    insta::assert_json_snapshot!(counts, @r#"
    {
      "cleaned": 1,
      "dropped": 0,
      "duplicate_phone": 2,
      "excluded": 3,
      "exclusion_reasons": {
        "anonymous_caller": 1,
        "missing_identity": 2
      },
      "incomplete_name": 1,
      "source_rows": 8
    }
    "#);
}

#[test]
fn test_every_row_accounted_for_once() {
    let input = roster();
    let output = run_pipeline(&input, &PipelineOptions::default(), &Lookups::builtin())
        .expect("pipeline runs");
    let expected: Vec<RowRef> = input.rows.iter().map(|row| row.origin).collect();
    assert_eq!(output.classification.source_rows(), expected);
}

#[test]
fn test_drop_mode_changes_nothing_for_valid_survivors() {
    let options = PipelineOptions {
        required_fields: RequiredFieldMode::Drop,
        ..PipelineOptions::default()
    };
    let output = run_pipeline(&roster(), &options, &Lookups::builtin()).expect("pipeline runs");
    assert_eq!(output.counts.dropped, 0);
    assert_eq!(output.counts.cleaned, 1);
}

#[test]
fn test_missing_required_column_is_fatal() {
    let input = SourceTable::from_text_rows(
        "queue.csv",
        vec!["کد ملی".to_string(), "موبایل".to_string()],
        vec![vec!["0123456789".to_string(), "09121234567".to_string()]],
    );
    let err = run_pipeline(&input, &PipelineOptions::default(), &Lookups::builtin())
        .expect_err("full name column is required");
    match err {
        PipelineError::Columns(MapError::MissingRequiredColumn { field, aliases }) => {
            assert_eq!(field, LogicalField::FullName);
            assert!(aliases.iter().any(|alias| alias == "full_name"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_table_is_fatal() {
    let input = table(&[]);
    let err = run_pipeline(&input, &PipelineOptions::default(), &Lookups::builtin())
        .expect_err("no rows");
    assert!(matches!(err, PipelineError::NoRows));
}

#[test]
fn test_optional_columns_may_be_absent() {
    let input = SourceTable::from_text_rows(
        "queue.csv",
        vec![
            "national_id".to_string(),
            "full_name".to_string(),
            "mobile".to_string(),
        ],
        vec![vec![
            "0123456789".to_string(),
            "علی رضایی".to_string(),
            "9121234567".to_string(),
        ]],
    );
    let output = run_pipeline(&input, &PipelineOptions::default(), &Lookups::builtin())
        .expect("pipeline runs");
    assert_eq!(output.counts.cleaned, 1);
    let record = &output.classification.cleaned[0].record;
    assert_eq!(record.phone.as_deref(), Some("09121234567"));
    assert_eq!(record.visit_instant, None);
    assert_eq!(record.tags.to_import_string(), "noor_hospital_queue,patient,");
}
