//! Every input row lands in exactly one bucket, whatever the mix of inputs.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use roster_core::classify;
use roster_model::{
    NormalizedRecord, PipelineOptions, RequiredFieldMode, RowRef, ValidationPolicy,
};

const IDENTITIES: [Option<&str>; 5] = [
    Some("0123456789"),
    Some("1234567891"),
    Some("2234567890"),
    Some("1231231238"),
    None,
];

const NAMES: [(Option<&str>, Option<&str>); 6] = [
    (Some("علی"), Some("رضایی")),
    (Some("مریم"), Some("احمدی")),
    (Some("ع"), None),
    (Some("علی"), Some("ر")),
    (Some("Ali"), Some("Rezaei")),
    (None, None),
];

const PHONES: [Option<&str>; 4] = [
    Some("09121111111"),
    Some("09122222222"),
    Some("09123333333"),
    None,
];

fn visit(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.checked_add_days(chrono::Days::new(u64::from(day))))
        .and_then(|date| date.and_hms_opt(8, 0, 0))
        .unwrap()
}

fn build(rows: &[(usize, usize, usize, Option<u32>)]) -> Vec<NormalizedRecord> {
    rows.iter()
        .enumerate()
        .map(|(idx, (identity, name, phone, day))| {
            let mut record = NormalizedRecord::new(RowRef::new(idx % 2, idx + 1));
            record.identity_number = IDENTITIES[*identity].map(str::to_string);
            let (first, last) = NAMES[*name];
            record.first_name = first.map(str::to_string);
            record.last_name = last.map(str::to_string);
            record.full_name_raw = match (first, last) {
                (Some(first), Some(last)) => Some(format!("{first} {last}")),
                (Some(first), None) => Some(first.to_string()),
                _ => None,
            };
            record.phone = PHONES[*phone].map(str::to_string);
            record.visit_instant = day.map(visit);
            record
        })
        .collect()
}

fn row_strategy() -> impl Strategy<Value = Vec<(usize, usize, usize, Option<u32>)>> {
    prop::collection::vec(
        (
            0..IDENTITIES.len(),
            0..NAMES.len(),
            0..PHONES.len(),
            prop::option::of(0u32..60),
        ),
        0..40,
    )
}

proptest! {
    #[test]
    fn rows_are_partitioned(rows in row_strategy(), drop in any::<bool>()) {
        let records = build(&rows);
        let mut expected: Vec<RowRef> = records.iter().map(|record| record.origin).collect();
        expected.sort();

        let options = PipelineOptions {
            required_fields: if drop {
                RequiredFieldMode::Drop
            } else {
                RequiredFieldMode::RouteToExcluded
            },
            ..PipelineOptions::default()
        };
        let result = classify(records, &options);
        prop_assert_eq!(result.source_rows(), expected);
    }

    #[test]
    fn cleaned_phones_are_unique(rows in row_strategy()) {
        let result = classify(build(&rows), &PipelineOptions::default());
        let mut phones: Vec<&str> = result
            .cleaned
            .iter()
            .filter_map(|entry| entry.record.phone.as_deref())
            .collect();
        let total = phones.len();
        phones.sort_unstable();
        phones.dedup();
        prop_assert_eq!(phones.len(), total);
    }

    #[test]
    fn one_output_row_per_identity(rows in row_strategy()) {
        let result = classify(build(&rows), &PipelineOptions::default());
        let mut identities: Vec<&str> = result
            .cleaned
            .iter()
            .chain(&result.duplicate_phone)
            .chain(&result.incomplete_name)
            .filter_map(|entry| entry.record.identity_number.as_deref())
            .collect();
        let total = identities.len();
        identities.sort_unstable();
        identities.dedup();
        prop_assert_eq!(identities.len(), total);
    }

    #[test]
    fn shorter_minimum_never_adds_incomplete_names(rows in row_strategy()) {
        let strict = classify(build(&rows), &PipelineOptions::default());
        let relaxed = classify(
            build(&rows),
            &PipelineOptions {
                policy: ValidationPolicy::canonical().with_min_name_len(1),
                ..PipelineOptions::default()
            },
        );
        prop_assert!(relaxed.incomplete_name.len() <= strict.incomplete_name.len());
    }
}
