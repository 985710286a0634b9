//! `roster clean` end to end over CSV files on disk.

use std::fs;
use std::path::Path;

use clap::Parser;

use roster_cli::cli::{Cli, Command, CleanArgs};
use roster_cli::commands::{pipeline_options, run_clean};
use roster_model::{Bucket, IdentityRule, RequiredFieldMode};

const QUEUE_A: &str = "\u{feff}کد ملی,نام و نام خانوادگی,موبایل,تاریخ اخذ,وضعیت\n\
0123456789,ع,09121111111,1403/01/10,چاپ نوبت\n\
0123456789,علی رضایی,09120000001,1403/01/05,ثبت نوبت\n\
,رضا محمدی,09127777777,,\n";

const QUEUE_B: &str = "national_id,full_name,mobile\n\
1234567891,مریم احمدی,989351234567\n\
\n\
2234567890,حسن کریمی,09351234567\n";

fn clean_args(argv: &[&str]) -> CleanArgs {
    let mut full = vec!["roster", "clean"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).expect("valid arguments").command {
        Command::Clean(args) => args,
        Command::Tags(_) => panic!("expected clean"),
    }
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write input");
    path.to_string_lossy().into_owned()
}

#[test]
fn test_clean_merges_and_writes_buckets() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(dir.path(), "a.csv", QUEUE_A);
    let b = write(dir.path(), "b.csv", QUEUE_B);
    let out = dir.path().join("roster.csv");
    let out_arg = out.to_string_lossy().into_owned();

    let result = run_clean(&clean_args(&[
        a.as_str(),
        b.as_str(),
        "-o",
        out_arg.as_str(),
        "--no-display-dates",
    ]))
    .expect("clean runs");

    assert_eq!(result.sources, vec!["a.csv".to_string(), "b.csv".to_string()]);
    assert_eq!(result.input_rows, 5);
    assert_eq!(result.counts.cleaned, 1);
    assert_eq!(result.counts.excluded, 1);
    assert_eq!(result.counts.duplicate_phone, 2);
    assert_eq!(result.counts.incomplete_name, 0);
    assert_eq!(result.counts.source_rows, 5);

    let buckets: Vec<Bucket> = result.written.iter().map(|file| file.bucket).collect();
    assert_eq!(
        buckets,
        vec![Bucket::Cleaned, Bucket::Excluded, Bucket::DuplicatePhone]
    );

    let cleaned = fs::read_to_string(&out).expect("read cleaned");
    assert_eq!(
        cleaned,
        "national_id,first_name,last_name,gender,mobile,visit_date,tags\n\
         0123456789,علی,رضایی,,09121111111,2024-03-29,\"noor_hospital_queue,patient,showup_patient,\"\n"
    );
    assert!(dir.path().join("roster_duplicate_phone.csv").is_file());
    assert!(!dir.path().join("roster_incomplete_name.csv").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(dir.path(), "queue.csv", QUEUE_A);

    let result = run_clean(&clean_args(&[a.as_str(), "--dry-run"])).expect("clean runs");
    assert!(result.dry_run);
    assert!(result.written.is_empty());
    assert_eq!(result.output, dir.path().join("queue_cleaned.csv"));
    assert!(!result.output.exists());
}

#[test]
fn test_existing_output_is_refused_before_reading() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(dir.path(), "queue.csv", QUEUE_A);
    fs::write(dir.path().join("queue_cleaned.csv"), "keep").expect("seed");

    let err = run_clean(&clean_args(&[a.as_str()])).expect_err("must refuse");
    assert!(err.to_string().contains("already exists"));
    assert_eq!(
        fs::read_to_string(dir.path().join("queue_cleaned.csv")).expect("read"),
        "keep"
    );
}

#[test]
fn test_missing_required_column_names_aliases() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(dir.path(), "queue.csv", "national_id,mobile\n0123456789,09121234567\n");

    let err = run_clean(&clean_args(&[a.as_str(), "--dry-run"])).expect_err("no name column");
    let message = format!("{err:#}");
    assert!(message.contains("full_name"), "{message}");
    assert!(message.contains("نام بیمار"), "{message}");
}

#[test]
fn test_flags_map_to_options() {
    let args = clean_args(&[
        "in.csv",
        "--policy",
        "lenient",
        "--min-name-len",
        "2",
        "--drop-missing-required",
        "--no-gender",
        "--db-offset-minutes",
        "-60",
    ]);
    let options = pipeline_options(&args).expect("options");
    assert_eq!(options.policy.identity, IdentityRule::LengthRange);
    assert_eq!(options.policy.min_name_len, 2);
    assert_eq!(options.required_fields, RequiredFieldMode::Drop);
    assert!(!options.output.include_gender);
    assert!(options.output.include_display_dates);
    assert_eq!(options.output.db_utc_offset_minutes, -60);

    let bad = clean_args(&["in.csv", "--db-offset-minutes", "5000"]);
    assert!(pipeline_options(&bad).is_err());
}

#[test]
fn test_min_name_len_is_limited_to_two_or_three() {
    for value in ["0", "1", "4"] {
        let parsed = Cli::try_parse_from(["roster", "clean", "in.csv", "--min-name-len", value]);
        assert!(parsed.is_err(), "--min-name-len {value} must be rejected");
    }
    let args = clean_args(&["in.csv", "--min-name-len", "2"]);
    assert_eq!(pipeline_options(&args).expect("options").policy.min_name_len, 2);
}

#[test]
fn test_rerun_removes_side_table_that_no_longer_applies() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("roster.csv");
    let out_arg = out.to_string_lossy().into_owned();
    let excluded = dir.path().join("roster_excluded.csv");

    let first = write(dir.path(), "first.csv", QUEUE_A);
    let result = run_clean(&clean_args(&[first.as_str(), "-o", out_arg.as_str()]))
        .expect("first run");
    assert_eq!(result.counts.excluded, 1);
    assert!(excluded.is_file());

    let without_missing_id = QUEUE_A.lines().take(3).collect::<Vec<_>>().join("\n") + "\n";
    let second = write(dir.path(), "second.csv", &without_missing_id);
    let result = run_clean(&clean_args(&[
        second.as_str(),
        "-o",
        out_arg.as_str(),
        "--overwrite",
    ]))
    .expect("second run");
    assert_eq!(result.counts.excluded, 0);
    assert!(!excluded.exists());
    assert!(out.is_file());
}

#[test]
fn test_existing_side_table_is_refused_without_overwrite() {
    let dir = tempfile::tempdir().expect("tempdir");
    let a = write(dir.path(), "queue.csv", QUEUE_A);
    let side = dir.path().join("queue_cleaned_excluded.csv");
    fs::write(&side, "precious").expect("seed");

    let err = run_clean(&clean_args(&[a.as_str()])).expect_err("must refuse");
    assert!(err.to_string().contains("already exists"), "{err}");
    assert_eq!(fs::read_to_string(&side).expect("read"), "precious");
    assert!(!dir.path().join("queue_cleaned.csv").exists());
}
