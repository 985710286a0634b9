//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use roster_model::DEFAULT_DB_OFFSET_MINUTES;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Clean clinic queue exports into an importable patient roster",
    long_about = "Clean clinic queue exports into an importable patient roster.\n\n\
                  Rows are deduplicated per national ID and split into cleaned,\n\
                  excluded, duplicate-phone and incomplete-name tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient values (names, IDs, phones) in row-level log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean one or more queue exports.
    Clean(CleanArgs),

    /// Print the effective tag tables.
    Tags(TagsArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Input CSV file(s); several files are merged before cleaning.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Destination CSV (default: <INPUT_STEM>_cleaned.csv, or merged_cleaned.csv).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Replace an existing output file.
    #[arg(long = "overwrite")]
    pub overwrite: bool,

    /// Run the pipeline and print the summary without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Validation policy for national IDs and phone numbers.
    #[arg(long = "policy", value_enum, default_value = "canonical")]
    pub policy: PolicyArg,

    /// Minimum length of first and last name, 2 or 3 (default: 3).
    #[arg(
        long = "min-name-len",
        value_name = "N",
        value_parser = clap::value_parser!(u8).range(2..=3)
    )]
    pub min_name_len: Option<u8>,

    /// Discard survivors missing a required field instead of excluding them.
    #[arg(long = "drop-missing-required")]
    pub drop_missing_required: bool,

    /// Leave out the gender column.
    #[arg(long = "no-gender")]
    pub no_gender: bool,

    /// Leave out the Jalali and database date columns.
    #[arg(long = "no-display-dates")]
    pub no_display_dates: bool,

    /// UTC offset in minutes for the database date column.
    #[arg(
        long = "db-offset-minutes",
        value_name = "MINUTES",
        default_value_t = DEFAULT_DB_OFFSET_MINUTES,
        allow_hyphen_values = true
    )]
    pub db_offset_minutes: i32,

    /// Directory holding the name gender lexicon files.
    #[arg(long = "lexicon-dir", value_name = "DIR")]
    pub lexicon_dir: Option<PathBuf>,

    /// Extra tag table (CSV with kind,source,tag columns).
    #[arg(long = "tag-table", value_name = "PATH")]
    pub tag_table: Option<PathBuf>,
}

#[derive(Parser)]
pub struct TagsArgs {
    /// Extra tag table (CSV with kind,source,tag columns).
    #[arg(long = "tag-table", value_name = "PATH")]
    pub tag_table: Option<PathBuf>,

    /// Only print one table.
    #[arg(long = "kind", value_enum)]
    pub kind: Option<TagKindArg>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Checksum national IDs, strict 09XXXXXXXXX mobiles.
    Canonical,
    /// 8-11 digit national IDs, any 10 or 11 digit phone.
    Lenient,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TagKindArg {
    Status,
    AppointmentType,
    Clinic,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
