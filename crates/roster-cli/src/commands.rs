use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info, info_span, trace};

use roster_core::{PipelineOutput, run_pipeline};
use roster_ingest::read_sources;
use roster_model::{
    OutputOptions, PipelineOptions, RequiredFieldMode, SourceTable, TagKind, ValidationPolicy,
};
use roster_output::{check_output_targets, default_output_path, write_outputs};
use roster_standards::{Lookups, NameGenderLexicon, TagCatalog};

use crate::cli::{CleanArgs, PolicyArg, TagKindArg, TagsArgs};
use crate::logging::redact_value;
use crate::summary::apply_table_style;
use crate::types::CleanResult;

/// Pipeline options from `clean` flags.
pub fn pipeline_options(args: &CleanArgs) -> Result<PipelineOptions> {
    let mut policy = match args.policy {
        PolicyArg::Canonical => ValidationPolicy::canonical(),
        PolicyArg::Lenient => ValidationPolicy::lenient(),
    };
    if let Some(min) = args.min_name_len {
        policy = policy.with_min_name_len(usize::from(min));
    }
    let output = OutputOptions {
        include_gender: !args.no_gender,
        include_display_dates: !args.no_display_dates,
        ..OutputOptions::default()
    }
    .with_db_offset(args.db_offset_minutes)
    .context("invalid --db-offset-minutes")?;
    Ok(PipelineOptions {
        policy,
        required_fields: if args.drop_missing_required {
            RequiredFieldMode::Drop
        } else {
            RequiredFieldMode::RouteToExcluded
        },
        output,
    })
}

fn load_tag_catalog(tag_table: Option<&PathBuf>) -> Result<TagCatalog> {
    let mut catalog = TagCatalog::builtin();
    if let Some(path) = tag_table {
        catalog
            .extend_from_csv(path)
            .with_context(|| format!("load tag table {}", path.display()))?;
    }
    Ok(catalog)
}

fn load_lookups(args: &CleanArgs, options: &PipelineOptions) -> Result<Lookups> {
    let tags = load_tag_catalog(args.tag_table.as_ref())?;
    let genders = match (&args.lexicon_dir, options.output.include_gender) {
        (Some(dir), true) => NameGenderLexicon::load_dir(dir)
            .with_context(|| format!("load name lexicon from {}", dir.display()))?,
        (None, true) => {
            info!("no --lexicon-dir given; gender column left empty");
            NameGenderLexicon::empty()
        }
        (_, false) => NameGenderLexicon::empty(),
    };
    Ok(Lookups::new(tags, genders))
}

fn trace_routed_rows(table: &SourceTable, output: &PipelineOutput) {
    for entry in &output.classification.excluded {
        let record = &entry.record;
        trace!(
            source = table.source_name(record.origin),
            row = record.origin.row_number,
            reason = ?entry.exclusion,
            name = redact_value(record.full_name_raw.as_deref().unwrap_or_default()),
            national_id = redact_value(record.identity_number.as_deref().unwrap_or_default()),
            "excluded row"
        );
    }
    for entry in &output.classification.duplicate_phone {
        let record = &entry.record;
        trace!(
            source = table.source_name(record.origin),
            row = record.origin.row_number,
            mobile = redact_value(record.phone.as_deref().unwrap_or_default()),
            "shared phone"
        );
    }
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanResult> {
    let span = info_span!("clean", files = args.inputs.len());
    let _guard = span.enter();
    let start = Instant::now();

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.inputs));
    if !args.dry_run {
        check_output_targets(&output_path, args.overwrite)?;
    }

    let options = pipeline_options(args)?;
    let lookups = load_lookups(args, &options)?;
    let table = read_sources(&args.inputs).context("read input files")?;
    let output = run_pipeline(&table, &options, &lookups).context("clean roster")?;
    trace_routed_rows(&table, &output);

    let written = if args.dry_run {
        info!("dry run; no files written");
        Vec::new()
    } else {
        write_outputs(&output.frames, &output_path, args.overwrite)
            .with_context(|| format!("write {}", output_path.display()))?
    };
    debug!(duration_ms = start.elapsed().as_millis(), "clean complete");

    Ok(CleanResult {
        sources: table.sources.clone(),
        input_rows: table.row_count(),
        output: output_path,
        written,
        counts: output.counts,
        dry_run: args.dry_run,
    })
}

fn selected_kinds(kind: Option<TagKindArg>) -> Vec<TagKind> {
    match kind {
        None => TagKind::ALL.to_vec(),
        Some(TagKindArg::Status) => vec![TagKind::Status],
        Some(TagKindArg::AppointmentType) => vec![TagKind::AppointmentType],
        Some(TagKindArg::Clinic) => vec![TagKind::Clinic],
    }
}

pub fn run_tags(args: &TagsArgs) -> Result<()> {
    let catalog = load_tag_catalog(args.tag_table.as_ref())?;
    let mut table = Table::new();
    table.set_header(vec!["Kind", "Source", "Tag"]);
    apply_table_style(&mut table);
    for kind in selected_kinds(args.kind) {
        for (source, tag) in catalog.entries(kind) {
            table.add_row(vec![kind.as_str(), source, tag]);
        }
    }
    println!("{table}");
    Ok(())
}
