use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_model::{Bucket, BucketCounts};

use crate::types::CleanResult;

pub fn print_summary(result: &CleanResult) {
    println!("Inputs: {}", result.sources.join(", "));
    println!("Rows read: {}", result.input_rows);
    if result.dry_run {
        println!("Output: {} (dry run, nothing written)", result.output.display());
    } else {
        println!("Output: {}", result.output.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for bucket in Bucket::ALL {
        let rows = bucket_count(&result.counts, bucket);
        let file = result
            .written
            .iter()
            .find(|file| file.bucket == bucket)
            .map(|file| file.path.display().to_string());
        table.add_row(vec![
            bucket_cell(bucket),
            count_cell(rows, bucket_color(bucket)),
            match file {
                Some(path) => Cell::new(path),
                None => dim_cell("-"),
            },
        ]);
    }
    if result.counts.dropped > 0 {
        table.add_row(vec![
            Cell::new("dropped").fg(Color::Red),
            count_cell(result.counts.dropped, Color::Red),
            dim_cell("-"),
        ]);
    }
    println!("{table}");
    print_reason_table(&result.counts);
}

fn print_reason_table(counts: &BucketCounts) {
    if counts.exclusion_reasons.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Exclusion reason"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (reason, rows) in &counts.exclusion_reasons {
        table.add_row(vec![Cell::new(reason.as_str()), Cell::new(rows)]);
    }
    println!();
    println!("Excluded:");
    println!("{table}");
}

fn bucket_count(counts: &BucketCounts, bucket: Bucket) -> usize {
    match bucket {
        Bucket::Cleaned => counts.cleaned,
        Bucket::Excluded => counts.excluded,
        Bucket::DuplicatePhone => counts.duplicate_phone,
        Bucket::IncompleteName => counts.incomplete_name,
    }
}

fn bucket_color(bucket: Bucket) -> Color {
    match bucket {
        Bucket::Cleaned => Color::Green,
        Bucket::Excluded => Color::Red,
        Bucket::DuplicatePhone | Bucket::IncompleteName => Color::Yellow,
    }
}

fn bucket_cell(bucket: Bucket) -> Cell {
    Cell::new(bucket.as_str())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
