//! Terminal tables for listings, facets and single records.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use reg_model::{SubmissionRecord, fields};
use reg_normalization::{
    DisplayFormat, PLACEHOLDER, format_date_time, mask_national_id, participation_days,
};
use reg_output::ExportColumn;
use reg_view::{Facet, Facets, Notice, NoticeLevel};

/// Table of one page of records. National ids are masked.
pub fn records_table(
    records: &[&SubmissionRecord],
    first_index: usize,
    format: &DisplayFormat,
) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Source"),
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Email"),
        header_cell("Organization"),
        header_cell("National ID"),
        header_cell("Days"),
        header_cell("Submitted"),
        header_cell("Note"),
    ]);
    align_column(&mut table, 0, CellAlignment::Right);

    for (offset, record) in records.iter().enumerate() {
        let days = participation_days(record, format);
        let submitted = record
            .get(fields::CREATED_AT)
            .map_or_else(|| PLACEHOLDER.to_string(), |v| format_date_time(v, format));
        table.add_row(vec![
            Cell::new(first_index + offset),
            dim_cell(record.source().as_str()),
            Cell::new(record.id()),
            Cell::new(or_placeholder(Some(record.full_name()))),
            Cell::new(or_placeholder(record.text(fields::EMAIL))),
            Cell::new(or_placeholder(record.text(fields::ORGANIZATION))),
            Cell::new(mask_national_id(
                &record.text(fields::TC_NO).unwrap_or_default(),
            )),
            Cell::new(if days.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                days.join(", ")
            }),
            Cell::new(submitted),
            Cell::new(or_placeholder(record.text(fields::ADMIN_NOTE))),
        ]);
    }
    table
}

/// Table with one row per facet listing its distinct values.
pub fn facets_table(facets: &Facets) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        header_cell("Facet"),
        header_cell("Values"),
        header_cell("Count"),
    ]);
    align_column(&mut table, 2, CellAlignment::Right);
    for facet in Facet::ALL {
        let values = facets.values(facet);
        let joined = if values.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        };
        table.add_row(vec![
            Cell::new(facet.label()).add_attribute(Attribute::Bold),
            Cell::new(joined),
            Cell::new(values.len()),
        ]);
    }
    table
}

/// Submission counts per special firm.
pub fn firm_counts_table(counts: &[(&str, usize)]) -> Table {
    let mut table = new_table();
    table.set_header(vec![header_cell("Firm"), header_cell("Submissions")]);
    align_column(&mut table, 1, CellAlignment::Right);
    for (firm, count) in counts {
        let count_cell = if *count == 0 {
            dim_cell("0")
        } else {
            Cell::new(count)
        };
        table.add_row(vec![Cell::new(firm), count_cell]);
    }
    table
}

/// Two-column view of one record, using the export columns.
pub fn record_detail_table(record: &SubmissionRecord, format: &DisplayFormat) -> Table {
    let mut table = new_table();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    table.add_row(vec![Cell::new("Source"), Cell::new(record.source().label())]);
    table.add_row(vec![Cell::new("ID"), Cell::new(record.id())]);
    for column in ExportColumn::ALL {
        let value = column.value(record, format);
        let cell = match value {
            Some(value) => Cell::new(value),
            None => dim_cell(PLACEHOLDER),
        };
        table.add_row(vec![Cell::new(column.header(format.locale)), cell]);
    }
    if let Some(author) = record.text(fields::NOTE_BY) {
        table.add_row(vec![Cell::new("Note by"), Cell::new(author)]);
    }
    table
}

/// Prints a notice to stderr with a level prefix.
pub fn print_notice(notice: &Notice) {
    let prefix = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    eprintln!("{prefix}: {}", notice.message);
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn or_placeholder(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
