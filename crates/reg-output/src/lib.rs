//! Export of submissions.
//!
//! Records are projected into [`ExportRow`]s with a fixed column set, then
//! serialized either as an xlsx workbook or as delimited text, and handed to
//! an [`ExportSink`].

pub mod columns;
pub mod naming;
pub mod rows;
pub mod sink;
pub mod spreadsheet;
pub mod text;

mod error;

use std::path::PathBuf;

use reg_model::SubmissionRecord;
use reg_normalization::DisplayFormat;

pub use columns::ExportColumn;
pub use error::{ExportError, Result};
pub use naming::{ExportName, export_name};
pub use rows::{ExportRow, headers, to_export_rows};
pub use sink::{ExportSink, LocalSink};
pub use spreadsheet::{column_widths, to_spreadsheet};
pub use text::{Delimiter, to_delimited_text};

/// Exports records as a workbook file.
///
/// Returns [`ExportError::EmptyInput`] without touching the sink when there
/// are no records.
pub fn export_spreadsheet<'a, I>(
    records: I,
    name: &ExportName,
    format: &DisplayFormat,
    sink: &mut dyn ExportSink,
) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a SubmissionRecord>,
{
    let rows = to_export_rows(records, format);
    let bytes = to_spreadsheet(&rows, &name.sheet_name)?;
    let path = sink.deliver_file(&name.file_name, &bytes)?;
    tracing::info!(rows = rows.len(), file = %name.file_name, "Exported spreadsheet");
    Ok(path)
}

/// Exports records as delimited text and returns the number of lines.
pub fn export_text<'a, I>(
    records: I,
    delimiter: Delimiter,
    format: &DisplayFormat,
    sink: &mut dyn ExportSink,
) -> Result<usize>
where
    I: IntoIterator<Item = &'a SubmissionRecord>,
{
    let rows = to_export_rows(records, format);
    let text = to_delimited_text(&rows, delimiter)?;
    sink.deliver_text(&text)?;
    tracing::info!(rows = rows.len(), %delimiter, "Exported text");
    Ok(rows.len())
}
