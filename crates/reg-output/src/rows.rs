//! Projection of records into export rows.

use reg_model::SubmissionRecord;
use reg_normalization::{DisplayFormat, PLACEHOLDER};

use crate::columns::ExportColumn;

/// One exported record: header and display value per column, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    cells: Vec<(&'static str, String)>,
}

impl ExportRow {
    pub fn cells(&self) -> &[(&'static str, String)] {
        &self.cells
    }

    pub fn headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|(header, _)| *header)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, value)| value.as_str())
    }

    /// Value under a header, if the row has that column.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| *h == header)
            .map(|(_, value)| value.as_str())
    }
}

/// Builds one row per record with every [`ExportColumn`].
///
/// Absent values are written as the placeholder, so all rows share the same
/// headers in the same order.
pub fn to_export_rows<'a, I>(records: I, format: &DisplayFormat) -> Vec<ExportRow>
where
    I: IntoIterator<Item = &'a SubmissionRecord>,
{
    records
        .into_iter()
        .map(|record| export_row(record, format))
        .collect()
}

fn export_row(record: &SubmissionRecord, format: &DisplayFormat) -> ExportRow {
    let cells = ExportColumn::ALL
        .iter()
        .map(|column| {
            let value = column
                .value(record, format)
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            (column.header(format.locale), value)
        })
        .collect();
    ExportRow { cells }
}

/// Header line shared by `rows`, from the first row.
pub fn headers(rows: &[ExportRow]) -> Vec<&'static str> {
    rows.first()
        .map(|row| row.headers().collect())
        .unwrap_or_default()
}
