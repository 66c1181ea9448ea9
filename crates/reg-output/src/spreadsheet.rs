//! Spreadsheet workbook generation.

use rust_xlsxwriter::{Format, Workbook};

use crate::error::{ExportError, Result};
use crate::rows::{ExportRow, headers};

/// Narrowest column, in characters.
pub const MIN_COLUMN_WIDTH: usize = 12;
/// Widest column, in characters.
pub const MAX_COLUMN_WIDTH: usize = 45;

const MAX_SHEET_NAME_LEN: usize = 31;
const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Builds a single-sheet workbook: bold header row, then one row per record.
///
/// Column widths follow the longest cell or header of each column, clamped to
/// [`MIN_COLUMN_WIDTH`]..=[`MAX_COLUMN_WIDTH`].
pub fn to_spreadsheet(rows: &[ExportRow], sheet_name: &str) -> Result<Vec<u8>> {
    if rows.is_empty() {
        return Err(ExportError::EmptyInput);
    }
    let header_row = headers(rows);

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sanitize_sheet_name(sheet_name))?;

    for (col, header) in header_row.iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col)?, *header, &bold)?;
    }
    for (index, row) in rows.iter().enumerate() {
        let row_num = u32::try_from(index + 1).map_err(|_| ExportError::TooManyRows {
            rows: rows.len(),
        })?;
        for (col, value) in row.values().enumerate() {
            worksheet.write_string(row_num, column_index(col)?, value)?;
        }
    }
    for (col, width) in column_widths(rows).into_iter().enumerate() {
        // Widths are clamped to MAX_COLUMN_WIDTH, so the cast is exact
        worksheet.set_column_width(column_index(col)?, width as f64)?;
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(rows = rows.len(), bytes = bytes.len(), "Built workbook");
    Ok(bytes)
}

/// Width of each column in characters.
pub fn column_widths(rows: &[ExportRow]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers(rows).iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row.values()) {
            *width = (*width).max(value.chars().count());
        }
    }
    widths
        .into_iter()
        .map(|longest| (longest + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH))
        .collect()
}

/// Makes a name acceptable as a worksheet name.
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if INVALID_SHEET_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    if cleaned.is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| ExportError::TooManyColumns { columns: col })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Katılımcılar"), "Katılımcılar");
        assert_eq!(sanitize_sheet_name("a/b:c"), "a_b_c");
        assert_eq!(sanitize_sheet_name("  "), "Sheet1");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40)).chars().count(), 31);
    }

    #[test]
    fn test_empty_rows_rejected() {
        assert!(matches!(
            to_spreadsheet(&[], "csb"),
            Err(ExportError::EmptyInput)
        ));
    }
}
