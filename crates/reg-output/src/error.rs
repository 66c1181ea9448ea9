//! Error types for export generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while exporting submissions.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export; no file or text is produced.
    #[error("no rows to export")]
    EmptyInput,

    /// Building the workbook failed.
    #[error("failed to build workbook")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("too many rows for a worksheet: {rows}")]
    TooManyRows { rows: usize },

    #[error("too many columns for a worksheet: {columns}")]
    TooManyColumns { columns: usize },

    /// File I/O error while delivering an export.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing text output failed.
    #[error("failed to write text output")]
    Text(#[source] std::io::Error),

    /// The export file name would leave the output directory.
    #[error("invalid export file name: {name}")]
    InvalidFileName { name: String },
}

impl ExportError {
    /// Returns true if this is the empty-selection case, which is a warning
    /// rather than a failure.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }

    /// Short message suitable for a notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput => "No data to export.".to_string(),
            Self::Workbook(_) | Self::TooManyRows { .. } | Self::TooManyColumns { .. } => {
                "The spreadsheet could not be created.".to_string()
            }
            Self::Io { path, .. } => format!("Could not write {}.", path.display()),
            Self::Text(_) => "The text could not be written.".to_string(),
            Self::InvalidFileName { name } => format!("Invalid file name: {name}"),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
