//! Delimited text for pasting into other tools.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};
use crate::rows::ExportRow;

/// Column separator of delimited text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Tab,
    Pipe,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Self::Tab => '\t',
            Self::Pipe => '|',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tab => "tab",
            Self::Pipe => "pipe",
        })
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "tab" | "\t" => Ok(Self::Tab),
            "pipe" | "|" => Ok(Self::Pipe),
            other => Err(format!("unsupported delimiter: {other}")),
        }
    }
}

/// One line per row, cells joined by the delimiter, no header line.
///
/// Line breaks and the delimiter inside a cell become spaces so every record
/// stays on one line.
pub fn to_delimited_text(rows: &[ExportRow], delimiter: Delimiter) -> Result<String> {
    if rows.is_empty() {
        return Err(ExportError::EmptyInput);
    }
    let separator = delimiter.as_char().to_string();
    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            row.values()
                .map(|value| clean_cell(value, delimiter))
                .collect::<Vec<_>>()
                .join(&separator)
        })
        .collect();
    Ok(lines.join("\n"))
}

fn clean_cell(value: &str, delimiter: Delimiter) -> String {
    let sep = delimiter.as_char();
    value
        .chars()
        .map(|c| if c == '\n' || c == '\r' || c == sep { ' ' } else { c })
        .collect()
}
