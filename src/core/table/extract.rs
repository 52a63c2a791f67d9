//! Tabular body location and row/cell splitting

use lazy_static::lazy_static;
use regex::Regex;

use super::cell::Cell;
use crate::utils::error::{ConversionError, ConversionResult};

lazy_static! {
    /// First `\begin{tabular}{spec}` up to the nearest `\end{tabular}`
    static ref TABULAR: Regex =
        Regex::new(r"(?s)\\begin\{tabular\}\s*\{.*?\}(.*?)\\end\{tabular\}").unwrap();
}

pub const TABULAR_END: &str = "\\end{tabular}";
const ROW_SEPARATOR: &str = "\\\\";

/// Locate the body of the tabular environment in normalized input.
///
/// The input must end exactly with `\end{tabular}`; trailing text or
/// whitespace is rejected. The column spec is skipped up to its first `}`.
pub fn extract_tabular_body(normalized: &str) -> ConversionResult<&str> {
    if !normalized.ends_with(TABULAR_END) {
        return Err(ConversionError::MissingTerminator);
    }

    TABULAR
        .captures(normalized)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(ConversionError::NoTabularBody)
}

/// Split a cleaned tabular body into rows of cells.
///
/// Rows are separated by `\\` and dropped when blank; cells are separated
/// by unescaped `&`.
pub fn extract_rows(body: &str) -> Vec<Vec<Cell>> {
    body.trim()
        .split(ROW_SEPARATOR)
        .filter(|row| !row.trim().is_empty())
        .map(|row| split_cells(row).into_iter().map(Cell::parse).collect())
        .collect()
}

/// Split a row on `&` not preceded by a backslash
pub fn split_cells(row: &str) -> Vec<&str> {
    let mut cells = Vec::new();
    let mut start = 0;
    let mut prev = None;

    for (i, c) in row.char_indices() {
        if c == '&' && prev != Some('\\') {
            cells.push(&row[start..i]);
            start = i + 1;
        }
        prev = Some(c);
    }
    cells.push(&row[start..]);
    cells
}
