//! Tabular to HTML Conversion
//!
//! Converts one LaTeX `tabular` environment into an HTML table with correct
//! row and column spans.
//!
//! This module handles:
//! - Comments, spacing hints and rule commands (`\hline`, `\cmidrule`, ...)
//! - `\multirow` and `\multicolumn` cells
//! - Placeholder cells under an earlier span
//! - Rows that are pure vertical continuations of the row above
//!
//! # Architecture
//!
//! Each stage is a pure function over the previous stage's output:
//!
//! ```text
//! Raw LaTeX -> Preprocessing -> Row/Cell Extraction -> Grid Placement -> HTML
//! ```
//!
//! # Example
//!
//! ```
//! use tabulax::core::table::convert_tabular;
//!
//! let output = convert_tabular(r"\begin{tabular}{cc} a & b \\ c & d \end{tabular}").unwrap();
//! assert!(output.content.contains("<td>a</td><td>b</td>"));
//! ```

mod align;
mod cell;
mod extract;
mod grid;
mod preprocess;
mod render;

#[cfg(test)]
mod tests;

use log::debug;

use crate::utils::error::{ConversionOutput, ConversionResult, ConversionWarning};

// Re-export public API
pub use align::RowAligner;
pub use cell::Cell;
pub use extract::{extract_rows, extract_tabular_body, split_cells, TABULAR_END};
pub use grid::{build_grid, build_grid_with_warnings, Grid, GridBuilder, Slot, MAX_GRID_SLOTS};
pub use preprocess::{clean, normalize_source, strip_decorations};
pub use render::{escape_html, render_html};

/// Run every stage up to grid placement
pub fn tabular_to_grid(input: &str) -> ConversionResult<(Grid, Vec<ConversionWarning>)> {
    let normalized = normalize_source(input);
    let body = extract_tabular_body(&normalized)?;
    let rows = extract_rows(&strip_decorations(body));
    debug!(
        "extracted {} rows from tabular body, {} spanning cell(s)",
        rows.len(),
        rows.iter().flatten().filter(|cell| cell.is_spanning()).count()
    );
    build_grid_with_warnings(&rows)
}

/// Convert a LaTeX string holding one tabular environment to HTML
pub fn convert_tabular(input: &str) -> ConversionResult<ConversionOutput> {
    let (grid, warnings) = tabular_to_grid(input).map_err(|err| {
        debug!("tabular conversion rejected: {}", err);
        err
    })?;
    debug!(
        "built {}x{} grid with {} warning(s)",
        grid.height(),
        grid.width(),
        warnings.len()
    );
    Ok(ConversionOutput::with_warnings(render_html(&grid), warnings))
}
