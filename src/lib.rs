//! # tabulax
//!
//! LaTeX `tabular` to HTML table converter written in Rust.
//!
//! ## Features
//!
//! - **Span Reconstruction**: `\multirow` / `\multicolumn` cells become
//!   `rowspan` / `colspan` attributes on a rectangular grid
//! - **Noise Removal**: comments, spacing hints and rule commands
//!   (`\hline`, `\cline`, booktabs rules, `\cmidrule`, ...) are dropped
//! - **All-or-Nothing**: malformed span counts produce no result rather than
//!   a partially rendered table
//! - **Stateless**: every call is a pure function of its input
//! - **WASM Support**: Compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ```rust
//! use tabulax::latex_to_html;
//!
//! let html = latex_to_html(
//!     r"\begin{tabular}{cc} \multirow{2}{*}{x} & y \\ & z \end{tabular}",
//! )
//! .unwrap();
//! assert!(html.contains(r#"<td rowspan="2">x</td>"#));
//!
//! // Input that does not end with the closing tag has no result
//! assert!(latex_to_html(r"\begin{tabular}{cc} a & b").is_none());
//! ```

/// Core conversion modules
pub mod core;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core conversion types
pub use crate::core::table::{
    build_grid, build_grid_with_warnings, clean, escape_html, extract_rows, extract_tabular_body,
    normalize_source, render_html, split_cells, strip_decorations, Cell, Grid, GridBuilder,
    RowAligner, Slot,
};

// Re-export utilities
pub use utils::error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};

/// Convert a LaTeX string holding one tabular environment to an HTML table
///
/// # Arguments
/// * `input` - LaTeX text ending with `\end{tabular}`
///
/// # Returns
/// The HTML document, or `None` when the input has no usable tabular
/// environment or its span counts are inconsistent
pub fn latex_to_html(input: &str) -> Option<String> {
    try_latex_to_html(input).ok()
}

/// Like [`latex_to_html`], but reports why a conversion has no result
pub fn try_latex_to_html(input: &str) -> ConversionResult<String> {
    latex_to_html_with_diagnostics(input).map(|output| output.content)
}

/// Convert and keep the non-fatal warnings raised while placing cells
pub fn latex_to_html_with_diagnostics(input: &str) -> ConversionResult<ConversionOutput> {
    crate::core::table::convert_tabular(input)
}

/// Stop after grid placement, without rendering
pub fn latex_to_grid(input: &str) -> ConversionResult<Grid> {
    crate::core::table::tabular_to_grid(input).map(|(grid, _)| grid)
}
