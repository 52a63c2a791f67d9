//! Core conversion modules
//!
//! This module contains the conversion engine:
//! - `table`: LaTeX `tabular` to HTML table converter

pub mod table;

// Re-export main types and functions from table
pub use table::{
    build_grid, clean, convert_tabular, extract_rows, extract_tabular_body, render_html,
    tabular_to_grid, Cell, Grid, GridBuilder, RowAligner, Slot,
};
