//! HTML output for a finished grid

use std::fmt::Write;

use super::grid::Grid;

/// Render the grid as a minimal HTML document holding one table.
///
/// Continuation slots produce no markup. `rowspan`/`colspan` attributes are
/// only written when greater than 1.
pub fn render_html(grid: &Grid) -> String {
    let rows: Vec<String> = (0..grid.height()).map(|r| render_row(grid, r)).collect();
    format!(
        "<html><body><table>{}</table></body></html>",
        rows.join("\n")
    )
}

fn render_row(grid: &Grid, row: usize) -> String {
    let mut output = String::from("<tr>");
    for col in 0..grid.width() {
        if let Some(td) = render_cell(grid, row, col) {
            output.push_str(&td);
        }
    }
    output.push_str("</tr>");
    output
}

fn render_cell(grid: &Grid, row: usize, col: usize) -> Option<String> {
    let text = grid.get(row, col)?.text()?;
    let (rowspan, colspan) = grid.span_at(row, col)?;

    let mut td = String::from("<td");
    if rowspan > 1 {
        let _ = write!(td, " rowspan=\"{}\"", rowspan);
    }
    if colspan > 1 {
        let _ = write!(td, " colspan=\"{}\"", colspan);
    }
    let _ = write!(td, ">{}</td>", escape_html(text));
    Some(td)
}

/// Escape the characters that would otherwise be read as markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
