//! Python bindings for tabulax
//!
//! Exposes the tabular → HTML conversion as `tabulax._native`.

use pyo3::prelude::*;

/// Convert a LaTeX tabular to an HTML table, or `None` when there is no result
#[pyfunction]
fn latex_to_html(latex: &str) -> Option<String> {
    tabulax::latex_to_html(latex)
}

/// Like `latex_to_html`, but raises `ValueError` with the reason instead of
/// returning `None`
#[pyfunction]
fn try_latex_to_html(latex: &str) -> PyResult<String> {
    tabulax::try_latex_to_html(latex)
        .map_err(|err| pyo3::exceptions::PyValueError::new_err(err.to_string()))
}

/// Grid as rows of strings, with `<<`, `^^` and `..` marking span continuations
#[pyfunction]
fn latex_to_grid(latex: &str) -> Option<Vec<Vec<String>>> {
    let grid = tabulax::latex_to_grid(latex).ok()?;
    Some(
        grid.rows()
            .iter()
            .map(|row| row.iter().map(|slot| slot.marker().to_string()).collect())
            .collect(),
    )
}

#[pymodule]
fn _native(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(latex_to_html, m)?)?;
    m.add_function(wrap_pyfunction!(try_latex_to_html, m)?)?;
    m.add_function(wrap_pyfunction!(latex_to_grid, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
