//! WASM bindings for tabulax
//!
//! This module provides JavaScript-accessible functions for LaTeX tabular →
//! HTML conversion.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::Serialize;

/// Conversion result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize)]
pub struct ConvertResult {
    /// The rendered HTML, empty when there is no result
    pub output: String,
    /// Whether the conversion produced a table
    pub success: bool,
    /// Reason the conversion produced no result
    pub error: Option<String>,
    /// Warnings during conversion
    pub warnings: Vec<String>,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert a LaTeX tabular to HTML
///
/// # Arguments
/// * `input` - LaTeX text ending with `\end{tabular}`
///
/// # Returns
/// `{ output, success, error, warnings }`
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "latexTableToHtml")]
pub fn latex_table_to_html_wasm(input: &str) -> JsValue {
    let result = match crate::latex_to_html_with_diagnostics(input) {
        Ok(output) => ConvertResult {
            output: output.content,
            success: true,
            error: None,
            warnings: output.warnings.iter().map(ToString::to_string).collect(),
        },
        Err(err) => ConvertResult {
            output: String::new(),
            success: false,
            error: Some(err.to_string()),
            warnings: vec![],
        },
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Get the grid (rows of slot markers) for a LaTeX tabular, or `null`
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "latexTableToGrid")]
pub fn latex_table_to_grid_wasm(input: &str) -> JsValue {
    match crate::latex_to_grid(input) {
        Ok(grid) => serde_wasm_bindgen::to_value(&grid).unwrap_or(JsValue::NULL),
        Err(_) => JsValue::NULL,
    }
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
