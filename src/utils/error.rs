//! Error handling for Tabulax conversions
//!
//! This module provides a unified error type and result type for all
//! conversion operations. Every error is terminal for a single conversion:
//! the public `Option` entry points map it to "no result".

use std::fmt;

/// Conversion error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Normalized input does not end with `\end{tabular}`
    MissingTerminator,
    /// No `\begin{tabular}{..} .. \end{tabular}` span was found
    NoTabularBody,
    /// The tabular body contains no non-blank rows
    EmptyTable,
    /// A cell would be placed past the right edge of the grid
    ColumnOverflow {
        row: usize,
        col: usize,
        width: usize,
    },
    /// A rowspan runs past the bottom edge of the grid
    RowOverflow { row: usize, height: usize },
    /// Span counts describe a grid too large to allocate
    GridTooLarge { rows: usize, cols: usize },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::MissingTerminator => {
                write!(f, "Input does not end with \\end{{tabular}}")
            }
            ConversionError::NoTabularBody => {
                write!(f, "No tabular environment found")
            }
            ConversionError::EmptyTable => {
                write!(f, "Tabular environment has no rows")
            }
            ConversionError::ColumnOverflow { row, col, width } => {
                write!(
                    f,
                    "Span overflow at grid row {}: column {} is outside a table {} columns wide",
                    row, col, width
                )
            }
            ConversionError::RowOverflow { row, height } => {
                write!(
                    f,
                    "Span overflow: row {} is outside a table {} rows high",
                    row, height
                )
            }
            ConversionError::GridTooLarge { rows, cols } => {
                write!(f, "Grid of {} x {} slots is too large", rows, cols)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl ConversionError {
    /// Whether the error comes from inconsistent span counts rather than
    /// a missing tabular environment
    pub fn is_span_error(&self) -> bool {
        matches!(
            self,
            ConversionError::ColumnOverflow { .. }
                | ConversionError::RowOverflow { .. }
                | ConversionError::GridTooLarge { .. }
        )
    }

    pub fn column_overflow(row: usize, col: usize, width: usize) -> Self {
        ConversionError::ColumnOverflow { row, col, width }
    }

    pub fn row_overflow(row: usize, height: usize) -> Self {
        ConversionError::RowOverflow { row, height }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConversionWarning {
    pub message: String,
    /// Source row (0-based) the warning refers to
    pub row: Option<usize>,
    pub suggestion: Option<String>,
}

impl ConversionWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            row: None,
            suggestion: None,
        }
    }

    pub fn at_row(message: impl Into<String>, row: usize) -> Self {
        Self {
            row: Some(row),
            ..Self::new(message)
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(r) = self.row {
            write!(f, "Warning at row {}: {}", r, self.message)?;
        } else {
            write!(f, "Warning: {}", self.message)?;
        }
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}

/// Conversion output with optional warnings
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The rendered HTML
    pub content: String,
    /// Any warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<ConversionWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_terminator_display() {
        let err = ConversionError::MissingTerminator;
        assert!(err.to_string().contains("\\end{tabular}"));
        assert!(!err.is_span_error());
    }

    #[test]
    fn test_column_overflow_display() {
        let err = ConversionError::column_overflow(2, 5, 4);
        let msg = err.to_string();
        assert!(msg.contains("row 2"));
        assert!(msg.contains("column 5"));
        assert!(msg.contains("4 columns"));
        assert!(err.is_span_error());
    }

    #[test]
    fn test_row_overflow_is_span_error() {
        assert!(ConversionError::row_overflow(3, 3).is_span_error());
    }

    #[test]
    fn test_warning_display() {
        let warn = ConversionWarning::at_row("ragged row", 1).with_suggestion("add `&`");
        let msg = warn.to_string();
        assert!(msg.contains("row 1"));
        assert!(msg.contains("ragged row"));
        assert!(msg.contains("(add `&`)"));
    }

    #[test]
    fn test_conversion_output() {
        let output = ConversionOutput::new("<table></table>".to_string());
        assert!(!output.has_warnings());

        let output_with_warn = ConversionOutput::with_warnings(
            "<table></table>".to_string(),
            vec![ConversionWarning::new("test warning")],
        );
        assert!(output_with_warn.has_warnings());
    }
}
