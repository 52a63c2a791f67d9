//! Cell type and span macro resolution

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `\multirow{N}{width}{` up to the opening brace of the text argument
    static ref MULTIROW: Regex = Regex::new(r"\\multirow\{(\d+)\}\{.*?\}\{").unwrap();
    /// `\multicolumn{N}{colspec}{` up to the opening brace of the text argument
    static ref MULTICOLUMN: Regex = Regex::new(r"\\multicolumn\{(\d+)\}\{.*?\}\{").unwrap();
}

/// A single extracted table cell with its span counts
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cell {
    /// Cell text with span macros unwrapped
    pub content: String,
    /// Number of rows this cell spans (at least 1)
    pub rowspan: usize,
    /// Number of columns this cell spans (at least 1)
    pub colspan: usize,
}

impl Cell {
    /// Create a 1x1 cell
    pub fn new(content: impl Into<String>) -> Self {
        Cell {
            content: content.into(),
            rowspan: 1,
            colspan: 1,
        }
    }

    /// Create a cell with explicit spans; zero spans are raised to 1
    pub fn with_span(content: impl Into<String>, rowspan: usize, colspan: usize) -> Self {
        Cell {
            content: content.into(),
            rowspan: rowspan.max(1),
            colspan: colspan.max(1),
        }
    }

    /// Create an empty placeholder cell
    pub fn empty() -> Self {
        Cell::new(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn is_spanning(&self) -> bool {
        self.rowspan > 1 || self.colspan > 1
    }

    /// Parse one raw column token.
    ///
    /// `\multirow` is resolved first, then `\multicolumn` on the result.
    /// Only the first occurrence of each macro counts; the width and
    /// column-spec arguments are discarded.
    pub fn parse(raw: &str) -> Self {
        let mut cell = Cell::new(raw.trim());

        if let Some((span, content)) = unwrap_span_macro(&MULTIROW, &cell.content) {
            cell.rowspan = span;
            cell.content = content;
        }

        if let Some((span, content)) = unwrap_span_macro(&MULTICOLUMN, &cell.content) {
            cell.colspan = span;
            cell.content = content;
        }

        cell
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

/// Replace the first macro occurrence with its trimmed text argument.
///
/// The text argument is brace-balanced, so nested groups such as
/// `{\textbf{x}}` stay intact. Returns the span count and the rewritten,
/// trimmed content, or `None` when the macro is absent or unterminated.
fn unwrap_span_macro(head: &Regex, content: &str) -> Option<(usize, String)> {
    let caps = head.captures(content)?;
    let whole = caps.get(0)?;
    let close = whole.end() + find_closing_brace(&content[whole.end()..])?;
    let inner = content[whole.end()..close].trim();

    let rewritten = format!("{}{}{}", &content[..whole.start()], inner, &content[close + 1..]);

    Some((parse_span(&caps[1]), rewritten.trim().to_string()))
}

/// Byte offset of the `}` closing a group whose `{` was already consumed.
/// Escaped braces (`\{`, `\}`) do not count.
fn find_closing_brace(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Span counts are clamped to at least 1; counts too large for `usize`
/// saturate so that grid placement reports them as overflow.
fn parse_span(digits: &str) -> usize {
    digits.parse::<usize>().unwrap_or(usize::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_cell() {
        let cell = Cell::parse("  Hello ");
        assert_eq!(cell, Cell::new("Hello"));
        assert!(!cell.is_spanning());
    }

    #[test]
    fn test_multirow() {
        let cell = Cell::parse("\\multirow{3}{*}{ Name }");
        assert_eq!(cell, Cell::with_span("Name", 3, 1));
    }

    #[test]
    fn test_multicolumn() {
        let cell = Cell::parse("\\multicolumn{2}{|c|}{Wide}");
        assert_eq!(cell, Cell::with_span("Wide", 1, 2));
    }

    #[test]
    fn test_multicolumn_wrapping_multirow() {
        let cell = Cell::parse("\\multicolumn{2}{c}{\\multirow{2}{*}{X}}");
        assert_eq!(cell.rowspan, 2);
        assert_eq!(cell.colspan, 2);
        assert_eq!(cell.content, "X");
    }

    #[test]
    fn test_multirow_wrapping_multicolumn() {
        let cell = Cell::parse("\\multirow{2}{*}{\\multicolumn{3}{c}{X}}");
        assert_eq!(cell.rowspan, 2);
        assert_eq!(cell.colspan, 3);
        assert_eq!(cell.content, "X");
    }

    #[test]
    fn test_surrounding_text_kept() {
        let cell = Cell::parse("a \\multicolumn{2}{c}{b} c");
        assert_eq!(cell, Cell::with_span("a b c", 1, 2));
    }

    #[test]
    fn test_empty_placeholder() {
        let cell = Cell::parse("\\multicolumn{2}{c}{}");
        assert!(cell.is_empty());
        assert_eq!(cell.colspan, 2);
    }

    #[test]
    fn test_zero_span_clamped() {
        let cell = Cell::parse("\\multirow{0}{*}{x}");
        assert_eq!(cell.rowspan, 1);
    }

    #[test]
    fn test_huge_span_saturates() {
        let cell = Cell::parse("\\multicolumn{99999999999999999999999}{c}{x}");
        assert_eq!(cell.colspan, usize::MAX);
    }

    #[test]
    fn test_nested_braces_in_text() {
        let cell = Cell::parse("\\multirow{2}{*}{\\textbf{Total} \\{x\\}}");
        assert_eq!(cell, Cell::with_span("\\textbf{Total} \\{x\\}", 2, 1));
    }

    #[test]
    fn test_unterminated_macro_left_alone() {
        let cell = Cell::parse("\\multirow{2}{*}{x");
        assert_eq!(cell, Cell::new("\\multirow{2}{*}{x"));
    }

    #[test]
    fn test_unknown_macro_passes_through() {
        let cell = Cell::parse("\\textbf{bold}");
        assert_eq!(cell.content, "\\textbf{bold}");
    }
}
