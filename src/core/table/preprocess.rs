//! Text normalization that runs before any table structure is recognized

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `%` to end of line; escaping is checked separately
    static ref LINE_COMMENT: Regex = Regex::new(r"(?m)%.*$").unwrap();

    /// `\\[<len>]` vertical spacing hint after a row break, may span lines
    static ref SPACING_HINT: Regex = Regex::new(r"(?s)\\\\\[.*?\]").unwrap();

    /// Rule, caption and layout commands that never carry cell data
    static ref DECORATION: Regex = Regex::new(concat!(
        r"\\cmidrule(?:\((?:lr|r|l)?\))?\{\s*(?:[0-9]+-[0-9]+)?\s*\}\s*",
        r"|\\cdashline\{[0-9]+(?:-[0-9]+)?\}\s*",
        r"|\\arrayrulecolor\{.*?\}\s*",
        r"|\\caption\{.*?\}\s*",
        r"|\\centering\s*",
        r"|\\hline\s*",
        r"|\\cline\{.*?\}\s*",
        r"|\\(?:top|mid|bottom)rule(?:\[[^\]]*\])?\s*",
    ))
    .unwrap();

    static ref BLANK_LINES: Regex = Regex::new(r"\n\s*\n").unwrap();
}

const TABULAR_NEWLINE: &str = "\\tabularnewline";
const ROW_BREAK: &str = "\\\\";

/// Full preprocessing pass: [`normalize_source`] followed by
/// [`strip_decorations`].
///
/// Never fails; text without any of the recognized constructs comes back
/// trimmed but otherwise unchanged.
pub fn clean(raw: &str) -> String {
    strip_decorations(&normalize_source(raw))
}

/// Reduce raw input to a single logical line.
///
/// Removes unescaped `%` comments, drops every newline and tab, rewrites
/// `\tabularnewline` to `\\`, then removes `\\[..]` spacing hints
/// together with their row break.
pub fn normalize_source(raw: &str) -> String {
    let text = replace_unescaped(raw, &LINE_COMMENT, "");
    let text = text.replace(['\n', '\t'], "");
    let text = text.replace(TABULAR_NEWLINE, ROW_BREAK);
    replace_unescaped(&text, &SPACING_HINT, "")
}

/// Remove rule/caption commands together with the whitespace after them,
/// collapse blank lines, and trim.
///
/// Spacing hints exposed by a removed rule (`\\\hline[2pt]`) go as well.
pub fn strip_decorations(text: &str) -> String {
    let text = DECORATION.replace_all(text, "");
    let text = text.replace(TABULAR_NEWLINE, ROW_BREAK);
    let text = replace_unescaped(&text, &SPACING_HINT, "");
    let text = BLANK_LINES.replace_all(&text, "\n");
    text.trim().to_string()
}

/// Replace every match of `re` that is not immediately preceded by a
/// backslash.
///
/// A rejected match only skips its first character, so a valid match that
/// starts inside a rejected one is still found.
pub(crate) fn replace_unescaped(text: &str, re: &Regex, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut pos = 0;

    while let Some(m) = re.find_at(text, pos) {
        if text[..m.start()].ends_with('\\') {
            pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str(replacement);
        last = m.end();
        pos = if m.end() > m.start() {
            m.end()
        } else {
            m.end() + text[m.end()..].chars().next().map_or(1, char::len_utf8)
        };
        if pos > text.len() {
            break;
        }
    }

    out.push_str(&text[last..]);
    out
}
