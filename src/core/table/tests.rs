//! Regression tests for tabular conversion

use super::*;
use crate::utils::error::ConversionError;

fn html(input: &str) -> String {
    convert_tabular(input).unwrap().content
}

/// Every anchor's rectangle is made of exactly the expected sentinels
fn assert_span_topology(grid: &Grid) {
    for r in 0..grid.height() {
        for c in 0..grid.width() {
            let Some((rowspan, colspan)) = grid.span_at(r, c) else {
                continue;
            };
            for dr in 0..rowspan {
                for dc in 0..colspan {
                    let expected = match (dr, dc) {
                        (0, 0) => continue,
                        (0, _) => Slot::ColCont,
                        (_, 0) => Slot::RowCont,
                        _ => Slot::BothCont,
                    };
                    assert_eq!(
                        grid.get(r + dr, c + dc),
                        Some(&expected),
                        "anchor ({}, {}) offset ({}, {})",
                        r,
                        c,
                        dr,
                        dc
                    );
                }
            }
        }
    }
}

#[test]
fn test_rules_removed_two_by_two() {
    let out = html("\\begin{tabular}{cc}\\hline a & b \\\\ c & d \\\\\\hline\\end{tabular}");
    assert_eq!(
        out,
        "<html><body><table><tr><td>a</td><td>b</td></tr>\n<tr><td>c</td><td>d</td></tr></table></body></html>"
    );
}

#[test]
fn test_multirow_first_column() {
    let out = html("\\begin{tabular}{cc} \\multirow{2}{*}{x} & y \\\\ & z \\end{tabular}");
    assert!(out.contains("<tr><td rowspan=\"2\">x</td><td>y</td></tr>"));
    assert!(out.contains("<tr><td>z</td></tr>"));
}

#[test]
fn test_multicolumn_first_row() {
    let out = html("\\begin{tabular}{ccc} \\multicolumn{2}{c}{m} & n \\\\ p & q & r \\end{tabular}");
    assert!(out.contains("<tr><td colspan=\"2\">m</td><td>n</td></tr>"));
    assert!(out.contains("<tr><td>p</td><td>q</td><td>r</td></tr>"));
}

#[test]
fn test_missing_end_tag() {
    assert_eq!(
        convert_tabular("\\begin{tabular}{cc} a & b \\\\ c & d").unwrap_err(),
        ConversionError::MissingTerminator
    );
}

#[test]
fn test_booktabs_table() {
    let input = "\\begin{tabular}{lcc}\n\\toprule\nModel & \\multicolumn{2}{c}{Score} \\\\\n\\cmidrule(lr){2-3}\n & Dev & Test \\\\\n\\midrule\nA & 1.0 & 2.0 \\\\\n\\bottomrule\n\\end{tabular}";
    let (grid, _) = tabular_to_grid(input).unwrap();
    assert_eq!(grid.height(), 3);
    assert_eq!(grid.width(), 3);
    assert_eq!(grid.get(0, 1), Some(&Slot::Anchor("Score".into())));
    assert_eq!(grid.get(0, 2), Some(&Slot::ColCont));
    assert_eq!(grid.get(1, 0), Some(&Slot::Anchor(String::new())));
    assert_span_topology(&grid);
}

#[test]
fn test_header_block_with_multirow_and_multicolumn() {
    let input = concat!(
        "\\begin{tabular}{|c|c|c|c|}\\hline ",
        "\\multirow{2}{*}{Method} & \\multicolumn{3}{c|}{Metrics} \\\\ \\cline{2-4} ",
        " & P & R & F1 \\\\ \\hline ",
        "Ours & 90.1 & 88.2 & 89.1 \\\\ \\hline",
        "\\end{tabular}"
    );
    let (grid, warnings) = tabular_to_grid(input).unwrap();
    assert!(warnings.is_empty(), "{:?}", warnings);
    assert_eq!(grid.span_at(0, 0), Some((2, 1)));
    assert_eq!(grid.span_at(0, 1), Some((1, 3)));
    assert_eq!(grid.get(1, 1), Some(&Slot::Anchor("P".into())));
    assert_span_topology(&grid);

    let out = render_html(&grid);
    assert!(out.contains("<td rowspan=\"2\">Method</td><td colspan=\"3\">Metrics</td>"));
    assert!(out.contains("<tr><td>P</td><td>R</td><td>F1</td></tr>"));
}

#[test]
fn test_block_placeholder_advances_one_column() {
    let input = concat!(
        "\\begin{tabular}{ccc}",
        "\\multicolumn{2}{c}{\\multirow{2}{*}{X}} & a \\\\",
        "\\multicolumn{2}{c}{} & b \\\\",
        "\\end{tabular}"
    );
    let (grid, _) = tabular_to_grid(input).unwrap();
    assert_eq!(grid.rows()[1], vec![Slot::RowCont, Slot::BothCont, Slot::Anchor("b".into())]);
    assert_span_topology(&grid);
    assert!(render_html(&grid).contains("<td rowspan=\"2\" colspan=\"2\">X</td>"));
}

#[test]
fn test_pure_continuation_row_inserted() {
    let input = concat!(
        "\\begin{tabular}{cc}",
        "\\multirow{2}{*}{a} & \\multirow{2}{*}{b} \\\\",
        "c & d",
        "\\end{tabular}"
    );
    let (grid, _) = tabular_to_grid(input).unwrap();
    assert_eq!(grid.height(), 3);
    assert_eq!(grid.rows()[2], vec![Slot::Anchor("c".into()), Slot::Anchor("d".into())]);
    assert_span_topology(&grid);
}

#[test]
fn test_escaped_ampersand_stays_in_cell() {
    let out = html("\\begin{tabular}{cc} R\\&D & 5\\% \\end{tabular}");
    assert!(out.contains("<td>R\\&amp;D</td><td>5\\%</td>"));
}

#[test]
fn test_comments_and_spacing_hints() {
    let input = "\\begin{tabular}{cc} % header\na & b \\\\[2pt]\nc & d % last\n\\end{tabular}";
    let (grid, _) = tabular_to_grid(input).unwrap();
    // The hint takes its row break with it, joining both source lines.
    assert_eq!(grid.height(), 1);
    assert_eq!(
        grid.rows()[0],
        vec![
            Slot::Anchor("a".into()),
            Slot::Anchor("b c".into()),
            Slot::Anchor("d".into())
        ]
    );
}

#[test]
fn test_comments_keep_row_breaks() {
    let input = r"\begin{tabular}{cc} a & b \\ % first
c & d % last
\end{tabular}";
    let (grid, _) = tabular_to_grid(input).unwrap();
    assert_eq!(grid.height(), 2);
    assert_eq!(grid.get(1, 1), Some(&Slot::Anchor("d".into())));
}

#[test]
fn test_placeholder_row_between_rows() {
    let input = concat!(
        "\\begin{tabular}{cc}",
        "\\multirow{3}{*}{a} & b \\\\",
        "\\multicolumn{1}{c}{} \\\\",
        " & c \\\\",
        "d & e",
        "\\end{tabular}"
    );
    let (grid, warnings) = tabular_to_grid(input).unwrap();
    assert_eq!(grid.height(), 4);
    assert_eq!(grid.rows()[1], vec![Slot::RowCont, Slot::Empty]);
    assert_eq!(grid.rows()[2], vec![Slot::RowCont, Slot::Anchor("c".into())]);
    assert_eq!(grid.rows()[3], vec![Slot::Anchor("d".into()), Slot::Anchor("e".into())]);
    assert!(warnings.iter().any(|w| w.row == Some(1) && w.message.contains("placeholders")));
    assert_span_topology(&grid);
}

#[test]
fn test_tabularnewline_rows() {
    let (grid, _) =
        tabular_to_grid("\\begin{tabular}{c} a \\tabularnewline b \\tabularnewline\\end{tabular}")
            .unwrap();
    assert_eq!(grid.height(), 2);
}

#[test]
fn test_unknown_commands_pass_through() {
    let out = html("\\begin{tabular}{cc} \\textbf{A} & $x^2$ \\end{tabular}");
    assert!(out.contains("<td>\\textbf{A}</td><td>$x^2$</td>"));
}

#[test]
fn test_first_tabular_only() {
    let input = "\\begin{tabular}{c} a \\end{tabular} and \\begin{tabular}{c} b \\end{tabular}";
    let (grid, _) = tabular_to_grid(input).unwrap();
    assert_eq!(grid.height(), 1);
    assert_eq!(grid.get(0, 0), Some(&Slot::Anchor("a".into())));
}

#[test]
fn test_empty_body_has_no_result() {
    assert_eq!(
        convert_tabular("\\begin{tabular}{cc} \\hline \\\\ \\end{tabular}").unwrap_err(),
        ConversionError::EmptyTable
    );
}

#[test]
fn test_span_overflow_has_no_result() {
    let input = "\\begin{tabular}{cc} a & b \\\\ \\multirow{3}{*}{c} & d \\end{tabular}";
    assert!(convert_tabular(input).unwrap_err().is_span_error());
}
