//! Dense slot grid built from span-annotated rows

use log::trace;

use super::align::RowAligner;
use super::cell::Cell;
use crate::utils::error::{ConversionError, ConversionResult, ConversionWarning};

/// Upper bound on `rows x columns`; larger span counts are treated as malformed
pub const MAX_GRID_SLOTS: usize = 1 << 20;

/// One position of the finished grid
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "text", rename_all = "snake_case"))]
pub enum Slot {
    /// Top-left position of a cell, holding its text
    Anchor(String),
    /// Covered by a colspan from the left
    ColCont,
    /// Covered by a rowspan from above
    RowCont,
    /// Interior of a cell spanning both rows and columns
    BothCont,
    /// Never written
    Empty,
}

impl Slot {
    pub fn is_continuation(&self) -> bool {
        matches!(self, Slot::ColCont | Slot::RowCont | Slot::BothCont)
    }

    /// Text rendered for this slot, `None` for continuations
    pub fn text(&self) -> Option<&str> {
        match self {
            Slot::Anchor(text) => Some(text.as_str()),
            Slot::Empty => Some(""),
            _ => None,
        }
    }

    /// Marker strings used by the line-oriented grid dumps
    pub fn marker(&self) -> &str {
        match self {
            Slot::Anchor(text) => text.as_str(),
            Slot::ColCont => "<<",
            Slot::RowCont => "^^",
            Slot::BothCont => "..",
            Slot::Empty => "",
        }
    }
}

/// Rectangular matrix of slots
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    rows: Vec<Vec<Slot>>,
    width: usize,
}

impl Grid {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> &[Vec<Slot>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Slot> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Rowspan and colspan of the cell anchored at `(row, col)`, measured
    /// from the continuation runs below and to the right of it.
    ///
    /// Returns `None` for continuation slots and out-of-range positions.
    pub fn span_at(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        if self.get(row, col)?.is_continuation() {
            return None;
        }

        let rowspan = 1 + (row + 1..self.height())
            .take_while(|&r| self.get(r, col) == Some(&Slot::RowCont))
            .count();
        let colspan = 1 + (col + 1..self.width)
            .take_while(|&c| self.get(row, c) == Some(&Slot::ColCont))
            .count();

        Some((rowspan, colspan))
    }
}

/// Places extracted rows onto a grid, one source row at a time.
pub struct GridBuilder {
    slots: Vec<Vec<Option<Slot>>>,
    width: usize,
    aligner: RowAligner,
    warnings: Vec<ConversionWarning>,
}

impl GridBuilder {
    /// Allocate a grid wide enough for the widest row
    pub fn new(rows: &[Vec<Cell>]) -> ConversionResult<Self> {
        let width = rows.iter().map(|row| row_width(row)).max().unwrap_or(0);

        match width.checked_mul(rows.len()) {
            Some(n) if n <= MAX_GRID_SLOTS => {}
            _ => {
                return Err(ConversionError::GridTooLarge {
                    rows: rows.len(),
                    cols: width,
                })
            }
        }

        Ok(GridBuilder {
            slots: vec![vec![None; width]; rows.len()],
            width,
            aligner: RowAligner::new(),
            warnings: Vec::new(),
        })
    }

    /// Place the cells of source row `source_index`.
    ///
    /// Each cell lands at the next free column. An empty cell facing an
    /// occupied slot is a placeholder and only moves the cursor by one;
    /// a non-empty cell skips interior (`BothCont`) slots and is then
    /// written over whatever is there.
    pub fn place_row(&mut self, source_index: usize, cells: &[Cell]) -> ConversionResult<()> {
        let row = self.aligner.grid_row(source_index);
        while self.slots.len() <= row {
            self.slots.push(vec![None; self.width]);
        }

        if row_width(cells) < self.width {
            self.warnings.push(
                ConversionWarning::at_row(
                    format!(
                        "row covers {} of {} columns, trailing cells left empty",
                        row_width(cells),
                        self.width
                    ),
                    source_index,
                )
                .with_suggestion("add `&` separators for the missing cells"),
            );
        }

        let mut col = 0;
        let mut placed_rowspans = Vec::with_capacity(cells.len());

        for cell in cells {
            if self.slot(row, col)?.is_some() {
                if cell.is_empty() {
                    col += 1;
                    continue;
                }
                while matches!(self.slot(row, col)?, Some(Slot::BothCont)) {
                    col += 1;
                }
            }

            if self.write_cell(row, col, cell)? {
                self.warnings.push(
                    ConversionWarning::at_row(
                        format!("cell {:?} overlaps an earlier span", cell.content),
                        source_index,
                    )
                    .with_suggestion("staggered multirow layouts are not supported"),
                );
            }
            placed_rowspans.push(cell.rowspan.max(1));
            col += cell.colspan.max(1);
        }

        if placed_rowspans.is_empty() && !cells.is_empty() {
            self.warnings.push(ConversionWarning::at_row(
                "row holds only placeholders for spans above it",
                source_index,
            ));
        }

        self.aligner.finish_row(placed_rowspans.iter().copied());
        trace!(
            "source row {} -> grid row {}, offset now {}",
            source_index,
            row,
            self.aligner.offset()
        );
        Ok(())
    }

    /// Replace unwritten slots with [`Slot::Empty`]
    pub fn finish(self) -> (Grid, Vec<ConversionWarning>) {
        let rows = self
            .slots
            .into_iter()
            .map(|row| row.into_iter().map(|s| s.unwrap_or(Slot::Empty)).collect())
            .collect();

        (
            Grid {
                rows,
                width: self.width,
            },
            self.warnings,
        )
    }

    fn slot(&self, row: usize, col: usize) -> ConversionResult<&Option<Slot>> {
        self.slots
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or_else(|| ConversionError::column_overflow(row, col, self.width))
    }

    /// Write the anchor and its continuation sentinels. Returns whether any
    /// previously set slot was overwritten.
    fn write_cell(&mut self, row: usize, col: usize, cell: &Cell) -> ConversionResult<bool> {
        let height = self.slots.len();
        let (rowspan, colspan) = (cell.rowspan.max(1), cell.colspan.max(1));

        match col.checked_add(colspan) {
            Some(end) if end <= self.width => {}
            _ => {
                return Err(ConversionError::column_overflow(
                    row,
                    col.saturating_add(colspan - 1),
                    self.width,
                ))
            }
        }
        match row.checked_add(rowspan) {
            Some(end) if end <= height => {}
            _ => {
                return Err(ConversionError::row_overflow(
                    row.saturating_add(rowspan - 1),
                    height,
                ))
            }
        }

        let mut clobbered = false;
        for dr in 0..rowspan {
            for dc in 0..colspan {
                let slot = match (dr, dc) {
                    (0, 0) => Slot::Anchor(cell.content.clone()),
                    (0, _) => Slot::ColCont,
                    (_, 0) => Slot::RowCont,
                    _ => Slot::BothCont,
                };
                let target = &mut self.slots[row + dr][col + dc];
                clobbered |= target.is_some();
                *target = Some(slot);
            }
        }
        Ok(clobbered)
    }
}

fn row_width(cells: &[Cell]) -> usize {
    cells
        .iter()
        .fold(0usize, |acc, cell| acc.saturating_add(cell.colspan.max(1)))
}

/// Build the grid for a sequence of extracted rows
pub fn build_grid(rows: &[Vec<Cell>]) -> ConversionResult<Grid> {
    build_grid_with_warnings(rows).map(|(grid, _)| grid)
}

/// Build the grid and keep the non-fatal warnings raised while placing cells
pub fn build_grid_with_warnings(
    rows: &[Vec<Cell>],
) -> ConversionResult<(Grid, Vec<ConversionWarning>)> {
    if rows.is_empty() {
        return Err(ConversionError::EmptyTable);
    }

    let mut builder = GridBuilder::new(rows)?;
    for (i, cells) in rows.iter().enumerate() {
        builder.place_row(i, cells)?;
    }
    Ok(builder.finish())
}
