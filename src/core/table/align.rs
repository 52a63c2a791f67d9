//! Source-row to grid-row alignment

/// Maps source row indices to grid row indices.
///
/// When every cell placed from a source row spans several rows, the rows it
/// covers are assumed to be absent from the source, so later source rows
/// are shifted down by the smallest of those spans minus one. The offset
/// never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowAligner {
    current_offset: usize,
}

impl RowAligner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated shift applied to source row indices
    pub fn offset(&self) -> usize {
        self.current_offset
    }

    /// Grid row that source row `source_index` is anchored on
    pub fn grid_row(&self, source_index: usize) -> usize {
        source_index.saturating_add(self.current_offset)
    }

    /// Record the rowspans of the cells actually placed from one source row.
    ///
    /// A row where nothing was placed leaves the offset unchanged.
    pub fn finish_row<I>(&mut self, placed_rowspans: I)
    where
        I: IntoIterator<Item = usize>,
    {
        if let Some(min_span) = placed_rowspans.into_iter().min() {
            self.current_offset = self
                .current_offset
                .saturating_add(min_span.saturating_sub(1));
        }
    }
}
