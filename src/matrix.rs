//! Capability traits the ranking core needs from a labeled table.
//!
//! The ranking routines in [`crate::ranking`] only ever see a matrix through
//! these traits, so any table type (or a test double) can be ranked by
//! implementing them.

use crate::axis::Axis;

/// Read side of a labeled numeric matrix.
///
/// Keys are enumerated in a stable order, which is the order lanes are
/// extracted and results are written back in.
pub trait LabeledMatrix {
    type RowKey: Clone + Send + Sync;
    type ColKey: Clone + Send + Sync;
    type Error: std::error::Error + Send + Sync + 'static;

    fn row_keys(&self) -> &[Self::RowKey];

    fn col_keys(&self) -> &[Self::ColKey];

    fn row_count(&self) -> usize {
        self.row_keys().len()
    }

    fn col_count(&self) -> usize {
        self.col_keys().len()
    }

    fn value(&self, row: &Self::RowKey, col: &Self::ColKey) -> Result<f64, Self::Error>;

    /// Replaces the contents of `lane` with lane `index` along `axis`, in key
    /// order. Implementations with contiguous storage may override this.
    fn read_lane(&self, axis: Axis, index: usize, lane: &mut Vec<f64>) -> Result<(), Self::Error> {
        let rows = self.row_keys();
        let cols = self.col_keys();
        lane.clear();
        for pos in 0..axis.lane_len(rows.len(), cols.len()) {
            let (r, c) = axis.cell(index, pos);
            lane.push(self.value(&rows[r], &cols[c])?);
        }
        Ok(())
    }
}

/// Write side: allocation of a same-keyed matrix and cell writes.
pub trait LabeledMatrixMut: LabeledMatrix + Sized {
    /// A matrix with the given keys, every cell NaN.
    fn with_keys(rows: Vec<Self::RowKey>, cols: Vec<Self::ColKey>) -> Result<Self, Self::Error>;

    fn set_value(&mut self, row: &Self::RowKey, col: &Self::ColKey, value: f64) -> Result<(), Self::Error>;
}
