use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use ndarray::{Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;

use crate::axis::Axis;
use crate::error::{Error, Result};
use crate::matrix::{LabeledMatrix, LabeledMatrixMut};
use crate::rank::rank_into;

/// Dense labeled matrix of `f64`, row-major.
///
/// Row and column keys must be unique within their axis; their insertion
/// order is the iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<R, C>
where
    R: Eq + Hash,
    C: Eq + Hash,
{
    row_keys: Vec<R>,
    col_keys: Vec<C>,
    row_index: HashMap<R, usize>,
    col_index: HashMap<C, usize>,
    values: Array2<f64>,
}

fn build_index<K>(keys: &[K], axis: Axis) -> Result<HashMap<K, usize>>
where
    K: Clone + Eq + Hash + Debug,
{
    let mut index = HashMap::with_capacity(keys.len());
    for (pos, key) in keys.iter().enumerate() {
        if index.insert(key.clone(), pos).is_some() {
            return Err(Error::DuplicateKey {
                axis,
                key: format!("{:?}", key),
            });
        }
    }
    Ok(index)
}

impl<R, C> Frame<R, C>
where
    R: Clone + Eq + Hash + Debug,
    C: Clone + Eq + Hash + Debug,
{
    pub fn new(row_keys: Vec<R>, col_keys: Vec<C>, values: Array2<f64>) -> Result<Self> {
        let (found_rows, found_cols) = values.dim();
        if found_rows != row_keys.len() || found_cols != col_keys.len() {
            return Err(Error::InconsistentShape {
                rows: row_keys.len(),
                cols: col_keys.len(),
                found_rows,
                found_cols,
            });
        }
        let row_index = build_index(&row_keys, Axis::Rows)?;
        let col_index = build_index(&col_keys, Axis::Columns)?;
        Ok(Frame {
            row_keys,
            col_keys,
            row_index,
            col_index,
            values,
        })
    }

    pub fn from_elem(row_keys: Vec<R>, col_keys: Vec<C>, value: f64) -> Result<Self> {
        let values = Array2::from_elem((row_keys.len(), col_keys.len()), value);
        Self::new(row_keys, col_keys, values)
    }

    /// Builds a frame from row-major nested vectors.
    pub fn from_rows(row_keys: Vec<R>, col_keys: Vec<C>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = col_keys.len();
        let mut flat = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(Error::InconsistentShape {
                    rows: row_keys.len(),
                    cols: n_cols,
                    found_rows: n_rows,
                    found_cols: row.len(),
                });
            }
            flat.extend(row);
        }
        let values = Array2::from_shape_vec((n_rows, n_cols), flat).map_err(|_| {
            Error::InconsistentShape {
                rows: row_keys.len(),
                cols: n_cols,
                found_rows: n_rows,
                found_cols: n_cols,
            }
        })?;
        Self::new(row_keys, col_keys, values)
    }

    pub fn row_keys(&self) -> &[R] {
        &self.row_keys
    }

    pub fn col_keys(&self) -> &[C] {
        &self.col_keys
    }

    pub fn row_count(&self) -> usize {
        self.row_keys.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_keys.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn row_position(&self, row: &R) -> Option<usize> {
        self.row_index.get(row).copied()
    }

    pub fn col_position(&self, col: &C) -> Option<usize> {
        self.col_index.get(col).copied()
    }

    fn cell(&self, row: &R, col: &C) -> Result<(usize, usize)> {
        let i = self
            .row_position(row)
            .ok_or_else(|| Error::RowKeyNotFound(format!("{:?}", row)))?;
        let j = self
            .col_position(col)
            .ok_or_else(|| Error::ColumnKeyNotFound(format!("{:?}", col)))?;
        Ok((i, j))
    }

    pub fn get(&self, row: &R, col: &C) -> Result<f64> {
        let (i, j) = self.cell(row, col)?;
        Ok(self.values[[i, j]])
    }

    pub fn set(&mut self, row: &R, col: &C, value: f64) -> Result<()> {
        let (i, j) = self.cell(row, col)?;
        self.values[[i, j]] = value;
        Ok(())
    }

    /// View of lane `index` along `axis` (a row for `Rows`, a column for
    /// `Columns`). Panics if `index` is out of bounds.
    pub fn lane(&self, axis: Axis, index: usize) -> ArrayView1<'_, f64> {
        self.values.index_axis(axis.into(), index)
    }

    /// Ranks every lane along `axis` into a new frame with the same keys.
    ///
    /// Lanes of the backing array are ranked in parallel straight into the
    /// matching lanes of the result, each worker reusing one scratch buffer.
    pub fn rank(&self, axis: Axis) -> Self {
        let lanes: ndarray::Axis = axis.into();
        let mut ranks = Array2::<f64>::from_elem(self.values.dim(), f64::NAN);

        ranks
            .axis_iter_mut(lanes)
            .into_par_iter()
            .zip(self.values.axis_iter(lanes).into_par_iter())
            .for_each_init(Vec::new, |order, (mut out, lane)| {
                rank_into(&lane, &mut out, order);
            });

        Frame {
            row_keys: self.row_keys.clone(),
            col_keys: self.col_keys.clone(),
            row_index: self.row_index.clone(),
            col_index: self.col_index.clone(),
            values: ranks,
        }
    }

    pub fn rank_rows(&self) -> Self {
        self.rank(Axis::Rows)
    }

    pub fn rank_columns(&self) -> Self {
        self.rank(Axis::Columns)
    }
}

impl<R, C> LabeledMatrix for Frame<R, C>
where
    R: Clone + Eq + Hash + Debug + Send + Sync,
    C: Clone + Eq + Hash + Debug + Send + Sync,
{
    type RowKey = R;
    type ColKey = C;
    type Error = Error;

    fn row_keys(&self) -> &[R] {
        &self.row_keys
    }

    fn col_keys(&self) -> &[C] {
        &self.col_keys
    }

    fn value(&self, row: &R, col: &C) -> Result<f64> {
        self.get(row, col)
    }

    fn read_lane(&self, axis: Axis, index: usize, lane: &mut Vec<f64>) -> Result<()> {
        lane.clear();
        lane.extend(self.lane(axis, index).iter().copied());
        Ok(())
    }
}

impl<R, C> LabeledMatrixMut for Frame<R, C>
where
    R: Clone + Eq + Hash + Debug + Send + Sync,
    C: Clone + Eq + Hash + Debug + Send + Sync,
{
    fn with_keys(rows: Vec<R>, cols: Vec<C>) -> Result<Self> {
        Frame::from_elem(rows, cols, f64::NAN)
    }

    fn set_value(&mut self, row: &R, col: &C, value: f64) -> Result<()> {
        self.set(row, col, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> Frame<&'static str, u32> {
        Frame::new(
            vec!["a", "b", "c"],
            vec![10, 20],
            array![[1.0, 2.0], [4.0, 3.0], [5.0, 5.0]],
        )
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = Frame::from_elem(vec!["a", "a"], vec![1], 0.0).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { axis: Axis::Rows, .. }));
        let err = Frame::from_elem(vec!["a"], vec![1, 1], 0.0).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { axis: Axis::Columns, .. }));
    }

    #[test]
    fn rejects_shape_mismatch() {
        let err = Frame::new(vec!["a"], vec![1, 2], array![[1.0, 2.0], [3.0, 4.0]]).unwrap_err();
        assert!(matches!(err, Error::InconsistentShape { rows: 1, cols: 2, found_rows: 2, found_cols: 2 }));
        let err = Frame::from_rows(vec!["a", "b"], vec![1, 2], vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, Error::InconsistentShape { .. }));
    }

    #[test]
    fn get_and_set_by_key() {
        let mut frame = sample();
        assert_eq!(frame.get(&"b", &20).unwrap(), 3.0);
        frame.set(&"b", &20, 9.0).unwrap();
        assert_eq!(frame.values()[[1, 1]], 9.0);
        assert!(matches!(frame.get(&"z", &20), Err(Error::RowKeyNotFound(_))));
        assert!(matches!(frame.get(&"a", &30), Err(Error::ColumnKeyNotFound(_))));
    }

    #[test]
    fn lanes_follow_axis() {
        let frame = sample();
        assert_eq!(frame.lane(Axis::Rows, 1).to_vec(), vec![4.0, 3.0]);
        assert_eq!(frame.lane(Axis::Columns, 1).to_vec(), vec![2.0, 3.0, 5.0]);
    }

    #[test]
    fn ranks_keep_keys() {
        let frame = sample();
        let by_row = frame.rank_rows();
        assert_eq!(by_row.row_keys(), frame.row_keys());
        assert_eq!(by_row.col_keys(), frame.col_keys());
        assert_eq!(by_row.values(), array![[1.0, 2.0], [2.0, 1.0], [1.5, 1.5]]);

        let by_col = frame.rank_columns();
        assert_eq!(by_col.values(), array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]);
    }
}
