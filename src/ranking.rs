use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use ndarray::{aview1, Array1};
use rayon::prelude::*;

use crate::axis::Axis;
use crate::error::{Error, Result};
use crate::matrix::{LabeledMatrix, LabeledMatrixMut};
use crate::rank::rank_into;

/// Ranks every row of `matrix` across its columns.
pub fn rank_along_rows<M>(matrix: &M) -> Result<M>
where
    M: LabeledMatrixMut + Sync,
{
    rank_matrix(matrix, Axis::Rows)
}

/// Ranks every column of `matrix` across its rows.
pub fn rank_along_columns<M>(matrix: &M) -> Result<M>
where
    M: LabeledMatrixMut + Sync,
{
    rank_matrix(matrix, Axis::Columns)
}

/// Ranks each lane of `matrix` along `axis` into a newly allocated matrix
/// with the same keys. The source is only read.
///
/// Lanes are extracted and ranked in parallel; any collaborator error or
/// lane of the wrong length aborts the whole call.
pub fn rank_matrix<M>(matrix: &M, axis: Axis) -> Result<M>
where
    M: LabeledMatrixMut + Sync,
{
    rank_lanes(matrix, axis, None)
}

/// Like [`rank_matrix`], but gives up with [`Error::Cancelled`] once `cancel`
/// is set. The flag is checked before each lane, never inside one.
pub fn rank_matrix_cancellable<M>(matrix: &M, axis: Axis, cancel: &AtomicBool) -> Result<M>
where
    M: LabeledMatrixMut + Sync,
{
    rank_lanes(matrix, axis, Some(cancel))
}

fn rank_lanes<M>(matrix: &M, axis: Axis, cancel: Option<&AtomicBool>) -> Result<M>
where
    M: LabeledMatrixMut + Sync,
{
    let (n_rows, n_cols) = (matrix.row_count(), matrix.col_count());
    let n_lanes = axis.lane_count(n_rows, n_cols);
    let expected = axis.lane_len(n_rows, n_cols);
    debug!(
        "ranking {} {} lanes of {} values ({}x{})",
        n_lanes, axis, expected, n_rows, n_cols
    );

    // Rank-transform each lane
    let ranked: Vec<Array1<f64>> = (0..n_lanes)
        .into_par_iter()
        .map_init(
            || {
                (
                    Vec::<f64>::with_capacity(expected),
                    Vec::<usize>::with_capacity(expected),
                )
            },
            |(lane, order), index| {
                if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                    return Err(Error::Cancelled { axis });
                }
                matrix
                    .read_lane(axis, index, lane)
                    .map_err(|err| Error::lane(axis, index, err))?;
                if lane.len() != expected {
                    return Err(Error::ShapeMismatch {
                        axis,
                        index,
                        expected,
                        found: lane.len(),
                    });
                }
                let mut ranks = Array1::from_elem(expected, f64::NAN);
                rank_into(&aview1(lane.as_slice()), &mut ranks, order);
                Ok(ranks)
            },
        )
        .collect::<Result<_>>()?;

    let row_keys = matrix.row_keys();
    let col_keys = matrix.col_keys();
    let mut result = M::with_keys(row_keys.to_vec(), col_keys.to_vec())
        .map_err(|err| Error::Allocation(Box::new(err)))?;

    for (index, ranks) in ranked.iter().enumerate() {
        for (pos, &rank) in ranks.iter().enumerate() {
            let (r, c) = axis.cell(index, pos);
            result
                .set_value(&row_keys[r], &col_keys[c], rank)
                .map_err(|err| Error::lane(axis, index, err))?;
        }
    }

    debug!("ranked {} {} lanes", ranked.len(), axis);
    Ok(result)
}
