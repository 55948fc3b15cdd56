//! Natural ranking of labeled numeric matrices.
//!
//! Every row (or every column) of a matrix is ranked on its own: values are
//! ordered ascending, ties share the mean of the positions they occupy, and
//! NaN stays NaN without shifting the other ranks. The result is a new matrix
//! with the same keys and shape.

pub mod axis;
pub mod error;
pub mod frame;
pub mod io;
pub mod matrix;
pub mod rank;
pub mod ranking;

pub use axis::Axis;
pub use error::{Error, Result};
pub use frame::Frame;
pub use matrix::{LabeledMatrix, LabeledMatrixMut};
pub use rank::{rank_data, rank_into, rank_slice};
pub use ranking::{rank_along_columns, rank_along_rows, rank_matrix, rank_matrix_cancellable};
