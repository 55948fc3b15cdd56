use std::path::PathBuf;

use thiserror::Error;

use crate::axis::Axis;

/// Boxed error raised by a matrix collaborator.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid axis '{0}': expected rows or columns")]
    InvalidAxis(String),

    #[error("{axis} lane {index} has {found} values, expected {expected}")]
    ShapeMismatch {
        axis: Axis,
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to rank {axis} lane {index}: {source}")]
    Lane {
        axis: Axis,
        index: usize,
        #[source]
        source: CollaboratorError,
    },

    #[error("could not allocate result matrix: {0}")]
    Allocation(#[source] CollaboratorError),

    #[error("ranking along {axis} was cancelled")]
    Cancelled { axis: Axis },

    #[error("duplicate {axis} key: {key}")]
    DuplicateKey { axis: Axis, key: String },

    #[error("inconsistent shape: {rows} row keys and {cols} column keys for a {found_rows}x{found_cols} block")]
    InconsistentShape {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("row key not found: {0}")]
    RowKeyNotFound(String),

    #[error("column key not found: {0}")]
    ColumnKeyNotFound(String),

    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("no readable file found in tar archive {0}")]
    EmptyArchive(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn lane<E>(axis: Axis, index: usize, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Lane {
            axis,
            index,
            source: Box::new(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
