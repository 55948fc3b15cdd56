use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};

/// Direction along which values are ranked.
///
/// `Rows` ranks the values of each row against each other (across columns),
/// `Columns` ranks the values of each column (across rows). A row or column
/// being ranked is called a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Axis {
    #[strum(
        serialize = "rows",
        serialize = "row",
        serialize = "index",
        serialize = "0",
        to_string = "rows"
    )]
    Rows,
    #[strum(
        serialize = "columns",
        serialize = "column",
        serialize = "cols",
        serialize = "1",
        to_string = "columns"
    )]
    Columns,
}

impl Axis {
    pub fn from_name(name: &str) -> Result<Self> {
        name.trim()
            .parse()
            .map_err(|_| Error::InvalidAxis(name.to_string()))
    }

    pub fn orthogonal(self) -> Self {
        match self {
            Axis::Rows => Axis::Columns,
            Axis::Columns => Axis::Rows,
        }
    }

    /// Number of lanes in an `n_rows` x `n_cols` matrix.
    pub fn lane_count(self, n_rows: usize, n_cols: usize) -> usize {
        match self {
            Axis::Rows => n_rows,
            Axis::Columns => n_cols,
        }
    }

    /// Number of values in each lane.
    pub fn lane_len(self, n_rows: usize, n_cols: usize) -> usize {
        self.orthogonal().lane_count(n_rows, n_cols)
    }

    /// Maps position `pos` of lane `lane` to its `(row, col)` cell.
    pub fn cell(self, lane: usize, pos: usize) -> (usize, usize) {
        match self {
            Axis::Rows => (lane, pos),
            Axis::Columns => (pos, lane),
        }
    }
}

impl From<Axis> for ndarray::Axis {
    /// The ndarray axis whose subviews are the lanes.
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Rows => ndarray::Axis(0),
            Axis::Columns => ndarray::Axis(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!(Axis::from_name("ROWS").unwrap(), Axis::Rows);
        assert_eq!(Axis::from_name(" index ").unwrap(), Axis::Rows);
        assert_eq!(Axis::from_name("Cols").unwrap(), Axis::Columns);
        assert_eq!(Axis::from_name("1").unwrap(), Axis::Columns);
    }

    #[test]
    fn rejects_unknown_axis() {
        match Axis::from_name("diagonal") {
            Err(Error::InvalidAxis(name)) => assert_eq!(name, "diagonal"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn lane_geometry() {
        assert_eq!(Axis::Rows.lane_count(3, 2), 3);
        assert_eq!(Axis::Rows.lane_len(3, 2), 2);
        assert_eq!(Axis::Columns.lane_count(3, 2), 2);
        assert_eq!(Axis::Columns.lane_len(3, 2), 3);
        assert_eq!(Axis::Rows.cell(2, 1), (2, 1));
        assert_eq!(Axis::Columns.cell(2, 1), (1, 2));
        assert_eq!(Axis::Columns.to_string(), "columns");
    }
}
