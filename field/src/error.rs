use std::fmt;

use crate::board::Coord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A dimension is zero, or there are more mines than cells.
    InvalidConfiguration { height: usize, width: usize, mine_count: usize },
    /// A coordinate lies outside `[0, height) x [0, width)`.
    OutOfBounds { cell: Coord, height: usize, width: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { height, width, mine_count } => {
                write!(f, "invalid configuration: {mine_count} mines on a {height}x{width} board")
            },
            Self::OutOfBounds { cell: (row, col), height, width } => {
                write!(f, "cell ({row}, {col}) is outside the {height}x{width} board")
            },
        }
    }
}

impl std::error::Error for Error {}
