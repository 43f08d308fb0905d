use itertools::iproduct;
use rand::Rng;
use rand::seq::index;
use std::collections::HashSet;
use std::fmt;

use crate::error::Error;

/// A `(row, col)` grid coordinate.
pub type Coord = (usize, usize);

/// The in-bounds cells within one row and column of `cell`, not including `cell` itself.
pub fn adjacents((row, col): Coord, (height, width): (usize, usize)) -> impl Iterator<Item=Coord> {
    iproduct!(row.saturating_sub(1)..=row+1, col.saturating_sub(1)..=col+1)
        .filter(move |&(r, c)| (r, c) != (row, col) && r < height && c < width)
}

/// The number of cells on a `height x width` grid, if it is non-empty and doesn't overflow.
pub(crate) fn cell_count(height: usize, width: usize) -> Option<usize> {
    height.checked_mul(width).filter(|&area| area > 0)
}

/// Ground truth of a game: where the mines are, and which of them the player has found.
#[derive(Clone, Debug)]
pub struct Board {
    height: usize,
    width: usize,
    grid: Vec<Vec<bool>>,
    hazards: HashSet<Coord>,
    found: HashSet<Coord>,
}

impl Board {
    pub fn new(height: usize, width: usize, mine_count: usize) -> Result<Self, Error> {
        Self::with_rng(height, width, mine_count, &mut rand::rng())
    }

    /// Places `mine_count` mines uniformly at random, without replacement, using `rng`.
    pub fn with_rng(height: usize, width: usize, mine_count: usize, rng: &mut impl Rng) -> Result<Self, Error> {
        let area = cell_count(height, width).filter(|&area| mine_count <= area)
            .ok_or(Error::InvalidConfiguration { height, width, mine_count })?;
        let hazards = index::sample(rng, area, mine_count).into_iter().map(|i| (i / width, i % width));
        Ok(Self::build(height, width, hazards))
    }

    /// A board with mines at exactly the given cells. Repeated cells count once.
    pub fn from_hazards(height: usize, width: usize, hazards: impl IntoIterator<Item=Coord>) -> Result<Self, Error> {
        let hazards: HashSet<Coord> = hazards.into_iter().collect();
        if cell_count(height, width).is_none() {
            return Err(Error::InvalidConfiguration { height, width, mine_count: hazards.len() });
        }
        if let Some(&cell) = hazards.iter().find(|&&(r, c)| r >= height || c >= width) {
            return Err(Error::OutOfBounds { cell, height, width });
        }
        Ok(Self::build(height, width, hazards))
    }

    fn build(height: usize, width: usize, hazards: impl IntoIterator<Item=Coord>) -> Self {
        let mut grid = vec![vec![false; width]; height];
        let hazards: HashSet<Coord> = hazards.into_iter().collect();
        for &(r, c) in &hazards {
            grid[r][c] = true;
        }
        Self { height, width, grid, hazards, found: HashSet::new() }
    }

    fn check(&self, cell: Coord) -> Result<(), Error> {
        if cell.0 < self.height && cell.1 < self.width {
            Ok(())
        } else {
            Err(Error::OutOfBounds { cell, height: self.height, width: self.width })
        }
    }

    pub fn is_hazard(&self, cell: Coord) -> Result<bool, Error> {
        self.check(cell)?;
        Ok(self.grid[cell.0][cell.1])
    }

    /// The clue shown when `cell` is revealed.
    pub fn neighbor_hazard_count(&self, cell: Coord) -> Result<u8, Error> {
        self.check(cell)?;
        Ok(adjacents(cell, (self.height, self.width)).filter(|&(r, c)| self.grid[r][c]).count() as u8)
    }

    /// Records that the player has located a mine at `cell`.
    pub fn mark_found(&mut self, cell: Coord) -> Result<(), Error> {
        self.check(cell)?;
        self.found.insert(cell);
        Ok(())
    }

    pub fn has_won(&self) -> bool {
        self.found == self.hazards
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn mine_count(&self) -> usize {
        self.hazards.len()
    }

    pub fn hazards(&self) -> &HashSet<Coord> {
        &self.hazards
    }

    pub fn found(&self) -> &HashSet<Coord> {
        &self.found
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "--".repeat(self.width) + "-";
        for row in &self.grid {
            writeln!(f, "{separator}")?;
            for &mine in row {
                f.write_str(if mine { "|X" } else { "| " })?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{separator}")
    }
}
