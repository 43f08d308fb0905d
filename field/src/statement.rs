use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;

use crate::board::Coord;

/// A logical assertion that exactly `count` of `cells` are mines.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Statement {
    cells: BTreeSet<Coord>,
    count: u8,
}

impl Statement {
    pub fn new(cells: impl IntoIterator<Item=Coord>, count: u8) -> Self {
        Self { cells: cells.into_iter().collect(), count }
    }

    pub fn cells(&self) -> &BTreeSet<Coord> {
        &self.cells
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A statement about no cells says nothing.
    pub fn is_vacuous(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every cell, if there are as many mines as cells.
    pub fn resolved_hazards(&self) -> BTreeSet<Coord> {
        if self.cells.len() == self.count as usize {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Every cell, if there are no mines among them.
    pub fn resolved_safes(&self) -> BTreeSet<Coord> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// `cell` is a mine, so it leaves the statement and takes one off the count.
    pub fn reduce_on_hazard(&mut self, cell: Coord) {
        if self.cells.remove(&cell) {
            assert!(self.count > 0, "mine at {cell:?} contradicts {self}");
            self.count -= 1;
        }
    }

    /// `cell` is safe, so it leaves the statement without touching the count.
    pub fn reduce_on_safe(&mut self, cell: Coord) {
        self.cells.remove(&cell);
    }

    /// Subset inference: if `self.cells` is a subset of `superset.cells`, then the cells only in
    /// `superset` hold exactly `superset.count - self.count` mines.
    pub fn subtract_from(&self, superset: &Statement) -> Option<Statement> {
        if !self.cells.is_subset(&superset.cells) {
            return None;
        }
        let count = superset.count.checked_sub(self.count).unwrap_or_else(|| {
            panic!("{self} cannot be a subset of {superset}: more mines than its superset")
        });
        Some(Statement { cells: &superset.cells - &self.cells, count })
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.cells.iter().map(|(r, c)| format!("({r}, {c})")).join(", ");
        write!(f, "{{{cells}}} = {}", self.count)
    }
}
