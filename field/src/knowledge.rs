use itertools::{Itertools, iproduct};
use rand::Rng;
use rand::seq::IteratorRandom;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, trace};

use crate::board::{Coord, adjacents, cell_count};
use crate::error::Error;
use crate::statement::Statement;

/// What a player can prove about a board from the clues it has been shown.
///
/// Every clue becomes a [`Statement`] about the neighbours of the revealed cell. After each clue the
/// statements are propagated to a fixed point, moving cells into `known_safe` and `known_hazard` and
/// deriving new statements by subset inference.
#[derive(Clone, Debug)]
pub struct Knowledge {
    height: usize,
    width: usize,
    area: usize,
    moves_made: BTreeSet<Coord>,
    known_safe: BTreeSet<Coord>,
    known_hazard: BTreeSet<Coord>,
    statements: Vec<Statement>,
}

impl Knowledge {
    pub fn new(height: usize, width: usize) -> Result<Self, Error> {
        let area = cell_count(height, width).ok_or(Error::InvalidConfiguration { height, width, mine_count: 0 })?;
        Ok(Self {
            height,
            width,
            area,
            moves_made: BTreeSet::new(),
            known_safe: BTreeSet::new(),
            known_hazard: BTreeSet::new(),
            statements: Vec::new(),
        })
    }

    fn dims(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Takes in the clue shown after revealing `cell`, then infers everything that follows from it.
    ///
    /// Panics if `cell` was already played, or if `clue` is more than the number of neighbours it has.
    pub fn record_clue(&mut self, cell: Coord, clue: u8) -> Result<(), Error> {
        if cell.0 >= self.height || cell.1 >= self.width {
            return Err(Error::OutOfBounds { cell, height: self.height, width: self.width });
        }
        assert!(!self.moves_made.contains(&cell), "a clue for {cell:?} was already recorded");
        let neighbours: BTreeSet<Coord> = adjacents(cell, self.dims()).collect();
        assert!(clue as usize <= neighbours.len(), "{cell:?} has {} neighbours but a clue of {clue}", neighbours.len());

        debug!(?cell, clue, "recording clue");
        self.moves_made.insert(cell);
        self.mark_safe(cell);
        self.statements.push(Statement::new(neighbours, clue));
        self.propagate();
        Ok(())
    }

    pub fn mark_hazard(&mut self, cell: Coord) {
        self.known_hazard.insert(cell);
        for statement in &mut self.statements {
            statement.reduce_on_hazard(cell);
        }
    }

    pub fn mark_safe(&mut self, cell: Coord) {
        self.known_safe.insert(cell);
        for statement in &mut self.statements {
            statement.reduce_on_safe(cell);
        }
    }

    /// Runs inference passes until one of them learns nothing new.
    ///
    /// Calling this again without recording a new clue changes nothing.
    pub fn propagate(&mut self) {
        let mut passes = 0;
        while self.inference_pass() {
            passes += 1;
        }
        assert!(
            self.known_safe.is_disjoint(&self.known_hazard),
            "inconsistent clues: {:?} are both safe and mines",
            self.known_safe.intersection(&self.known_hazard).collect_vec(),
        );
        debug!(
            passes,
            statements = self.statements.len(),
            safe = self.known_safe.len(),
            mines = self.known_hazard.len(),
            "reached fixed point",
        );
    }

    /// Returns whether anything was learned.
    fn inference_pass(&mut self) -> bool {
        // statements added since the last pass haven't seen every known cell yet
        for statement in &mut self.statements {
            for &cell in &self.known_safe {
                statement.reduce_on_safe(cell);
            }
            for &cell in &self.known_hazard {
                statement.reduce_on_hazard(cell);
            }
        }

        let mut seen = HashSet::new();
        self.statements.retain(|statement| {
            if statement.is_vacuous() {
                assert_eq!(statement.count(), 0, "inconsistent clues: {statement}");
                return false;
            }
            seen.insert(statement.clone())
        });

        let known_before = self.known_safe.len() + self.known_hazard.len();
        for statement in &self.statements {
            self.known_safe.extend(statement.resolved_safes());
            self.known_hazard.extend(statement.resolved_hazards());
        }
        let learned = self.known_safe.len() + self.known_hazard.len() > known_before;

        // derived statements are staged so the live ones aren't touched while they're being paired up
        let mut staged = Vec::new();
        let n = self.statements.len();
        for (i, j) in (0..n).cartesian_product(0..n) {
            if i == j {
                continue;
            }
            let Some(derived) = self.statements[i].subtract_from(&self.statements[j]) else { continue };
            if derived.is_vacuous() {
                assert_eq!(derived.count(), 0, "inconsistent clues: {} and {}", self.statements[i], self.statements[j]);
                continue;
            }
            if seen.insert(derived.clone()) {
                trace!(%derived, "derived statement");
                staged.push(derived);
            }
        }
        let derived = !staged.is_empty();
        self.statements.extend(staged);

        learned || derived
    }

    /// True once every cell has either been played or is a known mine.
    pub fn is_exhausted(&self) -> bool {
        self.moves_made.len() + self.known_hazard.len() == self.area
    }

    /// A cell proven safe that hasn't been played yet, picked uniformly at random.
    pub fn suggest_safe_move(&self, rng: &mut impl Rng) -> Option<Coord> {
        if self.is_exhausted() {
            return None;
        }
        self.known_safe.difference(&self.moves_made).copied().choose(rng)
    }

    /// Any cell not played yet and not known to be a mine, picked uniformly at random.
    pub fn suggest_any_move(&self, rng: &mut impl Rng) -> Option<Coord> {
        if self.is_exhausted() {
            return None;
        }
        iproduct!(0..self.height, 0..self.width)
            .filter(|cell| !self.known_hazard.contains(cell) && !self.moves_made.contains(cell))
            .choose(rng)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn moves_made(&self) -> &BTreeSet<Coord> {
        &self.moves_made
    }

    pub fn known_safe(&self) -> &BTreeSet<Coord> {
        &self.known_safe
    }

    pub fn known_hazard(&self) -> &BTreeSet<Coord> {
        &self.known_hazard
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::board::Board;
    use super::*;

    const A: Coord = (0, 0);
    const B: Coord = (0, 1);
    const C: Coord = (0, 2);

    fn snapshot(knowledge: &Knowledge) -> (BTreeSet<Coord>, BTreeSet<Coord>, HashSet<Statement>) {
        (knowledge.known_safe.clone(), knowledge.known_hazard.clone(), knowledge.statements.iter().cloned().collect())
    }

    #[test]
    fn zero_dimensions() {
        assert!(Knowledge::new(0, 4).is_err());
        assert!(Knowledge::new(4, 0).is_err());
        assert!(Knowledge::new(1, 1).is_ok());
        assert!(Knowledge::new(usize::MAX, 2).is_err());
        let huge = 1 << (usize::BITS / 2);
        assert_eq!(
            Knowledge::new(huge, huge).unwrap_err(),
            Error::InvalidConfiguration { height: huge, width: huge, mine_count: 0 },
        );
    }

    #[test]
    fn clue_out_of_bounds() {
        let mut knowledge = Knowledge::new(2, 2).unwrap();
        assert_eq!(knowledge.record_clue((2, 0), 0), Err(Error::OutOfBounds { cell: (2, 0), height: 2, width: 2 }));
        assert!(knowledge.moves_made().is_empty());
    }

    #[test]
    #[should_panic]
    fn repeated_clue() {
        let mut knowledge = Knowledge::new(3, 3).unwrap();
        knowledge.record_clue((1, 1), 1).unwrap();
        knowledge.record_clue((1, 1), 1).unwrap();
    }

    #[test]
    #[should_panic]
    fn clue_too_large() {
        let mut knowledge = Knowledge::new(3, 3).unwrap();
        knowledge.record_clue((0, 0), 4).unwrap();
    }

    #[test]
    fn empty_row() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut knowledge = Knowledge::new(1, 3).unwrap();

        knowledge.record_clue(A, 0).unwrap();
        assert!(knowledge.known_safe().contains(&B));
        knowledge.record_clue(B, 0).unwrap();
        assert!(knowledge.known_safe().contains(&C));
        assert_eq!(knowledge.suggest_safe_move(&mut rng), Some(C));

        knowledge.record_clue(C, 0).unwrap();
        assert_eq!(knowledge.suggest_safe_move(&mut rng), None);
        assert_eq!(knowledge.suggest_any_move(&mut rng), None);
        assert!(knowledge.statements().is_empty());
    }

    #[test]
    fn subset_resolves_mine() {
        let mut knowledge = Knowledge::new(1, 3).unwrap();
        knowledge.statements.push(Statement::new([A, B, C], 2));
        knowledge.statements.push(Statement::new([A, B], 1));
        knowledge.propagate();

        assert_eq!(knowledge.known_hazard(), &BTreeSet::from([C]));
        assert!(knowledge.known_safe().is_empty());
        assert_eq!(knowledge.statements(), &[Statement::new([A, B], 1)]);
    }

    #[test]
    fn zero_count_resolves_safes() {
        let mut knowledge = Knowledge::new(1, 3).unwrap();
        knowledge.statements.push(Statement::new([A, B], 0));
        knowledge.propagate();

        assert_eq!(knowledge.known_safe(), &BTreeSet::from([A, B]));
        assert!(knowledge.known_hazard().is_empty());
        assert!(knowledge.statements().is_empty());
    }

    #[test]
    fn one_two_one() {
        // . . .
        // X . X
        let board = Board::from_hazards(2, 3, [(1, 0), (1, 2)]).unwrap();
        let mut knowledge = Knowledge::new(2, 3).unwrap();
        for cell in [A, B, C] {
            knowledge.record_clue(cell, board.neighbor_hazard_count(cell).unwrap()).unwrap();
        }
        assert_eq!(knowledge.known_hazard(), &BTreeSet::from([(1, 0), (1, 2)]));
        assert!(knowledge.known_safe().contains(&(1, 1)));
        assert!(!knowledge.is_exhausted());
        assert_eq!(knowledge.suggest_safe_move(&mut StdRng::seed_from_u64(1)), Some((1, 1)));
    }

    #[test]
    fn last_cell_is_a_mine() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut knowledge = Knowledge::new(1, 3).unwrap();
        knowledge.record_clue(A, 0).unwrap();
        knowledge.record_clue(B, 1).unwrap();
        assert_eq!(knowledge.known_hazard(), &BTreeSet::from([C]));
        assert!(knowledge.is_exhausted());
        assert_eq!(knowledge.suggest_safe_move(&mut rng), None);
        assert_eq!(knowledge.suggest_any_move(&mut rng), None);
    }

    #[test]
    fn suggestions_are_read_only() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut knowledge = Knowledge::new(2, 2).unwrap();
        knowledge.record_clue(A, 1).unwrap();
        let before = snapshot(&knowledge);
        let moves = knowledge.moves_made().clone();

        assert_eq!(knowledge.suggest_safe_move(&mut rng), None);
        for _ in 0..20 {
            let cell = knowledge.suggest_any_move(&mut rng).unwrap();
            assert!([(0, 1), (1, 0), (1, 1)].contains(&cell));
        }
        assert_eq!(snapshot(&knowledge), before);
        assert_eq!(knowledge.moves_made(), &moves);
    }

    #[test]
    fn any_move_skips_known_mines() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut knowledge = Knowledge::new(2, 2).unwrap();
        knowledge.mark_hazard((1, 1));
        knowledge.record_clue(A, 1).unwrap();
        for _ in 0..20 {
            let cell = knowledge.suggest_any_move(&mut rng).unwrap();
            assert!(cell == (0, 1) || cell == (1, 0));
            assert!(knowledge.suggest_safe_move(&mut rng).is_some());
        }
    }

    #[test]
    fn marking_is_idempotent() {
        let mut knowledge = Knowledge::new(1, 3).unwrap();
        knowledge.statements.push(Statement::new([A, B, C], 2));
        knowledge.mark_hazard(C);
        knowledge.mark_hazard(C);
        knowledge.mark_safe(A);
        knowledge.mark_safe(A);
        assert_eq!(knowledge.statements(), &[Statement::new([B], 1)]);
    }

    #[test]
    fn fixed_point() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let board = Board::with_rng(8, 8, 10, &mut rng).unwrap();
            let mut knowledge = Knowledge::new(8, 8).unwrap();
            while let Some(cell) = knowledge.suggest_safe_move(&mut rng).or_else(|| knowledge.suggest_any_move(&mut rng)) {
                if board.is_hazard(cell).unwrap() {
                    break;
                }
                knowledge.record_clue(cell, board.neighbor_hazard_count(cell).unwrap()).unwrap();
                let before = snapshot(&knowledge);
                knowledge.propagate();
                assert_eq!(snapshot(&knowledge), before);
            }
        }
    }

    #[test]
    fn deductions_are_sound() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..30 {
            let board = Board::with_rng(9, 9, 10, &mut rng).unwrap();
            let mut knowledge = Knowledge::new(9, 9).unwrap();
            while let Some(cell) = knowledge.suggest_safe_move(&mut rng).or_else(|| knowledge.suggest_any_move(&mut rng)) {
                if board.is_hazard(cell).unwrap() {
                    break;
                }
                knowledge.record_clue(cell, board.neighbor_hazard_count(cell).unwrap()).unwrap();
                assert!(knowledge.known_hazard().iter().all(|cell| board.hazards().contains(cell)));
                assert!(knowledge.known_safe().iter().all(|cell| !board.hazards().contains(cell)));
                assert!(knowledge.moves_made().is_subset(knowledge.known_safe()));
                for statement in knowledge.statements() {
                    let mines = statement.cells().iter().filter(|&cell| board.hazards().contains(cell)).count();
                    assert_eq!(mines, statement.count() as usize, "{statement} is false");
                    assert!(statement.cells().is_disjoint(knowledge.known_safe()));
                    assert!(statement.cells().is_disjoint(knowledge.known_hazard()));
                }
            }
        }
    }
}
