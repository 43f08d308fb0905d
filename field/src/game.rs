use rand::Rng;
use tracing::debug;

use crate::board::{Board, Coord};
use crate::error::Error;
use crate::knowledge::Knowledge;
use crate::strategy::Strategy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Revealed { cell: Coord, clue: u8 },
    Lost(Coord),
    Won,
    /// The strategy has no move it is willing to make.
    Stuck,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost(Coord),
    Stuck,
}

/// A board being played by a [`Knowledge`] of the same size.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    knowledge: Knowledge,
    exploded: Option<Coord>,
}

impl Game {
    pub fn new(board: Board) -> Result<Self, Error> {
        let knowledge = Knowledge::new(board.height(), board.width())?;
        Ok(Self { board, knowledge, exploded: None })
    }

    pub fn step(&mut self, strategy: Strategy, rng: &mut impl Rng) -> Result<Step, Error> {
        if let Some(cell) = self.exploded {
            return Ok(Step::Lost(cell));
        }
        if self.board.has_won() {
            return Ok(Step::Won);
        }
        let Some(cell) = self.knowledge.choose_move(strategy, rng) else { return Ok(Step::Stuck) };

        if self.board.is_hazard(cell)? {
            debug!(?cell, "stepped on a mine");
            self.exploded = Some(cell);
            return Ok(Step::Lost(cell));
        }
        let clue = self.board.neighbor_hazard_count(cell)?;
        self.knowledge.record_clue(cell, clue)?;

        for &mine in self.knowledge.known_hazard() {
            self.board.mark_found(mine)?;
        }
        Ok(if self.board.has_won() { Step::Won } else { Step::Revealed { cell, clue } })
    }

    /// Steps until the game is over.
    pub fn play(&mut self, strategy: Strategy, rng: &mut impl Rng) -> Result<Outcome, Error> {
        loop {
            match self.step(strategy, rng)? {
                Step::Revealed { .. } => {},
                Step::Won => return Ok(Outcome::Won),
                Step::Lost(cell) => return Ok(Outcome::Lost(cell)),
                Step::Stuck => return Ok(Outcome::Stuck),
            }
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    /// The cell that ended the game, if it was lost.
    pub fn exploded(&self) -> Option<Coord> {
        self.exploded
    }
}
