use rand::Rng;

use crate::board::Coord;
use crate::knowledge::Knowledge;

/// How a player picks its next cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Strategy {
    /// Only ever play cells proven to be safe, apart from the opening move.
    Cautious,
    /// Play a proven-safe cell if there is one, otherwise guess.
    Guess,
}
use Strategy::*;

impl Knowledge {
    pub fn choose_move(&self, strategy: Strategy, rng: &mut impl Rng) -> Option<Coord> {
        match strategy {
            Cautious if self.moves_made().is_empty() => self.suggest_any_move(rng),
            Cautious => self.suggest_safe_move(rng),
            Guess => self.suggest_safe_move(rng).or_else(|| self.suggest_any_move(rng)),
        }
    }
}
