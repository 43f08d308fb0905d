mod board;
mod error;
mod game;
mod knowledge;
mod statement;
mod strategy;

pub use board::{Board, Coord, adjacents};
pub use error::Error;
pub use game::{Game, Outcome, Step};
pub use knowledge::Knowledge;
pub use statement::Statement;
pub use strategy::Strategy;
