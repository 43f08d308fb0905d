use anyhow::Result;
use crossterm::queue;
use crossterm::style::{self, Attribute, StyledContent, Stylize};
use std::io::{stdout, Write};

use minelogic_field::{Coord, Game, Outcome};
use crate::options::{IconSet, Theme};

fn show_cell(game: &Game, cell: Coord, theme: &Theme, icons: &IconSet) -> Result<StyledContent<char>> {
    let board = game.board();
    let knowledge = game.knowledge();

    Ok(if game.exploded() == Some(cell) {
        icons.mine.with(theme.mine()).on(theme.bg_revealed).attribute(Attribute::Bold)
    } else if knowledge.moves_made().contains(&cell) {
        match board.neighbor_hazard_count(cell)? {
            0 => ' '.on(theme.bg_revealed),
            n => char::from(b'0' + n).with(theme.nums[n as usize - 1]).on(theme.bg_revealed).attribute(Attribute::Bold),
        }
    } else if knowledge.known_hazard().contains(&cell) {
        icons.flag.with(theme.flag()).on(theme.bg_hidden)
    } else if knowledge.known_safe().contains(&cell) {
        icons.safe.with(theme.safe()).on(theme.bg_hidden)
    } else if board.is_hazard(cell)? {
        // never deduced, shown now that the game is over
        icons.mine.on(theme.bg_hidden).attribute(Attribute::Dim)
    } else {
        icons.hidden.on(theme.bg_hidden)
    })
}

fn describe(outcome: Outcome) -> String {
    match outcome {
        Outcome::Won => "won".to_owned(),
        Outcome::Lost((row, col)) => format!("lost at ({row}, {col})"),
        Outcome::Stuck => "stuck without a safe move".to_owned(),
    }
}

/// Prints the final board with everything the player deduced about it.
pub fn show_game(round: usize, game: &Game, outcome: Outcome, theme: &Theme, icons: &IconSet) -> Result<()> {
    let mut out = stdout();
    let board = game.board();

    queue!(out, style::Print(format!("game {round}: {} after {} moves\n", describe(outcome), game.knowledge().moves_made().len())))?;
    for row in 0..board.height() {
        for col in 0..board.width() {
            let content = show_cell(game, (row, col), theme, icons)?;
            queue!(out, style::PrintStyledContent(content))?;
        }
        queue!(out, style::ResetColor, style::Print('\n'))?;
    }
    queue!(out, style::Print('\n'))?;
    out.flush()?;
    Ok(())
}

#[derive(Default)]
pub struct Tally {
    pub won: usize,
    pub lost: usize,
    pub stuck: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won => self.won += 1,
            Outcome::Lost(_) => self.lost += 1,
            Outcome::Stuck => self.stuck += 1,
        }
    }

    pub fn summary(&self) -> String {
        let played = self.won + self.lost + self.stuck;
        let rate = if played == 0 { 0.0 } else { 100.0 * self.won as f64 / played as f64 };
        format!("won {}, lost {}, stuck {} ({rate:.1}% won)", self.won, self.lost, self.stuck)
    }
}
