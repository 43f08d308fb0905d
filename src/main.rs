#![forbid(unsafe_code)]

mod logging;
mod options;
mod ui;

use anyhow::Context;
use clap::Parser;
use minelogic_field::{Board, Game, Strategy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

fn parse_size(s: &str) -> Result<(usize, usize), &'static str> {
    let (height_part, width_part) = s.split_once('x').ok_or("dimensions should be delimited with 'x'")?;
    let size: (usize, usize) = height_part.parse().ok().zip(width_part.parse().ok()).ok_or("invalid number")?;
    if size.0 == 0 || size.1 == 0 {
        return Err("dimensions must be positive");
    }
    Ok(size)
}

fn parse_games(s: &str) -> Result<usize, &'static str> {
    match s.parse() {
        Ok(0) => Err("at least one game must be played"),
        Ok(n) => Ok(n),
        Err(_) => Err("invalid number"),
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, short, default_value = "8x8", help = "Dimensions of the board, as HEIGHTxWIDTH.", value_parser = parse_size)]
    size: (usize, usize),
    #[arg(long, short, default_value_t = 8, help = "The number of mines to hide.")]
    mines: usize,
    #[arg(long, short = 't', default_value = "guess", value_enum, help = "Whether to guess when nothing is known to be safe.")]
    strategy: Strategy,
    #[arg(long, short, default_value = "1", help = "How many games to play.", value_parser = parse_games)]
    games: usize,
    #[arg(long, env = "MINELOGIC_SEED", help = "Seed for mine placement and move choice. Random if not given.")]
    seed: Option<u64>,
    #[arg(long, default_value = "frappe", value_enum)]
    theme: options::ThemeChoice,
    #[arg(long, short, default_value = "ascii", value_enum)]
    iconset: options::IconSetChoice,
    #[arg(long, short, help = "Only print the summary.")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init();

    let (height, width) = args.size;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let theme = args.theme.theme();
    let icons = args.iconset.iconset();
    let mut tally = ui::Tally::default();

    for round in 1..=args.games {
        let board = Board::with_rng(height, width, args.mines, &mut rng)
            .with_context(|| format!("can't hide {} mines on a {height}x{width} board", args.mines))?;
        let mut game = Game::new(board)?;
        let outcome = game.play(args.strategy, &mut rng)?;
        info!(round, ?outcome, moves = game.knowledge().moves_made().len(), "game over");

        tally.record(outcome);
        if !args.quiet {
            ui::show_game(round, &game, outcome, &theme, &icons)?;
        }
    }

    println!("{}", tally.summary());
    Ok(())
}
