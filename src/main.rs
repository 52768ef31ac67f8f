mod config;
mod game;
mod prompt;
mod snake;
mod state;
mod term;

use std::{io, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use config::GameConfig;
use game::{Choice, Pacing, SnakeGame, ThreadClock, BOOST_TICK_INTERVAL_MS, TICK_INTERVAL_MS};
use term::TermManager;

pub type TermInt = u16;
pub type Coords = (u16, u16);

/// Snake in the terminal. WASD or arrow keys to steer, hold J to speed up.
#[derive(Parser)]
#[command(name = "easy-snake", version)]
struct Args {
    /// Grid rows; skips the size prompts when given with --cols
    #[arg(long, requires = "cols", allow_negative_numbers = true)]
    rows: Option<i32>,

    /// Grid columns
    #[arg(long, requires = "rows", allow_negative_numbers = true)]
    cols: Option<i32>,

    /// Wrap around the edges instead of dying on them (with --rows/--cols)
    #[arg(long)]
    borderless: bool,

    /// Milliseconds per step
    #[arg(long, default_value_t = TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Milliseconds per step while boosting
    #[arg(long, default_value_t = BOOST_TICK_INTERVAL_MS)]
    boost_tick_ms: u64,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn preset(&self) -> Result<Option<GameConfig>> {
        match (self.rows, self.cols) {
            (Some(rows), Some(cols)) => Ok(Some(GameConfig::new(rows, cols, self.borderless)?)),
            _ => Ok(None),
        }
    }

    fn pacing(&self) -> Pacing {
        Pacing {
            normal: Duration::from_millis(self.tick_ms),
            boost: Duration::from_millis(self.boost_tick_ms),
        }
    }
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = SnakeGame::new(TermManager::new(), ThreadClock, args.pacing(), rng);
    let preset = args.preset()?;

    loop {
        let config = match preset {
            Some(config) => config,
            None => prompt::read_config(&mut io::stdin().lock(), &mut io::stdout())?,
        };
        info!("starting a {}x{} game", config.rows(), config.cols());

        game.term_mut().setup().context("setting up the terminal")?;
        let res = game.play(&config);
        // Give the terminal back before reporting anything, errors included
        game.term_mut().restore().context("restoring the terminal")?;

        let outcome = res?;
        println!("Game Over");
        println!("Your Length is: {}", outcome.length);

        if outcome.choice == Choice::Exit {
            break;
        }
    }

    Ok(())
}
