use std::{io, thread::sleep, time::Duration};

use crate::{Coords, TermInt};
use crate::config::GameConfig;
use crate::snake::Direction;
use crate::state::{GameState, MoveResult};
use crate::term::{Glyph, InputSource, Key, Renderer};

use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const TICK_INTERVAL_MS: u64 = 250;
pub const BOOST_TICK_INTERVAL_MS: u64 = 100;

// Side panel starts this many columns right of the grid
const PANEL_OFFSET: TermInt = 10;

/// How long each tick lasts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pacing {
    pub normal: Duration,
    pub boost: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            normal: Duration::from_millis(TICK_INTERVAL_MS),
            boost: Duration::from_millis(BOOST_TICK_INTERVAL_MS),
        }
    }
}

impl Pacing {
    pub fn interval(&self, boosted: bool) -> Duration {
        if boosted { self.boost } else { self.normal }
    }
}

pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

pub struct ThreadClock;

impl Clock for ThreadClock {
    fn sleep(&mut self, duration: Duration) {
        sleep(duration);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Boost,
    Restart,
    Exit,
    Quit,
}

impl Command {
    pub fn from_key(key: Key) -> Option<Command> {
        match key {
            Key::CtrlC => Some(Command::Quit),
            Key::Up => Some(Command::Turn(Direction::Up)),
            Key::Down => Some(Command::Turn(Direction::Down)),
            Key::Left => Some(Command::Turn(Direction::Left)),
            Key::Right => Some(Command::Turn(Direction::Right)),
            Key::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Command::Turn(Direction::Up)),
                'a' => Some(Command::Turn(Direction::Left)),
                's' => Some(Command::Turn(Direction::Down)),
                'd' => Some(Command::Turn(Direction::Right)),
                'j' => Some(Command::Boost),
                'r' => Some(Command::Restart),
                'e' => Some(Command::Exit),
                _ => None,
            },
            Key::Other => None,
        }
    }
}

/// What the player chose once the session was over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Choice {
    Restart,
    Exit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub choice: Choice,
    pub length: usize,
}

/// Drains every queued key and keeps only the last one.
pub fn latest_key<I: InputSource + ?Sized>(input: &mut I) -> io::Result<Option<Key>> {
    let mut last = None;
    while input.has_pending_key()? {
        last = Some(input.read_key()?);
    }
    Ok(last)
}

pub struct SnakeGame<T, C> {
    term: T,
    clock: C,
    pacing: Pacing,
    rng: StdRng,
}

impl<T: Renderer + InputSource, C: Clock> SnakeGame<T, C> {
    pub fn new(term: T, clock: C, pacing: Pacing, rng: StdRng) -> Self {
        SnakeGame { term, clock, pacing, rng }
    }

    pub fn term_mut(&mut self) -> &mut T {
        &mut self.term
    }

    /// Plays one session on a fresh grid until the snake dies and the player
    /// picks what to do next, or until they quit.
    pub fn play(&mut self, config: &GameConfig) -> io::Result<Outcome> {
        let (width, height) = screen_size(config)?;
        self.term.clear()?;
        self.draw_frame(config.borderless(), width, height)?;

        let mut state = GameState::new(*config, StdRng::seed_from_u64(self.rng.gen()));
        self.term.draw_glyph(state.snake().head(), Glyph::Head)?;
        self.term.draw_glyph(state.food(), Glyph::Food)?;
        self.term.flush()?;

        while state.is_alive() {
            let command = latest_key(&mut self.term)?.and_then(Command::from_key);
            match command {
                Some(Command::Turn(dir)) => state.set_direction(dir),
                Some(Command::Quit) => {
                    info!("quit mid-game at length {}", state.score());
                    return Ok(Outcome { choice: Choice::Exit, length: state.score() });
                }
                _ => {}
            }

            let mov = state.step();
            self.print_step(&state, &mov)?;

            // Boost is sampled once per tick, not held across ticks
            self.clock.sleep(self.pacing.interval(command == Some(Command::Boost)));
        }

        info!("snake died at {} with length {}", state.snake().head(), state.score());
        self.game_over(height, state.score())?;

        let choice = self.await_choice()?;
        Ok(Outcome { choice, length: state.score() })
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_frame(&mut self, borderless: bool, width: TermInt, height: TermInt) -> io::Result<()> {
        let ch = if borderless {"."} else {"#"};
        let edge = ch.repeat(width as usize + 2);

        self.term.draw_text((0, 0), &edge)?;
        for y in 1..=height {
            self.term.draw_text((0, y), ch)?;
            self.term.draw_text((width + 1, y), ch)?;
        }
        self.term.draw_text((0, height + 1), &edge)?;

        let x = width + PANEL_OFFSET;
        let mid = height / 2;
        self.print_score(width, height, 1)?;
        self.term.draw_text((x, mid), "Press \"J\" to boost")?;
        self.term.draw_text((x, mid + 2), "Press \"WASD\" to change direction")?;
        self.term.draw_text((x, mid + 4), &format!("Borderless: {}", borderless))?;

        self.term.flush()
    }

    fn print_score(&mut self, width: TermInt, height: TermInt, length: usize) -> io::Result<()> {
        let pos = (width + PANEL_OFFSET, (height / 2).saturating_sub(2));
        self.term.draw_text(pos, &format!("Length: {}", length))
    }

    pub(crate) fn print_step<R>(&mut self, state: &GameState<R>, mov: &MoveResult) -> io::Result<()> {
        self.term.draw_glyph(mov.old_head, Glyph::Body)?;
        if let Some(old_tail) = mov.old_tail {
            self.term.draw_glyph(old_tail, Glyph::Empty)?;
        }
        self.term.draw_glyph(mov.new_head, Glyph::Head)?;

        if mov.ate {
            self.term.draw_glyph(mov.new_head, Glyph::FoodEaten)?;
            let (width, height) = screen_size(state.config())?;
            self.print_score(width, height, state.score())?;
        }

        // Food can spawn under the body, so keep it visible once the body moves on
        self.term.draw_glyph(state.food(), Glyph::Food)?;
        self.term.flush()
    }

    fn game_over(&mut self, height: TermInt, length: usize) -> io::Result<()> {
        let y = height + 2;
        self.term.draw_text((0, y), "Game Over")?;
        self.term.draw_text((0, y + 1), &format!("Your Length is: {}", length))?;
        self.term.draw_text((0, y + 2), "Press \"R\" to restart or \"E\" to exit.")?;
        self.term.flush()
    }

    fn await_choice(&mut self) -> io::Result<Choice> {
        loop {
            match Command::from_key(self.term.read_key()?) {
                Some(Command::Restart) => return Ok(Choice::Restart),
                Some(Command::Exit) | Some(Command::Quit) => return Ok(Choice::Exit),
                _ => {}
            }
        }
    }
}

/// Grid size in terminal cells, leaving room for the border and side panel.
fn screen_size(config: &GameConfig) -> io::Result<Coords> {
    const MAX: i32 = (TermInt::MAX / 2) as i32;
    if config.cols() > MAX || config.rows() > MAX {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("a {}x{} grid does not fit on a terminal", config.rows(), config.cols()),
        ));
    }
    Ok((config.cols() as TermInt, config.rows() as TermInt))
}
