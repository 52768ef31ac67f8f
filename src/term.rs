use crate::{Coords, TermInt};
use crate::snake::Position;
use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, read, poll};

/// Something the game can draw on.
pub trait Renderer {
    /// Draws a glyph on the screen cell backing a grid cell.
    fn draw_glyph(&mut self, cell: Position, glyph: Glyph) -> io::Result<()>;

    /// Draws text starting at a raw screen position.
    fn draw_text(&mut self, at: Coords, text: &str) -> io::Result<()>;

    fn clear(&mut self) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

/// Non-blocking keyboard access.
pub trait InputSource {
    fn has_pending_key(&mut self) -> io::Result<bool>;

    /// Returns the next key, waiting for one if none is queued.
    fn read_key(&mut self) -> io::Result<Key>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Head,
    Body,
    Empty,
    Food,
    FoodEaten,
}

impl Glyph {
    pub fn as_char(&self) -> char {
        match self {
            Glyph::Head => 'H',
            Glyph::Body => 'O',
            Glyph::Empty => ' ',
            Glyph::Food => '*',
            Glyph::FoodEaten => 'X',
        }
    }
}

/// A key press, stripped of everything the game doesn't care about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    CtrlC,
    Other,
}

impl From<KeyEvent> for Key {
    fn from(ev: KeyEvent) -> Self {
        match ev {
            KeyEvent { code: KeyCode::Char('c'), modifiers, .. } if modifiers.contains(KeyModifiers::CONTROL) => Key::CtrlC,
            KeyEvent { code, .. } => match code {
                KeyCode::Char(c) => Key::Char(c),
                KeyCode::Up => Key::Up,
                KeyCode::Down => Key::Down,
                KeyCode::Left => Key::Left,
                KeyCode::Right => Key::Right,
                _ => Key::Other,
            }
        }
    }
}

/// Screen position of a grid cell: one cell in from the top-left border.
/// `None` if it can't be addressed on a terminal.
pub fn cell_to_screen(cell: Position) -> Option<Coords> {
    let x = TermInt::try_from(cell.col + 1).ok()?;
    let y = TermInt::try_from(cell.row + 1).ok()?;
    Some((x, y))
}

pub struct TermManager {
    stdout: Stdout,
    pending: Option<Key>,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), pending: None }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    fn print_at(&mut self, pos: Coords, text: &str) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(text))
    }
}

impl Renderer for TermManager {
    fn draw_glyph(&mut self, cell: Position, glyph: Glyph) -> io::Result<()> {
        let pos = cell_to_screen(cell).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("cell {} is off screen", cell))
        })?;
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(glyph.as_char()))
    }

    fn draw_text(&mut self, at: Coords, text: &str) -> io::Result<()> {
        self.print_at(at, text)
    }

    fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl InputSource for TermManager {
    fn has_pending_key(&mut self) -> io::Result<bool> {
        if self.pending.is_some() {
            return Ok(true);
        }

        // Skip over anything that isn't a key press so callers only see keys
        while poll(Duration::ZERO)? {
            match read()? {
                Event::Key(ev) if ev.kind == KeyEventKind::Press => {
                    self.pending = Some(ev.into());
                    return Ok(true);
                }
                _ => {}
            }
        }
        Ok(false)
    }

    fn read_key(&mut self) -> io::Result<Key> {
        if let Some(key) = self.pending.take() {
            return Ok(key);
        }

        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev.into());
                }
            }
        }
    }
}
