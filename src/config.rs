use std::{error::Error, fmt, io};

use crate::snake::Position;

/// Grid size and border mode for one session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    rows: i32,
    cols: i32,
    borderless: bool,
}

impl GameConfig {
    pub fn new(rows: i32, cols: i32, borderless: bool) -> Result<Self, ConfigError> {
        if rows <= 0 || cols <= 0 {
            return Err(ConfigError::InvalidDimensions { rows, cols });
        }
        Ok(GameConfig { rows, cols, borderless })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn borderless(&self) -> bool {
        self.borderless
    }

    pub fn center(&self) -> Position {
        Position::new(self.rows / 2, self.cols / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.rows).contains(&pos.row) && (0..self.cols).contains(&pos.col)
    }

    /// Wraps each axis independently onto the opposite edge. Only handles
    /// positions at most one cell outside the grid.
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(wrap_axis(pos.row, self.rows), wrap_axis(pos.col, self.cols))
    }
}

fn wrap_axis(value: i32, size: i32) -> i32 {
    if value >= size {
        0
    } else if value < 0 {
        size - 1
    } else {
        value
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidDimensions { rows: i32, cols: i32 },
    InvalidNumber { field: &'static str, input: String },
    UnexpectedEof,
    Io(io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidDimensions { rows, cols } => {
                write!(f, "grid must have positive dimensions, got {} rows and {} columns", rows, cols)
            }
            ConfigError::InvalidNumber { field, input } => {
                write!(f, "invalid {}: {:?} is not a whole number", field, input)
            }
            ConfigError::UnexpectedEof => write!(f, "input ended before the game was configured"),
            ConfigError::Io(err) => write!(f, "error reading configuration: {}", err),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}
