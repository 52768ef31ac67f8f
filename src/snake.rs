use std::collections::VecDeque;
use std::fmt;

use Direction::*;

/// A cell on the game grid. Rows grow downwards, columns to the right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    pub fn neighbour(&self, direction: Direction) -> Position {
        let (d_row, d_col) = direction.delta();
        Position::new(self.row + d_row, self.col + d_col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit step as (row, col).
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// The snake body, head first.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    pub fn new(head: Position, direction: Direction) -> Self {
        Snake { body: VecDeque::from(vec![head]), direction }
    }

    /// Builds a snake from explicit segments, head first.
    #[cfg(test)]
    pub fn from_segments(segments: &[Position], direction: Direction) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least a head");
        Snake { body: segments.iter().copied().collect(), direction }
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Moves the head to `new_head` and drops the last segment, which is returned.
    pub fn advance(&mut self, new_head: Position) -> Position {
        self.body.push_front(new_head);
        // The body held at least the old head before the push
        self.body.pop_back().unwrap_or(new_head)
    }

    /// Re-attaches a segment previously removed by `advance`.
    pub fn grow_back(&mut self, tail: Position) {
        self.body.push_back(tail);
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body().iter().skip(1).any(|segment| *segment == head)
    }

    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.direction = new_direction;
        }
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }
}
