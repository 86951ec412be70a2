//! The eight-direction compass algebra.
//!
//! Movement, rotation and reflection all speak in terms of these eight
//! values. The tables here are the single source of truth: movement
//! vectors, pivot mappings, the newline-wrap direction used when a
//! printed string contains a line break, and the line glyph drawn when
//! a bare number is printed.

use std::fmt;

/// A compass direction. Screen coordinates: x grows right, y grows
/// down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

/// Sense of a 45° pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivot {
    Left,
    Right,
}

impl Direction {
    /// All eight directions.
    pub const ALL: [Direction; 8] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Unit movement vector (dx, dy).
    pub fn vector(self) -> (i64, i64) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (1, -1),
            Direction::DownLeft => (-1, 1),
            Direction::DownRight => (1, 1),
        }
    }

    /// One 45° step of the given pivot sense.
    pub fn pivot(self, sense: Pivot) -> Direction {
        match sense {
            Pivot::Left => match self {
                Direction::Left => Direction::DownLeft,
                Direction::Up => Direction::UpLeft,
                Direction::Right => Direction::UpRight,
                Direction::Down => Direction::DownRight,
                Direction::UpLeft => Direction::Left,
                Direction::UpRight => Direction::Up,
                Direction::DownLeft => Direction::Down,
                Direction::DownRight => Direction::Right,
            },
            Pivot::Right => match self {
                Direction::Left => Direction::UpLeft,
                Direction::Up => Direction::UpRight,
                Direction::Right => Direction::DownRight,
                Direction::Down => Direction::DownLeft,
                Direction::UpLeft => Direction::Up,
                Direction::UpRight => Direction::Right,
                Direction::DownLeft => Direction::Left,
                Direction::DownRight => Direction::Down,
            },
        }
    }

    /// The opposite direction: two default (90°) pivots of the same
    /// kind, i.e. four 45° steps.
    pub fn opposite(self) -> Direction {
        let mut dir = self;
        for _ in 0..4 {
            dir = dir.pivot(Pivot::Left);
        }
        dir
    }

    /// Where a line break carries the cursor while printing along
    /// `self`.
    pub fn newline(self) -> Direction {
        match self {
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::UpLeft => Direction::UpRight,
            Direction::UpRight => Direction::DownRight,
            Direction::DownLeft => Direction::UpLeft,
            Direction::DownRight => Direction::DownLeft,
        }
    }

    /// Glyph drawn when a number is printed as a line along `self`.
    pub fn line_glyph(self) -> char {
        match self {
            Direction::Left | Direction::Right => '-',
            Direction::Up | Direction::Down => '|',
            Direction::UpLeft | Direction::DownRight => '\\',
            Direction::UpRight | Direction::DownLeft => '/',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self {
            Direction::Left => '←',
            Direction::Up => '↑',
            Direction::Right => '→',
            Direction::Down => '↓',
            Direction::UpLeft => '↖',
            Direction::UpRight => '↗',
            Direction::DownLeft => '↙',
            Direction::DownRight => '↘',
        };
        write!(f, "{arrow}")
    }
}
