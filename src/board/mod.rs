//! Board representation for Gomoku

pub mod board;
pub mod geometry;


use serde::{Deserialize, Serialize};

// Re-exports
pub use board::{write_grid, Board, MoveRecord};
pub use geometry::{all_in_line, has_in_line, is_in_line};

/// Default board size (15x15)
pub const DEFAULT_BOARD_SIZE: usize = 15;
/// Smallest playable board: a five must fit on a line
pub const MIN_BOARD_SIZE: usize = 5;
/// Largest board the `u8` coordinates comfortably address
pub const MAX_BOARD_SIZE: usize = 25;

/// Line directions as (row step, col step), in shape-cache order:
/// horizontal, vertical, diagonal, anti-diagonal.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Dense index for per-role tables. Black is 0, White is 1.
    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self != Stone::Empty, "empty has no role index");
        match self {
            Stone::White => 1,
            _ => 0,
        }
    }

    /// Both playing roles, black first
    pub const ROLES: [Stone; 2] = [Stone::Black, Stone::White];
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major index on a `size`x`size` board
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: (idx / size) as u8,
            col: (idx % size) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32, size: usize) -> bool {
        row >= 0 && row < size as i32 && col >= 0 && col < size as i32
    }

    /// Step `(dr, dc)` cells away, or `None` when that leaves the board.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, size: usize) -> Option<Pos> {
        let r = self.row as i32 + dr;
        let c = self.col as i32 + dc;
        if Pos::is_valid(r, c, size) {
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }

    /// Center cell of a `size`x`size` board
    #[inline]
    pub fn center(size: usize) -> Pos {
        let mid = (size / 2) as u8;
        Pos::new(mid, mid)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
