//! Directional shape classification
//!
//! A shape describes what a stone on an empty cell would make along one
//! line: a nine-cell window centered on the cell, with the board edge
//! represented as `None`. Classification is pure and only looks at the
//! window.
//!
//! # Example
//!
//! ```
//! use gomoku::board::Stone;
//! use gomoku::eval::{classify, Shape};
//!
//! let b = Some(Stone::Black);
//! let e = Some(Stone::Empty);
//! // . . b b [.] b b . .
//! let line = [e, e, b, b, e, b, b, e, e];
//! assert_eq!(classify(&line, Stone::Black), (Shape::Five, 5));
//! ```

use crate::board::{Pos, Stone};

/// Cells on each side of the center
pub const REACH: usize = 4;
/// Window length
pub const LINE_LEN: usize = REACH * 2 + 1;
const CENTER: usize = REACH;

/// Nine cells along one direction; `None` is off the board.
pub type Line = [Option<Stone>; LINE_LEN];

/// Tactical shape, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Shape {
    #[default]
    None,
    BlockOne,
    One,
    BlockTwo,
    Two,
    TwoTwo,
    BlockThree,
    Three,
    ThreeThree,
    BlockFour,
    Four,
    FourFour,
    FourThree,
    BlockFive,
    Five,
}

impl Shape {
    /// Every shape, weakest first
    pub const ALL: [Shape; 15] = [
        Shape::None,
        Shape::BlockOne,
        Shape::One,
        Shape::BlockTwo,
        Shape::Two,
        Shape::TwoTwo,
        Shape::BlockThree,
        Shape::Three,
        Shape::ThreeThree,
        Shape::BlockFour,
        Shape::Four,
        Shape::FourFour,
        Shape::FourThree,
        Shape::BlockFive,
        Shape::Five,
    ];

    #[inline]
    pub fn is_five(self) -> bool {
        matches!(self, Shape::Five | Shape::BlockFive)
    }

    #[inline]
    pub fn is_four(self) -> bool {
        matches!(self, Shape::Four | Shape::BlockFour)
    }

    /// Counts toward a cell's threat tally in the restricted searches
    #[inline]
    pub fn is_threat(self) -> bool {
        self >= Shape::Two
    }

    /// Position in [`Shape::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// What one side of the window looks like from the center outward.
#[derive(Debug, Default, Clone, Copy)]
struct Side {
    /// Own or empty cells before an opponent stone or the edge
    reach: usize,
    /// Own stones adjacent to the center
    solid: usize,
    /// Empties right after the solid run
    solid_open: usize,
    /// The edge sits right after the solid run
    solid_at_edge: bool,
    /// Own stones beyond exactly one empty after the solid run
    gap_stones: usize,
    /// Empties right after the gap stones
    gap_open: usize,
}

#[derive(Clone, Copy, PartialEq)]
enum Phase {
    Solid,
    OneEmpty,
    Open,
    Gap,
    GapOpen,
    Done,
}

fn scan(line: &Line, role: Stone, forward: bool) -> Side {
    let mut side = Side::default();
    let mut phase = Phase::Solid;
    for k in 1..=REACH {
        let idx = if forward { CENTER + k } else { CENTER - k };
        let cell = match line[idx] {
            None => {
                side.solid_at_edge = side.solid == k - 1;
                break;
            }
            Some(s) if s == role.opponent() => break,
            Some(s) => s,
        };
        side.reach += 1;
        let own = cell == role;
        phase = match (phase, own) {
            (Phase::Solid, true) => {
                side.solid += 1;
                Phase::Solid
            }
            (Phase::Solid, false) => {
                side.solid_open = 1;
                Phase::OneEmpty
            }
            (Phase::OneEmpty, true) | (Phase::Gap, true) => {
                side.gap_stones += 1;
                Phase::Gap
            }
            (Phase::OneEmpty, false) | (Phase::Open, false) => {
                side.solid_open += 1;
                Phase::Open
            }
            (Phase::Gap, false) | (Phase::GapOpen, false) => {
                side.gap_open += 1;
                Phase::GapOpen
            }
            (Phase::Open, true) | (Phase::GapOpen, true) | (Phase::Done, _) => Phase::Done,
        };
    }
    side
}

/// Classify the window as if `role` were placed on its center.
///
/// Returns the shape and the length of the solid run through the center.
/// Compound shapes are never returned here.
#[must_use]
pub fn classify(line: &Line, role: Stone) -> (Shape, u8) {
    let left = scan(line, role, false);
    let right = scan(line, role, true);

    let total = left.reach + right.reach + 1;
    let solid = left.solid + right.solid + 1;
    let run = solid as u8;

    if total < 5 {
        return (Shape::None, run);
    }

    if solid >= 5 {
        let shape = if left.solid_at_edge || right.solid_at_edge {
            Shape::BlockFive
        } else {
            Shape::Five
        };
        return (shape, run);
    }

    if solid == 4 {
        let shape = if left.solid_open >= 1 && right.solid_open >= 1 {
            Shape::Four
        } else {
            Shape::BlockFour
        };
        return (shape, run);
    }

    // Runs that bridge one empty cell on either side
    let via_left = (left.gap_stones > 0).then(|| {
        let stones = solid + left.gap_stones;
        (stones, left.gap_open >= 1 && right.solid_open >= 1)
    });
    let via_right = (right.gap_stones > 0).then(|| {
        let stones = solid + right.gap_stones;
        (stones, right.gap_open >= 1 && left.solid_open >= 1)
    });
    let gapped = match (via_left, via_right) {
        (Some(a), Some(b)) => Some(if (a.0, a.1) >= (b.0, b.1) { a } else { b }),
        (a, b) => a.or(b),
    };

    if let Some((stones, _)) = gapped {
        if stones >= 4 {
            return (Shape::BlockFour, run);
        }
    }

    if solid == 3 {
        let open = (right.solid_open >= 2 && left.solid_open >= 1)
            || (right.solid_open >= 1 && left.solid_open >= 2);
        let shape = if open { Shape::Three } else { Shape::BlockThree };
        return (shape, run);
    }

    if let Some((3, open)) = gapped {
        let shape = if open { Shape::Three } else { Shape::BlockThree };
        return (shape, run);
    }

    let roomy = total > 5;
    if solid == 2 || gapped.is_some() {
        let shape = if roomy { Shape::Two } else { Shape::BlockTwo };
        return (shape, run);
    }

    let shape = if roomy { Shape::One } else { Shape::BlockOne };
    (shape, run)
}

/// Read the window through `pos` along direction `(dr, dc)` from a row-major grid.
#[must_use]
pub fn line_at(cells: &[Stone], size: usize, pos: Pos, (dr, dc): (i32, i32)) -> Line {
    let mut line = [None; LINE_LEN];
    for (i, slot) in line.iter_mut().enumerate() {
        let k = i as i32 - CENTER as i32;
        *slot = pos
            .offset(dr * k, dc * k, size)
            .map(|p| cells[p.to_index(size)]);
    }
    line
}
