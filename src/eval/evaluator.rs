//! Incremental shape-score evaluator
//!
//! Every empty cell carries, per role, the shape a stone there would make in
//! each of the four directions and the additive score derived from them.
//! After a move only the empty cells within five steps along a line of the
//! changed cell are reclassified: a stone cannot affect any shape further
//! away than a five can reach.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Pos, Stone};
//! use gomoku::eval::Evaluator;
//!
//! let mut eval = Evaluator::new(15);
//! eval.apply_move(Pos::new(7, 7), Stone::Black);
//! eval.apply_move(Pos::new(7, 8), Stone::Black);
//! assert!(eval.total_score(Stone::Black) > 0);
//!
//! eval.undo_move(Pos::new(7, 8));
//! eval.undo_move(Pos::new(7, 7));
//! assert_eq!(eval.total_score(Stone::Black), 0);
//! ```

use crate::board::{Pos, Stone, DIRECTIONS};
use crate::config::Config;

use super::candidates::{self, Candidates};
use super::patterns::real_shape_score;
use super::shape::{classify, line_at, Shape};

/// How far a stone's influence reaches along a line
const UPDATE_REACH: i32 = 5;

/// Per-cell, per-role shape and score maintenance.
#[derive(Debug, Clone)]
pub struct Evaluator {
    size: usize,
    cells: Vec<Stone>,
    /// Score grids indexed by role, then cell
    scores: [Vec<i32>; 2],
    /// Shape cache indexed by role, direction, then cell
    shapes: [[Vec<Shape>; 4]; 2],
    history: Vec<(Pos, Stone)>,
}

impl Evaluator {
    #[must_use]
    pub fn new(size: usize) -> Self {
        let n = size * size;
        let mut eval = Self {
            size,
            cells: vec![Stone::Empty; n],
            scores: [vec![0; n], vec![0; n]],
            shapes: std::array::from_fn(|_| std::array::from_fn(|_| vec![Shape::None; n])),
            history: Vec::with_capacity(n),
        };
        // Lone-stone shapes depend on distance to the edge, so seed every cell.
        for idx in 0..n {
            let pos = Pos::from_index(idx, size);
            for role in Stone::ROLES {
                eval.update_cell(pos, role, None);
            }
        }
        eval
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Moves in play order
    #[inline]
    pub fn history(&self) -> &[(Pos, Stone)] {
        &self.history
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cells[pos.to_index(self.size)] == Stone::Empty
    }

    /// Cached shape for `role` at `pos` along direction `dir` (0..4)
    #[inline]
    pub fn shape_at(&self, role: Stone, dir: usize, pos: Pos) -> Shape {
        self.shapes[role.index()][dir][pos.to_index(self.size)]
    }

    /// Score contribution of `pos` for `role`
    #[inline]
    pub fn score_at(&self, role: Stone, pos: Pos) -> i32 {
        self.scores[role.index()][pos.to_index(self.size)]
    }

    /// Score grid for `role`, row-major
    #[inline]
    pub fn scores(&self, role: Stone) -> &[i32] {
        &self.scores[role.index()]
    }

    /// Record a stone and refresh the affected neighbourhood.
    pub fn apply_move(&mut self, pos: Pos, role: Stone) {
        let idx = pos.to_index(self.size);
        for r in 0..2 {
            for dir in 0..4 {
                self.shapes[r][dir][idx] = Shape::None;
            }
            self.scores[r][idx] = 0;
        }
        self.cells[idx] = role;
        self.update_point(pos);
        self.history.push((pos, role));
    }

    /// Lift the stone at `pos` and refresh the affected neighbourhood.
    pub fn undo_move(&mut self, pos: Pos) {
        self.cells[pos.to_index(self.size)] = Stone::Empty;
        self.update_point(pos);
        self.history.pop();
    }

    /// Raw score of `role` minus raw score of its opponent.
    ///
    /// Walks both grids; call once per evaluated position.
    #[must_use]
    pub fn total_score(&self, role: Stone) -> i32 {
        let own: i32 = self.scores[role.index()].iter().sum();
        let other: i32 = self.scores[role.opponent().index()].iter().sum();
        own - other
    }

    /// Number of directional shapes at `pos` that are at least a Two,
    /// for one role or for both when `role` is `None`.
    #[must_use]
    pub fn threat_count(&self, pos: Pos, role: Option<Stone>) -> usize {
        let idx = pos.to_index(self.size);
        let count = |r: Stone| {
            (0..4)
                .filter(|&dir| self.shapes[r.index()][dir][idx].is_threat())
                .count()
        };
        match role {
            Some(r) => count(r),
            None => Stone::ROLES.iter().map(|&r| count(r)).sum(),
        }
    }

    /// Tactically relevant empty cells for `role` to move at search `depth`.
    #[must_use]
    pub fn candidate_points(
        &self,
        role: Stone,
        depth: usize,
        only_threes: bool,
        only_fours: bool,
        config: &Config,
    ) -> Candidates {
        candidates::generate(self, role, depth, only_threes, only_fours, config)
    }

    fn update_point(&mut self, pos: Pos) {
        for role in Stone::ROLES {
            self.update_cell(pos, role, None);
        }
        for (dir, &(dr, dc)) in DIRECTIONS.iter().enumerate() {
            for sign in [1, -1] {
                for step in 1..=UPDATE_REACH {
                    let Some(p) = pos.offset(sign * step * dr, sign * step * dc, self.size) else {
                        break;
                    };
                    if self.cells[p.to_index(self.size)] != Stone::Empty {
                        continue;
                    }
                    for role in Stone::ROLES {
                        self.update_cell(p, role, Some(dir));
                    }
                }
            }
        }
    }

    /// Reclassify one direction (or all four) at an empty cell and rescore it.
    fn update_cell(&mut self, pos: Pos, role: Stone, dir: Option<usize>) {
        let idx = pos.to_index(self.size);
        if self.cells[idx] != Stone::Empty {
            return;
        }
        let r = role.index();
        let dirs = match dir {
            Some(d) => d..d + 1,
            None => 0..4,
        };
        for d in dirs {
            let line = line_at(&self.cells, self.size, pos, DIRECTIONS[d]);
            self.shapes[r][d][idx] = classify(&line, role).0;
        }
        self.scores[r][idx] = self.cell_score(r, idx);
    }

    /// Score of one cell from its four cached shapes.
    ///
    /// Directions are walked in order; once the counts seen so far form a
    /// double threat, later directions score as that compound shape.
    fn cell_score(&self, r: usize, idx: usize) -> i32 {
        let (mut fours, mut threes, mut twos) = (0, 0, 0);
        let mut score = 0;
        for dir in 0..4 {
            let shape = self.shapes[r][dir][idx];
            if shape == Shape::None {
                continue;
            }
            match shape {
                Shape::Four | Shape::BlockFour => fours += 1,
                Shape::Three => threes += 1,
                Shape::Two => twos += 1,
                _ => {}
            }
            let compound = if fours >= 2 {
                Shape::FourFour
            } else if fours > 0 && threes > 0 {
                Shape::FourThree
            } else if threes >= 2 {
                Shape::ThreeThree
            } else if twos >= 2 {
                Shape::TwoTwo
            } else {
                Shape::None
            };
            score += real_shape_score(shape.max(compound));
        }
        score
    }
}
