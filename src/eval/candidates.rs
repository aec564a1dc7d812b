//! Candidate move generation
//!
//! Collects empty cells by the shapes they carry for either side, then walks
//! a fixed priority cascade: the first tier with any point wins. Forcing
//! tiers (fives, fours, double threats) are returned whole; the quiet tier
//! is capped at `points_limit`.
//!
//! In the restricted searches the filters deliberately treat the attacker
//! (`first`) and the defender differently.

use crate::board::{has_in_line, Pos, Stone};
use crate::config::Config;

use super::evaluator::Evaluator;
use super::shape::Shape;

/// Moves considered "recent" by the depth filters
const RECENT_MOVES: usize = 4;

/// Which cascade tier produced a candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// A five for either side
    Five,
    /// Fours (always this tier in the fours-only search)
    Four,
    DoubleFour,
    FourThree,
    DoubleThree,
    /// Threes and blocked fours, threes-and-fours search only
    Threes,
    /// Everything else worth a look, truncated
    Quiet,
}

/// Output of the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    pub tier: Tier,
    pub moves: Vec<Pos>,
}

/// Insertion-ordered point sets, one per shape.
struct ShapePoints {
    size: usize,
    lists: Vec<Vec<Pos>>,
    /// Bit `shape.index()` is set when the cell is already in that list
    marks: Vec<u16>,
}

impl ShapePoints {
    fn new(size: usize) -> Self {
        Self {
            size,
            lists: vec![Vec::new(); Shape::ALL.len()],
            marks: vec![0; size * size],
        }
    }

    fn insert(&mut self, shape: Shape, pos: Pos) {
        let bit = 1u16 << shape.index();
        let mark = &mut self.marks[pos.to_index(self.size)];
        if *mark & bit == 0 {
            *mark |= bit;
            self.lists[shape.index()].push(pos);
        }
    }

    fn has(&self, shape: Shape) -> bool {
        !self.lists[shape.index()].is_empty()
    }

    fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    /// Ordered, deduplicated union of several sets
    fn union(&self, shapes: &[Shape]) -> Vec<Pos> {
        let mut seen = vec![false; self.size * self.size];
        let mut out = Vec::new();
        for &shape in shapes {
            for &pos in &self.lists[shape.index()] {
                let idx = pos.to_index(self.size);
                if !seen[idx] {
                    seen[idx] = true;
                    out.push(pos);
                }
            }
        }
        out
    }
}

pub(super) fn generate(
    eval: &Evaluator,
    role: Stone,
    depth: usize,
    only_threes: bool,
    only_fours: bool,
    config: &Config,
) -> Candidates {
    let points = if config.only_in_line && eval.history().len() >= config.inline_count {
        points_in_line(eval, role, config).unwrap_or_else(|| {
            collect_points(eval, role, depth, only_threes, only_fours, config)
        })
    } else {
        collect_points(eval, role, depth, only_threes, only_fours, config)
    };
    select(&points, only_threes, only_fours, config.points_limit)
}

fn select(points: &ShapePoints, only_threes: bool, only_fours: bool, limit: usize) -> Candidates {
    use Shape::*;

    let (tier, moves) = if points.has(Five) || points.has(BlockFive) {
        (Tier::Five, points.union(&[Five, BlockFive]))
    } else if only_fours || points.has(Four) {
        (Tier::Four, points.union(&[Four, BlockFour]))
    } else if points.has(FourFour) {
        (Tier::DoubleFour, points.union(&[FourFour, BlockFour]))
    } else if points.has(FourThree) {
        (Tier::FourThree, points.union(&[FourThree, BlockFour, Three]))
    } else if points.has(ThreeThree) {
        (Tier::DoubleThree, points.union(&[ThreeThree, BlockFour, Three]))
    } else if only_threes {
        (Tier::Threes, points.union(&[BlockFour, Three]))
    } else {
        let mut moves = points.union(&[BlockFour, Three, BlockThree, TwoTwo, Two]);
        moves.truncate(limit);
        (Tier::Quiet, moves)
    };
    Candidates { tier, moves }
}

fn collect_points(
    eval: &Evaluator,
    role: Stone,
    depth: usize,
    only_threes: bool,
    only_fours: bool,
    config: &Config,
) -> ShapePoints {
    let size = eval.size();
    let first = if depth % 2 == 0 { role } else { role.opponent() };
    let recent: Vec<Pos> = recent_moves(eval, RECENT_MOVES);
    let in_line = |pos: Pos| has_in_line(pos, &recent, config.in_line_distance);
    let mut points = ShapePoints::new(size);

    for r in [role, role.opponent()] {
        for idx in 0..size * size {
            let pos = Pos::from_index(idx, size);
            if !eval.is_empty(pos) {
                continue;
            }
            let (mut fours, mut threes, mut twos) = (0, 0, 0);
            for dir in 0..4 {
                let shape = eval.shape_at(r, dir, pos);
                if shape == Shape::None {
                    continue;
                }
                let forcing = shape.is_four() || shape.is_five();

                if only_fours {
                    if r == first && !forcing {
                        continue;
                    }
                    if r != first && shape.is_five() {
                        continue;
                    }
                }
                if only_threes {
                    if shape != Shape::Three && !forcing {
                        continue;
                    }
                    if shape == Shape::Three && r != first {
                        continue;
                    }
                    if depth % 2 == 0 {
                        if depth == 0 && r != first {
                            continue;
                        }
                        if depth > 0
                            && matches!(shape, Shape::Three | Shape::BlockFour)
                            && eval.threat_count(pos, Some(r)) == 1
                        {
                            continue;
                        }
                    } else if depth > 1
                        && shape == Shape::BlockFour
                        && (eval.threat_count(pos, None) == 1 || !in_line(pos))
                    {
                        continue;
                    }
                }
                if only_fours && !forcing {
                    continue;
                }
                if config.narrow_deep_quiet
                    && depth > 2
                    && matches!(shape, Shape::Two | Shape::TwoTwo | Shape::BlockThree)
                    && !in_line(pos)
                {
                    continue;
                }

                points.insert(shape, pos);
                match shape {
                    Shape::Four | Shape::BlockFour => fours += 1,
                    Shape::Three => threes += 1,
                    Shape::Two => twos += 1,
                    _ => {}
                }
                let compound = if fours >= 2 {
                    Some(Shape::FourFour)
                } else if fours > 0 && threes > 0 {
                    Some(Shape::FourThree)
                } else if threes >= 2 {
                    Some(Shape::ThreeThree)
                } else if twos >= 2 {
                    Some(Shape::TwoTwo)
                } else {
                    None
                };
                if let Some(compound) = compound {
                    points.insert(compound, pos);
                }
            }
        }
    }
    points
}

/// Shaped empty cells on a line with one of the last `inline_count` moves.
fn points_in_line(eval: &Evaluator, role: Stone, config: &Config) -> Option<ShapePoints> {
    let size = eval.size();
    let recent = recent_moves(eval, config.inline_count);
    let mut points = ShapePoints::new(size);
    let mut processed: Vec<Option<Stone>> = vec![None; size * size];

    for r in [role, role.opponent()] {
        for &origin in &recent {
            for &(dr, dc) in &crate::board::DIRECTIONS {
                for sign in [1, -1] {
                    for step in 1..=config.in_line_distance as i32 {
                        let Some(pos) = origin.offset(sign * step * dr, sign * step * dc, size)
                        else {
                            break;
                        };
                        if !eval.is_empty(pos) {
                            continue;
                        }
                        let idx = pos.to_index(size);
                        if processed[idx] == Some(r) {
                            continue;
                        }
                        processed[idx] = Some(r);
                        for dir in 0..4 {
                            let shape = eval.shape_at(r, dir, pos);
                            if shape != Shape::None {
                                points.insert(shape, pos);
                            }
                        }
                    }
                }
            }
        }
    }

    (!points.is_empty()).then_some(points)
}

fn recent_moves(eval: &Evaluator, count: usize) -> Vec<Pos> {
    let history = eval.history();
    let start = history.len().saturating_sub(count);
    history[start..].iter().map(|&(pos, _)| pos).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_with(size: usize, moves: &[(u8, u8, Stone)]) -> Evaluator {
        let mut eval = Evaluator::new(size);
        for &(r, c, s) in moves {
            eval.apply_move(Pos::new(r, c), s);
        }
        eval
    }

    fn candidates(eval: &Evaluator, role: Stone, depth: usize) -> Candidates {
        eval.candidate_points(role, depth, false, false, &Config::default())
    }

    #[test]
    fn test_empty_board_has_no_shaped_points() {
        let eval = Evaluator::new(15);
        let c = candidates(&eval, Stone::Black, 0);
        assert_eq!(c.tier, Tier::Quiet);
        assert!(c.moves.is_empty());
    }

    #[test]
    fn test_five_points_win_outright() {
        // Black has four in a row blocked on the left; White builds elsewhere.
        let eval = eval_with(
            15,
            &[
                (7, 3, Stone::White),
                (7, 4, Stone::Black),
                (7, 5, Stone::Black),
                (7, 6, Stone::Black),
                (7, 7, Stone::Black),
                (3, 3, Stone::White),
                (3, 4, Stone::White),
            ],
        );
        let c = candidates(&eval, Stone::White, 0);
        assert_eq!(c.tier, Tier::Five);
        assert_eq!(c.moves, vec![Pos::new(7, 8)]);
    }

    #[test]
    fn test_open_four_points() {
        let eval = eval_with(15, &[(7, 6, Stone::Black), (7, 7, Stone::Black), (7, 8, Stone::Black)]);
        let c = candidates(&eval, Stone::White, 0);
        assert_eq!(c.tier, Tier::Four);
        assert!(c.moves.contains(&Pos::new(7, 5)));
        assert!(c.moves.contains(&Pos::new(7, 9)));
    }

    #[test]
    fn test_never_returns_occupied_cells() {
        let eval = eval_with(
            9,
            &[(4, 4, Stone::Black), (4, 5, Stone::White), (3, 4, Stone::Black), (5, 5, Stone::White)],
        );
        for depth in 0..4 {
            for role in Stone::ROLES {
                let c = candidates(&eval, role, depth);
                assert!(c.moves.iter().all(|&p| eval.is_empty(p)), "depth {depth}");
            }
        }
    }

    #[test]
    fn test_quiet_tier_respects_limit() {
        let eval = eval_with(15, &[(7, 7, Stone::Black), (8, 8, Stone::White), (6, 8, Stone::Black)]);
        let config = Config { points_limit: 3, ..Config::default() };
        let c = eval.candidate_points(Stone::Black, 0, false, false, &config);
        assert_eq!(c.tier, Tier::Quiet);
        assert_eq!(c.moves.len(), 3);
    }

    #[test]
    fn test_fours_only_without_fours_is_empty() {
        let eval = eval_with(15, &[(7, 7, Stone::Black), (7, 8, Stone::Black)]);
        let c = eval.candidate_points(Stone::Black, 0, false, true, &Config::default());
        assert_eq!(c.tier, Tier::Four);
        assert!(c.moves.is_empty());
    }

    #[test]
    fn test_double_four_tier() {
        // Two blocked threes meeting at (7, 7)
        let eval = eval_with(
            15,
            &[
                (7, 3, Stone::White),
                (7, 4, Stone::Black),
                (7, 5, Stone::Black),
                (7, 6, Stone::Black),
                (3, 7, Stone::White),
                (4, 7, Stone::Black),
                (5, 7, Stone::Black),
                (6, 7, Stone::Black),
            ],
        );
        let c = candidates(&eval, Stone::Black, 0);
        assert_eq!(c.tier, Tier::DoubleFour);
        assert_eq!(c.moves[0], Pos::new(7, 7));
        assert!(c.moves.contains(&Pos::new(7, 8)));
        assert!(c.moves.contains(&Pos::new(8, 7)));
    }

    #[test]
    fn test_four_three_tier() {
        // Blocked three across, open two down; (7, 7) makes both
        let eval = eval_with(
            15,
            &[
                (7, 3, Stone::White),
                (7, 4, Stone::Black),
                (7, 5, Stone::Black),
                (7, 6, Stone::Black),
                (5, 7, Stone::Black),
                (6, 7, Stone::Black),
            ],
        );
        let c = candidates(&eval, Stone::White, 0);
        assert_eq!(c.tier, Tier::FourThree);
        assert_eq!(c.moves[0], Pos::new(7, 7));
    }

    #[test]
    fn test_double_three_tier() {
        let eval = eval_with(
            15,
            &[
                (7, 5, Stone::Black),
                (7, 6, Stone::Black),
                (5, 7, Stone::Black),
                (6, 7, Stone::Black),
            ],
        );
        let c = candidates(&eval, Stone::Black, 0);
        assert_eq!(c.tier, Tier::DoubleThree);
        assert_eq!(c.moves[0], Pos::new(7, 7));
        // Single threes ride along
        assert!(c.moves.contains(&Pos::new(7, 4)));
        assert!(c.moves.contains(&Pos::new(4, 7)));
    }

    fn threes(eval: &Evaluator, role: Stone, depth: usize) -> Candidates {
        eval.candidate_points(role, depth, true, false, &Config::default())
    }

    #[test]
    fn test_threes_tier_ignores_defender_at_root() {
        // Black: open two on row 7. White: blocked three on row 2.
        let eval = eval_with(
            15,
            &[
                (7, 6, Stone::Black),
                (7, 7, Stone::Black),
                (2, 1, Stone::Black),
                (2, 2, Stone::White),
                (2, 3, Stone::White),
                (2, 4, Stone::White),
            ],
        );

        let black = threes(&eval, Stone::Black, 0);
        assert_eq!(black.tier, Tier::Threes);
        assert!(black.moves.contains(&Pos::new(7, 5)));
        assert!(black.moves.contains(&Pos::new(7, 8)));
        assert!(!black.moves.contains(&Pos::new(2, 5)), "defender's four skipped at the root");

        let white = threes(&eval, Stone::White, 0);
        assert_eq!(white.tier, Tier::Threes);
        assert!(white.moves.contains(&Pos::new(2, 5)));
        assert!(white.moves.iter().all(|p| p.row == 2), "{:?}", white.moves);
    }

    #[test]
    fn test_threes_need_a_second_threat_at_even_depth() {
        // (7, 8) extends the open two and pairs with (6, 8); (7, 5) is a lone three
        let eval = eval_with(15, &[(7, 6, Stone::Black), (7, 7, Stone::Black), (6, 8, Stone::Black)]);

        let root = threes(&eval, Stone::Black, 0);
        assert!(root.moves.contains(&Pos::new(7, 5)));
        assert!(root.moves.contains(&Pos::new(7, 8)));

        let deeper = threes(&eval, Stone::Black, 2);
        assert_eq!(deeper.tier, Tier::Threes);
        assert!(!deeper.moves.contains(&Pos::new(7, 5)));
        assert!(deeper.moves.contains(&Pos::new(7, 8)));
    }

    #[test]
    fn test_lone_block_four_dropped_at_odd_depth() {
        // Black's blocked three, then four moves far away
        let eval = eval_with(
            15,
            &[
                (2, 1, Stone::White),
                (2, 2, Stone::Black),
                (2, 3, Stone::Black),
                (2, 4, Stone::Black),
                (12, 12, Stone::White),
                (12, 8, Stone::Black),
                (9, 13, Stone::White),
                (13, 6, Stone::Black),
            ],
        );
        assert!(threes(&eval, Stone::Black, 1).moves.contains(&Pos::new(2, 5)));
        assert!(!threes(&eval, Stone::Black, 3).moves.contains(&Pos::new(2, 5)));
    }

    #[test]
    fn test_deep_quiet_narrowing_can_be_disabled() {
        // A lone Black stone far from the last four moves
        let eval = eval_with(
            15,
            &[
                (2, 2, Stone::Black),
                (12, 12, Stone::White),
                (12, 8, Stone::Black),
                (8, 12, Stone::White),
                (13, 6, Stone::Black),
            ],
        );
        let far_two = Pos::new(2, 3);
        let narrowed = Config { points_limit: 200, ..Config::default() };
        let wide = Config { narrow_deep_quiet: false, ..narrowed.clone() };

        let c = eval.candidate_points(Stone::Black, 3, false, false, &narrowed);
        assert!(!c.moves.contains(&far_two));
        let c = eval.candidate_points(Stone::Black, 3, false, false, &wide);
        assert!(c.moves.contains(&far_two));
        // Shallow plies are never narrowed
        let c = eval.candidate_points(Stone::Black, 2, false, false, &narrowed);
        assert!(c.moves.contains(&far_two));
    }

    #[test]
    fn test_in_line_policy_limits_to_recent_lines() {
        let eval = eval_with(
            15,
            &[
                (1, 1, Stone::Black),
                (1, 2, Stone::Black),
                (10, 10, Stone::White),
                (12, 13, Stone::White),
            ],
        );
        let config = Config { only_in_line: true, inline_count: 1, ..Config::default() };
        let c = eval.candidate_points(Stone::Black, 0, false, false, &config);
        let origin = Pos::new(12, 13);
        assert!(!c.moves.is_empty());
        assert!(c.moves.iter().all(|&p| crate::board::is_in_line(p, origin, 6)));
    }
}
