//! Negamax search with alpha-beta pruning
//!
//! One engine serves three modes: the general search, and two restricted
//! searches used to prove forced wins cheaply (threes-and-fours, fours-only).
//! Depth grows in two-ply steps inside every node: each even target depth
//! is searched in turn, and shallower targets only count when they prove a
//! five, so a quick forced win is never traded for a slow static edge.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::{SearchMode, Searcher};
//! use gomoku::Config;
//!
//! let config = Config::default();
//! let mut board = Board::with_config(15, Stone::Black, &config).unwrap();
//! let mut searcher = Searcher::new(&config);
//!
//! let result = searcher.search(&mut board, Stone::Black, 2, SearchMode::General);
//! assert_eq!(result.best_move, Some(Pos::new(7, 7)));
//! ```

use log::debug;
use serde::Serialize;

use crate::board::{Board, Pos, Stone};
use crate::config::Config;
use crate::eval::{PatternScore, MAX_SCORE};

use super::tt::{CacheStats, FifoCache, TTEntry};

/// Forced-win threshold
const FIVE: i32 = PatternScore::FIVE;

/// Beyond this ply the general search only looks at threes and fours
pub const THREES_ONLY_PLY: usize = 6;

/// General-mode nodes deeper than this are not cached
pub const CACHE_PLY: usize = 6;

/// Which moves the search may consider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SearchMode {
    /// Every candidate the generator offers
    General,
    /// Threes and fours only (victory by continuous threats)
    ThreesAndFours,
    /// Fours only (victory by continuous fours)
    FoursOnly,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [
        SearchMode::General,
        SearchMode::ThreesAndFours,
        SearchMode::FoursOnly,
    ];

    #[inline]
    pub fn only_threes(self) -> bool {
        self == SearchMode::ThreesAndFours
    }

    #[inline]
    pub fn only_fours(self) -> bool {
        self == SearchMode::FoursOnly
    }

    #[inline]
    pub fn is_restricted(self) -> bool {
        self != SearchMode::General
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Search statistics for diagnostics and tuning.
///
/// Owned by a single search call and returned with its result.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes visited
    pub nodes: u64,
    /// Nodes answered from the transposition cache
    pub cache_hits: u64,
    /// Entries written to the transposition cache
    pub cache_stores: u64,
    /// Depth iterations cut short by alpha >= beta
    pub cutoffs: u64,
}

impl SearchStats {
    /// Fraction of visited nodes answered by the cache
    pub fn hit_rate(&self) -> f64 {
        if self.nodes == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.nodes as f64
        }
    }

    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.cache_hits += other.cache_hits;
        self.cache_stores += other.cache_stores;
        self.cutoffs += other.cutoffs;
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Negamax value for the searching side
    pub score: i32,
    /// Best move, `None` when the position offered no candidate
    pub best_move: Option<Pos>,
    /// Principal line from the root
    pub path: Vec<Pos>,
    pub stats: SearchStats,
}

impl SearchResult {
    /// The searching side has a proven five
    #[inline]
    pub fn is_win(&self) -> bool {
        self.score >= FIVE
    }
}

/// Largest even depth not above `depth`, at least 2 unless `depth` is 0
#[inline]
fn even_depth(depth: usize) -> usize {
    if depth == 0 {
        0
    } else {
        (depth & !1).max(2)
    }
}

/// Value, move and principal line of one node
struct Node {
    value: i32,
    best_move: Option<Pos>,
    path: Vec<Pos>,
}

impl Node {
    fn leaf(value: i32, path: &[Pos]) -> Self {
        Self {
            value,
            best_move: None,
            path: path.to_vec(),
        }
    }
}

// =============================================================================
// Searcher
// =============================================================================

/// Negamax searcher owning one transposition cache per mode.
///
/// Caches persist across searches; call [`Searcher::clear_cache`] when the
/// board they were filled from is discarded.
#[derive(Debug, Clone)]
pub struct Searcher {
    caches: [FifoCache<TTEntry>; 3],
    alpha_beta: bool,
}

impl Searcher {
    /// Searcher with fresh caches sized and enabled per `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let caches =
            std::array::from_fn(|_| FifoCache::new(config.cache_capacity, config.enable_cache));
        Self::with_caches(caches, config.alpha_beta)
    }

    /// Searcher over caller-provided caches, indexed like [`SearchMode::ALL`].
    #[must_use]
    pub fn with_caches(caches: [FifoCache<TTEntry>; 3], alpha_beta: bool) -> Self {
        Self { caches, alpha_beta }
    }

    /// Search `depth` plies for `role`.
    ///
    /// The two-ply iteration only lands on even depths, so an odd `depth` is
    /// searched as the even depth below it (and `1` as `2`).
    pub fn search(
        &mut self,
        board: &mut Board,
        role: Stone,
        depth: usize,
        mode: SearchMode,
    ) -> SearchResult {
        let depth = even_depth(depth);
        let mut stats = SearchStats::default();
        let mut path = Vec::with_capacity(depth);
        let node = self.negamax(
            board,
            role,
            depth,
            0,
            &mut path,
            -MAX_SCORE,
            MAX_SCORE,
            mode,
            &mut stats,
        );
        debug!(
            "{mode:?} search depth {depth} for {role:?}: score {}, move {:?}, {} nodes, {} hits",
            node.value, node.best_move, stats.nodes, stats.cache_hits
        );
        SearchResult {
            score: node.value,
            best_move: node.best_move,
            path: node.path,
            stats,
        }
    }

    /// Drop every cached search result.
    pub fn clear_cache(&mut self) {
        for cache in &mut self.caches {
            cache.clear();
        }
    }

    pub fn set_cache_enabled(&mut self, enabled: bool) {
        for cache in &mut self.caches {
            cache.set_enabled(enabled);
        }
    }

    /// Usage of the cache behind `mode`
    #[must_use]
    pub fn cache_stats(&self, mode: SearchMode) -> CacheStats {
        self.caches[mode.index()].stats()
    }

    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        board: &mut Board,
        role: Stone,
        depth: usize,
        c_depth: usize,
        path: &mut Vec<Pos>,
        mut alpha: i32,
        beta: i32,
        mode: SearchMode,
        stats: &mut SearchStats,
    ) -> Node {
        stats.nodes += 1;
        if c_depth >= depth || board.is_game_over() {
            return Node::leaf(board.evaluate(role), path);
        }

        let hash = board.hash();
        let cache = &self.caches[mode.index()];
        let prev_depth = cache.get(hash).map(|entry| entry.depth);
        if let Some(entry) = cache.get(hash) {
            let covers = entry.value.abs() >= FIVE || entry.depth >= depth - c_depth;
            if entry.role == role && entry.mode == mode && covers {
                stats.cache_hits += 1;
                let mut full = path.clone();
                full.extend_from_slice(&entry.path);
                return Node {
                    value: entry.value,
                    best_move: entry.best_move,
                    path: full,
                };
            }
        }

        let points = board.valuable_moves(
            role,
            c_depth,
            mode.only_threes() || c_depth > THREES_ONLY_PLY,
            mode.only_fours(),
        );
        if points.is_empty() {
            return Node::leaf(board.evaluate(role), path);
        }

        let alpha_orig = alpha;
        let mut best = Node {
            value: -MAX_SCORE,
            best_move: None,
            path: path.clone(),
        };

        'depths: for d in (c_depth + 1)..=depth {
            if d % 2 != 0 {
                continue;
            }
            for &point in &points {
                if board.put_as(point, role).is_err() {
                    continue;
                }
                path.push(point);
                let (child_alpha, child_beta) = if self.alpha_beta {
                    (-beta, -alpha)
                } else {
                    (-MAX_SCORE, MAX_SCORE)
                };
                let child = self.negamax(
                    board,
                    role.opponent(),
                    d,
                    c_depth + 1,
                    path,
                    child_alpha,
                    child_beta,
                    mode,
                    stats,
                );
                path.pop();
                let undone = board.undo();
                debug_assert!(undone.is_ok(), "undo after put cannot fail");

                let current = -child.value;
                if current >= FIVE || d == depth {
                    let improves = current > best.value;
                    let delays_loss = current <= -FIVE
                        && best.value <= -FIVE
                        && child.path.len() > best.path.len();
                    if improves || delays_loss {
                        best = Node {
                            value: current,
                            best_move: Some(point),
                            path: child.path,
                        };
                    }
                }

                alpha = alpha.max(best.value);
                if alpha >= FIVE {
                    break 'depths;
                }
                if self.alpha_beta && alpha >= beta {
                    stats.cutoffs += 1;
                    break;
                }
            }
        }

        let remaining = depth - c_depth;
        let eligible = c_depth < CACHE_PLY || mode.is_restricted();
        let deeper_cached = prev_depth.is_some_and(|d| d >= remaining);
        // Only values inside the window (or proven results) are reusable as-is
        let exact = (best.value > alpha_orig && best.value < beta)
            || (best.value.abs() >= FIVE && best.value > -MAX_SCORE);
        if eligible && !deeper_cached && exact {
            let suffix = best.path.get(c_depth..).map(<[Pos]>::to_vec).unwrap_or_default();
            let stored = self.caches[mode.index()].put(
                hash,
                TTEntry {
                    role,
                    depth: remaining,
                    value: best.value,
                    best_move: best.best_move,
                    path: suffix,
                    mode,
                },
            );
            if stored {
                stats.cache_stores += 1;
            }
        }

        best
    }
}
