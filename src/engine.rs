//! Main AI Engine integrating all search components
//!
//! The top-level move choice runs in two phases:
//!
//! 1. **Forced win**: a threes-and-fours search at an extended depth looks
//!    for a winning threat sequence. If one exists it is played.
//! 2. **Alpha-Beta**: a general search at the requested depth picks a move.
//!    The move is then tried on the board and the opponent's threat search
//!    is run from the resulting position. If the move hands the opponent a
//!    forced win that is longer than our own line, the engine plays the
//!    opponent's first threat point instead (**Defense**).
//!
//! Shallow full-width search misses long forcing sequences that the
//! restricted search finds cheaply; the second phase covers both sides.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Config, Pos, SearchType, Stone};
//!
//! let config = Config::default();
//! let mut engine = AIEngine::new(&config);
//! let mut board = Board::with_config(15, Stone::Black, &config).unwrap();
//!
//! let result = engine.minmax(&mut board, Stone::Black, 2, true);
//! assert_eq!(result.best_move, Some(Pos::new(7, 7)));
//! assert_eq!(result.search_type, SearchType::AlphaBeta);
//! ```

use std::time::Instant;

use log::{debug, info};
use serde::Serialize;

use crate::board::{Board, Pos, Stone};
use crate::config::Config;
use crate::eval::PatternScore;
use crate::search::{SearchMode, SearchResult, SearchStats, Searcher};

/// Type of search that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchType {
    /// Found a forced win via continuous threats
    ForcedWin,
    /// Plays the opponent's key point to stop their forced win
    Defense,
    /// Regular alpha-beta search result
    AlphaBeta,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Negamax value for the side to move
    pub score: i32,
    /// Principal line the score is based on
    pub path: Vec<Pos>,
    /// Depth requested from the general search
    pub depth: usize,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Counters summed over every search run for this move
    pub stats: SearchStats,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn from_search(
        result: SearchResult,
        search_type: SearchType,
        depth: usize,
        stats: SearchStats,
        start: Instant,
    ) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            path: result.path,
            depth,
            search_type,
            stats,
            time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Main AI Engine for Gomoku.
///
/// Owns the searcher (and with it the per-mode transposition caches) for
/// one game session.
#[derive(Debug, Clone)]
pub struct AIEngine {
    searcher: Searcher,
    config: Config,
}

impl AIEngine {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            searcher: Searcher::new(config),
            config: config.clone(),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// Pick a move for `role` searching `depth` plies.
    ///
    /// With `enable_vct` the forced-win checks described in the module docs
    /// run around the general search. The board is returned unchanged.
    pub fn minmax(
        &mut self,
        board: &mut Board,
        role: Stone,
        depth: usize,
        enable_vct: bool,
    ) -> MoveResult {
        let start = Instant::now();
        let mut stats = SearchStats::default();

        if !enable_vct {
            let result = self.searcher.search(board, role, depth, SearchMode::General);
            stats.merge(&result.stats);
            return MoveResult::from_search(result, SearchType::AlphaBeta, depth, stats, start);
        }

        // 1. Our own forced win
        let vct_depth = depth + self.config.vct_extra_depth;
        let own = self.vct(board, role, vct_depth);
        stats.merge(&own.stats);
        if own.is_win() {
            info!("forced win for {role:?} in {} plies", own.path.len());
            return MoveResult::from_search(own, SearchType::ForcedWin, depth, stats, start);
        }

        // 2. Regular search, then check the reply threats it allows
        let general = self.searcher.search(board, role, depth, SearchMode::General);
        stats.merge(&general.stats);
        let Some(mv) = general.best_move else {
            return MoveResult::from_search(general, SearchType::AlphaBeta, depth, stats, start);
        };

        if board.put_as(mv, role).is_err() {
            return MoveResult::from_search(general, SearchType::AlphaBeta, depth, stats, start);
        }
        let threat = self.vct(board, role.opponent(), vct_depth);
        let undone = board.undo();
        debug_assert!(undone.is_ok(), "undo after put cannot fail");
        stats.merge(&threat.stats);

        if general.score < PatternScore::FIVE
            && threat.is_win()
            && threat.path.len() > general.path.len()
        {
            if let Some(key_point) = threat.best_move {
                debug!(
                    "{mv} allows a forced win for {:?}; taking {key_point} instead",
                    role.opponent()
                );
                let defense = SearchResult {
                    score: general.score,
                    best_move: Some(key_point),
                    path: threat.path,
                    stats: threat.stats,
                };
                return MoveResult::from_search(defense, SearchType::Defense, depth, stats, start);
            }
        }

        MoveResult::from_search(general, SearchType::AlphaBeta, depth, stats, start)
    }

    /// Threes-and-fours forced-win search
    pub fn vct(&mut self, board: &mut Board, role: Stone, depth: usize) -> SearchResult {
        self.searcher.search(board, role, depth, SearchMode::ThreesAndFours)
    }

    /// Fours-only forced-win search
    pub fn vcf(&mut self, board: &mut Board, role: Stone, depth: usize) -> SearchResult {
        self.searcher.search(board, role, depth, SearchMode::FoursOnly)
    }

    /// Clear the transposition caches. Call when switching to a new board.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_cache();
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
