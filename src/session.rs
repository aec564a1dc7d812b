//! Game session lifecycle
//!
//! A session owns one board and one engine (with its caches) for the length
//! of a game. Every operation returns an [`Outcome`] snapshot that a host can
//! render or serialize.
//!
//! # Example
//!
//! ```
//! use gomoku::{Config, GameSession, Stone};
//!
//! let mut session = GameSession::new_game(15, Stone::Black, &Config::default()).unwrap();
//! let outcome = session.apply_human_move(7, 7).unwrap();
//! assert_eq!(outcome.to_move, Stone::White);
//!
//! let outcome = session.request_ai_move(2).unwrap();
//! assert_eq!(outcome.history.len(), 2);
//! assert_eq!(outcome.to_move, Stone::Black);
//! ```

use std::fmt;

use log::{info, warn};
use serde::Serialize;

use crate::board::{write_grid, Board, MoveRecord, Pos, Stone};
use crate::config::Config;
use crate::engine::{AIEngine, MoveResult, SearchType};
use crate::error::GameError;
use crate::rules::find_five_positions;

/// Snapshot of a session after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Grid rows
    pub board: Vec<Vec<Stone>>,
    pub winner: Option<Stone>,
    pub to_move: Stone,
    pub history: Vec<MoveRecord>,
    pub size: usize,
    /// Score of the most recent AI search
    pub score: i32,
    /// Principal line of the most recent AI search
    pub best_path: Vec<Pos>,
    /// Depth of the most recent AI search
    pub depth: usize,
    /// How the most recent AI move was chosen
    pub search_type: Option<SearchType>,
    /// Stones forming the winning five, once there is one
    pub winning_line: Option<Vec<Pos>>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self.size, self.board.iter().map(Vec::as_slice))?;
        if let Some(line) = &self.winning_line {
            write!(f, "five:")?;
            for pos in line {
                write!(f, " {pos}")?;
            }
            writeln!(f)?;
        }
        match self.winner {
            Some(winner) => writeln!(f, "{winner:?} wins"),
            None => writeln!(
                f,
                "{:?} to move (score {}, depth {})",
                self.to_move, self.score, self.depth
            ),
        }
    }
}

/// One game between a host (usually a human) and the engine.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    engine: AIEngine,
    last_search: Option<MoveResult>,
}

impl GameSession {
    /// Start a fresh `size`x`size` game with `first` to move.
    pub fn new_game(size: usize, first: Stone, config: &Config) -> Result<Self, GameError> {
        let board = Board::with_config(size, first, config)?;
        info!("new {size}x{size} game, {first:?} moves first");
        Ok(Self {
            board,
            engine: AIEngine::new(config),
            last_search: None,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Result of the most recent AI search, if any
    #[inline]
    pub fn last_search(&self) -> Option<&MoveResult> {
        self.last_search.as_ref()
    }

    /// Place a stone for the side to move.
    ///
    /// Rejected without change when the game is over or the cell is
    /// occupied or off the board.
    pub fn apply_human_move(&mut self, row: usize, col: usize) -> Result<Outcome, GameError> {
        if self.board.is_game_over() {
            warn!("move ({row}, {col}) rejected: game over");
            return Err(GameError::GameOver);
        }
        let pos = self.board.pos_at(row, col)?;
        if let Err(e) = self.board.put(pos) {
            warn!("move rejected: {e}");
            return Err(e);
        }
        Ok(self.outcome())
    }

    /// Let the engine move for the side to move.
    ///
    /// A finished game is returned unchanged.
    pub fn request_ai_move(&mut self, depth: usize) -> Result<Outcome, GameError> {
        if self.board.is_game_over() {
            return Ok(self.outcome());
        }
        let role = self.board.to_move();
        let enable_vct = self.engine.config().enable_vct;
        let result = self.engine.minmax(&mut self.board, role, depth, enable_vct);
        if let Some(mv) = result.best_move {
            self.board.put(mv)?;
            info!(
                "{role:?} plays {mv} ({:?}, score {}, {} nodes, {} ms)",
                result.search_type, result.score, result.stats.nodes, result.time_ms
            );
        } else {
            warn!("no move found for {role:?}");
        }
        self.last_search = Some(result);
        Ok(self.outcome())
    }

    /// Human move followed by the engine's reply.
    pub fn play(&mut self, row: usize, col: usize, depth: usize) -> Result<Outcome, GameError> {
        self.apply_human_move(row, col)?;
        self.request_ai_move(depth)
    }

    /// Take back the most recent move.
    pub fn undo_last_ply(&mut self) -> Result<Outcome, GameError> {
        self.board.undo()?;
        Ok(self.outcome())
    }

    /// Take back the last two moves, typically the engine's reply and the
    /// human move before it. Nothing changes unless both can be undone.
    pub fn undo_last_two_plies(&mut self) -> Result<Outcome, GameError> {
        if self.board.history().len() < 2 {
            return Err(GameError::EmptyHistory);
        }
        self.board.undo()?;
        self.board.undo()?;
        Ok(self.outcome())
    }

    /// Finish the session and release its caches.
    pub fn end_game(mut self) -> Outcome {
        let outcome = self.outcome();
        self.engine.clear_cache();
        self.board.clear_caches();
        info!("game ended after {} moves", outcome.history.len());
        outcome
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        let winner = self.board.winner();
        let winning_line = winner.and_then(|w| {
            find_five_positions(self.board.cells(), self.board.size(), w)
        });
        let (score, best_path, depth, search_type) = match &self.last_search {
            Some(r) => (r.score, r.path.clone(), r.depth, Some(r.search_type)),
            None => (0, Vec::new(), 0, None),
        };
        Outcome {
            board: self.board.rows(),
            winner,
            to_move: self.board.to_move(),
            history: self.board.history().to_vec(),
            size: self.board.size(),
            score,
            best_path,
            depth,
            search_type,
            winning_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new_game(15, Stone::Black, &Config::default()).unwrap()
    }

    #[test]
    fn test_new_game_is_empty() {
        let outcome = session().outcome();
        assert_eq!(outcome.size, 15);
        assert_eq!(outcome.board.len(), 15);
        assert!(outcome.history.is_empty());
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.to_move, Stone::Black);
    }

    #[test]
    fn test_invalid_size() {
        let err = GameSession::new_game(3, Stone::Black, &Config::default()).unwrap_err();
        assert_eq!(err, GameError::InvalidSize(3));
    }

    #[test]
    fn test_rejected_moves_do_not_mutate() {
        let mut s = session();
        s.apply_human_move(7, 7).unwrap();
        assert_eq!(s.apply_human_move(7, 7), Err(GameError::Occupied { row: 7, col: 7 }));
        assert!(matches!(s.apply_human_move(20, 1), Err(GameError::OutOfBounds { .. })));
        assert_eq!(s.outcome().history.len(), 1);
        assert_eq!(s.outcome().to_move, Stone::White);
    }

    #[test]
    fn test_ai_opens_in_center() {
        let mut s = session();
        let outcome = s.request_ai_move(2).unwrap();
        assert_eq!(outcome.history[0].pos, Pos::new(7, 7));
        assert_eq!(outcome.board[7][7], Stone::Black);
        assert_eq!(outcome.depth, 2);
    }

    #[test]
    fn test_play_then_undo_two() {
        let mut s = session();
        let outcome = s.play(7, 7, 2).unwrap();
        assert_eq!(outcome.history.len(), 2);
        let outcome = s.undo_last_two_plies().unwrap();
        assert!(outcome.history.is_empty());
        assert_eq!(outcome.to_move, Stone::Black);
        assert_eq!(s.undo_last_two_plies(), Err(GameError::EmptyHistory));
    }

    #[test]
    fn test_undo_single_ply() {
        let mut s = session();
        s.apply_human_move(3, 3).unwrap();
        let outcome = s.undo_last_ply().unwrap();
        assert!(outcome.history.is_empty());
        assert_eq!(s.undo_last_ply(), Err(GameError::EmptyHistory));
    }

    #[test]
    fn test_win_ends_game() {
        let mut s = session();
        // Black builds a row on 0, White answers on row 5
        for col in 0..4 {
            s.apply_human_move(0, col).unwrap();
            s.apply_human_move(5, col * 2).unwrap();
        }
        let outcome = s.apply_human_move(0, 4).unwrap();
        assert_eq!(outcome.winner, Some(Stone::Black));
        assert_eq!(outcome.winning_line.map(|l| l.len()), Some(5));
        assert_eq!(s.apply_human_move(9, 9), Err(GameError::GameOver));

        let before = s.outcome();
        let after = s.request_ai_move(2).unwrap();
        assert_eq!(before, after, "a finished game is left as is");
    }

    #[test]
    fn test_end_game_returns_final_snapshot() {
        let mut s = session();
        s.apply_human_move(1, 1).unwrap();
        let outcome = s.end_game();
        assert_eq!(outcome.history.len(), 1);
    }

    #[test]
    fn test_outcome_display_matches_board() {
        let mut s = session();
        s.apply_human_move(7, 7).unwrap();
        let text = s.outcome().to_string();
        assert!(text.starts_with(&s.board().to_string()));
        assert_eq!(text.lines().count(), 17);
        assert_eq!(text.lines().last(), Some("White to move (score 0, depth 0)"));
    }

    #[test]
    fn test_outcome_serializes() {
        let mut s = session();
        s.apply_human_move(7, 7).unwrap();
        let json = serde_json::to_string(&s.outcome()).unwrap();
        assert!(json.contains("\"to_move\":\"white\""));
        assert!(json.contains("\"history\":[{\"pos\":{\"row\":7,\"col\":7},\"stone\":\"black\"}]"));
    }
}
