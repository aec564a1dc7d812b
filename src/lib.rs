//! Gomoku minimax engine
//!
//! A freestyle Gomoku AI on square boards from 5x5 to 25x25:
//! - Five or more in a row wins
//! - No captures, no forbidden moves
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board state with reversible moves and per-position memo caches
//! - [`rules`]: Five-in-a-row detection
//! - [`eval`]: Line shape classification, incremental scoring and candidate
//!   moves
//! - [`search`]: Zobrist hashing, FIFO transposition cache and negamax search
//!   (general, threes-and-fours, fours-only)
//! - [`engine`]: Top-level move choice with forced-win and defense checks
//! - [`session`]: Game lifecycle for a host
//! - [`worker`]: Background thread with per-request timeouts
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{Config, GameSession, Stone};
//!
//! let mut game = GameSession::new_game(15, Stone::Black, &Config::default()).unwrap();
//! game.apply_human_move(7, 7).unwrap();
//!
//! // Engine replies as White
//! let outcome = game.request_ai_move(2).unwrap();
//! let reply = outcome.history.last().unwrap();
//! println!("AI plays at {}", reply.pos);
//! ```
//!
//! # Search Priority
//!
//! For each move the engine:
//! 1. Looks for its own forced win with threes and fours
//! 2. Runs alpha-beta negamax at the requested depth
//! 3. Checks the chosen move does not allow a longer forced win for the
//!    opponent, and blocks it if it does

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod session;
pub mod worker;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, DEFAULT_BOARD_SIZE};
pub use config::Config;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{ConfigError, GameError};
pub use session::{GameSession, Outcome};
pub use worker::{AiWorker, Request, WorkerError};
