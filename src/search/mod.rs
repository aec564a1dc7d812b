//! Search module for Gomoku AI
//!
//! - [`zobrist`]: position hashing
//! - [`tt`]: FIFO transposition cache
//! - [`alphabeta`]: negamax with alpha-beta pruning and the restricted
//!   forced-win modes

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchMode, SearchResult, SearchStats, Searcher, CACHE_PLY, THREES_ONLY_PLY};
pub use tt::{CacheStats, FifoCache, TTEntry};
pub use zobrist::ZobristTable;
