//! Board structure with reversible moves
//!
//! The board owns the grid, the move log, a Zobrist hash and an incremental
//! evaluator, and keeps all of them in step on every `put`/`undo`. Static
//! evaluations and candidate lists are memoized by position hash.

use std::fmt;

use log::warn;

use super::{Pos, Stone, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::config::Config;
use crate::error::GameError;
use crate::eval::{Evaluator, PatternScore, Tier};
use crate::rules::has_five_at_pos;
use crate::search::{FifoCache, ZobristTable};

/// One applied move
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MoveRecord {
    pub pos: Pos,
    pub stone: Stone,
    /// This move completed the first five on the board
    #[serde(skip)]
    wins: bool,
}

/// Memoized candidate list, valid only for the same query parameters
#[derive(Debug, Clone)]
struct MovesEntry {
    role: Stone,
    depth: usize,
    only_threes: bool,
    only_fours: bool,
    moves: Vec<Pos>,
}

/// Game board with move history and incremental evaluation
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Stone>,
    first: Stone,
    to_move: Stone,
    history: Vec<MoveRecord>,
    winner: Option<Stone>,
    zobrist: ZobristTable,
    evaluator: Evaluator,
    eval_cache: FifoCache<(Stone, i32)>,
    moves_cache: FifoCache<MovesEntry>,
    config: Config,
}

impl Board {
    /// Empty `size`x`size` board with default configuration.
    pub fn new(size: usize, first: Stone) -> Result<Self, GameError> {
        Self::with_config(size, first, &Config::default())
    }

    pub fn with_config(size: usize, first: Stone, config: &Config) -> Result<Self, GameError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GameError::InvalidSize(size));
        }
        let first = if first == Stone::Empty { Stone::Black } else { first };
        Ok(Self {
            size,
            cells: vec![Stone::Empty; size * size],
            first,
            to_move: first,
            history: Vec::with_capacity(size * size),
            winner: None,
            zobrist: ZobristTable::new(size),
            evaluator: Evaluator::new(size),
            eval_cache: FifoCache::new(config.cache_capacity, config.enable_cache),
            moves_cache: FifoCache::new(config.cache_capacity, config.enable_cache),
            config: config.clone(),
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.to_index(self.size)]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Side to move
    #[inline]
    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    /// Side that moved first
    #[inline]
    pub fn first(&self) -> Stone {
        self.first
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Current position hash
    #[inline]
    pub fn hash(&self) -> u64 {
        self.zobrist.hash()
    }

    /// Row-major grid
    #[inline]
    pub fn cells(&self) -> &[Stone] {
        &self.cells
    }

    #[inline]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.history.len() == self.cells.len()
    }

    /// Grid as rows, for snapshots
    pub fn rows(&self) -> Vec<Vec<Stone>> {
        self.cells.chunks(self.size).map(<[Stone]>::to_vec).collect()
    }

    /// All empty cells, row-major
    pub fn valid_moves(&self) -> Vec<Pos> {
        (0..self.cells.len())
            .filter(|&idx| self.cells[idx] == Stone::Empty)
            .map(|idx| Pos::from_index(idx, self.size))
            .collect()
    }

    /// Check a coordinate pair against the board bounds.
    pub fn pos_at(&self, row: usize, col: usize) -> Result<Pos, GameError> {
        if row < self.size && col < self.size {
            Ok(Pos::new(row as u8, col as u8))
        } else {
            Err(GameError::OutOfBounds { row, col, size: self.size })
        }
    }

    /// Place a stone for the side to move.
    pub fn put(&mut self, pos: Pos) -> Result<(), GameError> {
        self.put_as(pos, self.to_move)
    }

    /// Place a stone for `stone`; the other side moves next.
    ///
    /// Rejects an empty stone and out-of-range or occupied cells without
    /// changing anything.
    pub fn put_as(&mut self, pos: Pos, stone: Stone) -> Result<(), GameError> {
        if stone == Stone::Empty {
            return Err(GameError::EmptyStone);
        }
        let (row, col) = (pos.row as usize, pos.col as usize);
        if row >= self.size || col >= self.size {
            return Err(GameError::OutOfBounds { row, col, size: self.size });
        }
        let idx = pos.to_index(self.size);
        if self.cells[idx] != Stone::Empty {
            return Err(GameError::Occupied { row, col });
        }

        self.cells[idx] = stone;
        self.zobrist.toggle(pos, stone);
        self.evaluator.apply_move(pos, stone);

        let wins = self.winner.is_none() && has_five_at_pos(&self.cells, self.size, pos, stone);
        if wins {
            self.winner = Some(stone);
        }
        self.history.push(MoveRecord { pos, stone, wins });
        self.to_move = stone.opponent();
        Ok(())
    }

    /// Take back the most recent move. The undone side moves next.
    pub fn undo(&mut self) -> Result<MoveRecord, GameError> {
        let Some(record) = self.history.pop() else {
            warn!("undo requested with an empty history");
            return Err(GameError::EmptyHistory);
        };
        self.cells[record.pos.to_index(self.size)] = Stone::Empty;
        self.zobrist.toggle(record.pos, record.stone);
        self.evaluator.undo_move(record.pos);
        if record.wins {
            self.winner = None;
        }
        self.to_move = record.stone;
        Ok(record)
    }

    /// Side with five in a row, if any
    #[inline]
    pub fn winner(&self) -> Option<Stone> {
        self.winner
    }

    /// A side has won or no empty cell is left
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    /// Static evaluation from `role`'s point of view.
    ///
    /// A finished game scores exactly `±FIVE`.
    pub fn evaluate(&mut self, role: Stone) -> i32 {
        let hash = self.hash();
        if let Some(&(cached_role, score)) = self.eval_cache.get(hash) {
            if cached_role == role {
                return score;
            }
        }
        let score = match self.winner {
            Some(w) if w == role => PatternScore::FIVE,
            Some(_) => -PatternScore::FIVE,
            None => self.evaluator.total_score(role),
        };
        self.eval_cache.put(hash, (role, score));
        score
    }

    /// Candidate moves for `role` at search ply `depth`.
    ///
    /// In the general mode an empty center is appended when nothing forcing
    /// exists, so the first move of a game is always the center.
    pub fn valuable_moves(
        &mut self,
        role: Stone,
        depth: usize,
        only_threes: bool,
        only_fours: bool,
    ) -> Vec<Pos> {
        let hash = self.hash();
        if let Some(entry) = self.moves_cache.get(hash) {
            if entry.role == role
                && entry.depth == depth
                && entry.only_threes == only_threes
                && entry.only_fours == only_fours
            {
                return entry.moves.clone();
            }
        }

        let candidates =
            self.evaluator
                .candidate_points(role, depth, only_threes, only_fours, &self.config);
        let mut moves = candidates.moves;
        if !only_threes && !only_fours && candidates.tier == Tier::Quiet {
            let center = Pos::center(self.size);
            if self.is_empty(center) && !moves.contains(&center) {
                moves.push(center);
            }
        }

        self.moves_cache.put(
            hash,
            MovesEntry {
                role,
                depth,
                only_threes,
                only_fours,
                moves: moves.clone(),
            },
        );
        moves
    }

    /// Switch the position memo caches on or off.
    pub fn set_cache_enabled(&mut self, enabled: bool) {
        self.config.enable_cache = enabled;
        self.eval_cache.set_enabled(enabled);
        self.moves_cache.set_enabled(enabled);
    }

    pub fn clear_caches(&mut self) {
        self.eval_cache.clear();
        self.moves_cache.clear();
    }
}

/// Text grid with row and column labels. Black is `X`, White is `O`.
pub fn write_grid<'a, W: fmt::Write>(
    out: &mut W,
    size: usize,
    rows: impl IntoIterator<Item = &'a [Stone]>,
) -> fmt::Result {
    write!(out, "   ")?;
    for col in 0..size {
        write!(out, "{col:>3}")?;
    }
    writeln!(out)?;
    for (row, cells) in rows.into_iter().enumerate() {
        write!(out, "{row:>3}")?;
        for &cell in cells {
            let ch = match cell {
                Stone::Black => 'X',
                Stone::White => 'O',
                Stone::Empty => '.',
            };
            write!(out, "{ch:>3}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self.size, self.cells.chunks(self.size))
    }
}
