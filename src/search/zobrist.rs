//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when placing/removing stones.
//! Only occupancy by role is hashed: the side to move and the move order are not,
//! so transpositions share a key.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Pos, Stone};
//! use gomoku::search::ZobristTable;
//!
//! let mut zt = ZobristTable::new(15);
//! let empty = zt.hash();
//!
//! zt.toggle(Pos::new(7, 7), Stone::Black);
//! assert_ne!(zt.hash(), empty);
//!
//! // Toggling the same (cell, role) again removes it
//! zt.toggle(Pos::new(7, 7), Stone::Black);
//! assert_eq!(zt.hash(), empty);
//! ```

use rand::Rng;

use crate::board::{Pos, Stone};

/// Zobrist hash table for position hashing.
///
/// One random value per (cell, role), drawn once when the table is built
/// and fixed for the lifetime of the board that owns it.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    size: usize,
    /// Random values indexed by cell, then role index (black, white)
    keys: Vec<[u64; 2]>,
    /// Running hash of the occupied cells
    hash: u64,
}

impl ZobristTable {
    /// Create a table for a `size`x`size` board using the thread RNG.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::with_rng(size, &mut rand::rng())
    }

    /// Create a table drawing its values from `rng`.
    ///
    /// Tests pass a seeded RNG to get reproducible hashes.
    #[must_use]
    pub fn with_rng<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let keys = (0..size * size)
            .map(|_| [rng.random::<u64>(), rng.random::<u64>()])
            .collect();
        Self { size, keys, hash: 0 }
    }

    /// XOR the (cell, role) value into the running hash.
    ///
    /// Placing and removing a stone are the same operation.
    #[inline]
    pub fn toggle(&mut self, pos: Pos, stone: Stone) {
        if stone == Stone::Empty {
            return;
        }
        self.hash ^= self.key(pos, stone);
    }

    /// Current running hash
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Random value for a (cell, role) pair
    #[inline]
    #[must_use]
    pub fn key(&self, pos: Pos, stone: Stone) -> u64 {
        self.keys[pos.to_index(self.size)][stone.index()]
    }

    /// Recompute a hash from scratch over a row-major grid.
    #[must_use]
    pub fn hash_of(&self, cells: &[Stone]) -> u64 {
        cells
            .iter()
            .enumerate()
            .filter(|(_, s)| **s != Stone::Empty)
            .fold(0u64, |h, (idx, &s)| {
                h ^ self.key(Pos::from_index(idx, self.size), s)
            })
    }
}
