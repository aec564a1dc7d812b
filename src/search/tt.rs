//! Transposition cache for search results
//!
//! A bounded map keyed by position hash. When full, the key inserted first
//! is evicted, regardless of how often it was read. Overwriting an existing
//! key keeps its original place in the eviction queue.
//!
//! # Example
//!
//! ```
//! use gomoku::search::FifoCache;
//!
//! let mut cache = FifoCache::new(2, true);
//! cache.put(1, "a");
//! cache.put(2, "b");
//! cache.put(1, "a2"); // overwrite, still oldest
//! cache.put(3, "c"); // evicts key 1
//!
//! assert!(!cache.contains(1));
//! assert_eq!(cache.get(2), Some(&"b"));
//! ```

use std::collections::{HashMap, VecDeque};

use log::trace;

use crate::board::{Pos, Stone};

use super::alphabeta::SearchMode;

/// Insertion-order bounded cache with a global on/off switch.
#[derive(Debug, Clone)]
pub struct FifoCache<V> {
    capacity: usize,
    enabled: bool,
    order: VecDeque<u64>,
    map: HashMap<u64, V>,
    evictions: u64,
}

impl<V> FifoCache<V> {
    /// Create a cache holding at most `capacity` keys.
    ///
    /// A disabled cache reports every key absent and ignores `put`.
    #[must_use]
    pub fn new(capacity: usize, enabled: bool) -> Self {
        Self {
            capacity: capacity.max(1),
            enabled,
            order: VecDeque::new(),
            map: HashMap::new(),
            evictions: 0,
        }
    }

    #[inline]
    pub fn get(&self, hash: u64) -> Option<&V> {
        if !self.enabled {
            return None;
        }
        self.map.get(&hash)
    }

    /// Insert or overwrite. Returns `false` when the cache is disabled.
    pub fn put(&mut self, hash: u64, value: V) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.map.contains_key(&hash) {
            if self.order.len() >= self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.map.remove(&oldest);
                    self.evictions += 1;
                    trace!("cache full, evicted {oldest:#018x}");
                }
            }
            self.order.push_back(hash);
        }
        self.map.insert(hash, value);
        true
    }

    #[inline]
    pub fn contains(&self, hash: u64) -> bool {
        self.enabled && self.map.contains_key(&hash)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.map.clear();
    }

    /// Get cache usage statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            capacity: self.capacity,
            len: self.map.len(),
            evictions: self.evictions,
        }
    }
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Maximum number of keys
    pub capacity: usize,
    /// Keys currently stored
    pub len: usize,
    /// Keys evicted since creation
    pub evictions: u64,
}

/// Transposition cache entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TTEntry {
    /// Side the result was computed for
    pub role: Stone,
    /// Remaining depth the result is valid for
    pub depth: usize,
    /// Negamax value for `role`
    pub value: i32,
    /// Best move found for this position
    pub best_move: Option<Pos>,
    /// Best-response line from this node on
    pub path: Vec<Pos>,
    /// Search mode that produced the entry
    pub mode: SearchMode,
}
