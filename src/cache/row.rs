//! LRU cache of kernel matrix rows
//!
//! Precomputing a full matrix is not always affordable; iterative
//! consumers tend to revisit a small working set of rows instead. This
//! cache materializes whole rows on demand and keeps the most recently
//! used ones, evicting in LRU order once the capacity is reached.

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::core::error::{KernelError, Result};
use crate::kernel::traits::SequenceKernel;

/// Cache of fully evaluated kernel rows, keyed by left-hand index.
///
/// Rows are stored as f32 to match [`KernelMatrix`] storage.
///
/// [`KernelMatrix`]: crate::cache::matrix::KernelMatrix
pub struct KernelRowCache {
    rows: LruCache<usize, Vec<f32>>,
    hits: usize,
    misses: usize,
}

/// Cache statistics
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub len: usize,
    pub capacity: usize,
}

impl KernelRowCache {
    /// Creates a cache holding up to `capacity` rows.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            rows: LruCache::new(cap),
            hits: 0,
            misses: 0,
        }
    }

    /// Creates a cache sized from a memory budget.
    ///
    /// # Arguments
    ///
    /// * `memory_bytes` - Budget for row storage
    /// * `row_len` - Values per row, normally the kernel's `num_rhs`
    pub fn with_memory_limit(memory_bytes: usize, row_len: usize) -> Self {
        let bytes_per_row = row_len.max(1) * std::mem::size_of::<f32>();
        Self::new((memory_bytes / bytes_per_row).max(1))
    }

    /// Returns row `lhs_idx`, evaluating it through `kernel` on a miss.
    pub fn row<K: SequenceKernel>(&mut self, kernel: &K, lhs_idx: usize) -> Result<&[f32]> {
        if lhs_idx >= kernel.num_lhs() {
            return Err(KernelError::IndexOutOfRange {
                index: lhs_idx,
                len: kernel.num_lhs(),
            });
        }
        if self.rows.contains(&lhs_idx) {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        let row = self.rows.try_get_or_insert(lhs_idx, || {
            (0..kernel.num_rhs())
                .map(|j| kernel.evaluate_pair(lhs_idx, j).map(|v| v as f32))
                .collect::<Result<Vec<f32>>>()
        })?;
        Ok(row.as_slice())
    }

    /// Number of rows currently cached.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no rows are cached.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fraction of lookups served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Current statistics snapshot.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            len: self.rows.len(),
            capacity: self.rows.cap().get(),
        }
    }

    /// Drops all cached rows and resets the counters.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
