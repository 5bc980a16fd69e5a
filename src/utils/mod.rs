//! Utility functions for sequence stores and kernel sizing

use crate::core::traits::SequenceStore;

/// Statistical utilities for sequences and stores
pub mod stats {
    use super::*;
    use crate::core::types::Symbol;

    /// Per-sequence statistics
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct SequenceStats {
        pub len: usize,
        pub distinct_symbols: usize,
        pub longest_run: usize,
    }

    impl SequenceStats {
        /// Computes statistics of one sorted sequence in a single pass.
        pub fn compute(seq: &[Symbol]) -> Self {
            let mut distinct = 0;
            let mut longest_run = 0;
            let mut run = 0;
            for i in 0..seq.len() {
                if i == 0 || seq[i] != seq[i - 1] {
                    distinct += 1;
                    run = 1;
                } else {
                    run += 1;
                }
                longest_run = longest_run.max(run);
            }
            Self {
                len: seq.len(),
                distinct_symbols: distinct,
                longest_run,
            }
        }
    }

    /// Aggregate statistics over a whole store
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StoreSummary {
        pub sequences: usize,
        pub total_symbols: usize,
        pub min_len: usize,
        pub max_len: usize,
        pub mean_len: f64,
    }

    /// Summarizes sequence lengths across `store`.
    pub fn summarize<S: SequenceStore + ?Sized>(store: &S) -> StoreSummary {
        if store.is_empty() {
            return StoreSummary::default();
        }

        let mut total = 0;
        let mut min_len = usize::MAX;
        let mut max_len = 0;
        for i in 0..store.len() {
            let len = store.sequence(i).len();
            total += len;
            min_len = min_len.min(len);
            max_len = max_len.max(len);
        }

        StoreSummary {
            sequences: store.len(),
            total_symbols: total,
            min_len,
            max_len,
            mean_len: total as f64 / store.len() as f64,
        }
    }
}

/// Memory management utilities
pub mod memory {
    /// Estimate memory usage of a precomputed kernel matrix
    pub fn estimate_matrix_memory(rows: usize, cols: usize, triangular: bool) -> usize {
        // f32 storage; a packed triangle needs rows == cols
        let entries = if triangular {
            rows * (rows + 1) / 2
        } else {
            rows * cols
        };
        entries * std::mem::size_of::<f32>()
    }

    /// Recommend a row cache capacity based on available memory
    pub fn recommend_row_capacity(row_len: usize, available_memory_mb: usize) -> usize {
        let available_bytes = available_memory_mb * 1024 * 1024;

        // Use at most 50% of available memory for cached rows
        let budget = available_bytes / 2;
        let bytes_per_row = row_len.max(1) * std::mem::size_of::<f32>();

        (budget / bytes_per_row).max(1)
    }
}
