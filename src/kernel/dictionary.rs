//! Weighted symbol dictionary backing the linear expansion
//!
//! The dictionary keeps a strictly ascending list of symbols together with
//! an accumulated weight per symbol. Reference sequences are folded in one
//! at a time with [`WeightedDictionary::merge`]; lookups during scoring use
//! floor and exact binary searches restricted to a suffix of the entries so
//! a scan over a sorted query never revisits the prefix it has already
//! passed.

use crate::core::types::{SpectrumMode, Symbol};

/// Sorted symbol-to-weight map with two-pointer merge updates.
///
/// Symbols and weights are stored in separate vectors kept in lock-step:
/// `weights[i]` is the accumulated weight of `symbols[i]`. The symbol
/// vector is strictly ascending at all times.
#[derive(Debug, Clone, Default)]
pub struct WeightedDictionary {
    symbols: Vec<Symbol>,
    weights: Vec<f64>,
}

impl WeightedDictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            weights: Vec::new(),
        }
    }

    /// Number of distinct symbols held.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if no symbols are held.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The ascending symbol list.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Accumulated weights, index-aligned with [`symbols`](Self::symbols).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Accumulated weight of `symbol`, or 0.0 if it is not present.
    pub fn get(&self, symbol: Symbol) -> f64 {
        match self.find_from(0, symbol) {
            Some(idx) => self.weights[idx],
            None => 0.0,
        }
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.symbols.clear();
        self.weights.clear();
    }

    /// Folds one sorted sequence into the dictionary.
    ///
    /// Each maximal run of equal symbols in `seq` contributes
    /// `weight * mode.contribution(run_len)` to that symbol's entry;
    /// symbols not yet present are inserted at their sorted position.
    /// The update builds fresh vectors sized for the worst case
    /// (all runs new) and replaces the old storage in one step, so the
    /// dictionary is never observed half-merged.
    ///
    /// # Arguments
    ///
    /// * `seq` - Sequence sorted ascending; runs must be contiguous
    /// * `weight` - Caller weight applied to every run (may be negative)
    /// * `mode` - Counting mode deciding each run's contribution
    pub fn merge(&mut self, seq: &[Symbol], weight: f64, mode: SpectrumMode) {
        if seq.is_empty() {
            return;
        }

        let old_len = self.symbols.len();
        let mut symbols = Vec::with_capacity(old_len + seq.len());
        let mut weights = Vec::with_capacity(old_len + seq.len());

        let mut k = 0;
        let mut last = 0;
        for j in 1..=seq.len() {
            if j < seq.len() && seq[j] == seq[j - 1] {
                continue;
            }
            // The run seq[last..j] just closed.
            let sym = seq[last];
            let contribution = weight * mode.contribution(j - last);

            while k < old_len && self.symbols[k] < sym {
                symbols.push(self.symbols[k]);
                weights.push(self.weights[k]);
                k += 1;
            }
            if k < old_len && self.symbols[k] == sym {
                symbols.push(sym);
                weights.push(self.weights[k] + contribution);
                k += 1;
            } else {
                symbols.push(sym);
                weights.push(contribution);
            }
            last = j;
        }

        // Entries above the largest symbol in seq carry over unchanged.
        symbols.extend_from_slice(&self.symbols[k..]);
        weights.extend_from_slice(&self.weights[k..]);

        self.symbols = symbols;
        self.weights = weights;
    }

    /// Largest index `i >= start` with `symbols[i] <= symbol`.
    ///
    /// Returns `None` when every entry at or after `start` exceeds
    /// `symbol`. The result may point at a smaller symbol; callers that
    /// need an exact hit must compare before using the weight.
    pub fn floor_index_from(&self, start: usize, symbol: Symbol) -> Option<usize> {
        let p = self.symbols[start..].partition_point(|&s| s <= symbol);
        if p == 0 {
            None
        } else {
            Some(start + p - 1)
        }
    }

    /// Index of `symbol` searching only entries at or after `start`.
    pub fn find_from(&self, start: usize, symbol: Symbol) -> Option<usize> {
        self.symbols[start..]
            .binary_search(&symbol)
            .ok()
            .map(|i| start + i)
    }
}
