//! Linear expansion of a weighted reference set
//!
//! Summing kernel values against a fixed set of weighted reference
//! sequences can be collapsed into a single [`WeightedDictionary`]: build
//! once in O(total reference length), then score any query in
//! O(len * log dict) instead of touching every reference. This is the
//! standard speed-up for evaluating a trained classifier, where the
//! references are the support vectors and the weights their coefficients.

use log::debug;

use crate::core::error::{KernelError, Result};
use crate::core::traits::SequenceStore;
use crate::core::types::{SpectrumMode, Symbol, WeightedIndex};
use crate::kernel::dictionary::WeightedDictionary;

/// Lifecycle of a [`LinearExpansion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionState {
    /// No build attempted since creation or the last reset.
    Empty,
    /// A build started and has not completed; queries are rejected.
    Building,
    /// The dictionary reflects a complete reference set.
    Ready,
}

/// Dictionary-backed evaluator for one weighted reference set.
#[derive(Debug)]
pub struct LinearExpansion {
    dictionary: WeightedDictionary,
    mode: SpectrumMode,
    state: ExpansionState,
}

impl LinearExpansion {
    /// Creates an empty expansion counting runs according to `mode`.
    pub fn new(mode: SpectrumMode) -> Self {
        Self {
            dictionary: WeightedDictionary::new(),
            mode,
            state: ExpansionState::Empty,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ExpansionState {
        self.state
    }

    /// Returns true once a build has completed and queries are allowed.
    pub fn is_ready(&self) -> bool {
        self.state == ExpansionState::Ready
    }

    /// The underlying dictionary.
    pub fn dictionary(&self) -> &WeightedDictionary {
        &self.dictionary
    }

    /// Counting mode the expansion was created with.
    pub fn mode(&self) -> SpectrumMode {
        self.mode
    }

    /// Drops the dictionary and returns to [`ExpansionState::Empty`].
    pub fn reset(&mut self) {
        self.dictionary.clear();
        self.state = ExpansionState::Empty;
    }

    /// Builds the dictionary from weighted entries of `store`.
    ///
    /// Any previous dictionary is discarded first. An empty entry list
    /// produces a ready expansion whose scores are all zero. If an entry
    /// index is out of range the build stops with an error and the
    /// expansion stays in [`ExpansionState::Building`], so later queries
    /// fail instead of returning scores from a partial dictionary.
    ///
    /// # Arguments
    ///
    /// * `store` - Source of the reference sequences
    /// * `entries` - Store indices with their weights, in any order
    pub fn build<S: SequenceStore + ?Sized>(
        &mut self,
        store: &S,
        entries: &[WeightedIndex],
    ) -> Result<()> {
        self.reset();
        if entries.is_empty() {
            debug!("empty reference set; expansion scores are all zero");
            self.state = ExpansionState::Ready;
            return Ok(());
        }

        self.state = ExpansionState::Building;
        let progress_step = entries.len() / 10 + 1;
        for (i, entry) in entries.iter().enumerate() {
            if entry.index >= store.len() {
                return Err(KernelError::IndexOutOfRange {
                    index: entry.index,
                    len: store.len(),
                });
            }
            if i % progress_step == 0 {
                debug!("merging reference sequence {}/{}", i + 1, entries.len());
            }
            self.dictionary
                .merge(store.sequence(entry.index), entry.weight, self.mode);
        }
        self.state = ExpansionState::Ready;
        debug!(
            "linear expansion ready: {} reference sequences, {} dictionary symbols",
            entries.len(),
            self.dictionary.len()
        );
        Ok(())
    }

    /// Scores a sorted query against the dictionary.
    ///
    /// Walks the query's runs left to right. All runs but the last use a
    /// floor search whose lower bound only ever advances, so the whole
    /// scan touches each dictionary prefix once; the final run uses an
    /// exact search from the last floor. The result is the raw weighted
    /// sum, without any normalization.
    pub fn score(&self, query: &[Symbol]) -> Result<f64> {
        if !self.is_ready() {
            return Err(KernelError::ExpansionNotReady);
        }
        if query.is_empty() {
            return Ok(0.0);
        }

        let dict = &self.dictionary;
        let mut result = 0.0;
        let mut floor = 0;
        let mut last = 0;
        for j in 1..query.len() {
            if query[j] == query[j - 1] {
                continue;
            }
            let sym = query[last];
            if let Some(idx) = dict.floor_index_from(floor, sym) {
                if dict.symbols()[idx] == sym {
                    result += dict.weights()[idx] * self.mode.contribution(j - last);
                }
                floor = idx;
            }
            last = j;
        }

        // Final run, closed by the end of the query.
        let sym = query[query.len() - 1];
        if let Some(idx) = dict.find_from(floor, sym) {
            result += dict.weights()[idx] * self.mode.contribution(query.len() - last);
        }
        Ok(result)
    }
}
