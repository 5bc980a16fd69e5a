//! Core type definitions for the sequence kernel engine

use serde::{Deserialize, Serialize};

/// Encoded sequence element, e.g. a 2-bit-packed DNA k-mer.
///
/// Sequences handed to the engine must carry their symbols in ascending
/// order. Producers are responsible for sorting (see [`crate::store`]);
/// the kernel itself never sorts or validates.
pub type Symbol = u64;

/// Contribution semantics for a symbol run, shared by the pairwise
/// evaluator, the dictionary merge and the dictionary-backed evaluator.
///
/// A run is a maximal block of equal symbols within one sequence. The mode
/// decides how much one run is worth:
///
/// - `Presence`: every run counts 1, regardless of its length. Two sequences
///   score the number of symbols they have in common.
/// - `Multiplicity`: a run counts its length, so a shared symbol contributes
///   the product of its occurrence counts on both sides.
///
/// The mode is chosen at engine construction and fixed for the instance's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpectrumMode {
    /// Presence-only matching: each shared distinct symbol contributes 1.
    Presence,
    /// Run-length scaling: each run contributes its occurrence count.
    #[default]
    Multiplicity,
}

impl SpectrumMode {
    /// Scalar contribution of a single run of `run_len` equal symbols.
    #[inline]
    pub fn contribution(self, run_len: usize) -> f64 {
        match self {
            SpectrumMode::Presence => 1.0,
            SpectrumMode::Multiplicity => run_len as f64,
        }
    }
}

/// A reference sequence index paired with its coefficient, as supplied by an
/// external optimizer (e.g. a support vector with its alpha value).
///
/// Lists of these drive [`build_linear_expansion`]; the serde derives let the
/// CLI read them from optimizer output.
///
/// [`build_linear_expansion`]: crate::kernel::SequenceKernel::build_linear_expansion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedIndex {
    /// Index of the sequence in the lhs store.
    pub index: usize,
    /// Coefficient the sequence contributes with.
    pub weight: f64,
}

impl WeightedIndex {
    /// Create a new weighted index entry.
    pub fn new(index: usize, weight: f64) -> Self {
        Self { index, weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_contribution_ignores_run_length() {
        assert_eq!(SpectrumMode::Presence.contribution(1), 1.0);
        assert_eq!(SpectrumMode::Presence.contribution(17), 1.0);
    }

    #[test]
    fn test_multiplicity_contribution_scales_with_run_length() {
        assert_eq!(SpectrumMode::Multiplicity.contribution(1), 1.0);
        assert_eq!(SpectrumMode::Multiplicity.contribution(5), 5.0);
    }

    #[test]
    fn test_default_mode_is_multiplicity() {
        assert_eq!(SpectrumMode::default(), SpectrumMode::Multiplicity);
    }

    #[test]
    fn test_weighted_index_roundtrip() {
        let entries = vec![WeightedIndex::new(3, 0.5), WeightedIndex::new(0, -1.25)];
        let json = serde_json::to_string(&entries).unwrap();
        let back: Vec<WeightedIndex> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entries);
    }
}
