//! Kernel trait definition

use crate::core::error::{KernelError, Result};
use crate::core::types::WeightedIndex;

/// Pairwise kernel over indexed sequence collections.
///
/// A kernel function K(x, y) must satisfy Mercer's condition to be valid
/// for SVM training. Implementations address their inputs by index into
/// a left-hand and a right-hand collection, which keeps callers such as
/// row caches and matrix builders independent of how sequences are held.
///
/// The expansion methods have failing defaults; kernels that can fold a
/// weighted reference set into a single evaluator override them and
/// report the capability through `has_linear_expansion`.
pub trait SequenceKernel: Send + Sync {
    /// Number of sequences on the left-hand side.
    fn num_lhs(&self) -> usize;

    /// Number of sequences on the right-hand side.
    fn num_rhs(&self) -> usize;

    /// Normalized kernel value of the `lhs_idx`-th left sequence and the
    /// `rhs_idx`-th right sequence.
    fn evaluate_pair(&self, lhs_idx: usize, rhs_idx: usize) -> Result<f64>;

    /// Whether this kernel supports the linear expansion fast path.
    fn has_linear_expansion(&self) -> bool {
        false
    }

    /// Folds weighted left-hand sequences into a reusable evaluator.
    fn build_linear_expansion(&mut self, _entries: &[WeightedIndex]) -> Result<()> {
        Err(KernelError::ExpansionUnsupported)
    }

    /// Scores the `query_idx`-th right sequence against the expansion.
    fn evaluate_against_expansion(&self, _query_idx: usize) -> Result<f64> {
        Err(KernelError::ExpansionUnsupported)
    }

    /// Discards any built expansion.
    fn reset_expansion(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainKernel;

    impl SequenceKernel for PlainKernel {
        fn num_lhs(&self) -> usize {
            1
        }

        fn num_rhs(&self) -> usize {
            1
        }

        fn evaluate_pair(&self, _lhs_idx: usize, _rhs_idx: usize) -> Result<f64> {
            Ok(0.0)
        }
    }

    #[test]
    fn test_expansion_defaults_report_unsupported() {
        let mut kernel = PlainKernel;
        assert!(!kernel.has_linear_expansion());
        assert!(matches!(
            kernel.build_linear_expansion(&[]),
            Err(KernelError::ExpansionUnsupported)
        ));
        assert!(matches!(
            kernel.evaluate_against_expansion(0),
            Err(KernelError::ExpansionUnsupported)
        ));
        kernel.reset_expansion();
    }
}
