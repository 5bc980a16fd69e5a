//! Spectrum kernel over sorted symbol sequences
//!
//! The kernel value of two sequences is a sum over symbols shared by
//! both, where each shared symbol contributes the product of its run
//! contributions on either side. Because sequences are pre-sorted, a
//! pairwise evaluation is a single merge-style pass and never allocates.
//!
//! [`SpectrumKernel`] ties the counting loop to a pair of sequence
//! stores, applies a [`KernelNormalizer`] to every value it hands out,
//! and owns an optional [`LinearExpansion`] for fast scoring against a
//! fixed weighted reference set.

use std::sync::Arc;

use log::debug;

use crate::cache::matrix::KernelMatrix;
use crate::core::error::{KernelError, Result};
use crate::core::traits::SequenceStore;
use crate::core::types::{SpectrumMode, Symbol, WeightedIndex};
use crate::kernel::expansion::LinearExpansion;
use crate::kernel::traits::SequenceKernel;
use crate::normalizer::{IdentityNormalizer, KernelNormalizer, SqrtDiagNormalizer};

/// Raw spectrum count of two sorted sequences.
///
/// Both cursors advance in a single merge pass. When the fronts are
/// equal the whole run of that symbol is consumed on both sides and the
/// product of the two run contributions is added; otherwise the cursor
/// at the smaller symbol skips ahead. An empty side yields 0.0.
pub fn merge_count(a: &[Symbol], b: &[Symbol], mode: SpectrumMode) -> f64 {
    let mut result = 0.0;
    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            let sym = a[i];
            let run_a = i;
            let run_b = j;
            while i < a.len() && a[i] == sym {
                i += 1;
            }
            while j < b.len() && b[j] == sym {
                j += 1;
            }
            result += mode.contribution(i - run_a) * mode.contribution(j - run_b);
        } else if a[i] < b[j] {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

/// Spectrum kernel bound to a left and a right sequence store.
///
/// The two stores may be the same object, which is the symmetric
/// training setup; [`SpectrumKernel::new`] builds that directly. Values
/// returned by the evaluation methods are always normalized; the
/// default normalizer is the identity.
pub struct SpectrumKernel<S: SequenceStore> {
    lhs: Arc<S>,
    rhs: Arc<S>,
    mode: SpectrumMode,
    normalizer: Box<dyn KernelNormalizer>,
    expansion: LinearExpansion,
}

impl<S: SequenceStore> SpectrumKernel<S> {
    /// Creates a symmetric kernel where both sides read from `store`.
    pub fn new(store: Arc<S>, mode: SpectrumMode) -> Self {
        Self::with_pair(Arc::clone(&store), store, mode)
    }

    /// Creates a kernel over distinct left and right stores.
    ///
    /// The left store provides reference sequences for the linear
    /// expansion; the right store provides queries.
    pub fn with_pair(lhs: Arc<S>, rhs: Arc<S>, mode: SpectrumMode) -> Self {
        Self {
            lhs,
            rhs,
            mode,
            normalizer: Box::new(IdentityNormalizer),
            expansion: LinearExpansion::new(mode),
        }
    }

    /// Replaces the normalizer.
    pub fn with_normalizer<N: KernelNormalizer + 'static>(mut self, normalizer: N) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    /// Fits a [`SqrtDiagNormalizer`] on the current stores and installs it.
    pub fn sqrt_diag_normalized(self) -> Self {
        let normalizer = SqrtDiagNormalizer::fit(&*self.lhs, &*self.rhs, self.mode);
        self.with_normalizer(normalizer)
    }

    /// Counting mode of this kernel.
    pub fn mode(&self) -> SpectrumMode {
        self.mode
    }

    /// Returns true when both sides are the same store object.
    pub fn lhs_equals_rhs(&self) -> bool {
        Arc::ptr_eq(&self.lhs, &self.rhs)
    }

    /// Read access to the linear expansion.
    pub fn expansion(&self) -> &LinearExpansion {
        &self.expansion
    }

    /// One full row of normalized kernel values for a left-hand sequence.
    pub fn row(&self, lhs_idx: usize) -> Result<Vec<f64>> {
        self.check_lhs(lhs_idx)?;
        let a = self.lhs.sequence(lhs_idx);
        Ok((0..self.rhs.len())
            .map(|j| {
                let raw = merge_count(a, self.rhs.sequence(j), self.mode);
                self.normalizer.normalize(raw, lhs_idx, j)
            })
            .collect())
    }

    /// Evaluates every pair and returns the values as a [`KernelMatrix`].
    ///
    /// When both sides are the same store the result is stored as a
    /// packed upper triangle and each pair is evaluated once.
    pub fn precompute(&self) -> KernelMatrix {
        let rows = self.lhs.len();
        let cols = self.rhs.len();
        if self.lhs_equals_rhs() {
            debug!("precomputing packed triangular matrix for {} sequences", rows);
            KernelMatrix::from_symmetric_fn(rows, |r, c| {
                let raw = merge_count(self.lhs.sequence(r), self.rhs.sequence(c), self.mode);
                self.normalizer.normalize(raw, r, c)
            })
        } else {
            debug!("precomputing dense {}x{} matrix", rows, cols);
            KernelMatrix::from_fn(rows, cols, |r, c| {
                let raw = merge_count(self.lhs.sequence(r), self.rhs.sequence(c), self.mode);
                self.normalizer.normalize(raw, r, c)
            })
        }
    }

    fn check_lhs(&self, index: usize) -> Result<()> {
        if index >= self.lhs.len() {
            return Err(KernelError::IndexOutOfRange {
                index,
                len: self.lhs.len(),
            });
        }
        Ok(())
    }

    fn check_rhs(&self, index: usize) -> Result<()> {
        if index >= self.rhs.len() {
            return Err(KernelError::IndexOutOfRange {
                index,
                len: self.rhs.len(),
            });
        }
        Ok(())
    }
}

impl<S: SequenceStore> SequenceKernel for SpectrumKernel<S> {
    fn num_lhs(&self) -> usize {
        self.lhs.len()
    }

    fn num_rhs(&self) -> usize {
        self.rhs.len()
    }

    fn evaluate_pair(&self, lhs_idx: usize, rhs_idx: usize) -> Result<f64> {
        self.check_lhs(lhs_idx)?;
        self.check_rhs(rhs_idx)?;
        let raw = merge_count(
            self.lhs.sequence(lhs_idx),
            self.rhs.sequence(rhs_idx),
            self.mode,
        );
        Ok(self.normalizer.normalize(raw, lhs_idx, rhs_idx))
    }

    fn has_linear_expansion(&self) -> bool {
        true
    }

    /// Builds the expansion from weighted left-hand sequences.
    ///
    /// Entry weights are merged as given. To obtain fully normalized
    /// expansion scores, pre-scale each weight with
    /// [`KernelNormalizer::normalize_lhs`]; the query-side factor is
    /// applied automatically on evaluation.
    fn build_linear_expansion(&mut self, entries: &[WeightedIndex]) -> Result<()> {
        self.expansion.build(&*self.lhs, entries)
    }

    fn evaluate_against_expansion(&self, query_idx: usize) -> Result<f64> {
        self.check_rhs(query_idx)?;
        let raw = self.expansion.score(self.rhs.sequence(query_idx))?;
        Ok(self.normalizer.normalize_rhs(raw, query_idx))
    }

    fn reset_expansion(&mut self) {
        self.expansion.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySequenceStore;
    use approx::assert_relative_eq;

    fn paper_store() -> Arc<MemorySequenceStore> {
        let mut store = MemorySequenceStore::new();
        store.push_sorted(vec![1, 1, 3, 5]);
        store.push_sorted(vec![1, 3, 3, 5, 5, 5]);
        Arc::new(store)
    }

    #[test]
    fn test_merge_count_presence() {
        let a = [1u64, 1, 3, 5];
        let b = [1u64, 3, 3, 5, 5, 5];
        assert_relative_eq!(merge_count(&a, &b, SpectrumMode::Presence), 3.0);
    }

    #[test]
    fn test_merge_count_multiplicity() {
        let a = [1u64, 1, 3, 5];
        let b = [1u64, 3, 3, 5, 5, 5];
        // 2*1 + 1*2 + 1*3
        assert_relative_eq!(merge_count(&a, &b, SpectrumMode::Multiplicity), 7.0);
    }

    #[test]
    fn test_merge_count_is_commutative() {
        let a = [1u64, 1, 3, 5];
        let b = [1u64, 3, 3, 5, 5, 5];
        for mode in [SpectrumMode::Presence, SpectrumMode::Multiplicity] {
            assert_relative_eq!(merge_count(&a, &b, mode), merge_count(&b, &a, mode));
        }
    }

    #[test]
    fn test_merge_count_disjoint_is_zero() {
        let a = [1u64, 2, 3];
        let b = [4u64, 5, 6];
        assert_relative_eq!(merge_count(&a, &b, SpectrumMode::Multiplicity), 0.0);
    }

    #[test]
    fn test_merge_count_empty_side_is_zero() {
        let a = [1u64, 2, 3];
        assert_relative_eq!(merge_count(&a, &[], SpectrumMode::Presence), 0.0);
        assert_relative_eq!(merge_count(&[], &[], SpectrumMode::Presence), 0.0);
    }

    #[test]
    fn test_evaluate_pair() {
        let kernel = SpectrumKernel::new(paper_store(), SpectrumMode::Multiplicity);
        assert_relative_eq!(kernel.evaluate_pair(0, 1).unwrap(), 7.0);
        assert_relative_eq!(kernel.evaluate_pair(1, 0).unwrap(), 7.0);
        assert_relative_eq!(kernel.evaluate_pair(0, 0).unwrap(), 6.0);
    }

    #[test]
    fn test_evaluate_pair_out_of_range() {
        let kernel = SpectrumKernel::new(paper_store(), SpectrumMode::Presence);
        assert!(matches!(
            kernel.evaluate_pair(2, 0),
            Err(KernelError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(kernel.evaluate_pair(0, 9).is_err());
    }

    #[test]
    fn test_sqrt_diag_normalized_diagonal() {
        let kernel =
            SpectrumKernel::new(paper_store(), SpectrumMode::Multiplicity).sqrt_diag_normalized();
        assert_relative_eq!(kernel.evaluate_pair(0, 0).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(kernel.evaluate_pair(1, 1).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            kernel.evaluate_pair(0, 1).unwrap(),
            7.0 / (6.0f64.sqrt() * 14.0f64.sqrt())
        );
    }

    #[test]
    fn test_expansion_matches_direct_sum() {
        let store = paper_store();
        let mut kernel = SpectrumKernel::new(Arc::clone(&store), SpectrumMode::Multiplicity);
        let entries = [WeightedIndex::new(0, 0.5), WeightedIndex::new(1, -1.5)];
        kernel.build_linear_expansion(&entries).unwrap();

        for q in 0..store.len() {
            let direct: f64 = entries
                .iter()
                .map(|e| e.weight * kernel.evaluate_pair(e.index, q).unwrap())
                .sum();
            assert_relative_eq!(kernel.evaluate_against_expansion(q).unwrap(), direct);
        }
    }

    #[test]
    fn test_expansion_with_normalizer_scales_both_sides() {
        let store = paper_store();
        let normalizer = SqrtDiagNormalizer::fit(&*store, &*store, SpectrumMode::Multiplicity);
        let mut kernel = SpectrumKernel::new(Arc::clone(&store), SpectrumMode::Multiplicity)
            .with_normalizer(normalizer.clone());

        // Pre-scale the reference weights so scores match the fully
        // normalized pairwise sum.
        let alphas = [0.5, -1.5];
        let entries: Vec<WeightedIndex> = alphas
            .iter()
            .enumerate()
            .map(|(i, &a)| WeightedIndex::new(i, normalizer.normalize_lhs(a, i)))
            .collect();
        kernel.build_linear_expansion(&entries).unwrap();

        for q in 0..store.len() {
            let direct: f64 = alphas
                .iter()
                .enumerate()
                .map(|(i, &a)| a * kernel.evaluate_pair(i, q).unwrap())
                .sum();
            assert_relative_eq!(
                kernel.evaluate_against_expansion(q).unwrap(),
                direct,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_expansion_query_before_build_fails() {
        let kernel = SpectrumKernel::new(paper_store(), SpectrumMode::Presence);
        assert!(matches!(
            kernel.evaluate_against_expansion(0),
            Err(KernelError::ExpansionNotReady)
        ));
    }

    #[test]
    fn test_reset_expansion() {
        let mut kernel = SpectrumKernel::new(paper_store(), SpectrumMode::Presence);
        kernel
            .build_linear_expansion(&[WeightedIndex::new(0, 1.0)])
            .unwrap();
        assert!(kernel.expansion().is_ready());

        kernel.reset_expansion();
        assert!(!kernel.expansion().is_ready());
        assert!(kernel.evaluate_against_expansion(0).is_err());
    }

    #[test]
    fn test_row_matches_pairwise() {
        let kernel = SpectrumKernel::new(paper_store(), SpectrumMode::Multiplicity);
        let row = kernel.row(0).unwrap();
        assert_eq!(row.len(), 2);
        assert_relative_eq!(row[0], 6.0);
        assert_relative_eq!(row[1], 7.0);
        assert!(kernel.row(5).is_err());
    }

    #[test]
    fn test_precompute_symmetric() {
        let kernel = SpectrumKernel::new(paper_store(), SpectrumMode::Multiplicity);
        let matrix = kernel.precompute();

        assert!(matrix.is_triangular());
        assert_eq!(matrix.rows(), 2);
        for r in 0..2 {
            for c in 0..2 {
                assert_relative_eq!(
                    matrix.get(r, c),
                    kernel.evaluate_pair(r, c).unwrap(),
                    epsilon = 1e-4
                );
            }
        }
    }

    #[test]
    fn test_precompute_asymmetric() {
        let store = paper_store();
        let mut queries = MemorySequenceStore::new();
        queries.push_sorted(vec![3, 5, 5]);
        let kernel = SpectrumKernel::with_pair(
            Arc::clone(&store),
            Arc::new(queries),
            SpectrumMode::Multiplicity,
        );

        assert!(!kernel.lhs_equals_rhs());
        let matrix = kernel.precompute();
        assert!(!matrix.is_triangular());
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.cols(), 1);
        // [1,1,3,5] vs [3,5,5]: 1*1 + 1*2 = 3.
        assert_relative_eq!(matrix.get(0, 0), 3.0, epsilon = 1e-4);
        // [1,3,3,5,5,5] vs [3,5,5]: 2*1 + 3*2 = 8.
        assert_relative_eq!(matrix.get(1, 0), 8.0, epsilon = 1e-4);
    }
}
