//! Kernel value normalization
//!
//! Raw spectrum counts grow with sequence length, which lets long
//! sequences dominate training. A [`KernelNormalizer`] rescales values
//! after the fact; [`SqrtDiagNormalizer`] implements the usual cosine-style
//! correction k'(x, y) = k(x, y) / sqrt(k(x, x) * k(y, y)), while
//! [`IdentityNormalizer`] leaves values untouched.

use crate::core::traits::SequenceStore;
use crate::core::types::SpectrumMode;
use crate::kernel::spectrum::merge_count;

/// Rescales kernel values by left and right sequence index.
///
/// `normalize` handles full pairwise values. The one-sided variants
/// exist for split pipelines: a linear expansion built from raw weights
/// produces raw scores, and only the query side's factor remains to be
/// applied via `normalize_rhs`.
pub trait KernelNormalizer: Send + Sync {
    /// Normalizes a pairwise value for sequences `lhs_idx` and `rhs_idx`.
    fn normalize(&self, raw: f64, lhs_idx: usize, rhs_idx: usize) -> f64;

    /// Applies only the left-hand factor.
    fn normalize_lhs(&self, raw: f64, lhs_idx: usize) -> f64;

    /// Applies only the right-hand factor.
    fn normalize_rhs(&self, raw: f64, rhs_idx: usize) -> f64;
}

/// Passthrough normalizer; every value is returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl KernelNormalizer for IdentityNormalizer {
    fn normalize(&self, raw: f64, _lhs_idx: usize, _rhs_idx: usize) -> f64 {
        raw
    }

    fn normalize_lhs(&self, raw: f64, _lhs_idx: usize) -> f64 {
        raw
    }

    fn normalize_rhs(&self, raw: f64, _rhs_idx: usize) -> f64 {
        raw
    }
}

/// Divides by the square roots of the self-similarities of both sides.
///
/// The factors are precomputed once per store, so normalizing a value is
/// two array reads and a division. Self-similarity of an empty sequence
/// is zero; its factor is clamped to 1.0 so normalization never divides
/// by zero.
#[derive(Debug, Clone)]
pub struct SqrtDiagNormalizer {
    sqrt_diag_lhs: Vec<f64>,
    sqrt_diag_rhs: Vec<f64>,
}

impl SqrtDiagNormalizer {
    /// Precomputes the diagonal factors for both stores.
    ///
    /// # Arguments
    ///
    /// * `lhs` - Left-hand store
    /// * `rhs` - Right-hand store, which may be the same object
    /// * `mode` - Counting mode used by the kernel being normalized
    pub fn fit<L, R>(lhs: &L, rhs: &R, mode: SpectrumMode) -> Self
    where
        L: SequenceStore + ?Sized,
        R: SequenceStore + ?Sized,
    {
        Self {
            sqrt_diag_lhs: Self::sqrt_diag(lhs, mode),
            sqrt_diag_rhs: Self::sqrt_diag(rhs, mode),
        }
    }

    fn sqrt_diag<S: SequenceStore + ?Sized>(store: &S, mode: SpectrumMode) -> Vec<f64> {
        (0..store.len())
            .map(|i| {
                let seq = store.sequence(i);
                let d = merge_count(seq, seq, mode).sqrt();
                if d > 0.0 {
                    d
                } else {
                    1.0
                }
            })
            .collect()
    }
}

impl KernelNormalizer for SqrtDiagNormalizer {
    fn normalize(&self, raw: f64, lhs_idx: usize, rhs_idx: usize) -> f64 {
        raw / (self.sqrt_diag_lhs[lhs_idx] * self.sqrt_diag_rhs[rhs_idx])
    }

    fn normalize_lhs(&self, raw: f64, lhs_idx: usize) -> f64 {
        raw / self.sqrt_diag_lhs[lhs_idx]
    }

    fn normalize_rhs(&self, raw: f64, rhs_idx: usize) -> f64 {
        raw / self.sqrt_diag_rhs[rhs_idx]
    }
}
