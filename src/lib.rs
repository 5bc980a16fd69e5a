//! Spectrum kernels over sorted symbol sequences
//!
//! A sequence is a sorted list of u64 symbols; the kernel value of two
//! sequences sums, over the symbols they share, the product of both
//! sides' run contributions. Counting runs as 1 or by length selects the
//! presence or multiplicity variant. Beyond pairwise evaluation the crate
//! provides a linear expansion for scoring against a fixed weighted
//! reference set, sqrt-diagonal normalization, precomputed and LRU-cached
//! kernel values, and loaders for symbol and DNA k-mer inputs.
//!
//! ```
//! use std::sync::Arc;
//! use seqsvm::{MemorySequenceStore, SequenceKernel, SpectrumKernel, SpectrumMode};
//!
//! let mut store = MemorySequenceStore::new();
//! store.push(vec![5, 1, 1, 3]);
//! store.push(vec![1, 3, 3, 5, 5, 5]);
//!
//! let kernel = SpectrumKernel::new(Arc::new(store), SpectrumMode::Multiplicity);
//! assert_eq!(kernel.evaluate_pair(0, 1).unwrap(), 7.0);
//! ```

pub mod cache;
pub mod core;
pub mod kernel;
pub mod normalizer;
pub mod store;
pub mod utils;

// Re-export main types for convenience
pub use crate::cache::{CacheStats, KernelMatrix, KernelRowCache};
pub use crate::core::error::{KernelError, Result};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::kernel::{
    merge_count, ExpansionState, LinearExpansion, SequenceKernel, SpectrumKernel,
    WeightedDictionary,
};
pub use crate::normalizer::{IdentityNormalizer, KernelNormalizer, SqrtDiagNormalizer};
pub use crate::store::{KmerEncoder, MemorySequenceStore};
pub use crate::utils::stats::{SequenceStats, StoreSummary};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
