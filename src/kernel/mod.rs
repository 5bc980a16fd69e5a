//! Spectrum kernel evaluation
//!
//! `spectrum` holds the pairwise merge count and the [`SpectrumKernel`]
//! engine, `dictionary` and `expansion` the dictionary-backed fast path
//! for scoring against a fixed weighted reference set.

pub mod dictionary;
pub mod expansion;
pub mod spectrum;
pub mod traits;

pub use self::dictionary::WeightedDictionary;
pub use self::expansion::{ExpansionState, LinearExpansion};
pub use self::spectrum::{merge_count, SpectrumKernel};
pub use self::traits::SequenceKernel;
