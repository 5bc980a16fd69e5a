//! Kernel value caching
//!
//! Two complementary strategies: [`KernelMatrix`] precomputes every pair
//! up front and answers lookups from memory, [`KernelRowCache`] keeps an
//! LRU working set of rows and evaluates on demand.

pub mod matrix;
pub mod row;

pub use self::matrix::KernelMatrix;
pub use self::row::{CacheStats, KernelRowCache};
