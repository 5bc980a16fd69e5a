//! Core traits for the sequence kernel engine

use crate::core::Symbol;

/// Read-only source of symbol sequences, indexed densely from 0.
///
/// The engine borrows one sequence per call and never mutates the store, so a
/// single store may be shared by several engine instances. Sequences must
/// hold their symbols in ascending order; that invariant belongs to whatever
/// produced the store and is not re-checked by the engine.
pub trait SequenceStore: Send + Sync {
    /// Number of sequences in the store.
    fn len(&self) -> usize;

    /// Borrow the sequence at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`. The engine facade validates indices before
    /// calling in, so user-facing paths report
    /// [`KernelError::IndexOutOfRange`](crate::core::KernelError::IndexOutOfRange)
    /// instead.
    fn sequence(&self, index: usize) -> &[Symbol];

    /// Check if the store holds no sequences.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
