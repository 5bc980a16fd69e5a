//! Sequence storage and loading
//!
//! Kernels read their inputs through the [`SequenceStore`] trait;
//! [`MemorySequenceStore`] is the in-memory implementation and owns the
//! sorting guarantee every downstream loop depends on. Loaders exist
//! for two text formats: whitespace-separated u64 symbols, one sequence
//! per line, and raw DNA lines turned into k-mer spectra.

pub mod kmer;

pub use self::kmer::KmerEncoder;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::core::error::{KernelError, Result};
use crate::core::traits::SequenceStore;
use crate::core::types::Symbol;

/// In-memory sequence store keeping every sequence sorted ascending.
#[derive(Debug, Clone, Default)]
pub struct MemorySequenceStore {
    sequences: Vec<Vec<Symbol>>,
}

impl MemorySequenceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            sequences: Vec::new(),
        }
    }

    /// Builds a store from unsorted sequences, sorting each one.
    pub fn from_sequences(sequences: Vec<Vec<Symbol>>) -> Self {
        let mut store = Self::new();
        for seq in sequences {
            store.push(seq);
        }
        store
    }

    /// Adds a sequence, sorting it first.
    pub fn push(&mut self, mut symbols: Vec<Symbol>) {
        symbols.sort_unstable();
        self.sequences.push(symbols);
    }

    /// Adds a sequence that is already sorted ascending.
    pub fn push_sorted(&mut self, symbols: Vec<Symbol>) {
        debug_assert!(
            symbols.windows(2).all(|w| w[0] <= w[1]),
            "push_sorted given an unsorted sequence"
        );
        self.sequences.push(symbols);
    }

    /// Loads symbol sequences from a reader.
    ///
    /// One sequence per line as whitespace-separated u64 symbols. Blank
    /// lines and lines starting with '#' are skipped. Fails if no
    /// sequence remains after filtering.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut store = Self::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let symbols = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<Symbol>().map_err(|_| {
                        KernelError::ParseError(format!(
                            "line {}: invalid symbol '{}'",
                            line_num + 1,
                            tok
                        ))
                    })
                })
                .collect::<Result<Vec<Symbol>>>()?;
            store.push(symbols);
        }
        if store.is_empty() {
            return Err(KernelError::EmptyStore);
        }
        Ok(store)
    }

    /// Loads symbol sequences from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let store = Self::from_reader(BufReader::new(file))?;
        info!(
            "loaded {} sequences from {}",
            store.len(),
            path.as_ref().display()
        );
        Ok(store)
    }

    /// Loads DNA lines from a reader as sorted k-mer spectra.
    ///
    /// Same line filtering as [`from_reader`](Self::from_reader); each
    /// remaining line is one DNA string. Lines shorter than `k` become
    /// empty sequences.
    pub fn from_dna_reader<R: BufRead>(reader: R, k: usize) -> Result<Self> {
        let encoder = KmerEncoder::new(k)?;
        let mut store = Self::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let spectrum = encoder.spectrum(line).map_err(|e| match e {
                KernelError::ParseError(msg) => {
                    KernelError::ParseError(format!("line {}: {}", line_num + 1, msg))
                }
                other => other,
            })?;
            store.push_sorted(spectrum);
        }
        if store.is_empty() {
            return Err(KernelError::EmptyStore);
        }
        Ok(store)
    }

    /// Loads DNA lines from a file as sorted k-mer spectra.
    pub fn from_dna_file<P: AsRef<Path>>(path: P, k: usize) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let store = Self::from_dna_reader(BufReader::new(file), k)?;
        info!(
            "loaded {} DNA sequences from {} as {}-mer spectra",
            store.len(),
            path.as_ref().display(),
            k
        );
        Ok(store)
    }
}

impl SequenceStore for MemorySequenceStore {
    fn len(&self) -> usize {
        self.sequences.len()
    }

    fn sequence(&self, index: usize) -> &[Symbol] {
        &self.sequences[index]
    }
}
