//! DNA k-mer extraction
//!
//! Turns a DNA string into its sorted k-mer spectrum. Each base is
//! packed into two bits (A=00, C=01, T=10, G=11) and consecutive
//! windows of k bases roll into a single u64 code, so k can reach 32.

use crate::core::error::{KernelError, Result};
use crate::core::types::Symbol;

/// Packs DNA k-mers of a fixed length into sorted u64 symbols.
#[derive(Debug, Clone, Copy)]
pub struct KmerEncoder {
    k: usize,
    mask: u64,
}

impl KmerEncoder {
    /// Largest supported k-mer length; 32 bases fill a u64.
    pub const MAX_K: usize = 32;

    /// Creates an encoder for k-mers of length `k`.
    ///
    /// `k` outside `1..=32` is rejected.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 || k > Self::MAX_K {
            return Err(KernelError::InvalidParameter(format!(
                "k-mer length must be in 1..={}, got {}",
                Self::MAX_K,
                k
            )));
        }
        let mask = if k == Self::MAX_K {
            u64::MAX
        } else {
            (1u64 << (2 * k)) - 1
        };
        Ok(Self { k, mask })
    }

    /// Configured k-mer length.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Sorted k-mer codes of `text`, one per window.
    ///
    /// Text shorter than k has an empty spectrum. Bases may be upper or
    /// lower case; any other character is an error.
    pub fn spectrum(&self, text: &str) -> Result<Vec<Symbol>> {
        let bytes = text.as_bytes();
        if bytes.len() < self.k {
            return Ok(Vec::new());
        }
        let mut codes = Vec::with_capacity(bytes.len() - self.k + 1);
        let mut code = 0u64;
        let mut filled = 0;
        for &base in bytes {
            code = ((code << 2) | Self::encode_base(base)?) & self.mask;
            filled += 1;
            if filled >= self.k {
                codes.push(code);
            }
        }
        codes.sort_unstable();
        Ok(codes)
    }

    fn encode_base(base: u8) -> Result<u64> {
        match base {
            b'A' | b'a' => Ok(0),
            b'C' | b'c' => Ok(1),
            b'T' | b't' => Ok(2),
            b'G' | b'g' => Ok(3),
            _ => Err(KernelError::ParseError(format!(
                "invalid DNA base '{}'",
                base as char
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_base_codes() {
        let encoder = KmerEncoder::new(1).unwrap();
        assert_eq!(encoder.spectrum("ACGT").unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_two_mer_packing() {
        let encoder = KmerEncoder::new(2).unwrap();
        // AC = 0b0001, CG = 0b0111, GT = 0b1110, sorted ascending.
        assert_eq!(encoder.spectrum("ACGT").unwrap(), vec![1, 7, 14]);
    }

    #[test]
    fn test_repeated_kmers_are_kept() {
        let encoder = KmerEncoder::new(2).unwrap();
        assert_eq!(encoder.spectrum("AAA").unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_lower_case_accepted() {
        let encoder = KmerEncoder::new(2).unwrap();
        assert_eq!(
            encoder.spectrum("acgt").unwrap(),
            encoder.spectrum("ACGT").unwrap()
        );
    }

    #[test]
    fn test_text_shorter_than_k_is_empty() {
        let encoder = KmerEncoder::new(4).unwrap();
        assert!(encoder.spectrum("ACG").unwrap().is_empty());
        assert!(encoder.spectrum("").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_base_rejected() {
        let encoder = KmerEncoder::new(2).unwrap();
        let err = encoder.spectrum("ACNT").unwrap_err();
        assert!(err.to_string().contains("invalid DNA base 'N'"));
    }

    #[test]
    fn test_k_bounds() {
        assert!(KmerEncoder::new(0).is_err());
        assert!(KmerEncoder::new(33).is_err());
        assert!(KmerEncoder::new(32).is_ok());
    }

    #[test]
    fn test_max_k_does_not_overflow() {
        let encoder = KmerEncoder::new(32).unwrap();
        let text = "A".repeat(33);
        assert_eq!(encoder.spectrum(&text).unwrap(), vec![0, 0]);
    }
}
