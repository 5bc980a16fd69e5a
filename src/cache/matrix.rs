//! Precomputed kernel matrix storage
//!
//! Holds kernel values evaluated ahead of time so downstream consumers
//! can look them up without touching the sequences again. Values are
//! stored as f32 to halve the footprint; a symmetric matrix can be
//! packed as its upper triangle, which again halves it.

use crate::core::error::{KernelError, Result};

/// Dense or packed-triangular matrix of kernel values.
///
/// The packed layout keeps the upper triangle row-major: row `r` of an
/// n-row matrix starts at offset `r*n - r*(r+1)/2` and holds columns
/// `r..n`. Lookups below the diagonal mirror through symmetry.
#[derive(Debug, Clone)]
pub struct KernelMatrix {
    values: Vec<f32>,
    rows: usize,
    cols: usize,
    triangular: bool,
}

impl KernelMatrix {
    /// Builds a dense row-major matrix by evaluating `f` on every cell.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut values = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                values.push(f(r, c) as f32);
            }
        }
        Self {
            values,
            rows,
            cols,
            triangular: false,
        }
    }

    /// Builds a packed triangular matrix for a symmetric kernel.
    ///
    /// `f` is evaluated once per unordered pair, on and above the
    /// diagonal only.
    pub fn from_symmetric_fn<F>(n: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut values = Vec::with_capacity(n * (n + 1) / 2);
        for r in 0..n {
            for c in r..n {
                values.push(f(r, c) as f32);
            }
        }
        Self {
            values,
            rows: n,
            cols: n,
            triangular: true,
        }
    }

    /// Wraps an already packed upper triangle.
    ///
    /// The side length is recovered from the element count; a count that
    /// is not a triangle number is rejected.
    pub fn from_triangle(values: &[f64]) -> Result<Self> {
        let n = (-0.5 + (0.25 + 2.0 * values.len() as f64).sqrt()).floor() as usize;
        if n * (n + 1) / 2 != values.len() {
            return Err(KernelError::InvalidParameter(format!(
                "{} values do not form a packed triangle",
                values.len()
            )));
        }
        Ok(Self {
            values: values.iter().map(|&v| v as f32).collect(),
            rows: n,
            cols: n,
            triangular: true,
        })
    }

    /// Wraps a dense row-major value slice.
    pub fn from_full(values: &[f64], rows: usize, cols: usize) -> Result<Self> {
        if rows * cols != values.len() {
            return Err(KernelError::InvalidParameter(format!(
                "expected {}x{} = {} values, got {}",
                rows,
                cols,
                rows * cols,
                values.len()
            )));
        }
        Ok(Self {
            values: values.iter().map(|&v| v as f32).collect(),
            rows,
            cols,
            triangular: false,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns true for the packed triangular layout.
    pub fn is_triangular(&self) -> bool {
        self.triangular
    }

    /// Value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(
            row < self.rows && col < self.cols,
            "matrix index ({}, {}) out of range for {}x{}",
            row,
            col,
            self.rows,
            self.cols
        );
        if self.triangular {
            let (r, c) = if row <= col { (row, col) } else { (col, row) };
            f64::from(self.values[r * self.cols - r * (r + 1) / 2 + c])
        } else {
            f64::from(self.values[row * self.cols + col])
        }
    }
}
