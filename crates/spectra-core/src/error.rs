//! Error types for spectra-core.
//!
//! Grid construction and indexing are the only fallible operations in this
//! crate. Transform errors live in `spectra-ops`.
//!
//! # Usage
//!
//! ```rust
//! use spectra_core::{Error, Grid, Result};
//!
//! fn build() -> Result<Grid<f64>> {
//!     Grid::new(2, 2, vec![0.0; 4])
//! }
//! assert!(build().is_ok());
//!
//! let err = Grid::new(2, 2, vec![0.0f64; 3]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by grid construction and access.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Grid shape is empty or doesn't match the element count.
    #[error("invalid dimensions: {rows}x{cols} ({reason})")]
    InvalidDimensions {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
        /// Why the shape was rejected
        reason: String,
    },

    /// Sample coordinates are outside the grid.
    #[error("sample ({row}, {col}) out of bounds for grid {rows}x{cols}")]
    OutOfBounds {
        /// Row that was accessed
        row: usize,
        /// Column that was accessed
        col: usize,
        /// Grid rows
        rows: usize,
        /// Grid columns
        cols: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(rows: usize, cols: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            rows,
            cols,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self::OutOfBounds {
            row,
            col,
            rows,
            cols,
        }
    }
}
