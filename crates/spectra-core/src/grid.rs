//! Two-dimensional sample grids.
//!
//! [`Grid`] is the array type every transform consumes and produces. Samples
//! are stored in **row-major** order and indexed `(row, col)`, so `shape()`
//! reads like a numpy shape: `(rows, cols)`.
//!
//! ```text
//! data: [s(0,0) s(0,1) ... s(0,cols-1)]  <- row 0
//!       [s(1,0) s(1,1) ... s(1,cols-1)]  <- row 1
//!       ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use spectra_core::{Grid, RealImage};
//!
//! let ramp: RealImage = Grid::from_fn(4, 4, |r, c| (r * 4 + c) as f64).unwrap();
//! assert_eq!(ramp.shape(), (4, 4));
//! assert_eq!(ramp[(3, 3)], 15.0);
//! assert_eq!(ramp.min_max(), (0.0, 15.0));
//! ```

use crate::{Error, Result};
use num_complex::Complex64;
use std::ops::Index;

/// Owned 2-D array of samples.
///
/// A grid always has at least one row and one column and exactly
/// `rows * cols` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

/// Grid of real-valued samples.
pub type RealImage = Grid<f64>;

/// Grid of complex samples, typically a Fourier-space image.
pub type ComplexImage = Grid<Complex64>;

impl<T> Grid<T> {
    /// Creates a grid from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero or
    /// `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        check_shape(rows, cols)?;
        if data.len() != rows * cols {
            return Err(Error::invalid_dimensions(
                rows,
                cols,
                format!("expected {} samples, got {}", rows * cols, data.len()),
            ));
        }
        Ok(Self { data, rows, cols })
    }

    /// Creates a grid by evaluating `f(row, col)` for every sample.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        check_shape(rows, cols)?;
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Ok(Self { data, rows, cols })
    }

    /// Number of rows (H).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (W).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` for a constructed grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major sample slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major sample slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the grid and returns its samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns the sample at `(row, col)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Like [`get`](Self::get) but reports the failed coordinates.
    pub fn try_get(&self, row: usize, col: usize) -> Result<&T> {
        self.get(row, col)
            .ok_or_else(|| Error::out_of_bounds(row, col, self.rows, self.cols))
    }

    /// Slice of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterates over samples in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Applies `f` to every sample, producing a grid of the same shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            data: self.data.iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every sample set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self> {
        check_shape(rows, cols)?;
        Ok(Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        })
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "sample ({row}, {col}) out of bounds for grid {}x{}",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl RealImage {
    /// Smallest and largest sample. NaN samples are ignored.
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Promotes real samples to complex with zero imaginary part.
    pub fn to_complex(&self) -> ComplexImage {
        self.map(|&v| Complex64::new(v, 0.0))
    }
}

impl ComplexImage {
    /// Per-sample magnitude `|z|`.
    pub fn magnitude(&self) -> RealImage {
        self.map(|z| z.norm())
    }

    /// Per-sample phase `atan2(im, re)` in (-pi, pi].
    pub fn phase(&self) -> RealImage {
        self.map(|z| z.arg())
    }

    /// Real parts.
    pub fn real(&self) -> RealImage {
        self.map(|z| z.re)
    }
}

fn check_shape(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(Error::invalid_dimensions(rows, cols, "grid dimensions must be > 0"));
    }
    rows.checked_mul(cols)
        .map(|_| ())
        .ok_or_else(|| Error::invalid_dimensions(rows, cols, "grid dimensions overflow"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = Grid::new(3, 3, vec![0.0f64; 8]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { rows: 3, cols: 3, .. }));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(Grid::<f64>::new(0, 4, Vec::new()).is_err());
        assert!(Grid::filled(4, 0, 1.0f64).is_err());
    }

    #[test]
    fn test_row_major_layout() {
        let g = Grid::from_fn(2, 3, |r, c| r * 10 + c).unwrap();
        assert_eq!(g.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(g.row(1), &[10, 11, 12]);
        assert_eq!(g[(1, 2)], 12);
        assert_eq!(g.get(2, 0), None);
        assert!(matches!(g.try_get(0, 3), Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn test_min_max_skips_nan() {
        let g = Grid::new(1, 4, vec![2.0, f64::NAN, -1.0, 5.0]).unwrap();
        assert_eq!(g.min_max(), (-1.0, 5.0));
    }

    #[test]
    fn test_complex_views() {
        let g = Grid::new(1, 2, vec![Complex64::new(3.0, 4.0), Complex64::new(0.0, 2.0)]).unwrap();
        let mag = g.magnitude();
        assert_relative_eq!(mag[(0, 0)], 5.0);
        assert_relative_eq!(g.phase()[(0, 1)], FRAC_PI_2);
        assert_eq!(g.real().as_slice(), &[3.0, 0.0]);
    }
}
