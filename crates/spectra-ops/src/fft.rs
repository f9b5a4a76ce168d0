//! 2-D Fourier transform primitives.
//!
//! Conventions match numpy's `fft2`/`ifft2`: the forward transform is
//! unscaled and the inverse divides by the sample count, so
//! `ifft2(fft2(x)) == x` up to rounding. [`fftshift`] moves the DC sample
//! from `(0, 0)` to `(rows/2, cols/2)` and [`ifftshift`] undoes it, also for
//! odd sizes.
//!
//! # Example
//!
//! ```rust
//! use spectra_core::Grid;
//! use spectra_ops::fft::{fft2, fftshift, ifft2};
//!
//! let img = Grid::filled(4, 6, 1.0f64).unwrap().to_complex();
//! let spectrum = fftshift(&fft2(&img));
//! // all energy sits in the centred DC sample
//! assert!((spectrum[(2, 3)].re - 24.0).abs() < 1e-9);
//! let back = ifft2(&fft2(&img));
//! assert!((back[(1, 1)].re - 1.0).abs() < 1e-12);
//! ```

use rustfft::{FftDirection, FftPlanner};
use spectra_core::{Complex64, ComplexImage, Grid};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Forward 2-D DFT, unscaled.
pub fn fft2(img: &ComplexImage) -> ComplexImage {
    transform_2d(img, FftDirection::Forward)
}

/// Inverse 2-D DFT, scaled by `1 / (rows * cols)`.
pub fn ifft2(img: &ComplexImage) -> ComplexImage {
    let mut out = transform_2d(img, FftDirection::Inverse);
    let scale = 1.0 / out.len() as f64;
    for z in out.as_mut_slice() {
        *z *= scale;
    }
    out
}

/// Rotates the grid so the zero-frequency sample lands at `(rows/2, cols/2)`.
pub fn fftshift<T: Clone>(grid: &Grid<T>) -> Grid<T> {
    let (rows, cols) = grid.shape();
    roll(grid, rows / 2, cols / 2)
}

/// Inverse of [`fftshift`].
pub fn ifftshift<T: Clone>(grid: &Grid<T>) -> Grid<T> {
    let (rows, cols) = grid.shape();
    roll(grid, rows - rows / 2, cols - cols / 2)
}

/// Cyclic shift: the sample at `(r, c)` moves to `(r + dr, c + dc)` mod shape.
fn roll<T: Clone>(grid: &Grid<T>, dr: usize, dc: usize) -> Grid<T> {
    let (rows, cols) = grid.shape();
    let mut out = grid.clone();
    let dst = out.as_mut_slice();
    for r in 0..rows {
        let sr = (r + rows - dr % rows) % rows;
        let src_row = grid.row(sr);
        let dst_row = &mut dst[r * cols..(r + 1) * cols];
        for (c, d) in dst_row.iter_mut().enumerate() {
            *d = src_row[(c + cols - dc % cols) % cols].clone();
        }
    }
    out
}

/// Row pass, transpose, column pass, transpose back.
fn transform_2d(img: &ComplexImage, direction: FftDirection) -> ComplexImage {
    let (rows, cols) = img.shape();
    trace!(rows, cols, ?direction, "fft::transform_2d");

    let mut planner = FftPlanner::<f64>::new();
    let fft_row = planner.plan_fft(cols, direction);
    let fft_col = planner.plan_fft(rows, direction);

    let mut out = img.clone();
    let data = out.as_mut_slice();

    let mut scratch = vec![Complex64::new(0.0, 0.0); fft_row.get_inplace_scratch_len()];
    for row in data.chunks_exact_mut(cols) {
        fft_row.process_with_scratch(row, &mut scratch);
    }

    let mut transposed = vec![Complex64::new(0.0, 0.0); rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            transposed[c * rows + r] = data[r * cols + c];
        }
    }

    let mut scratch = vec![Complex64::new(0.0, 0.0); fft_col.get_inplace_scratch_len()];
    for col in transposed.chunks_exact_mut(rows) {
        fft_col.process_with_scratch(col, &mut scratch);
    }

    for r in 0..rows {
        for c in 0..cols {
            data[r * cols + c] = transposed[c * rows + r];
        }
    }
    out
}
