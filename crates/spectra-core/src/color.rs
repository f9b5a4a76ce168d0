//! 8-bit three-channel color images.
//!
//! Transforms that visualize data produce a [`ColorImage`]. Channels are
//! stored per pixel in **B, G, R** order, which is what the host display
//! expects. Use [`ColorImage::to_rgb_bytes`] when handing pixels to a
//! writer that wants RGB.

use crate::{Error, Result};

/// Channel index of blue in a stored pixel.
pub const BLUE: usize = 0;
/// Channel index of green in a stored pixel.
pub const GREEN: usize = 1;
/// Channel index of red in a stored pixel.
pub const RED: usize = 2;

/// H x W image of `[B, G, R]` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorImage {
    pixels: Vec<[u8; 3]>,
    rows: usize,
    cols: usize,
}

impl ColorImage {
    /// Creates a black image.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::invalid_dimensions(rows, cols, "image dimensions must be > 0"));
        }
        Ok(Self {
            pixels: vec![[0; 3]; rows * cols],
            rows,
            cols,
        })
    }

    /// Creates an image from row-major BGR pixels.
    pub fn from_pixels(rows: usize, cols: usize, pixels: Vec<[u8; 3]>) -> Result<Self> {
        if rows == 0 || cols == 0 || pixels.len() != rows * cols {
            return Err(Error::invalid_dimensions(
                rows,
                cols,
                format!("expected {} pixels, got {}", rows * cols, pixels.len()),
            ));
        }
        Ok(Self { pixels, rows, cols })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// BGR pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        assert!(row < self.rows && col < self.cols, "pixel ({row}, {col}) out of bounds");
        self.pixels[row * self.cols + col]
    }

    /// Row-major BGR pixels.
    #[inline]
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Mutable row-major BGR pixels.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [[u8; 3]] {
        &mut self.pixels
    }

    /// Interleaved RGB bytes, three per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p[RED], p[GREEN], p[BLUE]])
            .collect()
    }
}
