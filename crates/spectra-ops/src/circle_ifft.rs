//! Circular low-pass mask followed by an inverse FFT.
//!
//! The input is taken to be a crop around the centre of a larger spectrum.
//! It is pasted into the middle of a square canvas roughly the size of the
//! uncropped spectrum, everything outside a centred circle is zeroed, and
//! the canvas is inverse transformed. The complex result is returned as is.

use crate::fft::ifft2;
use crate::guard::ensure_finite_complex;
use crate::OpsResult;
use spectra_core::{Complex64, ComplexImage, Grid};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Smallest canvas edge.
pub const MIN_CANVAS: usize = 512;

/// Canvas edge for a `rows x cols` crop: `max(512, 2 * min(rows, cols))`.
pub fn circle_canvas_size(rows: usize, cols: usize) -> usize {
    MIN_CANVAS.max(2 * rows.min(cols))
}

/// Masks the centred crop to a circle and inverse transforms it.
///
/// The circle radius is `min(rows, cols) / 2` (integer division) and the test
/// is strict: samples exactly on the rim are dropped. Crops wider than the
/// canvas along one axis keep their central part.
///
/// # Errors
///
/// [`OpsError::NonFiniteInput`](crate::OpsError::NonFiniteInput) if any
/// sample has a NaN/infinite component.
///
/// # Example
///
/// ```rust
/// use spectra_core::{Complex64, Grid};
/// use spectra_ops::circle_ifft::circle_ifft;
///
/// let crop = Grid::filled(100, 100, Complex64::new(0.0, 0.0)).unwrap();
/// let out = circle_ifft(&crop).unwrap();
/// assert_eq!(out.shape(), (512, 512));
/// ```
pub fn circle_ifft(img: &ComplexImage) -> OpsResult<ComplexImage> {
    let (rows, cols) = img.shape();
    trace!(rows, cols, "circle_ifft::circle_ifft");
    ensure_finite_complex("circle_ifft", img)?;

    let size = circle_canvas_size(rows, cols);
    let radius = (rows.min(cols) / 2) as i64;
    let center = (size / 2) as i64;
    debug!(size, radius, "circle canvas");

    let row_off = (size as i64 - rows as i64).div_euclid(2);
    let col_off = (size as i64 - cols as i64).div_euclid(2);
    let inside = |r: i64, c: i64| (r - center).pow(2) + (c - center).pow(2) < radius * radius;

    let mut canvas = Grid::filled(size, size, Complex64::new(0.0, 0.0))?;
    let dst = canvas.as_mut_slice();
    for r in 0..rows {
        let cr = r as i64 + row_off;
        if cr < 0 || cr >= size as i64 {
            continue;
        }
        let src = img.row(r);
        for (c, &z) in src.iter().enumerate() {
            let cc = c as i64 + col_off;
            if cc >= 0 && cc < size as i64 && inside(cr, cc) {
                dst[cr as usize * size + cc as usize] = z;
            }
        }
    }

    Ok(ifft2(&canvas))
}
