//! Complex-to-color phase visualization.
//!
//! Renders a complex image (usually a Fourier-space image) so that hue and
//! saturation encode the local phase gradient and brightness encodes the
//! log magnitude.
//!
//! # Algorithm
//!
//! For every sample the phase step to each of the four toroidal neighbours
//! is measured. Forward and backward steps along an axis are two estimates
//! of the same gradient; they are blended with weights derived from
//! `sqrt(1/|z| + 1/|neighbour|)` so the less noisy pair dominates. The
//! blended step, as a fraction of a full turn, gives a point `(X, Y)` in the
//! unit square:
//!
//! ```text
//! H = atan2(X - 0.5, Y - 0.5)
//! S = |(X - 0.5, Y - 0.5)|
//! I = clamp((ln|z| - median) / (max - median), 0, 1)
//! ```
//!
//! `median` is taken over every sample while `max` skips the 4x4 block at
//! the centre where the DC spike lives. The asymmetry is intentional.
//!
//! # Example
//!
//! ```rust
//! use spectra_core::{Complex64, Grid};
//! use spectra_ops::phase_color::map_phase;
//!
//! let img = Grid::from_fn(16, 16, |r, c| {
//!     let mag = 1.0 + (r * 16 + c) as f64;
//!     Complex64::from_polar(mag, 0.3 * c as f64)
//! })
//! .unwrap();
//! let rgb = map_phase(&img).unwrap();
//! assert_eq!(rgb.shape(), (16, 16));
//! ```

use crate::guard::{ensure_finite_complex, ensure_min_shape};
use crate::hsi::Hsi;
use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use spectra_core::{ColorImage, ComplexImage, Grid, RealImage};
use std::f64::consts::{PI, TAU};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Smallest accepted row and column count.
pub const MIN_PHASE_DIM: usize = 5;

/// Half-width of the central block excluded from the intensity maximum.
const CENTER_MARGIN: usize = 2;

const OP: &str = "map_phase";

/// Log-magnitude normalization range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityRange {
    /// Median of `ln|z|` over the whole image. Maps to intensity 0.
    pub floor: f64,
    /// Maximum of `ln|z|` outside the central block. Maps to intensity 1.
    pub ceiling: f64,
}

impl IntensityRange {
    /// Computes the range from a log-magnitude grid.
    ///
    /// # Errors
    ///
    /// [`OpsError::DegenerateRange`] unless `ceiling - floor` is a finite
    /// positive number.
    pub fn from_log_magnitude(log_mag: &RealImage) -> OpsResult<Self> {
        let floor = median(log_mag.as_slice());
        let ceiling = off_center_max(log_mag);
        let width = ceiling - floor;
        if !width.is_finite() || width <= 0.0 {
            return Err(OpsError::DegenerateRange {
                op: OP,
                low: floor,
                high: ceiling,
            });
        }
        Ok(Self { floor, ceiling })
    }

    /// Maps a log magnitude into [0, 1].
    #[inline]
    pub fn normalize(&self, log_mag: f64) -> f64 {
        ((log_mag - self.floor) / (self.ceiling - self.floor)).clamp(0.0, 1.0)
    }
}

/// Renders a complex image as a BGR phase map.
///
/// # Errors
///
/// - [`OpsError::UnsupportedInputKind`] if either dimension is below
///   [`MIN_PHASE_DIM`].
/// - [`OpsError::NonFiniteInput`] if any sample has a NaN/infinite component.
/// - [`OpsError::DegenerateRange`] if the log magnitudes give no usable
///   normalization range, e.g. a constant-magnitude image.
pub fn map_phase(img: &ComplexImage) -> OpsResult<ColorImage> {
    let (rows, cols) = img.shape();
    trace!(rows, cols, "phase_color::map_phase");

    let gradient = phase_gradient(img)?;
    let log_mag = img.map(|z| z.norm().ln());
    let range = IntensityRange::from_log_magnitude(&log_mag)?;
    debug!(floor = range.floor, ceiling = range.ceiling, "log intensity range");

    let mut out = ColorImage::new(rows, cols)?;
    for_each_row(out.pixels_mut(), cols, |r, row| {
        let grad = gradient.row(r);
        let lm = log_mag.row(r);
        for (c, px) in row.iter_mut().enumerate() {
            let (x, y) = grad[c];
            let hsi = Hsi::new(
                (x - 0.5).atan2(y - 0.5),
                (x - 0.5).hypot(y - 0.5),
                range.normalize(lm[c]),
            );
            *px = hsi.to_bgr();
        }
    });
    Ok(out)
}

/// Sub-pixel phase gradient as fractions of a turn.
///
/// Returns `(X, Y)` per sample with both components in `[0, 1)`: `X` from
/// the column neighbours, `Y` from the row neighbours. Neighbours wrap
/// around the image edges.
pub fn phase_gradient(img: &ComplexImage) -> OpsResult<Grid<(f64, f64)>> {
    ensure_min_shape(OP, img.shape(), MIN_PHASE_DIM)?;
    ensure_finite_complex(OP, img)?;

    let (rows, cols) = img.shape();
    let mag = img.magnitude();
    let phase = img.phase();
    let at = |g: &RealImage, r: usize, c: usize| g.as_slice()[r * cols + c];

    let mut out = Grid::filled(rows, cols, (0.0, 0.0))?;
    for_each_row(out.as_mut_slice(), cols, |r, row| {
        let up = (r + rows - 1) % rows;
        let down = (r + 1) % rows;
        for (c, v) in row.iter_mut().enumerate() {
            let left = (c + cols - 1) % cols;
            let right = (c + 1) % cols;
            let center = Sample {
                phase: at(&phase, r, c),
                magnitude: at(&mag, r, c),
            };
            let dx = center.blend_step(
                Sample { phase: at(&phase, r, right), magnitude: at(&mag, r, right) },
                Sample { phase: at(&phase, r, left), magnitude: at(&mag, r, left) },
            );
            let dy = center.blend_step(
                Sample { phase: at(&phase, down, c), magnitude: at(&mag, down, c) },
                Sample { phase: at(&phase, up, c), magnitude: at(&mag, up, c) },
            );
            *v = (dx / TAU, dy / TAU);
        }
    });
    Ok(out)
}

#[derive(Clone, Copy)]
struct Sample {
    phase: f64,
    magnitude: f64,
}

impl Sample {
    /// Noise-weighted phase step along one axis, in [0, 2pi).
    fn blend_step(self, plus: Sample, minus: Sample) -> f64 {
        let n_plus = (self.magnitude.recip() + plus.magnitude.recip()).sqrt();
        let n_minus = (self.magnitude.recip() + minus.magnitude.recip()).sqrt();
        let d_plus = wrap_tau(plus.phase - self.phase);
        let d_minus = wrap_tau(self.phase - minus.phase);
        wrap_tau(d_plus + wrap_pi(d_minus - d_plus) * noise_weight(n_plus, n_minus))
    }
}

/// Share of the correction toward the backward estimate.
///
/// Zero-magnitude samples make a noise estimate infinite; an infinitely
/// noisy side gets no trust and two infinite sides split evenly.
fn noise_weight(n_plus: f64, n_minus: f64) -> f64 {
    match (n_plus.is_finite(), n_minus.is_finite()) {
        (true, true) => {
            let w = n_plus / (n_plus + n_minus);
            if w.is_finite() { w } else { 0.5 }
        }
        (false, true) => 1.0,
        (true, false) => 0.0,
        (false, false) => 0.5,
    }
}

/// Maps an angle into [0, 2pi).
#[inline]
fn wrap_tau(a: f64) -> f64 {
    let m = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if m >= TAU { 0.0 } else { m }
}

/// Maps an angle into (-pi, pi].
#[inline]
fn wrap_pi(a: f64) -> f64 {
    PI - wrap_tau(PI - a)
}

/// Median with numpy semantics: even counts average the middle pair.
fn median(values: &[f64]) -> f64 {
    let mut v = values.to_vec();
    let n = v.len();
    let mid = n / 2;
    let (lower, upper, _) = v.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;
    if n % 2 == 1 {
        upper
    } else {
        let below = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (below + upper) / 2.0
    }
}

/// Max over the four half-planes that avoid the central block.
fn off_center_max(log_mag: &RealImage) -> f64 {
    let (rows, cols) = log_mag.shape();
    let row_lo = (rows / 2).saturating_sub(CENTER_MARGIN);
    let row_hi = rows / 2 + CENTER_MARGIN;
    let col_lo = (cols / 2).saturating_sub(CENTER_MARGIN);
    let col_hi = cols / 2 + CENTER_MARGIN;

    let mut max = f64::NEG_INFINITY;
    for r in 0..rows {
        let row = log_mag.row(r);
        let row_outside = r < row_lo || r >= row_hi;
        for (c, &v) in row.iter().enumerate() {
            if row_outside || c < col_lo || c >= col_hi {
                max = max.max(v);
            }
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use spectra_core::Complex64;

    /// Phase advances by `kx` per column and `ky` per row; `mag` sets |z|.
    fn plane_wave(
        rows: usize,
        cols: usize,
        kx: f64,
        ky: f64,
        offset: f64,
        mag: impl Fn(usize, usize) -> f64,
    ) -> ComplexImage {
        Grid::from_fn(rows, cols, |r, c| {
            Complex64::from_polar(mag(r, c), kx * c as f64 + ky * r as f64 + offset)
        })
        .unwrap()
    }

    fn ramp_mag(r: usize, c: usize) -> f64 {
        1.0 + ((r * 7 + c * 3) % 11) as f64
    }

    fn assert_close_bgr(a: [u8; 3], b: [u8; 3]) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(x.abs_diff(*y) <= 1, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_wrap_ranges() {
        assert_relative_eq!(wrap_tau(-0.5), TAU - 0.5);
        assert_eq!(wrap_tau(-1e-18), 0.0);
        assert_relative_eq!(wrap_pi(PI), PI);
        assert_relative_eq!(wrap_pi(-PI), PI);
        assert_relative_eq!(wrap_pi(1.5 * PI), -0.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_median_numpy_semantics() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[f64::NEG_INFINITY, 1.0, 5.0]), 1.0);
    }

    #[test]
    fn test_noise_weight_limits() {
        assert_relative_eq!(noise_weight(1.0, 3.0), 0.25);
        assert_eq!(noise_weight(f64::INFINITY, 2.0), 1.0);
        assert_eq!(noise_weight(2.0, f64::INFINITY), 0.0);
        assert_eq!(noise_weight(f64::INFINITY, f64::INFINITY), 0.5);
    }

    #[test]
    fn test_blend_prefers_quieter_side() {
        let center = Sample { phase: 0.0, magnitude: 100.0 };
        // forward step 0.2 through a weak neighbour, backward step 0.4 through a strong one
        let weak = Sample { phase: 0.2, magnitude: 0.01 };
        let strong = Sample { phase: -0.4, magnitude: 100.0 };
        let step = center.blend_step(weak, strong);
        assert!(step > 0.3 && step < 0.4, "step = {step}");

        let step = center.blend_step(Sample { phase: 0.2, magnitude: 100.0 }, strong);
        assert_relative_eq!(step, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_blend_across_the_branch_cut() {
        // forward step just below 2pi, backward just above 0: both mean ~0
        let center = Sample { phase: 3.1, magnitude: 1.0 };
        let plus = Sample { phase: 3.05, magnitude: 1.0 };
        let minus = Sample { phase: 3.05, magnitude: 1.0 };
        let step = center.blend_step(plus, minus);
        assert!(step < 1e-9 || step > TAU - 1e-9, "step = {step}");
    }

    #[test]
    fn test_plane_wave_gradient_uniform_with_wraparound() {
        // steps of whole fractions of a turn keep the wave periodic on the torus
        let (rows, cols) = (12, 16);
        let kx = TAU * 3.0 / cols as f64;
        let ky = TAU * 2.0 / rows as f64;
        let grad = phase_gradient(&plane_wave(rows, cols, kx, ky, 0.0, |_, _| 2.0)).unwrap();
        for &(x, y) in grad.iter() {
            assert_relative_eq!(x, 3.0 / 16.0, epsilon = 1e-9);
            assert_relative_eq!(y, 2.0 / 12.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_plane_wave_colors_uniform_hue_and_saturation() {
        let (rows, cols) = (10, 10);
        let kx = TAU * 2.0 / cols as f64;
        let ky = TAU * 7.0 / rows as f64;
        let img = plane_wave(rows, cols, kx, ky, 0.4, ramp_mag);
        let grad = phase_gradient(&img).unwrap();
        let (x0, y0) = grad[(0, 0)];
        for &(x, y) in grad.iter() {
            assert_relative_eq!(x, x0, epsilon = 1e-9);
            assert_relative_eq!(y, y0, epsilon = 1e-9);
        }
        assert_relative_eq!(x0, 0.2, epsilon = 1e-9);
        assert_relative_eq!(y0, 0.7, epsilon = 1e-9);

        // equal magnitude means equal color, up to rounding at the quantization step
        let rgb = map_phase(&img).unwrap();
        assert_close_bgr(rgb.pixel(0, 0), rgb.pixel(3, 4));
        assert_close_bgr(rgb.pixel(0, 1), rgb.pixel(3, 5));
    }

    #[test]
    fn test_global_phase_offset_invariance() {
        let (rows, cols) = (9, 11);
        // no step along either axis is a whole number of turns
        let base = Grid::from_fn(rows, cols, |r, c| {
            let (y, x) = (r as f64, c as f64);
            let phase = 0.37 * x * x - 0.21 * y * x + 0.5 * y + 0.3 * x;
            Complex64::from_polar(ramp_mag(r, c), phase)
        })
        .unwrap();
        let shifted = base.map(|z| z * Complex64::from_polar(1.0, 1.234));

        let a = phase_gradient(&base).unwrap();
        let b = phase_gradient(&shifted).unwrap();
        for (&(xa, ya), &(xb, yb)) in a.iter().zip(b.iter()) {
            let hue_a = (xa - 0.5).atan2(ya - 0.5);
            let hue_b = (xb - 0.5).atan2(yb - 0.5);
            assert_relative_eq!(wrap_pi(hue_a - hue_b), 0.0, epsilon = 1e-6);
            assert_relative_eq!((xa - 0.5).hypot(ya - 0.5), (xb - 0.5).hypot(yb - 0.5), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_intensity_range_ignores_center_for_max() {
        // bright DC spike in the centre, one bright sample in a corner
        let mut lm = Grid::from_fn(8, 8, |r, c| (r + c) as f64 * 0.1).unwrap();
        lm.as_mut_slice()[4 * 8 + 4] = 50.0;
        lm.as_mut_slice()[0] = 3.0;
        let range = IntensityRange::from_log_magnitude(&lm).unwrap();
        assert_eq!(range.ceiling, 3.0);

    }

    #[test]
    fn test_median_includes_center_block() {
        // on a 5x5 grid the excluded block is 4x4, so it dominates the median
        let lm = Grid::from_fn(5, 5, |r, c| if r < 4 && c < 4 { 10.0 } else { 0.0 }).unwrap();
        let err = IntensityRange::from_log_magnitude(&lm).unwrap_err();
        assert_eq!(err, OpsError::DegenerateRange { op: OP, low: 10.0, high: 0.0 });
    }

    #[test]
    fn test_center_block_only_covers_four_by_four() {
        let mut lm = Grid::filled(9, 9, 0.0).unwrap();
        // the block spans rows and cols [2, 6); row 6 is past it
        lm.as_mut_slice()[6 * 9 + 2] = 2.0;
        assert_eq!(off_center_max(&lm), 2.0);
        lm.as_mut_slice()[6 * 9 + 2] = 0.0;
        lm.as_mut_slice()[5 * 9 + 5] = 9.0;
        assert_eq!(off_center_max(&lm), 0.0);
    }

    #[test]
    fn test_constant_magnitude_is_degenerate() {
        let img = Grid::filled(8, 8, Complex64::new(5.0, 0.0)).unwrap();
        assert!(matches!(map_phase(&img), Err(OpsError::DegenerateRange { .. })));
    }

    #[test]
    fn test_small_input_rejected() {
        let img = plane_wave(4, 16, 0.3, 0.1, 0.0, ramp_mag);
        assert!(matches!(map_phase(&img), Err(OpsError::UnsupportedInputKind { .. })));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut img = plane_wave(8, 8, 0.3, 0.1, 0.0, ramp_mag);
        img.as_mut_slice()[3] = Complex64::new(f64::NAN, 0.0);
        assert!(matches!(map_phase(&img), Err(OpsError::NonFiniteInput { count: 1, .. })));
    }

    #[test]
    fn test_zero_samples_render_black() {
        let mut img = plane_wave(8, 8, 0.3, 0.1, 0.0, ramp_mag);
        img.as_mut_slice()[9] = Complex64::new(0.0, 0.0);
        let rgb = map_phase(&img).unwrap();
        assert_eq!(rgb.pixel(1, 1), [0, 0, 0]);
    }

    #[test]
    fn test_repeat_calls_identical() {
        let img = plane_wave(13, 7, 0.9, -0.4, 0.2, ramp_mag);
        assert_eq!(map_phase(&img).unwrap(), map_phase(&img).unwrap());
    }
}
