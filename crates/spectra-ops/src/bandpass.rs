//! Double-Gaussian radial band-pass filter.
//!
//! The filter is built in the DC-centred frequency domain as the difference
//! of two Gaussian low-pass responses:
//!
//! ```text
//! k(r) = exp(-r^2 / (2 sigma1^2)) - (1 - weight2) * exp(-r^2 / (2 sigma2^2))
//! ```
//!
//! `r` is the distance from the DC sample divided by half the row count, so
//! `r = 1` at the vertical Nyquist frequency. Row and column offsets are
//! measured independently, so non-square inputs get a correctly centred
//! grid.
//!
//! # Example
//!
//! ```rust
//! use spectra_core::Grid;
//! use spectra_ops::bandpass::{bandpass, BandpassParams};
//!
//! let img = Grid::from_fn(32, 32, |r, c| ((r * c) % 7) as f64).unwrap();
//! let filtered = bandpass(&img, BandpassParams::default()).unwrap();
//! assert_eq!(filtered.shape(), img.shape());
//! ```

use crate::fft::{fft2, fftshift, ifft2, ifftshift};
use crate::guard::ensure_finite_real;
use crate::{OpsError, OpsResult};
use spectra_core::{Grid, RealImage};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Filter parameters, defaulting to 0.3 each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandpassParams {
    /// Width of the positive Gaussian. Must be > 0.
    pub sigma1: f64,
    /// Width of the subtracted Gaussian. Must be > 0.
    pub sigma2: f64,
    /// Keeps `weight2` of the subtracted Gaussian's passband; usually in [0, 1].
    pub weight2: f64,
}

impl Default for BandpassParams {
    fn default() -> Self {
        Self {
            sigma1: 0.3,
            sigma2: 0.3,
            weight2: 0.3,
        }
    }
}

impl BandpassParams {
    /// Creates a parameter set.
    pub fn new(sigma1: f64, sigma2: f64, weight2: f64) -> Self {
        Self {
            sigma1,
            sigma2,
            weight2,
        }
    }

    /// Checks that both sigmas are finite and positive and `weight2` is finite.
    ///
    /// `weight2` outside [0, 1] is allowed.
    pub fn validate(&self) -> OpsResult<()> {
        for (name, sigma) in [("sigma1", self.sigma1), ("sigma2", self.sigma2)] {
            if !sigma.is_finite() || sigma <= 0.0 {
                return Err(OpsError::InvalidParameter(format!(
                    "{name} must be > 0, got {sigma}"
                )));
            }
        }
        if !self.weight2.is_finite() {
            return Err(OpsError::InvalidParameter(format!(
                "weight2 must be finite, got {}",
                self.weight2
            )));
        }
        Ok(())
    }

    /// Filter gain at normalized radius `r`.
    #[inline]
    pub fn gain(&self, r: f64) -> f64 {
        let g1 = (-0.5 * (r / self.sigma1).powi(2)).exp();
        let g2 = (-0.5 * (r / self.sigma2).powi(2)).exp();
        g1 - (1.0 - self.weight2) * g2
    }
}

/// Builds the DC-centred filter kernel for a `rows x cols` spectrum.
pub fn bandpass_kernel(rows: usize, cols: usize, params: BandpassParams) -> OpsResult<RealImage> {
    params.validate()?;
    let (cr, cc) = ((rows / 2) as f64, (cols / 2) as f64);
    let norm = rows as f64 * 0.5;
    let kernel = Grid::from_fn(rows, cols, |r, c| {
        let radius = (r as f64 - cr).hypot(c as f64 - cc) / norm;
        params.gain(radius)
    })?;
    Ok(kernel)
}

/// Applies the double-Gaussian filter in the frequency domain.
///
/// Returns the real part of the filtered image, same shape as the input.
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`] for a non-positive or non-finite sigma.
/// - [`OpsError::NonFiniteInput`] if any sample is NaN or infinite.
pub fn bandpass(img: &RealImage, params: BandpassParams) -> OpsResult<RealImage> {
    let (rows, cols) = img.shape();
    trace!(rows, cols, ?params, "bandpass::bandpass");
    ensure_finite_real("bandpass", img)?;

    let kernel = bandpass_kernel(rows, cols, params)?;
    debug!(dc_gain = params.gain(0.0), "bandpass kernel built");

    let mut spectrum = fftshift(&fft2(&img.to_complex()));
    for (z, k) in spectrum.as_mut_slice().iter_mut().zip(kernel.iter()) {
        *z *= *k;
    }
    Ok(ifft2(&ifftshift(&spectrum)).real())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn texture(rows: usize, cols: usize) -> RealImage {
        Grid::from_fn(rows, cols, |r, c| {
            (r as f64 * 0.7).sin() + (c as f64 * 1.9).cos() + ((r * 3 + c) % 5) as f64
        })
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(BandpassParams::default(), BandpassParams::new(0.3, 0.3, 0.3));
    }

    #[test]
    fn test_kernel_dc_gain_is_weight2() {
        let k = bandpass_kernel(8, 8, BandpassParams::new(0.4, 0.2, 0.25)).unwrap();
        assert_relative_eq!(k[(4, 4)], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_kernel_tracks_non_square_shape() {
        let params = BandpassParams::new(0.5, 0.1, 0.0);
        let k = bandpass_kernel(6, 10, params).unwrap();
        assert_eq!(k.shape(), (6, 10));
        // centre at (3, 5); three columns right is r = 3 / 3 = 1
        assert_relative_eq!(k[(3, 8)], params.gain(1.0), epsilon = 1e-12);
        assert_relative_eq!(k[(3, 2)], k[(3, 8)], epsilon = 1e-12);
        assert_relative_eq!(k[(0, 5)], params.gain(1.0), epsilon = 1e-12);
        assert_relative_eq!(k[(1, 4)], k[(5, 6)], epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_sigma_rejected() {
        let img = texture(8, 8);
        for params in [
            BandpassParams::new(0.0, 0.3, 0.3),
            BandpassParams::new(0.3, -1.0, 0.3),
            BandpassParams::new(f64::NAN, 0.3, 0.3),
            BandpassParams::new(0.3, 0.3, f64::INFINITY),
        ] {
            assert!(matches!(bandpass(&img, params), Err(OpsError::InvalidParameter(_))));
        }
        // weight2 outside [0, 1] is allowed
        assert!(bandpass(&img, BandpassParams::new(0.3, 0.3, 1.7)).is_ok());
    }

    #[test]
    fn test_constant_image_scaled_by_dc_gain() {
        let img = Grid::filled(9, 12, 2.0).unwrap();
        let out = bandpass(&img, BandpassParams::default()).unwrap();
        for &v in out.iter() {
            assert_relative_eq!(v, 0.6, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_equal_sigmas_without_weight_cancel() {
        let out = bandpass(&texture(10, 14), BandpassParams::new(0.3, 0.3, 0.0)).unwrap();
        for &v in out.iter() {
            assert!(v.abs() < 1e-9);
        }
    }

    #[test]
    fn test_full_weight_is_single_gaussian() {
        // the second Gaussian drops out, whatever its width
        let img = texture(12, 12);
        let a = bandpass(&img, BandpassParams::new(0.3, 0.05, 1.0)).unwrap();
        let b = bandpass(&img, BandpassParams::new(0.3, 4.0, 1.0)).unwrap();
        assert_eq!(a, b);

        // and a checkerboard at the Nyquist corner is all but removed
        let checker = Grid::from_fn(12, 12, |r, c| if (r + c) % 2 == 0 { 1.0 } else { -1.0 }).unwrap();
        let out = bandpass(&checker, BandpassParams::new(0.3, 0.3, 1.0)).unwrap();
        for &v in out.iter() {
            assert!(v.abs() < 1e-3);
        }
    }

    #[test]
    fn test_wide_single_gaussian_passes_everything() {
        let img = texture(7, 9);
        let out = bandpass(&img, BandpassParams::new(1e4, 0.3, 1.0)).unwrap();
        for (a, b) in img.iter().zip(out.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_repeat_calls_identical() {
        let img = texture(16, 5);
        let p = BandpassParams::new(0.2, 0.6, 0.4);
        assert_eq!(bandpass(&img, p).unwrap(), bandpass(&img, p).unwrap());
    }
}
