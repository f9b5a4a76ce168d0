//! Real-image color overlay and the real/complex dispatcher.
//!
//! [`map_scalar`] tints a real image with a radial color wheel: hue follows
//! the direction from the image centre, saturation grows toward the corners
//! and brightness is the min-max normalized sample value.
//!
//! [`map_color`] is the boundary dispatcher: complex data goes to
//! [`map_phase`](crate::phase_color::map_phase), real data to [`map_scalar`].
//!
//! # Example
//!
//! ```rust
//! use spectra_core::Grid;
//! use spectra_ops::scalar_color::map_scalar;
//!
//! let ramp = Grid::from_fn(4, 4, |r, c| (r * 4 + c) as f64).unwrap();
//! let rgb = map_scalar(&ramp).unwrap();
//! assert_eq!(rgb.pixel(0, 0), [0, 0, 0]);
//! assert_ne!(rgb.pixel(3, 3), [0, 0, 0]);
//! ```

use crate::guard::ensure_finite_real;
use crate::hsi::Hsi;
use crate::parallel::for_each_row;
use crate::phase_color::map_phase;
use crate::{OpsError, OpsResult};
use spectra_core::{ColorImage, ElementKind, ImageData, RealImage};
use std::f64::consts::SQRT_2;
#[allow(unused_imports)]
use tracing::{debug, trace};

const OP: &str = "map_scalar";

/// Renders a real image with a radial hue/saturation overlay.
///
/// # Errors
///
/// - [`OpsError::NonFiniteInput`] if any sample is NaN or infinite.
/// - [`OpsError::DegenerateRange`] if every sample has the same value.
pub fn map_scalar(img: &RealImage) -> OpsResult<ColorImage> {
    let (rows, cols) = img.shape();
    trace!(rows, cols, "scalar_color::map_scalar");
    ensure_finite_real(OP, img)?;

    let (min, max) = img.min_max();
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return Err(OpsError::DegenerateRange { op: OP, low: min, high: max });
    }
    debug!(min, max, "scalar range");

    let (h, w) = (rows as f64, cols as f64);
    // hue is centred on the true midpoint, saturation on the midpoint sample
    let (hue_r, hue_c) = (h / 2.0, w / 2.0);
    let (sat_r, sat_c) = ((rows / 2) as f64, (cols / 2) as f64);

    let mut out = ColorImage::new(rows, cols)?;
    for_each_row(out.pixels_mut(), cols, |r, row| {
        let src = img.row(r);
        let rf = r as f64;
        for (c, px) in row.iter_mut().enumerate() {
            let cf = c as f64;
            let hue = (hue_r - rf).atan2(hue_c - cf);
            let saturation = ((rf - sat_r) * SQRT_2 / h).hypot((cf - sat_c) * SQRT_2 / w);
            let intensity = (src[c] - min) / range;
            *px = Hsi::new(hue, saturation, intensity).to_bgr();
        }
    });
    Ok(out)
}

/// Colors any real or complex image, choosing the mapper by element kind.
///
/// # Errors
///
/// [`OpsError::UnsupportedInputKind`] for color input, otherwise whatever
/// the chosen mapper returns.
pub fn map_color(data: &ImageData) -> OpsResult<ColorImage> {
    match data {
        ImageData::Complex(img) => map_phase(img),
        ImageData::Real(img) => map_scalar(img),
        ImageData::Color(_) => Err(OpsError::UnsupportedInputKind {
            op: "map_color",
            reason: format!("{} input is already display-ready", ElementKind::Color),
        }),
    }
}
