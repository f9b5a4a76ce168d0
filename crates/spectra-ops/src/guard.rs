//! Input validation guards shared by the transforms.
//!
//! Every transform checks its input before doing any work, so a rejected
//! call never produces a partial result.
//!
//! # Example
//!
//! ```rust
//! use spectra_core::Grid;
//! use spectra_ops::guard::{ensure_finite_real, ensure_min_shape};
//!
//! let img = Grid::filled(8, 8, 1.0f64).unwrap();
//! ensure_min_shape("map_phase", img.shape(), 5).unwrap();
//! ensure_finite_real("map_scalar", &img).unwrap();
//! ```

use crate::{OpsError, OpsResult};
use spectra_core::{ComplexImage, RealImage};

/// Rejects shapes with fewer than `min` rows or columns.
pub fn ensure_min_shape(op: &'static str, (rows, cols): (usize, usize), min: usize) -> OpsResult<()> {
    if rows < min || cols < min {
        return Err(OpsError::UnsupportedInputKind {
            op,
            reason: format!("{rows}x{cols} is smaller than the {min}x{min} minimum"),
        });
    }
    Ok(())
}

/// Rejects real grids holding NaN or infinite samples.
pub fn ensure_finite_real(op: &'static str, img: &RealImage) -> OpsResult<()> {
    let count = img.iter().filter(|v| !v.is_finite()).count();
    if count > 0 {
        return Err(OpsError::NonFiniteInput { op, count });
    }
    Ok(())
}

/// Rejects complex grids with a NaN or infinite component.
pub fn ensure_finite_complex(op: &'static str, img: &ComplexImage) -> OpsResult<()> {
    let count = img.iter().filter(|z| !z.is_finite()).count();
    if count > 0 {
        return Err(OpsError::NonFiniteInput { op, count });
    }
    Ok(())
}
