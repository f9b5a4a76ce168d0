//! # spectra-core
//!
//! Core array types for spectra-rs.
//!
//! - [`Grid`], [`RealImage`], [`ComplexImage`] - row-major 2-D sample arrays
//! - [`ColorImage`] - 8-bit BGR output of the color mappers
//! - [`ImageData`], [`ElementKind`] - tagged values exchanged with the host
//! - [`Error`], [`Result`] - construction errors
//!
//! ## Crate Structure
//!
//! ```text
//! spectra-core (this crate)
//!    ^
//!    |
//!    +-- spectra-ops (transforms, FFT, operation registry)
//!    +-- spectra-cli (PNG front end)
//! ```
//!
//! Every value here is created fresh per transform call; nothing is cached.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod color;
pub mod data;
pub mod error;
pub mod grid;

pub use color::ColorImage;
pub use data::{ElementKind, ImageData};
pub use error::{Error, Result};
pub use grid::{ComplexImage, Grid, RealImage};
pub use num_complex::Complex64;

/// Prelude module for convenient imports.
///
/// ```
/// use spectra_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::ColorImage;
    pub use crate::data::{ElementKind, ImageData};
    pub use crate::error::{Error, Result};
    pub use crate::grid::{ComplexImage, Grid, RealImage};
    pub use num_complex::Complex64;
}
