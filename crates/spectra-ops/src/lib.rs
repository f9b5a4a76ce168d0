//! # spectra-ops
//!
//! Image operations for Fourier-space microscopy data.
//!
//! Every transform is a pure function of its input grid and a few scalar
//! parameters; inputs are never modified and outputs are freshly allocated.
//!
//! # Modules
//!
//! - [`phase_color`] - complex image to color phase-gradient map
//! - [`scalar_color`] - real image to radial color overlay, and the dispatcher
//! - [`bandpass`](mod@bandpass) - double-Gaussian radial band-pass
//! - [`circle_ifft`](mod@circle_ifft) - circular mask and inverse FFT
//! - [`fft`] - 2-D FFT and DC-centring shifts
//! - [`hsi`] - hue/saturation/intensity to BGR encoding
//! - [`registry`] - named operations for host integration
//!
//! # Common Operations
//!
//! ## Color mapping
//!
//! ```rust,ignore
//! use spectra_ops::map_color;
//!
//! // complex input -> phase map, real input -> radial overlay
//! let rgb = map_color(&image_data)?;
//! ```
//!
//! ## Filtering
//!
//! ```rust,ignore
//! use spectra_ops::bandpass::{bandpass, BandpassParams};
//!
//! let filtered = bandpass(&image, BandpassParams::new(0.3, 0.1, 0.5))?;
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - process output rows with rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod parallel;

pub mod bandpass;
pub mod circle_ifft;
pub mod fft;
pub mod guard;
pub mod hsi;
pub mod phase_color;
pub mod registry;
pub mod scalar_color;

pub use bandpass::{bandpass, BandpassParams};
pub use circle_ifft::circle_ifft;
pub use error::{OpsError, OpsResult};
pub use phase_color::map_phase;
pub use registry::{Operation, OperationRegistry};
pub use scalar_color::{map_color, map_scalar};
