//! Tagged image values passed between the host and operations.
//!
//! The host decides which transform to run by looking at
//! [`ImageData::kind`], so real and complex inputs never meet a runtime
//! type check inside a transform.

use crate::{ColorImage, ComplexImage, RealImage};
use std::fmt;

/// Element kind of an image value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Scalar floating-point samples.
    Real,
    /// Complex samples.
    Complex,
    /// 8-bit BGR pixels.
    Color,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Real => "real",
            Self::Complex => "complex",
            Self::Color => "color",
        })
    }
}

/// An image of any supported element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    /// Real samples.
    Real(RealImage),
    /// Complex samples.
    Complex(ComplexImage),
    /// Display-ready BGR pixels.
    Color(ColorImage),
}

impl ImageData {
    /// Element kind tag.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Real(_) => ElementKind::Real,
            Self::Complex(_) => ElementKind::Complex,
            Self::Color(_) => ElementKind::Color,
        }
    }

    /// `(rows, cols)` regardless of kind.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Real(g) => g.shape(),
            Self::Complex(g) => g.shape(),
            Self::Color(img) => img.shape(),
        }
    }

    /// Borrows the real grid, if this is one.
    pub fn as_real(&self) -> Option<&RealImage> {
        match self {
            Self::Real(g) => Some(g),
            _ => None,
        }
    }

    /// Borrows the complex grid, if this is one.
    pub fn as_complex(&self) -> Option<&ComplexImage> {
        match self {
            Self::Complex(g) => Some(g),
            _ => None,
        }
    }

    /// Borrows the color image, if this is one.
    pub fn as_color(&self) -> Option<&ColorImage> {
        match self {
            Self::Color(img) => Some(img),
            _ => None,
        }
    }
}

impl From<RealImage> for ImageData {
    fn from(g: RealImage) -> Self {
        Self::Real(g)
    }
}

impl From<ComplexImage> for ImageData {
    fn from(g: ComplexImage) -> Self {
        Self::Complex(g)
    }
}

impl From<ColorImage> for ImageData {
    fn from(img: ColorImage) -> Self {
        Self::Color(img)
    }
}
