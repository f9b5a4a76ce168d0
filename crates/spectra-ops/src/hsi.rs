//! Hue/saturation/intensity encoding shared by the color mappers.
//!
//! Each output channel is a cosine of the hue, phase-offset by a third of a
//! turn per channel, mixed with mid-grey by the saturation and scaled by the
//! intensity:
//!
//! ```text
//! channel = (S * (cos(H + phi) + 1) * 127.5 + (1 - S) * 127.5) * I
//! phi     = 0 (B), -2pi/3 (G), +2pi/3 (R)
//! ```
//!
//! The result is truncated toward zero into a `u8`.

use std::f64::consts::PI;

const HALF_SCALE: f64 = 127.5;

/// Channel phase offsets in stored order B, G, R.
const CHANNEL_OFFSETS: [f64; 3] = [0.0, -2.0 * PI / 3.0, 2.0 * PI / 3.0];

/// Transient per-pixel color description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsi {
    /// Hue angle in radians, [-pi, pi].
    pub hue: f64,
    /// Saturation, 0 = grey.
    pub saturation: f64,
    /// Brightness scale in [0, 1].
    pub intensity: f64,
}

impl Hsi {
    /// Creates a triple.
    #[inline]
    pub fn new(hue: f64, saturation: f64, intensity: f64) -> Self {
        Self {
            hue,
            saturation,
            intensity,
        }
    }

    /// Encodes as a `[B, G, R]` pixel.
    #[inline]
    pub fn to_bgr(self) -> [u8; 3] {
        let s = self.saturation;
        CHANNEL_OFFSETS.map(|phi| {
            let v = (s * ((self.hue + phi).cos() + 1.0) * HALF_SCALE + (1.0 - s) * HALF_SCALE)
                * self.intensity;
            quantize(v)
        })
    }
}

/// Truncates into `0..=255`; NaN maps to 0.
#[inline]
fn quantize(v: f64) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.clamp(0.0, 255.0) as u8
    }
}
