//! PNG reading and writing for the CLI.
//!
//! Inputs are reduced to a single luma channel on the 0..255 scale. Outputs
//! are 8-bit RGB for color maps and 8-bit grayscale for real images, the
//! latter stretched so the image minimum maps to 0 and the maximum to 255.

use anyhow::{bail, Context, Result};
use spectra_core::{ColorImage, Grid, RealImage};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Rec. 601 luma weights for R, G, B.
const LUMA: [f64; 3] = [0.299, 0.587, 0.114];

fn luma(r: f64, g: f64, b: f64) -> f64 {
    LUMA[0] * r + LUMA[1] * g + LUMA[2] * b
}

/// Reads a PNG as a real image of luma values.
///
/// 16-bit samples are scaled down to the 8-bit range; alpha is ignored.
pub fn read_gray(path: &Path) -> Result<RealImage> {
    trace!(path = %path.display(), "png_io::read_gray");
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .with_context(|| format!("Failed to decode: {}", path.display()))?;

    let buf_size = reader
        .output_buffer_size()
        .context("cannot determine output buffer size")?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .with_context(|| format!("Failed to decode: {}", path.display()))?;
    let bytes = &buf[..info.buffer_size()];

    let samples: Vec<f64> = match info.bit_depth {
        png::BitDepth::Eight => bytes.iter().map(|&b| b as f64).collect(),
        png::BitDepth::Sixteen => bytes
            .chunks_exact(2)
            .map(|be| u16::from_be_bytes([be[0], be[1]]) as f64 / 257.0)
            .collect(),
        depth => bail!("unsupported PNG bit depth {depth:?} in {}", path.display()),
    };

    let luma: Vec<f64> = match info.color_type {
        png::ColorType::Grayscale => samples,
        png::ColorType::GrayscaleAlpha => samples.chunks_exact(2).map(|ga| ga[0]).collect(),
        png::ColorType::Rgb => samples.chunks_exact(3).map(|p| luma(p[0], p[1], p[2])).collect(),
        png::ColorType::Rgba => samples.chunks_exact(4).map(|p| luma(p[0], p[1], p[2])).collect(),
        other => bail!("unsupported PNG color type {other:?} in {}", path.display()),
    };

    debug!(width = info.width, height = info.height, color = ?info.color_type, "decoded PNG");
    Grid::new(info.height as usize, info.width as usize, luma)
        .with_context(|| format!("Bad image shape: {}", path.display()))
}

/// Writes a color image as 8-bit RGB.
pub fn write_color(path: &Path, image: &ColorImage) -> Result<()> {
    trace!(path = %path.display(), "png_io::write_color");
    write_png(path, image.cols(), image.rows(), png::ColorType::Rgb, &image.to_rgb_bytes())
}

/// Writes a real image as 8-bit grayscale, stretched to the full range.
///
/// A flat image is written black.
pub fn write_gray(path: &Path, image: &RealImage) -> Result<()> {
    trace!(path = %path.display(), "png_io::write_gray");
    write_png(path, image.cols(), image.rows(), png::ColorType::Grayscale, &stretch_to_u8(image))
}

/// Maps `[min, max]` linearly onto `0..=255`.
pub fn stretch_to_u8(image: &RealImage) -> Vec<u8> {
    let (lo, hi) = image.min_max();
    let span = hi - lo;
    image
        .iter()
        .map(|&v| {
            if span > 0.0 && span.is_finite() && v.is_finite() {
                ((v - lo) / span * 255.0).round().clamp(0.0, 255.0) as u8
            } else {
                0
            }
        })
        .collect()
}

fn write_png(path: &Path, width: usize, height: usize, color: png::ColorType, data: &[u8]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width as u32, height as u32);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("Failed to encode: {}", path.display()))?;
    writer
        .write_image_data(data)
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    writer
        .finish()
        .with_context(|| format!("Failed to save: {}", path.display()))
}
