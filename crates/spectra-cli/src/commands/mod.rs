//! CLI command implementations

pub mod bandpass;
pub mod circle;
pub mod color;
pub mod list;

use crate::png_io;
use anyhow::{Context, Result};
use spectra_core::{ColorImage, ComplexImage, ImageData, RealImage};
use spectra_ops::fft::{fft2, fftshift};
use spectra_ops::registry::OperationRegistry;
use std::path::Path;

/// Load image from path as luma
pub fn load_image(path: &Path) -> Result<RealImage> {
    png_io::read_gray(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save a color map
pub fn save_color(path: &Path, image: &ColorImage) -> Result<()> {
    png_io::write_color(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Save a real image stretched to 8 bits
pub fn save_gray(path: &Path, image: &RealImage) -> Result<()> {
    png_io::write_gray(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// DC-centred spectrum of a real image
pub fn spectrum(image: &RealImage) -> ComplexImage {
    fftshift(&fft2(&image.to_complex()))
}

/// Creates operation `id` from the built-in registry, applies `params`, and runs it.
pub fn run_operation(id: &str, params: &[(&str, f64)], input: &ImageData) -> Result<ImageData> {
    let registry = OperationRegistry::with_builtin();
    let mut op = registry.create(id)?;
    for &(property, value) in params {
        op.set_param(property, value)?;
    }
    op.process(input).with_context(|| format!("{} failed", op.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BandpassArgs, CircleIfftArgs, ColorArgs};
    use spectra_core::Grid;
    use spectra_ops::registry::DOUBLE_GAUSSIAN_ID;
    use tempfile::tempdir;

    fn textured(rows: usize, cols: usize) -> RealImage {
        Grid::from_fn(rows, cols, |r, c| ((r * 7 + c * 13) % 17) as f64 * 15.0).unwrap()
    }

    #[test]
    fn test_color_command() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.png");
        save_gray(&input, &textured(24, 32)).unwrap();

        for spectrum in [false, true] {
            let output = dir.path().join(format!("out_{spectrum}.png"));
            color::run(ColorArgs { input: input.clone(), output: output.clone(), spectrum }, 0).unwrap();
            assert_eq!(load_image(&output).unwrap().shape(), (24, 32));
        }
    }

    #[test]
    fn test_bandpass_command() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        save_gray(&input, &textured(20, 30)).unwrap();

        let args = BandpassArgs {
            input,
            output: output.clone(),
            sigma1: 0.4,
            sigma2: 0.1,
            weight2: 0.5,
        };
        bandpass::run(args, 0).unwrap();
        assert_eq!(load_image(&output).unwrap().shape(), (20, 30));
    }

    #[test]
    fn test_bandpass_rejects_bad_sigma() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.png");
        save_gray(&input, &textured(8, 8)).unwrap();

        let args = BandpassArgs {
            input,
            output: dir.path().join("out.png"),
            sigma1: 0.0,
            sigma2: 0.3,
            weight2: 0.3,
        };
        assert!(bandpass::run(args, 0).is_err());
    }

    #[test]
    fn test_circle_command_writes_canvas() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        save_gray(&input, &textured(16, 16)).unwrap();

        circle::run(CircleIfftArgs { input, output: output.clone() }, 0).unwrap();
        assert_eq!(load_image(&output).unwrap().shape(), (512, 512));
    }

    #[test]
    fn test_run_operation_unknown_param() {
        let input = ImageData::Real(textured(8, 8));
        assert!(run_operation(DOUBLE_GAUSSIAN_ID, &[("sigma9", 1.0)], &input).is_err());
        assert!(run_operation("no-such-operation", &[], &input).is_err());
    }

    #[test]
    fn test_list_command() {
        list::run(1).unwrap();
    }
}
