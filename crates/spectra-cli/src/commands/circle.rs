//! Circle IFFT command
//!
//! Masks the image's centred spectrum to a circle, inverse transforms it
//! onto the enlarged canvas, and writes the log magnitude.

use crate::CircleIfftArgs;
use anyhow::{bail, Result};
use spectra_core::ImageData;
use spectra_ops::circle_ifft::circle_canvas_size;
use spectra_ops::registry::CIRCLE_IFFT_ID;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: CircleIfftArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "circle::run");

    let image = super::load_image(&args.input)?;
    let (rows, cols) = image.shape();
    let size = circle_canvas_size(rows, cols);
    info!(rows, cols, size, "Circle IFFT");

    if verbose > 0 {
        println!("Circle IFFT of {} onto a {}x{} canvas", args.input.display(), size, size);
    }

    let input = ImageData::Complex(super::spectrum(&image));
    let field = match super::run_operation(CIRCLE_IFFT_ID, &[], &input)? {
        ImageData::Complex(field) => field,
        other => bail!("circle IFFT returned {} data", other.kind()),
    };

    let log_mag = field.magnitude().map(|m| m.ln_1p());
    super::save_gray(&args.output, &log_mag)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
