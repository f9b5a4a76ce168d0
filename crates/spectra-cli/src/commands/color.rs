//! Color command
//!
//! Radial color overlay of an image, or the phase-gradient map of its
//! spectrum with `--spectrum`.

use crate::ColorArgs;
use anyhow::{bail, Result};
use spectra_core::ImageData;
use spectra_ops::registry::COLOR_PHASE_ID;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: ColorArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), spectrum = args.spectrum, "color::run");

    let image = super::load_image(&args.input)?;
    let (rows, cols) = image.shape();
    info!(rows, cols, spectrum = args.spectrum, "Coloring");

    if verbose > 0 {
        let what = if args.spectrum { "spectrum phase" } else { "intensity" };
        println!("Coloring {} of {} ({}x{})", what, args.input.display(), cols, rows);
    }

    let input = if args.spectrum {
        ImageData::Complex(super::spectrum(&image))
    } else {
        ImageData::Real(image)
    };

    let colored = match super::run_operation(COLOR_PHASE_ID, &[], &input)? {
        ImageData::Color(colored) => colored,
        other => bail!("color operation returned {} data", other.kind()),
    };
    super::save_color(&args.output, &colored)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
