//! Bandpass command
//!
//! Applies the double-Gaussian filter and writes the result stretched to
//! the full 8-bit range.

use crate::BandpassArgs;
use anyhow::{bail, Result};
use spectra_core::ImageData;
use spectra_ops::registry::DOUBLE_GAUSSIAN_ID;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: BandpassArgs, verbose: u8) -> Result<()> {
    trace!(
        input = %args.input.display(),
        sigma1 = args.sigma1,
        sigma2 = args.sigma2,
        weight2 = args.weight2,
        "bandpass::run"
    );

    let image = super::load_image(&args.input)?;
    info!(sigma1 = args.sigma1, sigma2 = args.sigma2, weight2 = args.weight2, "Applying band-pass");

    if verbose > 0 {
        println!(
            "Applying band-pass (sigma1={}, sigma2={}, weight2={}) to {}",
            args.sigma1,
            args.sigma2,
            args.weight2,
            args.input.display()
        );
    }

    let params = [
        ("sigma1", args.sigma1),
        ("sigma2", args.sigma2),
        ("weight2", args.weight2),
    ];
    let filtered = match super::run_operation(DOUBLE_GAUSSIAN_ID, &params, &ImageData::Real(image))? {
        ImageData::Real(filtered) => filtered,
        other => bail!("band-pass returned {} data", other.kind()),
    };
    super::save_gray(&args.output, &filtered)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
