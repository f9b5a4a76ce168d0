//! spectra - phase coloring and Fourier filters for microscopy images
//!
//! Runs the spectra-ops operations on PNG files.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod png_io;

#[derive(Parser)]
#[command(name = "spectra")]
#[command(author, version, about = "Phase coloring and Fourier filters for microscopy images")]
#[command(long_about = "
Runs the spectra operations on grayscale PNG images.

Examples:
  spectra color image.png -o overlay.png             # radial color overlay
  spectra color image.png -o phase.png --spectrum    # phase map of the image's spectrum
  spectra bandpass image.png -o filtered.png --sigma1 0.4 --weight2 0.5
  spectra circle-ifft image.png -o lowpass.png
  spectra list                                       # registered operations
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Color-map an image, or the phase of its spectrum
    #[command(visible_alias = "c")]
    Color(ColorArgs),

    /// Apply the double-Gaussian band-pass filter
    #[command(visible_alias = "bp")]
    Bandpass(BandpassArgs),

    /// Mask the spectrum to a circle and inverse transform
    #[command(name = "circle-ifft", visible_alias = "ci")]
    CircleIfft(CircleIfftArgs),

    /// List registered operations and their parameters
    List,
}

#[derive(Args)]
struct ColorArgs {
    /// Input image
    input: PathBuf,

    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,

    /// Color the phase of the DC-centred spectrum instead of the pixels
    #[arg(long)]
    spectrum: bool,
}

#[derive(Args)]
struct BandpassArgs {
    /// Input image
    input: PathBuf,

    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,

    /// Width of the positive Gaussian
    #[arg(long, default_value = "0.3")]
    sigma1: f64,

    /// Width of the subtracted Gaussian
    #[arg(long, default_value = "0.3")]
    sigma2: f64,

    /// Weight kept of the subtracted Gaussian's passband
    #[arg(long, default_value = "0.3", allow_negative_numbers = true)]
    weight2: f64,
}

#[derive(Args)]
struct CircleIfftArgs {
    /// Input image
    input: PathBuf,

    /// Output PNG (log-scaled magnitude)
    #[arg(short, long)]
    output: PathBuf,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Color(args) => commands::color::run(args, cli.verbose),
        Commands::Bandpass(args) => commands::bandpass::run(args, cli.verbose),
        Commands::CircleIfft(args) => commands::circle::run(args, cli.verbose),
        Commands::List => commands::list::run(cli.verbose),
    }
}
