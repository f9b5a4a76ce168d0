//! Integration tests for spectra-rs crates.
//!
//! End-to-end checks across spectra-core and spectra-ops: the FFT feeding
//! the color mappers, the registry driving every operation, and repeat
//! calls staying bit-identical.
