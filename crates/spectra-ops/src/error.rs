//! Error types for image operations.

use spectra_core::ElementKind;
use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Input has the wrong element kind or is too small for the operation.
    #[error("{op}: unsupported input: {reason}")]
    UnsupportedInputKind {
        /// Operation that rejected the input.
        op: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Normalization range collapsed to zero width or is not finite.
    #[error("{op}: degenerate intensity range [{low}, {high}]")]
    DegenerateRange {
        /// Operation that failed.
        op: &'static str,
        /// Lower end of the range.
        low: f64,
        /// Upper end of the range.
        high: f64,
    },

    /// Input contains NaN or infinite samples.
    #[error("{op}: {count} non-finite input samples")]
    NonFiniteInput {
        /// Operation that rejected the input.
        op: &'static str,
        /// Number of offending samples.
        count: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No operation registered under this id.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// An operation with this id is already registered.
    #[error("operation already registered: {0}")]
    DuplicateOperation(String),

    /// Grid construction failed.
    #[error(transparent)]
    Core(#[from] spectra_core::Error),
}

impl OpsError {
    /// Creates an [`OpsError::UnsupportedInputKind`] for a kind mismatch.
    pub fn wrong_kind(op: &'static str, expected: ElementKind, got: ElementKind) -> Self {
        Self::UnsupportedInputKind {
            op,
            reason: format!("expected {expected} samples, got {got}"),
        }
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_kind_message() {
        let err = OpsError::wrong_kind("bandpass", ElementKind::Real, ElementKind::Complex);
        assert_eq!(
            err.to_string(),
            "bandpass: unsupported input: expected real samples, got complex"
        );
    }

    #[test]
    fn test_core_error_converts() {
        let core = spectra_core::Error::invalid_dimensions(0, 1, "empty");
        let err: OpsError = core.clone().into();
        assert_eq!(err, OpsError::Core(core));
    }
}
