//! Operation registry for host integration.
//!
//! The host owns an [`OperationRegistry`] and fills it once at startup with
//! an explicit call; nothing registers itself implicitly. Each entry maps a
//! string id to a factory producing a boxed [`Operation`]. Operations take
//! and return tagged [`ImageData`], reject input of the wrong kind, and
//! describe their tunable scalar parameters with [`ParamSpec`].
//!
//! # Example
//!
//! ```rust
//! use spectra_core::{Grid, ImageData};
//! use spectra_ops::registry::{OperationRegistry, DOUBLE_GAUSSIAN_ID};
//!
//! let registry = OperationRegistry::with_builtin();
//! let mut op = registry.create(DOUBLE_GAUSSIAN_ID).unwrap();
//! op.set_param("sigma1", 0.5).unwrap();
//!
//! let img = ImageData::Real(Grid::filled(16, 16, 1.0).unwrap());
//! let out = op.process(&img).unwrap();
//! assert_eq!(out.shape(), (16, 16));
//! ```

use crate::bandpass::{bandpass, BandpassParams};
use crate::circle_ifft::circle_ifft;
use crate::scalar_color::map_color;
use crate::{OpsError, OpsResult};
use spectra_core::{ElementKind, ImageData};
use std::collections::BTreeMap;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Id of [`ColorPhaseOperation`].
pub const COLOR_PHASE_ID: &str = "color-phase-operation";
/// Id of [`DoubleGaussianOperation`].
pub const DOUBLE_GAUSSIAN_ID: &str = "double-gaussian-filter-operation";
/// Id of [`CircleIfftOperation`].
pub const CIRCLE_IFFT_ID: &str = "circle-ifft-operation";

/// Host-facing description of a scalar parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Label shown by the host.
    pub name: &'static str,
    /// Key passed to [`Operation::set_param`].
    pub property: &'static str,
    /// Initial value.
    pub default: f64,
}

/// A named image transform the host can run.
pub trait Operation: Send + Sync {
    /// Registry id.
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Tunable parameters. Empty by default.
    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    /// Sets a parameter by property key.
    fn set_param(&mut self, property: &str, _value: f64) -> OpsResult<()> {
        Err(OpsError::InvalidParameter(format!(
            "{} has no parameter '{property}'",
            self.id()
        )))
    }

    /// Reads a parameter by property key.
    fn param(&self, _property: &str) -> Option<f64> {
        None
    }

    /// Runs the transform.
    fn process(&self, input: &ImageData) -> OpsResult<ImageData>;
}

/// Boxed factory stored in the registry.
pub type OperationFactory = Box<dyn Fn() -> Box<dyn Operation> + Send + Sync>;

/// Table of operation factories keyed by id.
#[derive(Default)]
pub struct OperationRegistry {
    factories: BTreeMap<&'static str, OperationFactory>,
}

impl OperationRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in operations.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register_builtin();
        registry
    }

    /// Registers the built-in operations, skipping ids already taken.
    pub fn register_builtin(&mut self) {
        let results = [
            self.register(COLOR_PHASE_ID, || Box::new(ColorPhaseOperation)),
            self.register(DOUBLE_GAUSSIAN_ID, || Box::new(DoubleGaussianOperation::default())),
            self.register(CIRCLE_IFFT_ID, || Box::new(CircleIfftOperation)),
        ];
        for err in results.into_iter().filter_map(Result::err) {
            debug!(error = %err, "built-in operation not registered");
        }
    }

    /// Registers a factory under `id`.
    ///
    /// # Errors
    ///
    /// [`OpsError::DuplicateOperation`] if `id` is already registered.
    pub fn register<F>(&mut self, id: &'static str, factory: F) -> OpsResult<()>
    where
        F: Fn() -> Box<dyn Operation> + Send + Sync + 'static,
    {
        if self.factories.contains_key(id) {
            return Err(OpsError::DuplicateOperation(id.to_string()));
        }
        trace!(id, "registering operation");
        self.factories.insert(id, Box::new(factory));
        Ok(())
    }

    /// Instantiates the operation registered under `id`.
    pub fn create(&self, id: &str) -> OpsResult<Box<dyn Operation>> {
        self.factories
            .get(id)
            .map(|factory| factory())
            .ok_or_else(|| OpsError::UnknownOperation(id.to_string()))
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }
}

/// Phase coloring for complex input, radial overlay for real input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorPhaseOperation;

impl Operation for ColorPhaseOperation {
    fn id(&self) -> &'static str {
        COLOR_PHASE_ID
    }

    fn name(&self) -> &'static str {
        "Color Phase"
    }

    fn process(&self, input: &ImageData) -> OpsResult<ImageData> {
        map_color(input).map(ImageData::Color)
    }
}

const DOUBLE_GAUSSIAN_PARAMS: [ParamSpec; 3] = [
    ParamSpec { name: "Sigma 1", property: "sigma1", default: 0.3 },
    ParamSpec { name: "Sigma 2", property: "sigma2", default: 0.3 },
    ParamSpec { name: "Weight 2", property: "weight2", default: 0.3 },
];

/// Double-Gaussian band-pass for real input.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleGaussianOperation {
    /// Current filter parameters.
    pub params: BandpassParams,
}

impl Operation for DoubleGaussianOperation {
    fn id(&self) -> &'static str {
        DOUBLE_GAUSSIAN_ID
    }

    fn name(&self) -> &'static str {
        "Double Gaussian Filter"
    }

    fn params(&self) -> &'static [ParamSpec] {
        &DOUBLE_GAUSSIAN_PARAMS
    }

    fn set_param(&mut self, property: &str, value: f64) -> OpsResult<()> {
        match property {
            "sigma1" => self.params.sigma1 = value,
            "sigma2" => self.params.sigma2 = value,
            "weight2" => self.params.weight2 = value,
            _ => {
                return Err(OpsError::InvalidParameter(format!(
                    "{} has no parameter '{property}'",
                    self.id()
                )))
            }
        }
        Ok(())
    }

    fn param(&self, property: &str) -> Option<f64> {
        match property {
            "sigma1" => Some(self.params.sigma1),
            "sigma2" => Some(self.params.sigma2),
            "weight2" => Some(self.params.weight2),
            _ => None,
        }
    }

    fn process(&self, input: &ImageData) -> OpsResult<ImageData> {
        match input {
            ImageData::Real(img) => bandpass(img, self.params).map(ImageData::Real),
            other => Err(OpsError::wrong_kind("bandpass", ElementKind::Real, other.kind())),
        }
    }
}

/// Circular mask and inverse FFT for complex input.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleIfftOperation;

impl Operation for CircleIfftOperation {
    fn id(&self) -> &'static str {
        CIRCLE_IFFT_ID
    }

    fn name(&self) -> &'static str {
        "Circle IFFT"
    }

    fn process(&self, input: &ImageData) -> OpsResult<ImageData> {
        match input {
            ImageData::Complex(img) => circle_ifft(img).map(ImageData::Complex),
            other => Err(OpsError::wrong_kind("circle_ifft", ElementKind::Complex, other.kind())),
        }
    }
}
