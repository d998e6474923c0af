//! # fixtab-lut
//!
//! Density lookup tables for hardware ROMs.
//!
//! Key types:
//! - [`Density`]: a probability density sampled by the sweep ([`Gaussian`], [`Laplace`])
//! - [`Sweep`]: the sample points over `[mean - k·σ, mean + k·σ)`
//! - [`LutBuilder`]: quantizes one sample per address into a [`LookupTable`]
//! - [`LutConfig`]: every layout parameter (size, width, span, shape), serde-loadable

pub mod builder;
pub mod density;
pub mod sweep;

pub use builder::{LookupTable, LutBuilder, LutConfig, LutEntry, MAX_ENTRIES};
pub use density::{Density, DistributionKind, Gaussian, Laplace};
pub use sweep::{Sweep, SweepMode};

use fixtab_math::QuantizeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LutError {
    #[error("standard deviation must be positive and finite, got {0}")]
    InvalidStdDev(f64),
    #[error("mean must be finite, got {0}")]
    InvalidMean(f64),
    #[error("sweep span must be positive and finite, got {0} sigma")]
    InvalidSpan(f64),
    #[error("table must have at least one entry")]
    EmptyTable,
    #[error("{0} entries exceeds the limit of {max}", max = MAX_ENTRIES)]
    TooManyEntries(usize),
    #[error("step {dx} is below the float resolution of the domain around {at}")]
    StepTooSmall { dx: f64, at: f64 },
    #[error("address {address}: {source}")]
    Sample { address: usize, source: QuantizeError },
    #[error("Quantize error: {0}")]
    Quantize(#[from] QuantizeError),
}
