use std::f64::consts::{PI, SQRT_2};

use serde::{Deserialize, Serialize};

use crate::LutError;

/// A probability density function swept by the LUT builder.
pub trait Density {
    /// Density at `x`.
    fn density(&self, x: f64) -> f64;

    fn mean(&self) -> f64;

    fn std_dev(&self) -> f64;

    /// Largest value the density takes (at the mean for the shapes here).
    fn peak(&self) -> f64 {
        self.density(self.mean())
    }
}

fn check_params(mean: f64, std_dev: f64) -> Result<(), LutError> {
    if !mean.is_finite() {
        return Err(LutError::InvalidMean(mean));
    }
    if !(std_dev.is_finite() && std_dev > 0.0) {
        return Err(LutError::InvalidStdDev(std_dev));
    }
    Ok(())
}

/// Normal distribution: `exp(-(x-μ)² / 2σ²) / (σ·√(2π))`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    mean: f64,
    std_dev: f64,
}

impl Gaussian {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, LutError> {
        check_params(mean, std_dev)?;
        Ok(Self { mean, std_dev })
    }

    pub fn standard() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }
}

impl Density for Gaussian {
    fn density(&self, x: f64) -> f64 {
        let d = x - self.mean;
        (-(d * d) / (2.0 * self.std_dev * self.std_dev)).exp() / (self.std_dev * (2.0 * PI).sqrt())
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

/// Laplace distribution with scale `b = σ/√2`: `exp(-|x-μ| / b) / 2b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Laplace {
    mean: f64,
    std_dev: f64,
}

impl Laplace {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, LutError> {
        check_params(mean, std_dev)?;
        Ok(Self { mean, std_dev })
    }

    fn scale(&self) -> f64 {
        self.std_dev / SQRT_2
    }
}

impl Density for Laplace {
    fn density(&self, x: f64) -> f64 {
        let b = self.scale();
        (-(x - self.mean).abs() / b).exp() / (2.0 * b)
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

/// Distribution shape selector for [`LutConfig`](crate::LutConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKind {
    #[default]
    Gaussian,
    Laplace,
}

impl DistributionKind {
    pub fn build(self, mean: f64, std_dev: f64) -> Result<Box<dyn Density>, LutError> {
        Ok(match self {
            DistributionKind::Gaussian => Box::new(Gaussian::new(mean, std_dev)?),
            DistributionKind::Laplace => Box::new(Laplace::new(mean, std_dev)?),
        })
    }
}
