//! Stellar age distributions
//!
//! Ages are in Gyr. Every model is built from an [`AgeConfig`] entry keyed by
//! its `"name"` field.

mod gaussian;
mod uniform;

pub use gaussian::GaussianAge;
pub use uniform::UniformAge;

use ndarray::Array1;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Age distribution of a population
pub trait Age: Send + Sync {
    /// Draw one age in Gyr.
    fn draw_random_age(&self, rng: &mut dyn RngCore) -> f64;

    /// Draw `n` independent ages.
    fn draw_random_ages(&self, n: usize, rng: &mut dyn RngCore) -> Array1<f64> {
        Array1::from_shape_fn(n, |_| self.draw_random_age(&mut *rng))
    }

    /// Mean of the distribution in Gyr
    fn average_age(&self) -> f64;

    /// Upper limit of the distribution, `None` when unbounded
    fn maximum_age(&self) -> Option<f64>;
}

/// Default lower age bound for truncated distributions (100 kyr)
pub const DEFAULT_LOW_BOUND_GYR: f64 = 1e-4;

/// Default upper age bound, log10(age / yr) = 10.3
pub const DEFAULT_HIGH_BOUND_GYR: f64 = 19.952_623_149_7;

fn default_low_bound() -> f64 {
    DEFAULT_LOW_BOUND_GYR
}

fn default_high_bound() -> f64 {
    DEFAULT_HIGH_BOUND_GYR
}

/// Configured age model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum AgeConfig {
    #[serde(alias = "Uniform")]
    Uniform { low_bound: f64, high_bound: f64 },
    #[serde(alias = "Gaussian")]
    Gaussian {
        mean: f64,
        std: f64,
        #[serde(default = "default_low_bound")]
        low_bound: f64,
        #[serde(default = "default_high_bound")]
        high_bound: f64,
    },
}

impl AgeConfig {
    pub fn build(&self) -> Result<AgeModel, ModelError> {
        match *self {
            Self::Uniform {
                low_bound,
                high_bound,
            } => Ok(AgeModel::Uniform(UniformAge::new(low_bound, high_bound)?)),
            Self::Gaussian {
                mean,
                std,
                low_bound,
                high_bound,
            } => Ok(AgeModel::Gaussian(GaussianAge::new(
                mean, std, low_bound, high_bound,
            )?)),
        }
    }
}

/// Closed set of age models
#[derive(Debug, Clone)]
pub enum AgeModel {
    Uniform(UniformAge),
    Gaussian(GaussianAge),
}

impl AgeModel {
    fn inner(&self) -> &dyn Age {
        match self {
            Self::Uniform(model) => model,
            Self::Gaussian(model) => model,
        }
    }
}

impl Age for AgeModel {
    fn draw_random_age(&self, rng: &mut dyn RngCore) -> f64 {
        self.inner().draw_random_age(rng)
    }

    fn draw_random_ages(&self, n: usize, rng: &mut dyn RngCore) -> Array1<f64> {
        self.inner().draw_random_ages(n, rng)
    }

    fn average_age(&self) -> f64 {
        self.inner().average_age()
    }

    fn maximum_age(&self) -> Option<f64> {
        self.inner().maximum_age()
    }
}
