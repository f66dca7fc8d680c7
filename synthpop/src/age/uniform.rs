use rand::RngCore;
use rand_distr::{Distribution, Uniform};

use super::Age;
use crate::error::ModelError;

/// Ages spread evenly over `[low_bound, high_bound]`
#[derive(Debug, Clone)]
pub struct UniformAge {
    low_bound: f64,
    high_bound: f64,
    distribution: Uniform<f64>,
}

impl UniformAge {
    pub fn new(low_bound: f64, high_bound: f64) -> Result<Self, ModelError> {
        if !low_bound.is_finite() || !high_bound.is_finite() {
            return Err(ModelError::invalid("uniform", "age bounds must be finite"));
        }
        if low_bound > high_bound {
            return Err(ModelError::invalid(
                "uniform",
                format!("low_bound {low_bound} exceeds high_bound {high_bound}"),
            ));
        }

        Ok(Self {
            low_bound,
            high_bound,
            distribution: Uniform::new_inclusive(low_bound, high_bound),
        })
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.low_bound, self.high_bound)
    }
}

impl Age for UniformAge {
    fn draw_random_age(&self, rng: &mut dyn RngCore) -> f64 {
        self.distribution.sample(rng)
    }

    fn average_age(&self) -> f64 {
        0.5 * (self.low_bound + self.high_bound)
    }

    fn maximum_age(&self) -> Option<f64> {
        Some(self.high_bound)
    }
}
