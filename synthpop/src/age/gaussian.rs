use rand::RngCore;
use rand_distr::{Distribution, Normal};

use super::Age;
use crate::error::ModelError;

/// Normal age distribution truncated to the open interval `(low_bound, high_bound)`
///
/// Draws outside the interval are rejected and redrawn, so the mean must sit
/// where the distribution has usable mass.
#[derive(Debug, Clone)]
pub struct GaussianAge {
    mean: f64,
    std: f64,
    low_bound: f64,
    high_bound: f64,
    distribution: Normal<f64>,
}

impl GaussianAge {
    pub fn new(mean: f64, std: f64, low_bound: f64, high_bound: f64) -> Result<Self, ModelError> {
        if low_bound >= high_bound {
            return Err(ModelError::invalid(
                "gaussian",
                format!("low_bound {low_bound} must be below high_bound {high_bound}"),
            ));
        }
        // A point mass never lands strictly inside the interval unless the mean does
        if std == 0.0 && !(low_bound < mean && mean < high_bound) {
            return Err(ModelError::invalid(
                "gaussian",
                format!("std is zero and mean {mean} is outside ({low_bound}, {high_bound})"),
            ));
        }

        let distribution = Normal::new(mean, std)
            .map_err(|e| ModelError::invalid("gaussian", format!("{e} (std = {std})")))?;

        Ok(Self {
            mean,
            std,
            low_bound,
            high_bound,
            distribution,
        })
    }

    pub fn std(&self) -> f64 {
        self.std
    }
}

impl Age for GaussianAge {
    fn draw_random_age(&self, rng: &mut dyn RngCore) -> f64 {
        loop {
            let age = self.distribution.sample(rng);
            if self.low_bound < age && age < self.high_bound {
                return age;
            }
        }
    }

    /// The untruncated mean
    fn average_age(&self) -> f64 {
        self.mean
    }

    fn maximum_age(&self) -> Option<f64> {
        Some(self.high_bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_draws_strictly_inside_bounds() {
        let model = GaussianAge::new(1.0, 3.0, 0.5, 2.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let ages = model.draw_random_ages(2000, &mut rng);
        assert!(ages.iter().all(|&a| a > 0.5 && a < 2.0));
    }

    #[test]
    fn test_sample_statistics_untruncated() {
        let model = GaussianAge::new(8.0, 1.0, 0.0, 16.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let ages = model.draw_random_ages(20_000, &mut rng);
        let mean = ages.mean().unwrap();
        let std = ages.std(1.0);
        assert!((mean - 8.0).abs() < 0.05, "mean was {mean}");
        assert!((std - 1.0).abs() < 0.05, "std was {std}");
    }

    #[test]
    fn test_average_and_maximum() {
        let model = GaussianAge::new(10.0, 2.0, 1e-4, 19.9526231497).unwrap();
        assert_relative_eq!(model.average_age(), 10.0);
        assert_relative_eq!(model.std(), 2.0);
        assert_eq!(model.maximum_age(), Some(19.9526231497));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(GaussianAge::new(5.0, 1.0, 3.0, 3.0).is_err());
        assert!(GaussianAge::new(5.0, -1.0, 0.0, 10.0).is_err());
        assert!(GaussianAge::new(12.0, 0.0, 0.0, 10.0).is_err());
    }

    #[test]
    fn test_zero_width_inside_bounds() {
        let model = GaussianAge::new(5.0, 0.0, 0.0, 10.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(model.draw_random_age(&mut rng), 5.0);
    }
}
