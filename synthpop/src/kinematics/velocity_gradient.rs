//! Solid-body inner rotation with isotropic Gaussian dispersion per axis
//!
//! The rotation speed grows linearly with cylindrical radius until it reaches
//! the local standard of rest, then stays flat.

use nalgebra::Vector3;
use rand::RngCore;
use rand_distr::{Distribution, Normal};

use super::Kinematics;
use crate::coords::CoordinateFrame;
use crate::error::ModelError;

/// Rotation gradient in km/s per kpc
pub const DEFAULT_VEL_GRAD: f64 = 60.0;

#[derive(Debug, Clone)]
pub struct VelocityGradient {
    dispersion: [Normal<f64>; 3],
    vel_grad: f64,
    v_lsr: f64,
}

impl VelocityGradient {
    /// `sigma` holds the (u, v, w) dispersions in km/s.
    pub fn new(sigma: Vector3<f64>, vel_grad: f64, v_lsr: f64) -> Result<Self, ModelError> {
        let axis = |s: f64| {
            Normal::new(0.0, s).map_err(|e| {
                ModelError::invalid("velocity_gradient", format!("dispersion {s}: {e}"))
            })
        };
        if !vel_grad.is_finite() || !v_lsr.is_finite() {
            return Err(ModelError::invalid(
                "velocity_gradient",
                "vel_grad and v_lsr must be finite",
            ));
        }

        Ok(Self {
            dispersion: [axis(sigma.x)?, axis(sigma.y)?, axis(sigma.z)?],
            vel_grad,
            v_lsr,
        })
    }

    /// Mean rotation speed at cylindrical radius `r_kpc`
    pub fn rotation_speed(&self, r_kpc: f64) -> f64 {
        (self.vel_grad * r_kpc).min(self.v_lsr)
    }
}

impl Kinematics for VelocityGradient {
    fn draw_random_velocity(
        &self,
        position: &Vector3<f64>,
        rng: &mut dyn RngCore,
    ) -> Vector3<f64> {
        let [du_dist, dv_dist, dw_dist] = &self.dispersion;
        let du = du_dist.sample(rng);
        let dv = dv_dist.sample(rng);
        let dw = dw_dist.sample(rng);

        let (r, phi, _) = CoordinateFrame::xyz_to_rphiz(position);
        let (sin_phi, cos_phi) = phi.sin_cos();
        let tangential = self.rotation_speed(r) + dv;

        Vector3::new(
            du * cos_phi + tangential * sin_phi,
            -du * sin_phi + tangential * cos_phi,
            dw,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn cold(v_lsr: f64) -> VelocityGradient {
        VelocityGradient::new(Vector3::zeros(), DEFAULT_VEL_GRAD, v_lsr).unwrap()
    }

    #[test]
    fn test_rotation_saturates() {
        let model = cold(238.0);
        assert_relative_eq!(model.rotation_speed(0.0), 0.0);
        assert_relative_eq!(model.rotation_speed(2.0), 120.0);
        assert_relative_eq!(model.rotation_speed(3.9), 234.0);
        assert_relative_eq!(model.rotation_speed(4.0), 238.0);
        assert_relative_eq!(model.rotation_speed(10.0), 238.0);
    }

    #[test]
    fn test_cold_rotation_direction() {
        let model = cold(238.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        // On the Sun-centre line rotation is along +y
        let v = model.draw_random_velocity(&Vector3::new(1.0, 0.0, 0.0), &mut rng);
        assert_relative_eq!(v, Vector3::new(0.0, 60.0, 0.0), epsilon = 1e-12);

        // A quarter turn ahead the rotation is along +x
        let v = model.draw_random_velocity(&Vector3::new(0.0, 1.0, 0.0), &mut rng);
        assert_relative_eq!(v.x, 60.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_speed_independent_of_azimuth() {
        let model = cold(238.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for phi in [0.0f64, 0.7, 2.0, -2.5] {
            let position = Vector3::new(2.0 * phi.cos(), 2.0 * phi.sin(), 0.3);
            let v = model.draw_random_velocity(&position, &mut rng);
            assert_relative_eq!(v.norm(), 120.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_dispersion_statistics() {
        let model = VelocityGradient::new(Vector3::new(30.0, 20.0, 10.0), 60.0, 238.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let position = Vector3::new(8.0, 0.0, 0.0);

        let n = 20_000;
        let samples = model.draw_random_velocities(&vec![position; n], &mut rng);
        let mean = samples.iter().sum::<Vector3<f64>>() / n as f64;
        let var_w = samples.iter().map(|v| (v.z - mean.z).powi(2)).sum::<f64>() / n as f64;

        assert!(mean.x.abs() < 1.0, "mean u {}", mean.x);
        assert!((mean.y - 238.0).abs() < 1.0, "mean v {}", mean.y);
        assert!((var_w.sqrt() - 10.0).abs() < 0.3, "sigma w {}", var_w.sqrt());
    }

    #[test]
    fn test_negative_dispersion_rejected() {
        assert!(VelocityGradient::new(Vector3::new(1.0, -1.0, 1.0), 60.0, 238.0).is_err());
        assert!(VelocityGradient::new(Vector3::zeros(), f64::NAN, 238.0).is_err());
    }
}
