//! Stellar velocity distributions
//!
//! Velocities are galactocentric Cartesian `(u, v, w)` in km/s on the axes of
//! [`crate::coords`]. Positions are galactocentric Cartesian in kpc.

mod velocity_gradient;

pub use velocity_gradient::{VelocityGradient, DEFAULT_VEL_GRAD};

use nalgebra::Vector3;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::coords::CoordinateFrame;
use crate::error::ModelError;

pub trait Kinematics: Send + Sync {
    /// Draw one velocity for a star at `position`.
    fn draw_random_velocity(&self, position: &Vector3<f64>, rng: &mut dyn RngCore)
        -> Vector3<f64>;

    fn draw_random_velocities(
        &self,
        positions: &[Vector3<f64>],
        rng: &mut dyn RngCore,
    ) -> Vec<Vector3<f64>> {
        positions
            .iter()
            .map(|position| self.draw_random_velocity(position, &mut *rng))
            .collect()
    }
}

/// Configured kinematics model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum KinematicsConfig {
    #[serde(alias = "VelocityGradient")]
    VelocityGradient {
        sigma_u: f64,
        sigma_v: f64,
        sigma_w: f64,
        #[serde(default = "default_vel_grad")]
        vel_grad: f64,
    },
}

fn default_vel_grad() -> f64 {
    DEFAULT_VEL_GRAD
}

impl KinematicsConfig {
    /// Build against the solar parameters of `frame`, which fix `v_lsr`.
    pub fn build(&self, frame: &CoordinateFrame) -> Result<KinematicsModel, ModelError> {
        match *self {
            Self::VelocityGradient {
                sigma_u,
                sigma_v,
                sigma_w,
                vel_grad,
            } => Ok(KinematicsModel::VelocityGradient(VelocityGradient::new(
                Vector3::new(sigma_u, sigma_v, sigma_w),
                vel_grad,
                frame.sun().v_lsr,
            )?)),
        }
    }
}

/// Closed set of kinematics models
#[derive(Debug, Clone)]
pub enum KinematicsModel {
    VelocityGradient(VelocityGradient),
}

impl Kinematics for KinematicsModel {
    fn draw_random_velocity(
        &self,
        position: &Vector3<f64>,
        rng: &mut dyn RngCore,
    ) -> Vector3<f64> {
        match self {
            Self::VelocityGradient(model) => model.draw_random_velocity(position, rng),
        }
    }
}
