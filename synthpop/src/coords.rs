//! Galactic coordinate transformations
//!
//! Galactocentric Cartesian frame: x points from the Galactic centre towards
//! the Sun, y along Galactic rotation at the Sun (towards l = 90°), z towards
//! the north Galactic pole. The Sun sits at `(r_sun, 0, z_sun)`; the
//! cylindrical azimuth `phi = 0` therefore points towards the Sun.
//!
//! Distances are in kpc, velocities in km/s, angles in degrees unless the
//! name says `_rad`.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Solar position and local standard of rest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sun {
    /// Galactocentric distance of the Sun in kpc
    pub r_sun_kpc: f64,
    /// Height of the Sun above the plane in kpc
    pub z_sun_kpc: f64,
    /// Circular velocity of the local standard of rest in km/s
    pub v_lsr: f64,
}

impl Default for Sun {
    fn default() -> Self {
        Self {
            r_sun_kpc: 8.178,
            z_sun_kpc: 0.017,
            v_lsr: 238.0,
        }
    }
}

/// Converts between heliocentric galactic and galactocentric coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinateFrame {
    sun: Sun,
}

impl CoordinateFrame {
    pub fn new(sun: Sun) -> Self {
        Self { sun }
    }

    pub fn sun(&self) -> &Sun {
        &self.sun
    }

    /// Galactocentric Cartesian position of a star at (l, b, distance).
    pub fn galactic_to_xyz(&self, l_deg: f64, b_deg: f64, distance_kpc: f64) -> Vector3<f64> {
        let (sin_l, cos_l) = l_deg.to_radians().sin_cos();
        let (sin_b, cos_b) = b_deg.to_radians().sin_cos();

        Vector3::new(
            self.sun.r_sun_kpc - distance_kpc * cos_b * cos_l,
            distance_kpc * cos_b * sin_l,
            self.sun.z_sun_kpc + distance_kpc * sin_b,
        )
    }

    /// Heliocentric (l, b, distance) of a galactocentric position.
    ///
    /// Longitude is returned in `[0, 360)`. The Sun's own position maps to
    /// `(0, 0, 0)`.
    pub fn xyz_to_galactic(&self, position: &Vector3<f64>) -> (f64, f64, f64) {
        let towards_centre = self.sun.r_sun_kpc - position.x;
        let dz = position.z - self.sun.z_sun_kpc;
        let distance = (towards_centre.powi(2) + position.y.powi(2) + dz.powi(2)).sqrt();

        if distance == 0.0 {
            return (0.0, 0.0, 0.0);
        }

        let l_deg = position.y.atan2(towards_centre).to_degrees().rem_euclid(360.0);
        let b_deg = (dz / distance).asin().to_degrees();
        (l_deg, b_deg, distance)
    }

    /// Cylindrical (r, phi_rad, z) of a galactocentric Cartesian position.
    pub fn xyz_to_rphiz(position: &Vector3<f64>) -> (f64, f64, f64) {
        let r = position.x.hypot(position.y);
        let phi_rad = position.y.atan2(position.x);
        (r, phi_rad, position.z)
    }

    /// Cylindrical (r, phi_rad, z) of a star at (l, b, distance).
    pub fn galactic_to_rphiz(&self, l_deg: f64, b_deg: f64, distance_kpc: f64) -> (f64, f64, f64) {
        Self::xyz_to_rphiz(&self.galactic_to_xyz(l_deg, b_deg, distance_kpc))
    }
}
