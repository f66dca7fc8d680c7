//! Triaxial bar-shaped bulge of the Besançon model
//!
//! Robin et al. (2012), Table 3, boxy Gaussian profile with an exponential
//! cut-off beyond `Rc`.

use serde::{Deserialize, Serialize};

use super::{DensityUnit, PopulationDensity};
use crate::error::ModelError;

/// Angle between the bar major axis and the Sun-centre line in degrees
pub const DEFAULT_BAR_ANGLE_DEG: f64 = 29.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulgeDensityBesancon {
    /// Scale length along the bar major axis in kpc
    pub x0: f64,
    pub y0: f64,
    pub z0: f64,
    /// Cut-off radius in kpc
    #[serde(rename = "Rc", alias = "rc")]
    pub rc: f64,
    /// Central number density in stars / kpc³
    pub n0: f64,
    /// Bar angle in degrees
    pub bar_angle: f64,
}

impl Default for BulgeDensityBesancon {
    fn default() -> Self {
        Self {
            x0: 1.59,
            y0: 0.424,
            z0: 0.424,
            rc: 2.54,
            n0: 1.37e10,
            bar_angle: DEFAULT_BAR_ANGLE_DEG,
        }
    }
}

impl BulgeDensityBesancon {
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in [("x0", self.x0), ("y0", self.y0), ("z0", self.z0)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ModelError::invalid(
                    "bulge_besancon",
                    format!("scale length {name} must be positive, got {value}"),
                ));
            }
        }
        if !(self.rc >= 0.0) || !(self.n0 >= 0.0) || !self.bar_angle.is_finite() {
            return Err(ModelError::invalid(
                "bulge_besancon",
                "Rc and n0 must be non-negative and bar_angle finite",
            ));
        }
        Ok(())
    }

    /// Position in the bar frame, x along the major axis
    fn bar_frame(&self, r_kpc: f64, phi_rad: f64) -> (f64, f64) {
        let angle = phi_rad - self.bar_angle.to_radians();
        (-r_kpc * angle.cos(), r_kpc * angle.sin())
    }
}

impl PopulationDensity for BulgeDensityBesancon {
    fn density(&self, r_kpc: f64, phi_rad: f64, z_kpc: f64) -> f64 {
        let (xb, yb) = self.bar_frame(r_kpc, phi_rad);

        let planar = (xb / self.x0).powi(2) + (yb / self.y0).powi(2);
        let rs2 = (planar.powi(2) + (z_kpc / self.z0).powi(4)).sqrt();

        let beyond_cutoff = (xb.hypot(yb) - self.rc).max(0.0);

        self.n0 * (-0.5 * rs2).exp() * (-2.0 * beyond_cutoff.powi(2)).exp()
    }

    fn density_unit(&self) -> DensityUnit {
        DensityUnit::Number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_peak_at_centre() {
        let bulge = BulgeDensityBesancon::default();
        let centre = bulge.density(0.0, 0.0, 0.0);
        assert_relative_eq!(centre, 1.37e10);

        for &(r, phi, z) in &[(0.1, 0.0, 0.0), (0.5, 1.0, 0.1), (0.0, 0.0, 0.2), (3.0, PI, 0.0)] {
            assert!(bulge.density(r, phi, z) < centre);
        }
    }

    #[test]
    fn test_symmetric_in_z() {
        let bulge = BulgeDensityBesancon::default();
        for &(r, phi, z) in &[(0.3, 0.2, 0.1), (1.5, -2.0, 0.7), (4.0, 1.0, 0.05)] {
            assert_relative_eq!(bulge.density(r, phi, z), bulge.density(r, phi, -z));
        }
    }

    #[test]
    fn test_elongated_along_bar() {
        let bulge = BulgeDensityBesancon::default();
        let bar = bulge.bar_angle.to_radians();

        let along = bulge.density(1.0, bar, 0.0);
        let across = bulge.density(1.0, bar + PI / 2.0, 0.0);
        assert!(along > across);
        // Point-symmetric through the centre
        assert_relative_eq!(along, bulge.density(1.0, bar + PI, 0.0), max_relative = 1e-12);
    }

    #[test]
    fn test_cutoff_beyond_rc() {
        let bulge = BulgeDensityBesancon {
            rc: 1.0,
            ..Default::default()
        };
        let uncut = BulgeDensityBesancon {
            rc: 100.0,
            ..Default::default()
        };
        let bar = bulge.bar_angle.to_radians();

        // Inside Rc the cut-off factor is one
        assert_relative_eq!(bulge.density(0.8, bar, 0.0), uncut.density(0.8, bar, 0.0));

        let ratio = bulge.density(2.0, bar, 0.0) / uncut.density(2.0, bar, 0.0);
        assert_relative_eq!(ratio, (-2.0f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(BulgeDensityBesancon::default().validate().is_ok());
        let flat = BulgeDensityBesancon {
            z0: 0.0,
            ..Default::default()
        };
        assert!(flat.validate().is_err());
    }
}
