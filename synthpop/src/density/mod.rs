//! Population density profiles in galactocentric cylindrical coordinates
//!
//! Positions are `(r, phi_rad, z)` with `r` and `z` in kpc and `phi = 0`
//! pointing towards the Sun, see [`crate::coords`].

mod bulge_besancon;

pub use bulge_besancon::{BulgeDensityBesancon, DEFAULT_BAR_ANGLE_DEG};

use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// What a density value counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityUnit {
    /// Stars per kpc³
    Number,
    /// Solar masses per kpc³
    Mass,
}

pub trait PopulationDensity: Send + Sync {
    fn density(&self, r_kpc: f64, phi_rad: f64, z_kpc: f64) -> f64;

    fn density_unit(&self) -> DensityUnit;

    /// Element-wise [`density`](Self::density) over matching arrays.
    ///
    /// # Panics
    /// When the three arrays differ in length.
    fn density_array(
        &self,
        r_kpc: &Array1<f64>,
        phi_rad: &Array1<f64>,
        z_kpc: &Array1<f64>,
    ) -> Array1<f64> {
        Zip::from(r_kpc)
            .and(phi_rad)
            .and(z_kpc)
            .map_collect(|&r, &phi, &z| self.density(r, phi, z))
    }
}

/// Configured density model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum DensityConfig {
    #[serde(alias = "BulgeDensityBesancon", alias = "bulge_density_besancon")]
    BulgeBesancon(BulgeDensityBesancon),
}

impl DensityConfig {
    pub fn build(&self) -> Result<DensityModel, ModelError> {
        match self {
            Self::BulgeBesancon(model) => {
                model.validate()?;
                Ok(DensityModel::BulgeBesancon(model.clone()))
            }
        }
    }
}

/// Closed set of density models
#[derive(Debug, Clone)]
pub enum DensityModel {
    BulgeBesancon(BulgeDensityBesancon),
}

impl PopulationDensity for DensityModel {
    fn density(&self, r_kpc: f64, phi_rad: f64, z_kpc: f64) -> f64 {
        match self {
            Self::BulgeBesancon(model) => model.density(r_kpc, phi_rad, z_kpc),
        }
    }

    fn density_unit(&self) -> DensityUnit {
        match self {
            Self::BulgeBesancon(model) => model.density_unit(),
        }
    }
}
