//! Population driver tying the sub-models together along one sight line

use std::sync::Arc;

use extinction::{ExtinctionError, ExtinctionMap, SightLineSource};
use rand::RngCore;
use serde::Serialize;

use crate::age::{Age, AgeModel};
use crate::config::PopulationConfig;
use crate::coords::CoordinateFrame;
use crate::density::{DensityModel, PopulationDensity};
use crate::error::ModelError;
use crate::kinematics::{Kinematics, KinematicsModel};

/// One synthesized star
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StarSample {
    pub distance_kpc: f64,
    pub r_kpc: f64,
    pub phi_rad: f64,
    pub z_kpc: f64,
    pub density: f64,
    pub age_gyr: f64,
    pub u: f64,
    pub v: f64,
    pub w: f64,
    pub extinction: f64,
    pub extinction_err: f64,
}

impl StarSample {
    pub const CSV_HEADER: &'static str =
        "distance_kpc,r_kpc,phi_rad,z_kpc,density,age_gyr,u,v,w,extinction,extinction_err";

    pub fn to_csv_row(&self) -> String {
        format!(
            "{:.4},{:.4},{:.6},{:.4},{:.6e},{:.4},{:.3},{:.3},{:.3},{:.4},{:.4}",
            self.distance_kpc,
            self.r_kpc,
            self.phi_rad,
            self.z_kpc,
            self.density,
            self.age_gyr,
            self.u,
            self.v,
            self.w,
            self.extinction,
            self.extinction_err
        )
    }
}

/// A configured population with its own extinction map instance
#[derive(Debug)]
pub struct Population {
    name: String,
    frame: CoordinateFrame,
    age: AgeModel,
    density: DensityModel,
    kinematics: KinematicsModel,
    extinction: Option<ExtinctionMap>,
}

impl Population {
    /// Build every sub-model, loading the extinction map when one is named.
    pub fn from_config(config: &PopulationConfig) -> Result<Self, ModelError> {
        let source = match &config.extinction {
            Some(map) => Some(map.open_source()?),
            None => None,
        };
        Self::from_config_with_source(config, source)
    }

    /// Build on an extinction source already opened by another worker.
    pub fn from_config_with_source(
        config: &PopulationConfig,
        source: Option<Arc<SightLineSource>>,
    ) -> Result<Self, ModelError> {
        let frame = CoordinateFrame::new(config.sun);
        let extinction = match (&config.extinction, source) {
            (Some(map), Some(source)) => Some(map.build_with_source(source)),
            (Some(map), None) => Some(map.build()?),
            (None, _) => None,
        };

        Ok(Self {
            name: config.name.clone(),
            frame,
            age: config.age.build()?,
            density: config.population_density.build()?,
            kinematics: config.kinematics.build(&frame)?,
            extinction,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> &CoordinateFrame {
        &self.frame
    }

    pub fn age(&self) -> &AgeModel {
        &self.age
    }

    pub fn density(&self) -> &DensityModel {
        &self.density
    }

    pub fn kinematics(&self) -> &KinematicsModel {
        &self.kinematics
    }

    pub fn extinction_map(&self) -> Option<&ExtinctionMap> {
        self.extinction.as_ref()
    }

    /// Sample one star per distance along (l, b).
    ///
    /// Sorted distances keep the extinction bin cursor moving forward.
    pub fn sample_sight_line(
        &mut self,
        l_deg: f64,
        b_deg: f64,
        distances: &[f64],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<StarSample>, ModelError> {
        let extinction = match self.extinction.as_mut() {
            Some(map) => map.extinction_along(l_deg, b_deg, distances)?,
            None => {
                if let Some(&bad) = distances.iter().find(|&&d| !(d >= 0.0)) {
                    return Err(ExtinctionError::InvalidDistance(bad).into());
                }
                vec![(0.0, 0.0); distances.len()]
            }
        };

        log::debug!(
            "Sampling {} stars of '{}' along ({l_deg:.3}, {b_deg:.3})",
            distances.len(),
            self.name
        );

        Ok(distances
            .iter()
            .zip(extinction)
            .map(|(&distance_kpc, (ext, ext_err))| {
                let position = self.frame.galactic_to_xyz(l_deg, b_deg, distance_kpc);
                let (r_kpc, phi_rad, z_kpc) = CoordinateFrame::xyz_to_rphiz(&position);
                let velocity = self.kinematics.draw_random_velocity(&position, &mut *rng);

                StarSample {
                    distance_kpc,
                    r_kpc,
                    phi_rad,
                    z_kpc,
                    density: self.density.density(r_kpc, phi_rad, z_kpc),
                    age_gyr: self.age.draw_random_age(&mut *rng),
                    u: velocity.x,
                    v: velocity.y,
                    w: velocity.z,
                    extinction: ext,
                    extinction_err: ext_err,
                }
            })
            .collect())
    }
}
