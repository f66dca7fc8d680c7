//! Population configuration
//!
//! One JSON document names a model for every sub-model family:
//!
//! ```json
//! {
//!   "name": "bulge",
//!   "sun": { "r_sun_kpc": 8.178 },
//!   "age": { "name": "gaussian", "mean": 8.0, "std": 1.5 },
//!   "population_density": { "name": "bulge_besancon" },
//!   "kinematics": { "name": "velocity_gradient", "sigma_u": 113, "sigma_v": 115, "sigma_w": 100 },
//!   "extinction": { "name": "Surot", "table_path": "maps/surot.csv" }
//! }
//! ```

use std::fs;
use std::path::Path;

use extinction::ExtinctionMapConfig;
use serde::{Deserialize, Serialize};

use crate::age::AgeConfig;
use crate::coords::Sun;
use crate::density::DensityConfig;
use crate::error::ModelError;
use crate::kinematics::KinematicsConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub name: String,
    #[serde(default)]
    pub sun: Sun,
    pub age: AgeConfig,
    pub population_density: DensityConfig,
    pub kinematics: KinematicsConfig,
    /// Without a map every star gets zero extinction
    #[serde(default)]
    pub extinction: Option<ExtinctionMapConfig>,
}

impl PopulationConfig {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file. Relative map paths are taken relative to
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let contents = fs::read_to_string(path).map_err(|source| ModelError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&contents)?;

        if let (Some(map), Some(base)) = (config.extinction.as_mut(), path.parent()) {
            map.resolve_paths(base);
        }

        log::debug!("Loaded population '{}' from {}", config.name, path.display());
        Ok(config)
    }
}
