//! Synthetic stellar population sub-models
//!
//! A population is described by one JSON configuration naming an age
//! distribution, a density profile, a kinematics model and optionally an
//! extinction map. [`Population`] builds all of them and samples stars along
//! a sight line.

pub mod age;
pub mod config;
pub mod coords;
pub mod density;
pub mod error;
pub mod kinematics;
pub mod population;
pub mod shared_args;

pub use age::{Age, AgeConfig, AgeModel};
pub use config::PopulationConfig;
pub use coords::{CoordinateFrame, Sun};
pub use density::{DensityConfig, DensityModel, DensityUnit, PopulationDensity};
pub use error::ModelError;
pub use kinematics::{Kinematics, KinematicsConfig, KinematicsModel};
pub use population::{Population, StarSample};
