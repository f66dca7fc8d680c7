//! Extinction map selection by configuration name
//!
//! The set of maps is closed: each entry of [`ExtinctionMapConfig`] is one
//! supported map, chosen by its `"name"` tag in the population
//! configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::map::{ExtinctionMap, SightLineSource};
use crate::properties::{ExtinctionQuantity, MapProperties};

/// Effective wavelength of the VISTA Ks passband in micrometres
pub const SUROT_REF_WAVELENGTH_UM: f64 = 2.152152;

pub const SUROT_QUANTITY_TAG: &str = "A_Ks";

/// Parameters of a table-backed sight-line map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SightLineTableConfig {
    /// Backing table, one sight line per row
    pub table_path: PathBuf,
    /// Two-column (l, b) file; defaults to the backing table's first columns
    #[serde(default)]
    pub coords_path: Option<PathBuf>,
    /// Longitude spacing override in degrees
    #[serde(default)]
    pub l_stepsize: Option<f64>,
}

/// Registry of supported extinction maps keyed by `"name"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum ExtinctionMapConfig {
    /// 2-D Surot et al. (2020) map converted to A_Ks, stored in the
    /// Marshall-style sight-line table layout
    #[serde(rename = "Surot", alias = "surot")]
    Surot(SightLineTableConfig),
}

impl ExtinctionMapConfig {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Surot(_) => "Surot",
        }
    }

    fn table_config(&self) -> &SightLineTableConfig {
        match self {
            Self::Surot(config) => config,
        }
    }

    pub fn properties(&self) -> MapProperties {
        match self {
            Self::Surot(_) => MapProperties {
                name: self.name().to_string(),
                ref_wavelength_um: SUROT_REF_WAVELENGTH_UM,
                quantity_tag: SUROT_QUANTITY_TAG.to_string(),
                quantity: ExtinctionQuantity::TotalExtinction,
            },
        }
    }

    /// Anchor relative table paths at `base`, usually the directory of the
    /// configuration file that named them.
    pub fn resolve_paths(&mut self, base: &Path) {
        let config = match self {
            Self::Surot(config) => config,
        };
        if config.table_path.is_relative() {
            config.table_path = base.join(&config.table_path);
        }
        if let Some(coords) = config.coords_path.as_mut() {
            if coords.is_relative() {
                *coords = base.join(&*coords);
            }
        }
    }

    /// Load the shared read-only part of the map.
    pub fn open_source(&self) -> Result<Arc<SightLineSource>> {
        let config = self.table_config();
        let source = SightLineSource::open(
            &config.table_path,
            config.coords_path.as_deref(),
            config.l_stepsize,
        )?;
        Ok(Arc::new(source))
    }

    /// New map instance on an already loaded source.
    pub fn build_with_source(&self, source: Arc<SightLineSource>) -> ExtinctionMap {
        ExtinctionMap::new(source, self.properties())
    }

    pub fn build(&self) -> Result<ExtinctionMap> {
        Ok(self.build_with_source(self.open_source()?))
    }
}
