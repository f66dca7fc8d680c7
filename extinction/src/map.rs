//! Sight-line extinction map
//!
//! [`SightLineSource`] is the read-only part: the reference grid and the row
//! index of the backing table, loaded once and shared through `Arc`.
//! [`ExtinctionMap`] is the per-worker part: the active sight line and its
//! bin cursor. Workers that synthesize different sight lines in parallel
//! each own an `ExtinctionMap` built on the same source.

use std::path::Path;
use std::sync::Arc;

use crate::cache::{CachedQueryState, SightLineCache};
use crate::error::{ExtinctionError, Result};
use crate::grid::ReferenceGrid;
use crate::profile::SightLineProfile;
use crate::properties::MapProperties;
use crate::table::SightLineTable;

/// Reference grid plus backing table, immutable after construction
#[derive(Debug)]
pub struct SightLineSource {
    grid: ReferenceGrid,
    table: SightLineTable,
}

impl SightLineSource {
    pub fn new(grid: ReferenceGrid, table: SightLineTable) -> Self {
        if grid.len() != table.len() {
            log::warn!(
                "Reference grid has {} sight lines but {} has {} rows",
                grid.len(),
                table.path().display(),
                table.len()
            );
        }
        Self { grid, table }
    }

    /// Open a backing table and its reference coordinates.
    ///
    /// Without `coords_path` the coordinates are read from the first two
    /// columns of the backing table.
    pub fn open(
        table_path: &Path,
        coords_path: Option<&Path>,
        l_stepsize: Option<f64>,
    ) -> Result<Self> {
        let table = SightLineTable::open(table_path)?;
        let grid = ReferenceGrid::load(coords_path.unwrap_or(table_path), l_stepsize)?;

        log::info!(
            "Loaded sight-line table {} ({} rows, l step {:.4} deg)",
            table_path.display(),
            table.len(),
            grid.l_stepsize()
        );

        Ok(Self::new(grid, table))
    }

    pub fn grid(&self) -> &ReferenceGrid {
        &self.grid
    }

    pub fn table(&self) -> &SightLineTable {
        &self.table
    }

    /// 1-based line number of the nearest sight line, see [`ReferenceGrid::find_nearest`]
    pub fn find_nearest(&self, query: Option<(f64, f64)>) -> usize {
        self.grid.find_nearest(query)
    }

    pub fn load_profile(&self, line: usize) -> Result<SightLineProfile> {
        self.table.load_profile(line)
    }
}

/// Stateful extinction lookup along one sight line at a time
///
/// Starts without a sight line; every [`set_sight_line`](Self::set_sight_line)
/// replaces the active profile and its cursor.
#[derive(Debug)]
pub struct ExtinctionMap {
    source: Arc<SightLineSource>,
    properties: MapProperties,
    /// Coordinates requested by the last successful `set_sight_line`
    sight_line: Option<(f64, f64)>,
    cache: Option<SightLineCache>,
}

impl ExtinctionMap {
    pub fn new(source: Arc<SightLineSource>, properties: MapProperties) -> Self {
        Self {
            source,
            properties,
            sight_line: None,
            cache: None,
        }
    }

    pub fn properties(&self) -> &MapProperties {
        &self.properties
    }

    pub fn source(&self) -> &Arc<SightLineSource> {
        &self.source
    }

    /// Requested coordinates of the active sight line
    pub fn sight_line(&self) -> Option<(f64, f64)> {
        self.sight_line
    }

    pub fn is_initialized(&self) -> bool {
        self.cache.is_some()
    }

    pub fn active_profile(&self) -> Option<&SightLineProfile> {
        self.cache.as_ref().map(SightLineCache::profile)
    }

    pub fn query_state(&self) -> Option<&CachedQueryState> {
        self.cache.as_ref().map(SightLineCache::state)
    }

    /// Line number nearest to the current sight line, or to (0, 0) before
    /// any sight line has been set.
    pub fn find_sight_line(&self) -> usize {
        self.source.find_nearest(self.sight_line)
    }

    /// Resolve, load and activate the sight line nearest to (l, b).
    ///
    /// The previous profile and cursor are discarded and the new cursor
    /// starts in the zeroth bin. On error the map keeps its previous state.
    ///
    /// # Arguments
    /// * `l_deg` - Galactic longitude in degrees, either branch of the 0/360 seam
    /// * `b_deg` - Galactic latitude in degrees
    ///
    /// # Errors
    /// * `InvalidCoordinates` - `l_deg` or `b_deg` is not finite
    /// * `ProfileNotFound` - the nearest grid line has no row in the table
    /// * `MalformedProfile` - the row cannot be parsed or repaired
    pub fn set_sight_line(&mut self, l_deg: f64, b_deg: f64) -> Result<()> {
        if !l_deg.is_finite() || !b_deg.is_finite() {
            return Err(ExtinctionError::InvalidCoordinates { l_deg, b_deg });
        }

        let line = self.source.find_nearest(Some((l_deg, b_deg)));
        let profile = self.source.load_profile(line)?;

        log::debug!(
            "Sight line ({l_deg:.3}, {b_deg:.3}) -> line {line} at ({:.3}, {:.3}) with {} bins",
            profile.l_deg,
            profile.b_deg,
            profile.number_of_bins()
        );

        self.sight_line = Some((l_deg, b_deg));
        self.cache = Some(SightLineCache::new(profile));
        Ok(())
    }

    /// Move the bin cursor of the active sight line to `radius`.
    ///
    /// # Arguments
    /// * `radius` - Heliocentric distance in kpc
    /// * `force` - Recompute the cached values even when the bin is unchanged
    ///
    /// # Returns
    /// * `Ok(true)` - The cached values were recomputed
    /// * `Ok(false)` - `radius` stayed in the cached bin
    /// * `Err(NoSightLine)` - No sight line has been set yet
    pub fn update_extinction_in_map(&mut self, radius: f64, force: bool) -> Result<bool> {
        let cache = self.cache.as_mut().ok_or(ExtinctionError::NoSightLine)?;
        Ok(cache.update_extinction_in_map(radius, force))
    }

    /// Extinction and its uncertainty at `distance` along (l, b).
    ///
    /// Switches sight line first when (l, b) differs from the active one,
    /// then moves the bin cursor. Repeating a query returns the same value
    /// without touching the backing table.
    ///
    /// # Arguments
    /// * `l_deg`, `b_deg` - Requested sight line in degrees
    /// * `distance` - Heliocentric distance in kpc, `>= 0`
    ///
    /// # Returns
    /// `(value, uncertainty)` in magnitudes of the map's quantity; `(0, 0)`
    /// before the first far edge, the last bin's values beyond the last edge.
    ///
    /// # Errors
    /// `InvalidDistance` for a negative or NaN distance, checked before any
    /// state changes, plus every error of [`set_sight_line`](Self::set_sight_line).
    pub fn extinction_at(&mut self, l_deg: f64, b_deg: f64, distance: f64) -> Result<(f64, f64)> {
        validate_distance(distance)?;
        self.ensure_sight_line(l_deg, b_deg)?;

        let cache = self.cache.as_mut().ok_or(ExtinctionError::NoSightLine)?;
        cache.update_extinction_in_map(distance, false);
        Ok(cache.extinction())
    }

    /// Extinction for every distance of a star list on one sight line.
    ///
    /// All distances are validated before the sight line is touched.
    pub fn extinction_along(
        &mut self,
        l_deg: f64,
        b_deg: f64,
        distances: &[f64],
    ) -> Result<Vec<(f64, f64)>> {
        distances.iter().try_for_each(|&d| validate_distance(d))?;
        self.ensure_sight_line(l_deg, b_deg)?;

        let cache = self.cache.as_mut().ok_or(ExtinctionError::NoSightLine)?;
        Ok(distances
            .iter()
            .map(|&distance| {
                cache.update_extinction_in_map(distance, false);
                cache.extinction()
            })
            .collect())
    }

    fn ensure_sight_line(&mut self, l_deg: f64, b_deg: f64) -> Result<()> {
        if self.cache.is_none() || self.sight_line != Some((l_deg, b_deg)) {
            self.set_sight_line(l_deg, b_deg)?;
        }
        Ok(())
    }
}

fn validate_distance(distance: f64) -> Result<()> {
    if distance >= 0.0 {
        Ok(())
    } else {
        Err(ExtinctionError::InvalidDistance(distance))
    }
}
