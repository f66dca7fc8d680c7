//! Bin cursor over the active sight line
//!
//! Stars along a sight line are usually queried in near-sorted distance
//! order, so consecutive queries almost always land in the same bin. The
//! cache keeps the bin index of the last query together with the values read
//! from that bin and only touches the profile again when a query crosses a
//! bin boundary.

use crate::profile::SightLineProfile;

/// Values resolved for the current bin of the active sight line
///
/// `radius_ind` counts the far edges lying strictly below the queried
/// distance: 0 is the stretch between the observer and the first far edge,
/// `i > 0` is the stretch beyond the far edge of bin `i` (1-based), whose
/// values are held until the next edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CachedQueryState {
    pub radius_ind: usize,
    pub near_bin_edge: f64,
    pub near_bin_edge_err: f64,
    pub extinction_in_map: f64,
    pub extinction_in_map_err: f64,
}

impl CachedQueryState {
    /// State before the first bin: no dust between observer and first edge
    pub fn zeroth_bin() -> Self {
        Self::default()
    }

    /// (value, uncertainty) of the cached extinction
    pub fn extinction(&self) -> (f64, f64) {
        (self.extinction_in_map, self.extinction_in_map_err)
    }
}

/// Active profile plus cursor state
#[derive(Debug, Clone)]
pub struct SightLineCache {
    profile: SightLineProfile,
    far_edges: Vec<f64>,
    state: CachedQueryState,
}

impl SightLineCache {
    /// Wrap a freshly loaded profile and populate the zeroth bin.
    pub fn new(profile: SightLineProfile) -> Self {
        let far_edges = profile.far_edges();
        let mut cache = Self {
            profile,
            far_edges,
            state: CachedQueryState::zeroth_bin(),
        };
        cache.update_extinction_in_map(0.0, true);
        cache
    }

    pub fn profile(&self) -> &SightLineProfile {
        &self.profile
    }

    pub fn state(&self) -> &CachedQueryState {
        &self.state
    }

    pub fn extinction(&self) -> (f64, f64) {
        self.state.extinction()
    }

    /// Number of far edges strictly below `radius`.
    ///
    /// A distance sitting exactly on an edge belongs to the bin below it.
    pub fn digitize(&self, radius: f64) -> usize {
        self.far_edges.partition_point(|&edge| edge < radius)
    }

    /// Whether `radius` still falls in the interval of bin `index`.
    fn in_bin(&self, index: usize, radius: f64) -> bool {
        let above_near = index == 0 || radius > self.far_edges[index - 1];
        let below_far = index == self.far_edges.len() || radius <= self.far_edges[index];
        above_near && below_far
    }

    fn resolve(&self, radius: f64) -> usize {
        let current = self.state.radius_ind;
        if self.in_bin(current, radius) {
            current
        } else {
            self.digitize(radius)
        }
    }

    /// Move the cursor to the bin holding `radius`.
    ///
    /// Returns `true` when the cached values were recomputed, `false` when
    /// the query stayed in the cached bin and `force` was not set.
    pub fn update_extinction_in_map(&mut self, radius: f64, force: bool) -> bool {
        let radius_ind = self.resolve(radius);

        if radius_ind == self.state.radius_ind && !force {
            return false;
        }

        self.state = match radius_ind.checked_sub(1).and_then(|i| self.profile.bin(i)) {
            Some(bin) => CachedQueryState {
                radius_ind,
                near_bin_edge: bin.far_edge,
                near_bin_edge_err: bin.far_edge_err,
                extinction_in_map: bin.extinction,
                extinction_in_map_err: bin.extinction_err,
            },
            None => CachedQueryState {
                radius_ind,
                ..CachedQueryState::zeroth_bin()
            },
        };

        true
    }
}
