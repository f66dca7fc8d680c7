//! Sight-line extinction profiles
//!
//! A profile is one row of the backing table:
//!
//! ```text
//! l_deg, b_deg, chi2_allstars, chi2_giants, number_of_bins,
//!     (far_edge, far_edge_err, extinction, extinction_err) x number_of_bins
//! ```
//!
//! Distances are heliocentric kpc; extinction is in magnitudes of whatever
//! quantity the map stores.

use crate::error::{ExtinctionError, Result};
use crate::table::split_fields;

const HEADER_FIELDS: usize = 5;
const BIN_FIELDS: usize = 4;

/// One radial bin of a sight line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightLineBin {
    /// Outer (larger-distance) edge of the bin
    pub far_edge: f64,
    pub far_edge_err: f64,
    /// Cumulative extinction out to `far_edge`
    pub extinction: f64,
    pub extinction_err: f64,
}

impl SightLineBin {
    pub fn new(far_edge: f64, far_edge_err: f64, extinction: f64, extinction_err: f64) -> Self {
        Self {
            far_edge,
            far_edge_err,
            extinction,
            extinction_err,
        }
    }
}

/// A loaded and repaired sight-line profile
#[derive(Debug, Clone, PartialEq)]
pub struct SightLineProfile {
    /// Galactic longitude of the profile itself (may differ from the query)
    pub l_deg: f64,
    /// Galactic latitude of the profile itself
    pub b_deg: f64,
    pub chi2_allstars: f64,
    pub chi2_giants: f64,
    bins: Vec<SightLineBin>,
    line: usize,
}

impl SightLineProfile {
    /// Build a profile from already parsed values, applying the trailing-bin
    /// repair and validating the result.
    pub fn from_bins(
        l_deg: f64,
        b_deg: f64,
        chi2_allstars: f64,
        chi2_giants: f64,
        mut bins: Vec<SightLineBin>,
        line: usize,
    ) -> Result<Self> {
        if repair_trailing_bin(&mut bins) {
            log::warn!(
                "Sight line {line} ({l_deg:.3}, {b_deg:.3}): far edges not monotonic, dropped last bin"
            );
        }

        let malformed = |reason: &str| ExtinctionError::MalformedProfile {
            line,
            reason: reason.to_string(),
        };

        if bins.is_empty() {
            return Err(malformed("profile has no bins"));
        }
        if bins.iter().any(|bin| !bin.far_edge.is_finite()) {
            return Err(malformed("non-finite far edge"));
        }
        if !far_edges_monotonic(&bins) {
            return Err(malformed("far edges not monotonic after repair"));
        }

        Ok(Self {
            l_deg,
            b_deg,
            chi2_allstars,
            chi2_giants,
            bins,
            line,
        })
    }

    /// Parse one backing-table row. `line` is only used for error reporting.
    pub fn parse(row: &str, line: usize) -> Result<Self> {
        let values = split_fields(row)
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|_| ExtinctionError::MalformedProfile {
                        line,
                        reason: format!("non-numeric field '{field}'"),
                    })
            })
            .collect::<Result<Vec<f64>>>()?;

        if values.len() < HEADER_FIELDS {
            return Err(ExtinctionError::MalformedProfile {
                line,
                reason: format!(
                    "expected at least {HEADER_FIELDS} header fields, found {}",
                    values.len()
                ),
            });
        }

        let (header, bin_block) = values.split_at(HEADER_FIELDS);
        if bin_block.len() % BIN_FIELDS != 0 {
            return Err(ExtinctionError::MalformedProfile {
                line,
                reason: format!(
                    "bin block of {} values is not a multiple of {BIN_FIELDS}",
                    bin_block.len()
                ),
            });
        }

        let bins: Vec<SightLineBin> = bin_block
            .chunks_exact(BIN_FIELDS)
            .map(|chunk| SightLineBin::new(chunk[0], chunk[1], chunk[2], chunk[3]))
            .collect();

        let declared = header[4];
        if declared != bins.len() as f64 {
            log::warn!(
                "Sight line {line}: declares {declared} bins but row holds {}",
                bins.len()
            );
        }

        Self::from_bins(header[0], header[1], header[2], header[3], bins, line)
    }

    /// Number of usable bins after repair
    pub fn number_of_bins(&self) -> usize {
        self.bins.len()
    }

    pub fn bins(&self) -> &[SightLineBin] {
        &self.bins
    }

    /// Bin by 0-based index
    pub fn bin(&self, index: usize) -> Option<&SightLineBin> {
        self.bins.get(index)
    }

    /// Far edges in distance order
    pub fn far_edges(&self) -> Vec<f64> {
        self.bins.iter().map(|bin| bin.far_edge).collect()
    }

    /// Outermost far edge; extinction is held constant beyond it
    pub fn max_distance(&self) -> f64 {
        self.bins.last().map(|bin| bin.far_edge).unwrap_or(0.0)
    }

    /// 1-based line number this profile was read from
    pub fn line(&self) -> usize {
        self.line
    }
}

fn far_edges_monotonic(bins: &[SightLineBin]) -> bool {
    bins.windows(2).all(|pair| pair[1].far_edge >= pair[0].far_edge)
}

/// Drop the last bin when the far edges are not monotonic.
///
/// A handful of published rows end with a bin whose far edge is smaller than
/// the previous one while reporting a larger extinction.
fn repair_trailing_bin(bins: &mut Vec<SightLineBin>) -> bool {
    if far_edges_monotonic(bins) {
        return false;
    }
    bins.pop();
    true
}
