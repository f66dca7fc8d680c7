//! Reference grid of sight-line coordinates and nearest-neighbour lookup

use std::fs;
use std::path::Path;

use crate::error::{ExtinctionError, Result};
use crate::table::{is_data_line, split_fields};

/// Galactic (l, b) of every precomputed sight line, in backing-table order
#[derive(Debug, Clone)]
pub struct ReferenceGrid {
    coords: Vec<(f64, f64)>,
    /// Longitude spacing of the grid in degrees
    l_stepsize: f64,
}

impl ReferenceGrid {
    /// Build a grid from coordinate pairs.
    ///
    /// When `l_stepsize` is `None` it is taken as the longitude difference of
    /// the first two entries (0 for a single entry).
    pub fn new(coords: Vec<(f64, f64)>, l_stepsize: Option<f64>) -> Result<Self> {
        if coords.is_empty() {
            return Err(ExtinctionError::InvalidReferenceGrid(
                "grid has no sight lines".to_string(),
            ));
        }
        if let Some(index) = coords
            .iter()
            .position(|(l, b)| !l.is_finite() || !b.is_finite())
        {
            return Err(ExtinctionError::InvalidReferenceGrid(format!(
                "non-finite coordinate on line {}",
                index + 1
            )));
        }

        let l_stepsize = l_stepsize.unwrap_or(match coords.as_slice() {
            [first, second, ..] => second.0 - first.0,
            _ => 0.0,
        });

        Ok(Self { coords, l_stepsize })
    }

    /// Load the first two columns of every data row of a delimited file.
    ///
    /// Works for a dedicated two-column coordinate file as well as for the
    /// backing table itself, whose rows also start with (l, b).
    pub fn load<P: AsRef<Path>>(path: P, l_stepsize: Option<f64>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;

        let coords = contents
            .lines()
            .filter(|line| is_data_line(line))
            .enumerate()
            .map(|(index, line)| parse_coordinate_pair(line, index + 1))
            .collect::<Result<Vec<_>>>()?;

        Self::new(coords, l_stepsize)
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn l_stepsize(&self) -> f64 {
        self.l_stepsize
    }

    pub fn coords(&self) -> &[(f64, f64)] {
        &self.coords
    }

    /// Coordinates of a 1-based line number
    pub fn coordinates(&self, line: usize) -> Option<(f64, f64)> {
        line.checked_sub(1)
            .and_then(|index| self.coords.get(index))
            .copied()
    }

    /// Map a longitude onto the branch the grid uses around the 0/360 seam.
    ///
    /// Longitudes beyond `180 - l_stepsize / 2` are shifted down by 360.
    pub fn wrap_longitude(&self, l_deg: f64) -> f64 {
        if l_deg > 180.0 - self.l_stepsize / 2.0 {
            l_deg - 360.0
        } else {
            l_deg
        }
    }

    /// 1-based line number of the grid point closest to `query`.
    ///
    /// Distances are planar in (l, b) degrees, after the query longitude is
    /// moved onto the grid's branch with [`wrap_longitude`](Self::wrap_longitude).
    /// Ties go to the earlier line.
    ///
    /// # Arguments
    /// * `query` - Requested (l, b) in degrees; `None` resolves against the
    ///   origin (0, 0) without wrapping
    ///
    /// # Returns
    /// Line number in `1..=self.len()`, usable with [`coordinates`](Self::coordinates)
    /// and as the backing-table row.
    pub fn find_nearest(&self, query: Option<(f64, f64)>) -> usize {
        let (l_deg, b_deg) = match query {
            Some((l_deg, b_deg)) => (self.wrap_longitude(l_deg), b_deg),
            None => (0.0, 0.0),
        };

        let mut nearest = 0;
        let mut nearest_dist = f64::INFINITY;
        for (index, &(grid_l, grid_b)) in self.coords.iter().enumerate() {
            let dist = (grid_l - l_deg).hypot(grid_b - b_deg);
            if dist < nearest_dist {
                nearest = index;
                nearest_dist = dist;
            }
        }

        nearest + 1
    }
}

fn parse_coordinate_pair(line: &str, line_number: usize) -> Result<(f64, f64)> {
    let mut fields = split_fields(line).map(|field| field.parse::<f64>());
    match (fields.next(), fields.next()) {
        (Some(Ok(l_deg)), Some(Ok(b_deg))) => Ok((l_deg, b_deg)),
        _ => Err(ExtinctionError::InvalidReferenceGrid(format!(
            "line {line_number} does not start with two numeric coordinates"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_helpers::write_fixture;

    fn seam_grid() -> ReferenceGrid {
        let coords = (-2..=2)
            .flat_map(|i| [(i as f64 * 0.5, -0.5), (i as f64 * 0.5, 0.5)])
            .collect();
        ReferenceGrid::new(coords, Some(0.5)).unwrap()
    }

    #[test]
    fn test_stepsize_inferred_from_first_rows() {
        let grid = ReferenceGrid::new(vec![(10.0, 0.0), (20.0, 0.0)], None).unwrap();
        assert_relative_eq!(grid.l_stepsize(), 10.0);

        let single = ReferenceGrid::new(vec![(10.0, 0.0)], None).unwrap();
        assert_eq!(single.l_stepsize(), 0.0);
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(matches!(
            ReferenceGrid::new(vec![], None),
            Err(ExtinctionError::InvalidReferenceGrid(_))
        ));
    }

    #[test]
    fn test_find_nearest_is_one_based() {
        let grid = ReferenceGrid::new(vec![(10.0, 0.0), (20.0, 0.0)], None).unwrap();
        assert_eq!(grid.find_nearest(Some((11.0, 0.5))), 1);
        assert_eq!(grid.find_nearest(Some((19.0, -0.5))), 2);
        assert_eq!(grid.coordinates(2), Some((20.0, 0.0)));
        assert_eq!(grid.coordinates(0), None);
    }

    #[test]
    fn test_tie_resolves_to_first_line() {
        let grid = ReferenceGrid::new(vec![(10.0, 0.0), (20.0, 0.0)], None).unwrap();
        assert_eq!(grid.find_nearest(Some((15.0, 0.0))), 1);
    }

    #[test]
    fn test_uninitialized_query_uses_origin() {
        let grid = ReferenceGrid::new(vec![(5.0, 5.0), (0.5, -0.5), (-3.0, 0.0)], None).unwrap();
        assert_eq!(grid.find_nearest(None), 2);
    }

    #[test]
    fn test_wraparound_at_seam() {
        let grid = seam_grid();
        let east = grid.find_nearest(Some((359.9, 0.1)));
        let west = grid.find_nearest(Some((-0.1, 0.1)));
        assert_eq!(east, west);

        assert_eq!(grid.coordinates(east), Some((0.0, 0.5)));
    }

    #[test]
    fn test_wrap_longitude_threshold() {
        let grid = ReferenceGrid::new(vec![(0.0, 0.0), (10.0, 0.0)], None).unwrap();
        assert_eq!(grid.wrap_longitude(175.0), 175.0);
        assert_eq!(grid.wrap_longitude(176.0), -184.0);
        assert_eq!(grid.wrap_longitude(350.0), -10.0);
    }

    #[test]
    fn test_load_first_two_columns() {
        let path = write_fixture(
            "grid/load_two_columns.csv",
            "# l,b\n-1.0,0.5,9,9\n1.0,0.5\n\n3.0,0.5,1\n",
        );
        let grid = ReferenceGrid::load(&path, None).unwrap();

        assert_eq!(grid.len(), 3);
        assert_eq!(grid.coords()[0], (-1.0, 0.5));
        assert_relative_eq!(grid.l_stepsize(), 2.0);
    }

    #[test]
    fn test_load_rejects_bad_row() {
        let path = write_fixture("grid/bad_row.csv", "1.0,0.5\nfoo,0.5\n");
        match ReferenceGrid::load(&path, None) {
            Err(ExtinctionError::InvalidReferenceGrid(reason)) => assert!(reason.contains("line 2")),
            other => panic!("Expected InvalidReferenceGrid, got {other:?}"),
        }
    }
}
