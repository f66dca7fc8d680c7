//! Command-line arguments shared by the synthpop binaries

use std::fmt;
use std::str::FromStr;

use clap::Parser;

/// Parse a sight line given as "l,b" in degrees
pub fn parse_sight_line(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err("Sight line must be in format 'l,b'".to_string());
    }

    let l_deg = parts[0]
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid longitude value".to_string())?;
    let b_deg = parts[1]
        .trim()
        .parse::<f64>()
        .map_err(|_| "Invalid latitude value".to_string())?;

    if !l_deg.is_finite() || !b_deg.is_finite() {
        return Err("Sight line coordinates must be finite".to_string());
    }

    Ok((l_deg, b_deg))
}

/// Largest number of points a [`DistanceRange`] may expand to
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// Heliocentric distance grid "start:stop:step" in kpc, stop inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl FromStr for DistanceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            return Err("Distance range must be in format 'start:stop:step'".to_string());
        }

        let parse = |part: &str, what: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("Invalid {what} value"))
        };
        let start = parse(parts[0], "start")?;
        let stop = parse(parts[1], "stop")?;
        let step = parse(parts[2], "step")?;

        if !start.is_finite() || !stop.is_finite() || !step.is_finite() {
            return Err("Distance range values must be finite".to_string());
        }
        if start < 0.0 {
            return Err("Distances must be non-negative".to_string());
        }
        if step <= 0.0 {
            return Err("Step must be positive".to_string());
        }
        if start > stop {
            return Err("Start must not exceed stop".to_string());
        }
        if (stop - start) / step >= MAX_GRID_POINTS as f64 {
            return Err(format!("Distance grid exceeds {MAX_GRID_POINTS} points"));
        }

        Ok(Self { start, stop, step })
    }
}

impl fmt::Display for DistanceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.stop, self.step)
    }
}

impl DistanceRange {
    /// Grid values in increasing order
    pub fn to_vec(&self) -> Vec<f64> {
        // Small tolerance so a stop that is a multiple of step is kept
        let count = ((self.stop - self.start) / self.step + 1e-9).floor() as usize + 1;
        (0..count)
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }
}

/// Sight line and distance grid common to every binary
#[derive(Parser, Debug, Clone)]
pub struct SightLineArgs {
    /// Galactic sight line in degrees (format: "l,b")
    #[arg(long, default_value = "1.0,-3.0", value_parser = parse_sight_line, allow_hyphen_values = true)]
    pub sight_line: (f64, f64),

    /// Heliocentric distances in kpc (format: "start:stop:step")
    #[arg(long, default_value = "0.5:15.0:0.5")]
    pub distances: DistanceRange,
}
