//! Error types for extinction map operations

use thiserror::Error;

/// Errors raised while resolving, loading or querying sight lines
#[derive(Error, Debug)]
pub enum ExtinctionError {
    /// The resolved line number has no row in the backing table
    #[error("Sight line {line} not found: backing table has {rows} rows")]
    ProfileNotFound { line: usize, rows: usize },

    /// A row was found but cannot be used as a profile
    #[error("Malformed sight line profile on line {line}: {reason}")]
    MalformedProfile { line: usize, reason: String },

    /// Distances must be finite and non-negative
    #[error("Invalid line-of-sight distance: {0} (must be >= 0)")]
    InvalidDistance(f64),

    #[error("Invalid sight-line coordinates: l = {l_deg}, b = {b_deg}")]
    InvalidCoordinates { l_deg: f64, b_deg: f64 },

    #[error("No sight line has been set on this extinction map")]
    NoSightLine,

    #[error("Invalid reference grid: {0}")]
    InvalidReferenceGrid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ExtinctionError>;
