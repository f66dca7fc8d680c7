//! Interstellar extinction lookup along galactic sight lines
//!
//! Extinction maps are stored as a table of precomputed sight lines, each a
//! sequence of radial bins with a cumulative extinction value. This crate
//! resolves the sight line nearest to a requested (l, b), loads that single
//! row from disk, and answers "extinction out to distance d" queries through
//! a bin cursor that only moves when a query crosses a bin boundary.
//!
//! ```no_run
//! use extinction::{ExtinctionMapConfig, SightLineTableConfig};
//!
//! let config = ExtinctionMapConfig::Surot(SightLineTableConfig {
//!     table_path: "surot_A_Ks_table1.csv".into(),
//!     coords_path: None,
//!     l_stepsize: None,
//! });
//! let mut map = config.build()?;
//! let (a_ks, a_ks_err) = map.extinction_at(1.0, -2.0, 8.0)?;
//! # Ok::<(), extinction::ExtinctionError>(())
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod grid;
pub mod map;
pub mod profile;
pub mod properties;
pub mod table;

pub use cache::{CachedQueryState, SightLineCache};
pub use config::{ExtinctionMapConfig, SightLineTableConfig};
pub use error::{ExtinctionError, Result};
pub use grid::ReferenceGrid;
pub use map::{ExtinctionMap, SightLineSource};
pub use profile::{SightLineBin, SightLineProfile};
pub use properties::{ExtinctionQuantity, MapProperties};
pub use table::SightLineTable;
