//! Test helpers for the synthetic population workspace
//!
//! Sight-line tables, coordinate files and population configurations used by
//! tests are written as fixtures under `<workspace>/test_output/fixtures/`.

use once_cell::sync::Lazy;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for test helper operations
#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    #[error("Workspace root not found above {0}")]
    WorkspaceRootNotFound(PathBuf),

    #[error("I/O error while locating the workspace: {0}")]
    Io(#[from] std::io::Error),
}

/// Locate the workspace root.
///
/// Walks up from the current directory to the first `Cargo.toml` that
/// declares a `[workspace]` table. Member crates only inherit from the
/// workspace, so their manifests never match.
///
/// # Returns
/// * `Ok(PathBuf)` - Directory holding the workspace manifest
/// * `Err(TestHelperError)` - No such manifest above the current directory
pub fn workspace_root() -> Result<PathBuf, TestHelperError> {
    let start = env::current_dir()?;

    for dir in start.ancestors() {
        let manifest = dir.join("Cargo.toml");
        if manifest.is_file() && fs::read_to_string(&manifest)?.contains("[workspace]") {
            return Ok(dir.to_path_buf());
        }
    }

    Err(TestHelperError::WorkspaceRootNotFound(start))
}

static FIXTURE_DIR: Lazy<PathBuf> = Lazy::new(|| {
    let dir = workspace_root()
        .expect("Failed to find workspace root")
        .join("test_output")
        .join("fixtures");
    fs::create_dir_all(&dir).expect("Failed to create fixture directory");
    dir
});

/// Directory all fixtures are written to, created on first use.
pub fn fixture_dir() -> &'static Path {
    &FIXTURE_DIR
}

/// Path of a fixture, without creating it.
///
/// # Arguments
/// * `name` - Path relative to [`fixture_dir`], may contain subdirectories
pub fn fixture_path<P: AsRef<Path>>(name: P) -> PathBuf {
    fixture_dir().join(name)
}

/// Write a text fixture and return its path.
///
/// Tests run in parallel and share the fixture directory, so every test
/// should use a name of its own.
///
/// # Arguments
/// * `name` - Path relative to [`fixture_dir`]; missing subdirectories are created
/// * `contents` - Full file contents
///
/// # Returns
/// * `PathBuf` - Absolute path of the written file
pub fn write_fixture<P: AsRef<Path>>(name: P, contents: &str) -> PathBuf {
    let path = fixture_path(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

/// Format one backing-table row.
///
/// Chi-squared columns are filled with 1.0 and the declared bin count
/// matches `bins`.
///
/// # Arguments
/// * `l_deg`, `b_deg` - Sight-line coordinates
/// * `bins` - `(far_edge, far_edge_err, extinction, extinction_err)` per bin
pub fn sight_line_row(l_deg: f64, b_deg: f64, bins: &[(f64, f64, f64, f64)]) -> String {
    let mut row = format!("{l_deg},{b_deg},1.0,1.0,{}", bins.len());
    for (edge, edge_err, value, value_err) in bins {
        let _ = write!(row, ",{edge},{edge_err},{value},{value_err}");
    }
    row.push('\n');
    row
}
