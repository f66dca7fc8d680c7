//! Random-access reader for the backing sight-line table
//!
//! The backing table holds one sight line per row. Rows can hold dozens of
//! bins, so only byte offsets are kept in memory and a single row is read
//! back on demand.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::{ExtinctionError, Result};
use crate::profile::SightLineProfile;

/// Field delimiter of both the backing table and the coordinate file
pub(crate) const DELIMITER: char = ',';

/// Rows that carry data: not blank and not a `#` comment.
pub(crate) fn is_data_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Split a row into trimmed fields, ignoring trailing delimiters.
pub(crate) fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.trim()
        .trim_end_matches(DELIMITER)
        .split(DELIMITER)
        .map(str::trim)
}

/// Byte-offset index over the data rows of a backing table file
#[derive(Debug, Clone)]
pub struct SightLineTable {
    path: PathBuf,
    /// Start offset of every data row, in row order
    line_offsets: Vec<u64>,
}

impl SightLineTable {
    /// Scan the file once and record where each data row starts.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut reader = BufReader::new(File::open(&path)?);

        let mut line_offsets = Vec::new();
        let mut offset = 0u64;
        let mut buf = String::new();

        loop {
            buf.clear();
            let read = reader.read_line(&mut buf)?;
            if read == 0 {
                break;
            }
            if is_data_line(&buf) {
                line_offsets.push(offset);
            }
            offset += read as u64;
        }

        Ok(Self { path, line_offsets })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.line_offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_offsets.is_empty()
    }

    /// Read one row by its 1-based line number.
    pub fn fetch_line(&self, line: usize) -> Result<String> {
        let offset = line
            .checked_sub(1)
            .and_then(|index| self.line_offsets.get(index))
            .copied()
            .ok_or(ExtinctionError::ProfileNotFound {
                line,
                rows: self.len(),
            })?;

        let mut reader = BufReader::new(File::open(&self.path)?);
        reader.seek(SeekFrom::Start(offset))?;

        let mut row = String::new();
        reader.read_line(&mut row)?;
        Ok(row.trim_end().to_string())
    }

    /// Fetch, parse and repair the profile stored on `line` (1-based).
    pub fn load_profile(&self, line: usize) -> Result<SightLineProfile> {
        let row = self.fetch_line(line)?;
        SightLineProfile::parse(&row, line)
    }
}
