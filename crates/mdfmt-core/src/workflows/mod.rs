//! # Workflows Module
//!
//! End-to-end operations built on the codecs of [`crate::core::io`].
//!
//! ## Architecture
//!
//! - **Conversion** ([`convert`]) - Reads one file and writes its content in another
//!   format, extracting a single frame from trajectories or the Atoms section from
//!   LAMMPS data files.
//! - **Inspection** ([`inspect`]) - Summarizes a file without converting it: frame and
//!   atom counts for trajectories, per-section row counts for data files.
//!
//! Both workflows identify files by [`FileFormat`], inferred from the file extension
//! unless the caller names it explicitly.

use crate::core::io::error::Error;
use crate::core::io::format::Format;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub mod convert;
pub mod inspect;

const LAMMPS_TOKENS: [&str; 3] = ["lammps", "lmp", "data"];

/// Every file kind a workflow can read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// A single-section frame format handled through [`Format`].
    Frame(Format),
    /// A LAMMPS `full` style data file.
    Lammps,
}

impl FileFormat {
    /// Infers the file kind from the extension of `path`.
    ///
    /// `.lmp`, `.data` and `.lammps` name data files; any other extension is resolved
    /// as a frame format.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
        extension.parse()
    }

    /// Returns `explicit` when given, otherwise the kind inferred from `path`.
    pub fn resolve(explicit: Option<Self>, path: &Path) -> Result<Self, Error> {
        match explicit {
            Some(format) => Ok(format),
            None => Self::from_path(path),
        }
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Error> {
        let lowered = token.trim().to_ascii_lowercase();
        if LAMMPS_TOKENS.contains(&lowered.as_str()) {
            return Ok(FileFormat::Lammps);
        }
        token.parse().map(FileFormat::Frame)
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Frame(format) => write!(f, "{}", format),
            FileFormat::Lammps => write!(f, "LAMMPS"),
        }
    }
}
