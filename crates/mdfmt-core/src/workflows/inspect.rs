use super::FileFormat;
use crate::core::io::config::{FrameSelection, LammpsReadConfig};
use crate::core::io::error::Result;
use crate::core::io::format::Format;
use crate::core::io::lammps::LammpsDataFile;
use crate::core::io::xyz::XyzFile;
use crate::core::models::lammps::{Section, TypeCounts};
use std::fmt;
use std::path::Path;
use tracing::{debug, instrument};

/// What [`run`] found in a file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSummary {
    Frames {
        format: Format,
        frames: usize,
        /// Atom count of the last frame, `0` for an empty trajectory.
        atoms_in_last_frame: usize,
    },
    Lammps {
        /// Present sections with their row counts.
        sections: Vec<(Section, usize)>,
        types: Option<TypeCounts>,
    },
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSummary::Frames {
                format,
                frames,
                atoms_in_last_frame,
            } => {
                writeln!(f, "Format: {}", format)?;
                writeln!(f, "Frames: {}", frames)?;
                write!(f, "Atoms in last frame: {}", atoms_in_last_frame)
            }
            FileSummary::Lammps { sections, types } => {
                write!(f, "Format: LAMMPS")?;
                for (section, rows) in sections {
                    write!(f, "\n{:<10} {}", section.name(), rows)?;
                }
                if let Some(types) = types {
                    for (count, keyword) in types.as_array().iter().zip(TypeCounts::KEYWORDS) {
                        write!(f, "\n{:<16} {}", keyword, count)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Summarizes the file at `path`.
///
/// Data files are read with every section requested and absent ones skipped;
/// `header_scan_limit` bounds the `Box` and `Types` search as for a regular read.
#[instrument(skip_all, name = "inspect_workflow", fields(path = %path.display()))]
pub fn run(
    path: &Path,
    format: Option<FileFormat>,
    header_scan_limit: usize,
) -> Result<FileSummary> {
    let summary = match FileFormat::resolve(format, path)? {
        FileFormat::Frame(format @ Format::Xyz) => {
            let frames = XyzFile::count_frames_in_path(path)?;
            let atoms_in_last_frame = if frames == 0 {
                0
            } else {
                XyzFile::read_from_path(path, FrameSelection::Last)?.len()
            };
            FileSummary::Frames {
                format,
                frames,
                atoms_in_last_frame,
            }
        }
        FileFormat::Lammps => {
            let config = LammpsReadConfig {
                header_scan_limit,
                skip_missing_sections: true,
                ..LammpsReadConfig::default()
            };
            let data = LammpsDataFile::read_from_path(path, &config)?;
            FileSummary::Lammps {
                sections: data
                    .summary()
                    .into_iter()
                    .filter(|(s, _)| *s != Section::Types)
                    .collect(),
                types: data.types,
            }
        }
    };
    debug!("{:?}", summary);
    Ok(summary)
}
