use super::FileFormat;
use crate::core::io::config::{LammpsReadConfig, XyzReadConfig};
use crate::core::io::error::Error;
use crate::core::io::format::Formatter;
use crate::core::io::lammps::LammpsDataFile;
use crate::core::models::frame::MolecularFrame;
use crate::core::models::lammps::Section;
use crate::core::models::section::AtomsSection;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Io(#[from] Error),

    #[error("Conversion from {from} to {to} is not supported: {reason}")]
    Unsupported {
        from: FileFormat,
        to: FileFormat,
        reason: &'static str,
    },
}

/// Options of a conversion. Formats left unset are inferred from file extensions.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub from: Option<FileFormat>,
    pub to: Option<FileFormat>,
    pub xyz: XyzReadConfig,
    pub lammps: LammpsReadConfig,
}

/// What a conversion read and wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub from: FileFormat,
    pub to: FileFormat,
    /// Row counts of the written content, by section.
    pub written: Vec<(Section, usize)>,
}

/// Reads `input` and writes its content to `output`.
///
/// - frame format to frame format: the selected frame is extracted.
/// - LAMMPS to frame format: the `Atoms` section becomes a single frame.
/// - LAMMPS to LAMMPS: the requested sections are rewritten in normalized form.
///
/// Frame formats carry no type counts, so they cannot be turned into data files.
#[instrument(skip_all, name = "convert_workflow", fields(input = %input.display(), output = %output.display()))]
pub fn run(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConvertReport, ConvertError> {
    let from = FileFormat::resolve(options.from, input)?;
    let to = FileFormat::resolve(options.to, output)?;
    info!("Converting {} to {}.", from, to);

    let written = match (from, to) {
        (FileFormat::Frame(source), FileFormat::Frame(target)) => {
            let mut frame = MolecularFrame::new();
            Formatter::for_format(&mut frame, source).read(input, options.xyz.frame)?;
            Formatter::for_format(&mut frame, target).write(output)?;
            atoms_summary(&frame)
        }
        (FileFormat::Lammps, FileFormat::Frame(target)) => {
            let config = LammpsReadConfig {
                sections: vec![Section::Atoms],
                skip_missing_sections: false,
                ..options.lammps.clone()
            };
            let data = LammpsDataFile::read_from_path(input, &config)?;
            let atoms = data.atoms.ok_or_else(|| {
                Error::SectionNotFound {
                    section: Section::Atoms,
                }
                .in_file(input)
            })?;
            let mut frame = MolecularFrame::from(AtomsSection::from(atoms));
            Formatter::for_format(&mut frame, target).write(output)?;
            atoms_summary(&frame)
        }
        (FileFormat::Lammps, FileFormat::Lammps) => {
            let data = LammpsDataFile::read_from_path(input, &options.lammps)?;
            LammpsDataFile::write_to_path(&data, output)?;
            data.summary()
        }
        (FileFormat::Frame(_), FileFormat::Lammps) => {
            return Err(ConvertError::Unsupported {
                from,
                to,
                reason: "frames carry no type counts",
            });
        }
    };

    info!("Wrote {:?} to '{}'.", written, output.display());
    Ok(ConvertReport { from, to, written })
}

fn atoms_summary(frame: &MolecularFrame) -> Vec<(Section, usize)> {
    vec![(Section::Atoms, frame.atoms().map_or(0, AtomsSection::len))]
}
