use super::config::FrameSelection;
use super::error::{Error, Result};
use super::traits::FrameFormat;
use super::xyz::XyzFile;
use crate::core::models::frame::MolecularFrame;
use crate::core::models::lammps::Section;
use phf::{Map, phf_map};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, instrument};

/// The frame formats that can be chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Xyz,
}

static FORMAT_TOKENS: Map<&'static str, Format> = phf_map! {
    "xyz" => Format::Xyz,
};

impl Format {
    /// Infers the format from the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;
        extension.parse()
    }

    /// Creates the codec implementing this format.
    pub fn formatter(self) -> Box<dyn FrameFormat> {
        match self {
            Format::Xyz => Box::new(XyzFile),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        FORMAT_TOKENS
            .get(token.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| Error::UnsupportedFormat(token.to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Xyz => write!(f, "XYZ"),
        }
    }
}

/// A frame format bound to the frame it fills on read and serializes on write.
///
/// A successful read replaces the frame's atoms section as a whole.
pub struct Formatter<'a> {
    frame: &'a mut MolecularFrame,
    format: Box<dyn FrameFormat>,
}

impl<'a> Formatter<'a> {
    /// Resolves `token` to a format and binds it to `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] when `token` names no known format.
    pub fn make(frame: &'a mut MolecularFrame, token: &str) -> Result<Self> {
        let format: Format = token.parse()?;
        Ok(Self::for_format(frame, format))
    }

    pub fn for_format(frame: &'a mut MolecularFrame, format: Format) -> Self {
        Self {
            frame,
            format: format.formatter(),
        }
    }

    pub fn format_name(&self) -> &'static str {
        self.format.name()
    }

    pub fn frame(&self) -> &MolecularFrame {
        self.frame
    }

    /// Reads the selected frame of `path` into the bound frame's atoms section.
    #[instrument(skip_all, name = "formatter_read", fields(format = self.format.name(), path = %path.display()))]
    pub fn read(&mut self, path: &Path, selection: FrameSelection) -> Result<()> {
        let section = self.format.read_frame_from_path(path, selection)?;
        debug!("Read {} atoms.", section.len());
        self.frame.set_section(section);
        Ok(())
    }

    /// Writes the bound frame's atoms section to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSection`] without creating the file when the frame holds
    /// no atoms section.
    #[instrument(skip_all, name = "formatter_write", fields(format = self.format.name(), path = %path.display()))]
    pub fn write(&self, path: &Path) -> Result<()> {
        let section = self.frame.atoms().ok_or_else(|| {
            Error::MissingSection {
                section: Section::Atoms,
                details: "the frame holds no atoms to write",
            }
            .in_file(path)
        })?;
        self.format.write_frame_to_path(section, path)?;
        debug!("Wrote {} atoms.", section.len());
        Ok(())
    }
}
