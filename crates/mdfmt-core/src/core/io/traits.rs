use super::config::FrameSelection;
use super::error::{Error, Result};
use crate::core::models::section::AtomsSection;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for formats that store a single atoms section per frame.
///
/// The trait is object safe so that a format can be chosen at runtime from a name
/// (see [`Format`](super::format::Format)) and used through a `Box<dyn FrameFormat>`.
pub trait FrameFormat {
    /// A short human readable name of the format (e.g., `"XYZ"`).
    fn name(&self) -> &'static str;

    /// Reads the selected frame from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `selection` - Which frame of the stream to decode.
    ///
    /// # Return
    ///
    /// Returns the atoms of the selected frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is malformed, truncated, or does not contain
    /// the selected frame.
    fn read_frame(&self, reader: &mut dyn BufRead, selection: FrameSelection)
    -> Result<AtomsSection>;

    /// Writes one frame holding `section` to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_frame(&self, section: &AtomsSection, writer: &mut dyn Write) -> Result<()>;

    /// Reads the selected frame from a file path.
    ///
    /// The file handle is released before returning, on success and on failure alike.
    /// Errors carry the path of the file.
    fn read_frame_from_path(&self, path: &Path, selection: FrameSelection) -> Result<AtomsSection> {
        let file = File::open(path).map_err(|e| Error::from(e).in_file(path))?;
        let mut reader = BufReader::new(file);
        self.read_frame(&mut reader, selection)
            .map_err(|e| e.in_file(path))
    }

    /// Writes one frame to a file path, creating or truncating the file.
    fn write_frame_to_path(&self, section: &AtomsSection, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::from(e).in_file(path))?;
        let mut writer = BufWriter::new(file);
        self.write_frame(section, &mut writer)
            .and_then(|()| writer.flush().map_err(Error::from))
            .map_err(|e| e.in_file(path))
    }
}
