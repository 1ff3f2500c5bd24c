use super::config::FrameSelection;
use super::error::{Error, Result};
use super::lines::NumberedLines;
use super::traits::FrameFormat;
use crate::core::models::atom::Atom;
use crate::core::models::section::AtomsSection;
use nalgebra::Point3;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, instrument, trace};

/// Whether the frame currently being scanned is decoded or merely consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Skipping,
    Decoding,
}

impl ScanState {
    fn for_frame(selection: FrameSelection, frame: usize) -> Self {
        match selection {
            FrameSelection::Last => ScanState::Decoding,
            FrameSelection::Index(target) if target.get() == frame => ScanState::Decoding,
            FrameSelection::Index(_) => ScanState::Skipping,
        }
    }
}

/// Reader and writer for the plain XYZ trajectory format.
///
/// Every frame is an atom count line, a comment line and one `label x y z` line per
/// atom. Columns after `z` are ignored on input.
pub struct XyzFile;

impl XyzFile {
    /// Decodes the selected frame of an XYZ stream.
    ///
    /// Frames before the selected one are skipped without decoding their atom lines.
    /// With [`FrameSelection::Last`] every frame is decoded and the last one wins.
    pub fn read_from<R: BufRead + ?Sized>(
        reader: &mut R,
        selection: FrameSelection,
    ) -> Result<AtomsSection> {
        let mut lines = NumberedLines::new(reader);
        let mut frame = 0;
        let mut selected = None;

        while let Some(n_atoms) = read_frame_header(&mut lines, frame + 1)? {
            frame += 1;
            match ScanState::for_frame(selection, frame) {
                ScanState::Skipping => {
                    trace!("Skipping frame {} ({} atoms).", frame, n_atoms);
                    skip_atom_lines(&mut lines, n_atoms, frame)?;
                }
                ScanState::Decoding => {
                    trace!("Decoding frame {} ({} atoms).", frame, n_atoms);
                    selected = Some(decode_atom_lines(&mut lines, n_atoms, frame)?);
                    if matches!(selection, FrameSelection::Index(_)) {
                        break;
                    }
                }
            }
        }

        selected.ok_or_else(|| Error::FrameNotFound {
            requested: selection.to_string(),
            available: frame,
        })
    }

    /// Counts the frames of an XYZ stream without decoding any atom line.
    pub fn count_frames<R: BufRead + ?Sized>(reader: &mut R) -> Result<usize> {
        let mut lines = NumberedLines::new(reader);
        let mut frame = 0;
        while let Some(n_atoms) = read_frame_header(&mut lines, frame + 1)? {
            frame += 1;
            skip_atom_lines(&mut lines, n_atoms, frame)?;
        }
        Ok(frame)
    }

    /// Writes `section` as a single frame with an empty comment line.
    pub fn write_to<W: Write + ?Sized>(section: &AtomsSection, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", section.len())?;
        writeln!(writer)?;
        for atom in section {
            writeln!(
                writer,
                "{} {:.6} {:.6} {:.6}",
                atom.label, atom.position.x, atom.position.y, atom.position.z
            )?;
        }
        Ok(())
    }

    #[instrument(skip_all, name = "xyz_read", fields(path = %path.display(), frame = %selection))]
    pub fn read_from_path(path: &Path, selection: FrameSelection) -> Result<AtomsSection> {
        let file = File::open(path).map_err(|e| Error::from(e).in_file(path))?;
        let mut reader = BufReader::new(file);
        let section = Self::read_from(&mut reader, selection).map_err(|e| e.in_file(path))?;
        debug!("Read {} atoms.", section.len());
        Ok(section)
    }

    #[instrument(skip_all, name = "xyz_count_frames", fields(path = %path.display()))]
    pub fn count_frames_in_path(path: &Path) -> Result<usize> {
        let file = File::open(path).map_err(|e| Error::from(e).in_file(path))?;
        let mut reader = BufReader::new(file);
        Self::count_frames(&mut reader).map_err(|e| e.in_file(path))
    }

    #[instrument(skip_all, name = "xyz_write", fields(path = %path.display()))]
    pub fn write_to_path(section: &AtomsSection, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::from(e).in_file(path))?;
        let mut writer = BufWriter::new(file);
        Self::write_to(section, &mut writer)
            .and_then(|()| writer.flush().map_err(Error::from))
            .map_err(|e| e.in_file(path))?;
        debug!("Wrote {} atoms.", section.len());
        Ok(())
    }
}

impl FrameFormat for XyzFile {
    fn name(&self) -> &'static str {
        "XYZ"
    }

    fn read_frame(
        &self,
        reader: &mut dyn BufRead,
        selection: FrameSelection,
    ) -> Result<AtomsSection> {
        Self::read_from(reader, selection)
    }

    fn write_frame(&self, section: &AtomsSection, writer: &mut dyn Write) -> Result<()> {
        Self::write_to(section, writer)
    }
}

/// Reads the atom count and comment line of the next frame.
///
/// Returns `None` at end of stream. Blank lines before the count line are skipped.
fn read_frame_header<R: BufRead + ?Sized>(
    lines: &mut NumberedLines<'_, R>,
    frame: usize,
) -> Result<Option<usize>> {
    let (line_num, count_line) = loop {
        match lines.next().transpose()? {
            None => return Ok(None),
            Some((_, line)) if line.trim().is_empty() => continue,
            Some(numbered) => break numbered,
        }
    };

    let n_atoms = count_line.trim().parse::<usize>().map_err(|_| {
        Error::format(
            format!("XYZ frame {} atom count", frame),
            line_num,
            format!("expected a non-negative integer, got '{}'", count_line.trim()),
        )
    })?;

    if lines.next().transpose()?.is_none() {
        return Err(Error::unexpected_eof(
            format!("XYZ frame {} comment line", frame),
            line_num,
        ));
    }
    Ok(Some(n_atoms))
}

fn skip_atom_lines<R: BufRead + ?Sized>(
    lines: &mut NumberedLines<'_, R>,
    n_atoms: usize,
    frame: usize,
) -> Result<()> {
    for _ in 0..n_atoms {
        if lines.next().transpose()?.is_none() {
            return Err(Error::unexpected_eof(
                format!("XYZ frame {} ({} atoms declared)", frame, n_atoms),
                lines.line_number(),
            ));
        }
    }
    Ok(())
}

fn decode_atom_lines<R: BufRead + ?Sized>(
    lines: &mut NumberedLines<'_, R>,
    n_atoms: usize,
    frame: usize,
) -> Result<AtomsSection> {
    let mut section = AtomsSection::new();
    for index in 0..n_atoms {
        let Some((line_num, line)) = lines.next().transpose()? else {
            return Err(Error::unexpected_eof(
                format!("XYZ frame {} ({} atoms declared)", frame, n_atoms),
                lines.line_number(),
            ));
        };
        section.add_atom(parse_atom_line(&line, line_num, index + 1, frame)?);
    }
    Ok(section)
}

fn parse_atom_line(line: &str, line_num: usize, atom_id: usize, frame: usize) -> Result<Atom> {
    let context = || format!("XYZ frame {} atom line", frame);
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(Error::format(
            context(),
            line_num,
            format!("expected 'label x y z', got '{}'", line.trim()),
        ));
    }

    let mut coords = [0.0; 3];
    for (coord, (axis, token)) in coords.iter_mut().zip(["x", "y", "z"].iter().zip(&tokens[1..4])) {
        *coord = token.parse().map_err(|_| {
            Error::format(
                context(),
                line_num,
                format!("invalid {} coordinate '{}'", axis, token),
            )
        })?;
    }

    Ok(Atom::new(
        atom_id,
        tokens[0],
        Point3::new(coords[0], coords[1], coords[2]),
    ))
}
