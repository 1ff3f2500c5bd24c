use super::LammpsDataFile;
use crate::core::io::error::{Error, Result};
use crate::core::models::atom::Atom;
use crate::core::models::lammps::{
    LammpsData, Mass, Section, SimulationBox, Topology, TypeCounts,
};
use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, instrument};

impl LammpsDataFile {
    /// Writes `data` as a complete data file, titled with the current local time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSection`] before writing anything when `Types` is absent
    /// or when `Box` is present without all three axes.
    pub fn write_to<W: Write + ?Sized>(data: &LammpsData, writer: &mut W) -> Result<()> {
        let title = format!(
            "LAMMPS data file generated by mdfmt {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        Self::write_with_title(data, &title, writer)
    }

    /// Writes `data` with an explicit title line.
    pub fn write_with_title<W: Write + ?Sized>(
        data: &LammpsData,
        title: &str,
        writer: &mut W,
    ) -> Result<()> {
        let types = validate(data)?;

        writeln!(writer, "{}", title)?;

        for section in Section::COUNTED {
            if let Some(n) = data.row_count(section) {
                writeln!(writer, "{} {}", n, section.name().to_lowercase())?;
            }
        }
        for (count, keyword) in types.as_array().iter().zip(TypeCounts::KEYWORDS) {
            writeln!(writer, "{} {}", count, keyword)?;
        }
        if let Some(sim_box) = &data.simulation_box {
            write_box(sim_box, writer)?;
        }
        writeln!(writer, "\n")?;

        for section in Section::BLOCKS {
            write_section(writer, data, section)?;
        }

        Ok(())
    }

    /// Writes `data` to `path`, creating or truncating the file.
    ///
    /// Validation runs first, so no file is created when a required section is missing.
    #[instrument(skip_all, name = "lammps_write", fields(path = %path.display()))]
    pub fn write_to_path(data: &LammpsData, path: &Path) -> Result<()> {
        validate(data).map_err(|e| e.in_file(path))?;

        let file = File::create(path).map_err(|e| Error::from(e).in_file(path))?;
        let mut writer = BufWriter::new(file);
        Self::write_to(data, &mut writer)
            .and_then(|()| writer.flush().map_err(Error::from))
            .map_err(|e| e.in_file(path))?;
        debug!("Wrote sections: {:?}", data.summary());
        Ok(())
    }
}

fn validate(data: &LammpsData) -> Result<TypeCounts> {
    let types = data.types.ok_or(Error::MissingSection {
        section: Section::Types,
        details: "type counts are required to write a data file",
    })?;
    if data.simulation_box.is_some_and(|b| !b.is_complete()) {
        return Err(Error::MissingSection {
            section: Section::Box,
            details: "the box must define xlo xhi, ylo yhi and zlo zhi",
        });
    }
    Ok(types)
}

fn write_box<W: Write + ?Sized>(sim_box: &SimulationBox, writer: &mut W) -> Result<()> {
    for (keyword, bounds) in sim_box.axes() {
        if let Some(b) = bounds {
            writeln!(writer, "{:.6} {:.6} {}", b.lo, b.hi, keyword)?;
        }
    }
    if let Some(t) = sim_box.tilt {
        writeln!(writer, "{:.6} {:.6} {:.6} xy xz yz", t.xy, t.xz, t.yz)?;
    }
    Ok(())
}

/// Writes the block of `section` when `data` holds it. Header sections write nothing here.
fn write_section<W: Write + ?Sized>(
    writer: &mut W,
    data: &LammpsData,
    section: Section,
) -> Result<()> {
    match section {
        Section::Masses => match &data.masses {
            Some(rows) => write_block(writer, section, rows, write_mass),
            None => Ok(()),
        },
        Section::Atoms => match &data.atoms {
            Some(rows) => write_block(writer, section, rows, write_atom),
            None => Ok(()),
        },
        Section::Bonds => match &data.bonds {
            Some(rows) => write_block(writer, section, rows, write_topology),
            None => Ok(()),
        },
        Section::Angles => match &data.angles {
            Some(rows) => write_block(writer, section, rows, write_topology),
            None => Ok(()),
        },
        Section::Dihedrals => match &data.dihedrals {
            Some(rows) => write_block(writer, section, rows, write_topology),
            None => Ok(()),
        },
        Section::Impropers => match &data.impropers {
            Some(rows) => write_block(writer, section, rows, write_topology),
            None => Ok(()),
        },
        Section::Box | Section::Types => Ok(()),
    }
}

/// Writes a heading, a blank line and one line per row, followed by two blank lines.
///
/// The heading is left out for an empty section.
fn write_block<W, T, F>(writer: &mut W, section: Section, rows: &[T], mut write_row: F) -> Result<()>
where
    W: Write + ?Sized,
    F: FnMut(&mut W, &T) -> std::io::Result<()>,
{
    if !rows.is_empty() {
        writeln!(writer, "{}\n", section)?;
    }
    for row in rows {
        write_row(writer, row)?;
    }
    writeln!(writer, "\n")?;
    Ok(())
}

fn write_mass<W: Write + ?Sized>(writer: &mut W, row: &Mass) -> std::io::Result<()> {
    writeln!(writer, "{} {:.6}", row.type_id, row.mass)
}

fn write_atom<W: Write + ?Sized>(writer: &mut W, atom: &Atom) -> std::io::Result<()> {
    writeln!(
        writer,
        "{} {} {} {:.6} {:.6} {:.6} {:.6} {} {} {} #{}",
        atom.atom_id,
        atom.molecule_id,
        atom.atom_type,
        atom.charge,
        atom.position.x,
        atom.position.y,
        atom.position.z,
        atom.image[0],
        atom.image[1],
        atom.image[2],
        atom.label
    )
}

fn write_topology<W: Write + ?Sized, const N: usize>(
    writer: &mut W,
    row: &Topology<N>,
) -> std::io::Result<()> {
    write!(writer, "{} {}", row.id, row.type_id)?;
    for atom in row.atoms {
        write!(writer, " {}", atom)?;
    }
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::config::LammpsReadConfig;
    use crate::core::models::lammps::{Angle, Bond, Dihedral, Improper};
    use nalgebra::Point3;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn sample() -> LammpsData {
        LammpsData {
            simulation_box: Some(SimulationBox::orthogonal(
                [0.0, 10.0],
                [-1.5, 1.5],
                [0.0, 20.0],
            )),
            types: Some(TypeCounts::from_array([2, 1, 1, 1, 1])),
            masses: Some(vec![
                Mass {
                    type_id: 1,
                    mass: 12.011,
                },
                Mass {
                    type_id: 2,
                    mass: 1.008,
                },
            ]),
            atoms: Some(vec![
                Atom::new(1, "C", Point3::new(0.0, 0.0, 0.0))
                    .with_molecule(1)
                    .with_type(1)
                    .with_charge(-0.24),
                Atom::new(2, "H", Point3::new(1.09, 0.0, 0.0))
                    .with_molecule(1)
                    .with_type(2)
                    .with_charge(0.06)
                    .with_image([0, 1, 0]),
                Atom::new(3, "H", Point3::new(-0.36, 1.03, 0.0))
                    .with_molecule(1)
                    .with_type(2)
                    .with_charge(0.06),
                Atom::new(4, "H", Point3::new(-0.36, -0.51, 0.89))
                    .with_molecule(1)
                    .with_type(2)
                    .with_charge(0.06),
            ]),
            bonds: Some(vec![
                Bond::new(1, 1, [1, 2]),
                Bond::new(2, 1, [1, 3]),
                Bond::new(3, 1, [1, 4]),
            ]),
            angles: Some(vec![Angle::new(1, 1, [2, 1, 3])]),
            dihedrals: Some(vec![Dihedral::new(1, 1, [2, 1, 3, 4])]),
            impropers: Some(vec![Improper::new(1, 1, [1, 2, 3, 4])]),
        }
    }

    fn render(data: &LammpsData) -> Result<String> {
        let mut out = Vec::new();
        LammpsDataFile::write_with_title(data, "test title", &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn header_lists_counts_types_and_box_in_order() {
        let text = render(&sample()).unwrap();
        let header: Vec<&str> = text.lines().take(14).collect();

        assert_eq!(
            header,
            [
                "test title",
                "4 atoms",
                "3 bonds",
                "1 angles",
                "1 dihedrals",
                "1 impropers",
                "2 atom types",
                "1 bond types",
                "1 angle types",
                "1 dihedral types",
                "1 improper types",
                "0.000000 10.000000 xlo xhi",
                "-1.500000 1.500000 ylo yhi",
                "0.000000 20.000000 zlo zhi",
            ]
        );
    }

    #[test]
    fn sections_use_fixed_row_formats() {
        let text = render(&sample()).unwrap();

        assert!(text.contains("\n\n\nMasses\n\n1 12.011000\n2 1.008000\n\n\n"));
        assert!(text.contains(
            "Atoms\n\n1 1 1 -0.240000 0.000000 0.000000 0.000000 0 0 0 #C\n"
        ));
        assert!(text.contains("2 1 2 0.060000 1.090000 0.000000 0.000000 0 1 0 #H\n"));
        assert!(text.contains("Bonds\n\n1 1 1 2\n2 1 1 3\n3 1 1 4\n\n\n"));
        assert!(text.contains("Angles\n\n1 1 2 1 3\n\n\n"));
        assert!(text.contains("Dihedrals\n\n1 1 2 1 3 4\n\n\n"));
        assert!(text.ends_with("Impropers\n\n1 1 1 2 3 4\n\n\n"));
    }

    #[test]
    fn blocks_follow_fixed_section_order() {
        let text = render(&sample()).unwrap();
        let positions: Vec<usize> = Section::BLOCKS
            .iter()
            .map(|s| text.find(&format!("\n{}\n\n", s)).unwrap())
            .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn tilt_line_is_written_only_for_triclinic_box() {
        let mut data = sample();
        assert!(!render(&data).unwrap().contains("xy xz yz"));

        data.simulation_box = data.simulation_box.map(|b| b.with_tilt(0.5, 0.0, -0.25));
        assert!(
            render(&data)
                .unwrap()
                .contains("\n0.500000 0.000000 -0.250000 xy xz yz\n")
        );
    }

    #[test]
    fn absent_sections_are_omitted() {
        let data = LammpsData {
            types: Some(TypeCounts::from_array([1, 0, 0, 0, 0])),
            atoms: Some(vec![Atom::new(1, "Ar", Point3::origin()).with_type(1)]),
            ..Default::default()
        };
        let text = render(&data).unwrap();

        assert!(text.contains("1 atoms\n1 atom types\n"));
        assert!(!text.contains("bonds"));
        assert!(!text.contains("xlo"));
        assert!(!text.contains("Masses"));
        assert!(text.contains("Atoms\n\n"));
    }

    #[test]
    fn empty_section_keeps_count_but_drops_heading() {
        let data = LammpsData {
            types: Some(TypeCounts::default()),
            bonds: Some(Vec::new()),
            ..Default::default()
        };
        let text = render(&data).unwrap();

        assert!(text.contains("0 bonds\n"));
        assert!(!text.contains("Bonds"));
    }

    #[test]
    fn missing_types_fails_before_writing() {
        let mut data = sample();
        data.types = None;
        let mut out = Vec::new();

        let err = LammpsDataFile::write_to(&data, &mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingSection {
                section: Section::Types,
                ..
            }
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn incomplete_box_fails_before_writing() {
        let mut data = sample();
        if let Some(b) = data.simulation_box.as_mut() {
            b.z = None;
        }
        assert!(matches!(
            render(&data),
            Err(Error::MissingSection {
                section: Section::Box,
                ..
            })
        ));
    }

    #[test]
    fn write_to_uses_timestamped_title() {
        let mut out = Vec::new();
        LammpsDataFile::write_to(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let title = text.lines().next().unwrap();

        assert!(title.starts_with("LAMMPS data file generated by mdfmt "));
        let stamp = title.trim_start_matches("LAMMPS data file generated by mdfmt ");
        assert_eq!(stamp.len(), "2024-01-01 00:00:00".len());
    }

    #[test]
    fn written_file_reads_back_to_same_data() {
        let data = sample();
        let text = render(&data).unwrap();
        let decoded =
            LammpsDataFile::read_from(&mut Cursor::new(text), &LammpsReadConfig::default())
                .unwrap();

        assert_eq!(decoded.types, data.types);
        assert_eq!(decoded.simulation_box, data.simulation_box);
        assert_eq!(decoded.masses, data.masses);
        assert_eq!(decoded.bonds, data.bonds);
        assert_eq!(decoded.angles, data.angles);
        assert_eq!(decoded.dihedrals, data.dihedrals);
        assert_eq!(decoded.impropers, data.impropers);

        let (original, read_back) = (data.atoms.unwrap(), decoded.atoms.unwrap());
        assert_eq!(original.len(), read_back.len());
        for (a, b) in original.iter().zip(&read_back) {
            assert_eq!(a.atom_id, b.atom_id);
            assert_eq!(a.molecule_id, b.molecule_id);
            assert_eq!(a.atom_type, b.atom_type);
            assert_eq!(a.image, b.image);
            assert_eq!(b.label, a.atom_type.to_string());
            assert!((a.charge - b.charge).abs() < 1e-6);
            assert!((a.position - b.position).norm() < 1e-5);
        }
    }

    #[test]
    fn write_to_path_creates_no_file_when_types_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.lmp");
        let mut data = sample();
        data.types = None;

        let err = LammpsDataFile::write_to_path(&data, &path).unwrap_err();
        assert!(matches!(err.root(), Error::MissingSection { .. }));
        assert!(err.to_string().contains("out.lmp"));
        assert!(!path.exists());
    }

    #[test]
    fn write_to_path_then_read_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("methane.lmp");
        LammpsDataFile::write_to_path(&sample(), &path).unwrap();

        let decoded = LammpsDataFile::read_from_path(&path, &LammpsReadConfig::default()).unwrap();
        assert_eq!(decoded.atoms.map(|a| a.len()), Some(4));
    }
}
