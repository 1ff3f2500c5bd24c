use super::LammpsDataFile;
use super::scanner::{RawRow, scan_rows};
use crate::core::io::config::LammpsReadConfig;
use crate::core::io::error::{Error, Result};
use crate::core::io::lines::{NumberedLines, strip_comment};
use crate::core::models::atom::Atom;
use crate::core::models::lammps::{
    Bounds, LammpsData, Mass, Section, SimulationBox, Tilt, Topology, TypeCounts,
};
use nalgebra::Point3;
use phf::{Set, phf_set};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, instrument, trace, warn};

/// First words of the section headings that close the header block.
static HEADING_KEYWORDS: Set<&'static str> = phf_set! {
    "Atoms",
    "Velocities",
    "Masses",
    "Ellipsoids",
    "Lines",
    "Triangles",
    "Bodies",
    "Bonds",
    "Angles",
    "Dihedrals",
    "Impropers",
    "Pair",
    "PairIJ",
    "Bond",
    "Angle",
    "Dihedral",
    "Improper",
    "BondBond",
    "BondAngle",
    "MiddleBondTorsion",
    "EndBondTorsion",
    "AngleTorsion",
    "AngleAngleTorsion",
    "BondBond13",
    "AngleAngle",
};

const BOX_AXES: [(&str, &str); 3] = [("xlo", "xhi"), ("ylo", "yhi"), ("zlo", "zhi")];
const TILT_KEYWORD: &str = "xy xz yz";

impl LammpsDataFile {
    /// Decodes the sections requested by `config` from a seekable stream.
    ///
    /// The stream is rewound before each section, so sections may be requested in any
    /// order. `Box` and `Types` are best-effort: values missing from the header are
    /// left unset (or zero) instead of raising an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SectionNotFound`] when a requested heading is absent (unless
    /// `skip_missing_sections` is set) and [`Error::Format`] for rows whose shape or
    /// tokens do not match the section.
    pub fn read_from<R: BufRead + Seek + ?Sized>(
        reader: &mut R,
        config: &LammpsReadConfig,
    ) -> Result<LammpsData> {
        let mut data = LammpsData::new();

        for &section in &config.sections {
            reader.seek(SeekFrom::Start(0))?;
            let lines = NumberedLines::new(reader);

            if section.is_header() {
                store_header(&mut data, section, lines, config.header_scan_limit)?;
                continue;
            }
            match find_block(lines, section)? {
                Some(rows) => {
                    trace!("Section '{}' spans {} rows.", section, rows.len());
                    store_block(&mut data, section, &rows)?;
                }
                None if config.skip_missing_sections => {
                    debug!("Section '{}' not present, skipping.", section);
                }
                None => return Err(Error::SectionNotFound { section }),
            }
        }

        Ok(data)
    }

    #[instrument(skip_all, name = "lammps_read", fields(path = %path.display()))]
    pub fn read_from_path(path: &Path, config: &LammpsReadConfig) -> Result<LammpsData> {
        let file = File::open(path).map_err(|e| Error::from(e).in_file(path))?;
        let mut reader = BufReader::new(file);
        let data = Self::read_from(&mut reader, config).map_err(|e| e.in_file(path))?;
        debug!("Read sections: {:?}", data.summary());
        Ok(data)
    }
}

/// Returns `true` when the comment-stripped line opens a section block.
fn is_heading(data: &str) -> bool {
    data.split_whitespace()
        .next()
        .is_some_and(|word| HEADING_KEYWORDS.contains(word))
}

/// Yields the comment-stripped header lines: everything after the title line, up to
/// the first section heading, capped at `limit` lines read in total.
fn header_lines<I>(lines: I, limit: usize) -> impl Iterator<Item = std::io::Result<(usize, String)>>
where
    I: Iterator<Item = std::io::Result<(usize, String)>>,
{
    lines
        .take(limit)
        .skip(1)
        .map(|item| item.map(|(n, line)| (n, strip_comment(&line).to_string())))
        .take_while(|item| item.as_ref().map_or(true, |(_, data)| !is_heading(data)))
}

fn scan_types<I>(lines: I, limit: usize) -> Result<TypeCounts>
where
    I: Iterator<Item = std::io::Result<(usize, String)>>,
{
    let mut counts = [0; 5];
    let mut found = [false; 5];

    for item in header_lines(lines, limit) {
        let (line_num, data) = item?;
        for (i, keyword) in TypeCounts::KEYWORDS.iter().enumerate() {
            if found[i] || !keyword.split_whitespace().all(|word| data.contains(word)) {
                continue;
            }
            let token = data.split_whitespace().next().unwrap_or_default();
            counts[i] = parse_token(token, "Types header", line_num, keyword)?;
            found[i] = true;
            break;
        }
        if found.iter().all(|&f| f) {
            break;
        }
    }

    if !found.iter().all(|&f| f) {
        let missing: Vec<_> = TypeCounts::KEYWORDS
            .iter()
            .zip(found)
            .filter(|(_, f)| !f)
            .map(|(k, _)| *k)
            .collect();
        debug!("Type counts not declared in header, assuming 0: {:?}", missing);
    }
    Ok(TypeCounts::from_array(counts))
}

fn scan_box<I>(lines: I, limit: usize) -> Result<SimulationBox>
where
    I: Iterator<Item = std::io::Result<(usize, String)>>,
{
    let mut sim_box = SimulationBox::default();

    for item in header_lines(lines, limit) {
        let (line_num, data) = item?;
        let tokens: Vec<&str> = data.split_whitespace().collect();

        for (axis, (lo, hi)) in BOX_AXES.iter().enumerate() {
            if data.contains(lo) && data.contains(hi) {
                let values = parse_floats::<2>(&tokens, "Box header", line_num, lo)?;
                let bounds = Some(Bounds {
                    lo: values[0],
                    hi: values[1],
                });
                match axis {
                    0 => sim_box.x = bounds,
                    1 => sim_box.y = bounds,
                    _ => sim_box.z = bounds,
                }
            }
        }
        if data.contains(TILT_KEYWORD) {
            let [xy, xz, yz] = parse_floats::<3>(&tokens, "Box header", line_num, TILT_KEYWORD)?;
            sim_box.tilt = Some(Tilt { xy, xz, yz });
        }

        if sim_box.row_count() == 4 {
            break;
        }
    }

    if !sim_box.is_complete() {
        warn!(
            "Box header incomplete ({} of 3 axes found); returning partial bounds.",
            sim_box.axes().iter().filter(|(_, b)| b.is_some()).count()
        );
    }
    Ok(sim_box)
}

fn store_header<I>(data: &mut LammpsData, section: Section, lines: I, limit: usize) -> Result<()>
where
    I: Iterator<Item = std::io::Result<(usize, String)>>,
{
    match section {
        Section::Types => data.types = Some(scan_types(lines, limit)?),
        Section::Box => data.simulation_box = Some(scan_box(lines, limit)?),
        _ => {}
    }
    Ok(())
}

/// Locates the heading of `section` below the title line and collects its rows.
///
/// Returns `None` when the heading never appears.
fn find_block<I>(mut lines: I, section: Section) -> Result<Option<Vec<RawRow>>>
where
    I: Iterator<Item = std::io::Result<(usize, String)>>,
{
    let name = section.name();
    if lines.next().transpose()?.is_none() {
        return Ok(None);
    }
    loop {
        match lines.next().transpose()? {
            None => return Ok(None),
            Some((_, line)) => {
                if strip_comment(&line).split_whitespace().next() == Some(name) {
                    break;
                }
            }
        }
    }

    // Separator line between the heading and the first row.
    if lines.next().transpose()?.is_none() {
        return Ok(Some(Vec::new()));
    }
    Ok(Some(scan_rows(lines)?))
}

fn store_block(data: &mut LammpsData, section: Section, rows: &[RawRow]) -> Result<()> {
    match section {
        Section::Masses => data.masses = Some(decode_rows(rows, section, decode_mass)?),
        Section::Atoms => data.atoms = Some(decode_rows(rows, section, decode_atom)?),
        Section::Bonds => data.bonds = Some(decode_rows(rows, section, decode_topology::<2>)?),
        Section::Angles => data.angles = Some(decode_rows(rows, section, decode_topology::<3>)?),
        Section::Dihedrals => {
            data.dihedrals = Some(decode_rows(rows, section, decode_topology::<4>)?)
        }
        Section::Impropers => {
            data.impropers = Some(decode_rows(rows, section, decode_topology::<4>)?)
        }
        _ => {}
    }
    Ok(())
}

fn decode_rows<T>(
    rows: &[RawRow],
    section: Section,
    decode: impl Fn(&RawRow, &str) -> Result<T>,
) -> Result<Vec<T>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| decode(row, &format!("{} row {}", section, i + 1)))
        .collect()
}

fn decode_mass(row: &RawRow, context: &str) -> Result<Mass> {
    expect_width(row, &[2], context, "type mass")?;
    Ok(Mass {
        type_id: parse_token(&row.tokens[0], context, row.line, "type")?,
        mass: parse_token(&row.tokens[1], context, row.line, "mass")?,
    })
}

/// Decodes a `full` style atom row, normalizing 7 and 10 column rows to 11 columns.
///
/// Missing image flags become `0 0 0` and a missing label is the type field as text.
/// Trailing `#` comments never supply a label.
fn decode_atom(row: &RawRow, context: &str) -> Result<Atom> {
    expect_width(
        row,
        &[7, 10, 11],
        context,
        "id molecule type q x y z [ix iy iz] [label]",
    )?;
    let t = &row.tokens;
    let line = row.line;

    let image: [i32; 3] = if t.len() >= 10 {
        [
            parse_token(&t[7], context, line, "ix")?,
            parse_token(&t[8], context, line, "iy")?,
            parse_token(&t[9], context, line, "iz")?,
        ]
    } else {
        [0; 3]
    };
    let label = t.get(10).unwrap_or(&t[2]);

    let position = Point3::new(
        parse_token(&t[4], context, line, "x")?,
        parse_token(&t[5], context, line, "y")?,
        parse_token(&t[6], context, line, "z")?,
    );
    Ok(Atom::new(parse_token(&t[0], context, line, "atom id")?, label, position)
        .with_molecule(parse_token(&t[1], context, line, "molecule id")?)
        .with_type(parse_token(&t[2], context, line, "atom type")?)
        .with_charge(parse_token(&t[3], context, line, "charge")?)
        .with_image(image))
}

fn decode_topology<const N: usize>(row: &RawRow, context: &str) -> Result<Topology<N>> {
    expect_width(row, &[N + 2], context, "id type atom ids")?;
    let mut atoms = [0; N];
    for (slot, token) in atoms.iter_mut().zip(&row.tokens[2..]) {
        *slot = parse_token(token, context, row.line, "atom id")?;
    }
    Ok(Topology::new(
        parse_token(&row.tokens[0], context, row.line, "id")?,
        parse_token(&row.tokens[1], context, row.line, "type")?,
        atoms,
    ))
}

fn expect_width(row: &RawRow, widths: &[usize], context: &str, layout: &str) -> Result<()> {
    if widths.contains(&row.width()) {
        return Ok(());
    }
    Err(Error::format(
        context,
        row.line,
        format!(
            "expected {} columns ({}), found {}",
            widths
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(" or "),
            layout,
            row.width()
        ),
    ))
}

fn parse_token<T: FromStr>(token: &str, context: &str, line: usize, field: &str) -> Result<T> {
    token.parse().map_err(|_| {
        Error::format(
            context,
            line,
            format!(
                "invalid {} '{}' (expected {})",
                field,
                token,
                std::any::type_name::<T>()
            ),
        )
    })
}

fn parse_floats<const N: usize>(
    tokens: &[&str],
    context: &str,
    line: usize,
    field: &str,
) -> Result<[f64; N]> {
    if tokens.len() < N {
        return Err(Error::format(
            context,
            line,
            format!("expected {} values before '{}'", N, field),
        ));
    }
    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(tokens) {
        *value = parse_token(token, context, line, field)?;
    }
    Ok(values)
}
