use super::atom::Atom;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The sections of a LAMMPS `full` style data file understood by the codecs.
///
/// `Box` and `Types` are not real section blocks in the file: they are collected from
/// the unordered header that precedes the first named section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum Section {
    Box,
    Masses,
    Atoms,
    Bonds,
    Angles,
    Dihedrals,
    Impropers,
    Types,
}

static SECTION_NAMES: Map<&'static str, Section> = phf_map! {
    "Box" => Section::Box,
    "Masses" => Section::Masses,
    "Atoms" => Section::Atoms,
    "Bonds" => Section::Bonds,
    "Angles" => Section::Angles,
    "Dihedrals" => Section::Dihedrals,
    "Impropers" => Section::Impropers,
    "Types" => Section::Types,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "Unknown LAMMPS section '{0}'. Expected one of: Box, Masses, Atoms, Bonds, Angles, Dihedrals, Impropers, Types."
)]
pub struct UnknownSectionError(pub String);

impl Section {
    /// Every section, in the default read order.
    pub const ALL: [Section; 8] = [
        Section::Box,
        Section::Masses,
        Section::Atoms,
        Section::Bonds,
        Section::Angles,
        Section::Dihedrals,
        Section::Impropers,
        Section::Types,
    ];

    /// Sections whose row count is announced in the header (`<n> atoms`, ...).
    pub const COUNTED: [Section; 5] = [
        Section::Atoms,
        Section::Bonds,
        Section::Angles,
        Section::Dihedrals,
        Section::Impropers,
    ];

    /// Sections emitted as heading + rows blocks, in file order.
    pub const BLOCKS: [Section; 6] = [
        Section::Masses,
        Section::Atoms,
        Section::Bonds,
        Section::Angles,
        Section::Dihedrals,
        Section::Impropers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Box => "Box",
            Section::Masses => "Masses",
            Section::Atoms => "Atoms",
            Section::Bonds => "Bonds",
            Section::Angles => "Angles",
            Section::Dihedrals => "Dihedrals",
            Section::Impropers => "Impropers",
            Section::Types => "Types",
        }
    }

    /// Returns `true` for the sections read from the header block instead of a heading.
    pub fn is_header(self) -> bool {
        matches!(self, Section::Box | Section::Types)
    }

    /// Parses a whitespace-separated list of section names, e.g. `"Box Atoms Bonds"`.
    pub fn parse_list(list: &str) -> Result<Vec<Section>, UnknownSectionError> {
        list.split_whitespace().map(str::parse).collect()
    }
}

impl FromStr for Section {
    type Err = UnknownSectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SECTION_NAMES
            .get(s)
            .copied()
            .ok_or_else(|| UnknownSectionError(s.to_string()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower and upper bound of the box along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lo: f64,
    pub hi: f64,
}

/// Tilt factors of a triclinic box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub xy: f64,
    pub xz: f64,
    pub yz: f64,
}

/// Simulation box as declared in the header block.
///
/// Every axis is optional because the header scan is best-effort: a partial header
/// yields a partially filled box rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationBox {
    pub x: Option<Bounds>,
    pub y: Option<Bounds>,
    pub z: Option<Bounds>,
    pub tilt: Option<Tilt>,
}

impl SimulationBox {
    /// Creates an orthogonal box from `[lo, hi]` pairs.
    pub fn orthogonal(x: [f64; 2], y: [f64; 2], z: [f64; 2]) -> Self {
        let bounds = |[lo, hi]: [f64; 2]| Some(Bounds { lo, hi });
        Self {
            x: bounds(x),
            y: bounds(y),
            z: bounds(z),
            tilt: None,
        }
    }

    pub fn with_tilt(mut self, xy: f64, xz: f64, yz: f64) -> Self {
        self.tilt = Some(Tilt { xy, xz, yz });
        self
    }

    /// The three axes paired with their header keywords.
    pub fn axes(&self) -> [(&'static str, Option<Bounds>); 3] {
        [("xlo xhi", self.x), ("ylo yhi", self.y), ("zlo zhi", self.z)]
    }

    /// Number of header rows this box occupies (3 or 4 when complete).
    pub fn row_count(&self) -> usize {
        self.axes().iter().filter(|(_, b)| b.is_some()).count() + usize::from(self.tilt.is_some())
    }

    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.z.is_some()
    }
}

/// Number of atom, bond, angle, dihedral and improper types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeCounts {
    pub atom: usize,
    pub bond: usize,
    pub angle: usize,
    pub dihedral: usize,
    pub improper: usize,
}

impl TypeCounts {
    /// The header keywords, in the fixed order the counts are stored and written.
    pub const KEYWORDS: [&'static str; 5] = [
        "atom types",
        "bond types",
        "angle types",
        "dihedral types",
        "improper types",
    ];

    pub fn from_array(counts: [usize; 5]) -> Self {
        let [atom, bond, angle, dihedral, improper] = counts;
        Self {
            atom,
            bond,
            angle,
            dihedral,
            improper,
        }
    }

    pub fn as_array(&self) -> [usize; 5] {
        [
            self.atom,
            self.bond,
            self.angle,
            self.dihedral,
            self.improper,
        ]
    }
}

/// One row of the `Masses` section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mass {
    pub type_id: usize,
    pub mass: f64,
}

/// One row of a topology section: an id, a type and `N` atom ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology<const N: usize> {
    pub id: usize,
    pub type_id: usize,
    pub atoms: [usize; N],
}

impl<const N: usize> Topology<N> {
    pub const fn new(id: usize, type_id: usize, atoms: [usize; N]) -> Self {
        Self { id, type_id, atoms }
    }
}

pub type Bond = Topology<2>;
pub type Angle = Topology<3>;
pub type Dihedral = Topology<4>;
pub type Improper = Topology<4>;

/// The content of a LAMMPS data file, one optional entry per [`Section`].
///
/// A section that was not requested when reading (or not supplied before writing) is
/// `None`. No referential integrity between sections is enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LammpsData {
    pub simulation_box: Option<SimulationBox>,
    pub types: Option<TypeCounts>,
    pub masses: Option<Vec<Mass>>,
    pub atoms: Option<Vec<Atom>>,
    pub bonds: Option<Vec<Bond>>,
    pub angles: Option<Vec<Angle>>,
    pub dihedrals: Option<Vec<Dihedral>>,
    pub impropers: Option<Vec<Improper>>,
}

impl LammpsData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, section: Section) -> bool {
        self.row_count(section).is_some()
    }

    /// Number of rows held for `section`, or `None` when the section is absent.
    ///
    /// `Types` always counts as a single five-value row.
    pub fn row_count(&self, section: Section) -> Option<usize> {
        match section {
            Section::Box => self.simulation_box.as_ref().map(SimulationBox::row_count),
            Section::Types => self.types.as_ref().map(|_| 1),
            Section::Masses => self.masses.as_ref().map(Vec::len),
            Section::Atoms => self.atoms.as_ref().map(Vec::len),
            Section::Bonds => self.bonds.as_ref().map(Vec::len),
            Section::Angles => self.angles.as_ref().map(Vec::len),
            Section::Dihedrals => self.dihedrals.as_ref().map(Vec::len),
            Section::Impropers => self.impropers.as_ref().map(Vec::len),
        }
    }

    /// Present sections, in [`Section::ALL`] order.
    pub fn sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|&s| self.contains(s))
            .collect()
    }

    /// Present sections paired with their row counts.
    pub fn summary(&self) -> Vec<(Section, usize)> {
        Section::ALL
            .into_iter()
            .filter_map(|s| self.row_count(s).map(|n| (s, n)))
            .collect()
    }
}
