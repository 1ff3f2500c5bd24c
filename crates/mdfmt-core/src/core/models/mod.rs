//! # Core Models Module
//!
//! Plain data structures populated by the readers and consumed by the writers.
//!
//! ## Key Components
//!
//! - [`atom`] - A single particle record (ids, type, charge, position, image flags, label)
//! - [`section`] - [`AtomsSection`](section::AtomsSection), an ordered collection of atoms
//! - [`frame`] - [`MolecularFrame`](frame::MolecularFrame), the container the frame
//!   formatters read from and write into
//! - [`lammps`] - Section rows of a LAMMPS data file and the [`LammpsData`](lammps::LammpsData)
//!   mapping that ties them together
//!
//! ## Usage
//!
//! ```
//! use mdfmt::core::models::{atom::Atom, frame::MolecularFrame, section::AtomsSection};
//! use nalgebra::Point3;
//!
//! let mut section = AtomsSection::new();
//! section.add_atom(Atom::new(1, "O", Point3::new(0.0, 0.0, 0.0)));
//! section.add_atom(Atom::new(2, "H", Point3::new(0.96, 0.0, 0.0)));
//!
//! let frame = MolecularFrame::from(section);
//! assert_eq!(frame.atoms().map(|s| s.len()), Some(2));
//! ```

pub mod atom;
pub mod frame;
pub mod lammps;
pub mod section;
