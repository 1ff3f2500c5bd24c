//! # Core Module
//!
//! Data models and file codecs for molecular geometry interchange.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, atom sections, frames and the
//!   section rows of a LAMMPS data file
//! - **File I/O** ([`io`]) - XYZ and LAMMPS readers/writers, the format selector,
//!   read configuration and the error taxonomy shared by all codecs

pub mod io;
pub mod models;
