//! # mdfmt Core Library
//!
//! Readers and writers for the plain-text geometry files exchanged between molecular
//! dynamics tools: multi-frame XYZ trajectories and LAMMPS data files in the
//! `full` atom style.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** In-memory models (`Atom`, `AtomsSection`,
//!   `MolecularFrame`, `LammpsData`) and the format codecs that populate and
//!   serialize them, together with the format selector and read configuration.
//!
//! - **[`workflows`]: The Public API.** End-to-end operations built on the codecs,
//!   such as converting a file from one format to another or summarizing its content.

pub mod core;
pub mod workflows;
