//! LAMMPS data files in the `full` atom style.
//!
//! The header block of a data file is unordered, so `Box` and `Types` are collected by
//! keyword search over a bounded number of lines. Every other section is located by its
//! heading and read with the row-shape-consistent [`scanner`].
//!
//! Reading and writing are exposed as associated functions of [`LammpsDataFile`]:
//!
//! ```
//! use mdfmt::core::io::config::LammpsReadConfig;
//! use mdfmt::core::io::lammps::LammpsDataFile;
//! use std::io::Cursor;
//!
//! let input = "\
//! Example data file
//!
//! 1 atoms
//! 1 atom types
//!
//! Atoms
//!
//! 1 1 1 0.0 0.0 0.0 0.0
//! ";
//! let config = LammpsReadConfig::builder()
//!     .section_list("Atoms Types")
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! let data = LammpsDataFile::read_from(&mut Cursor::new(input), &config).unwrap();
//! assert_eq!(data.atoms.map(|a| a.len()), Some(1));
//! assert_eq!(data.types.map(|t| t.atom), Some(1));
//! ```

mod reader;
pub mod scanner;
mod writer;

/// Reader and writer for LAMMPS `full` style data files.
pub struct LammpsDataFile;
