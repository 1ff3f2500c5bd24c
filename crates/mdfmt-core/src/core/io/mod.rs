//! # Input and Output
//!
//! Codecs for the file formats handled by the crate and the shared plumbing around them.
//!
//! ## Architecture
//!
//! - **[`xyz`]**: Multi-frame XYZ trajectories with frame selection.
//! - **[`lammps`]**: LAMMPS `full` style data files, read section by section.
//! - **[`format`]**: Runtime selection of a frame format from a name or file extension.
//! - **[`traits`]**: The [`FrameFormat`](traits::FrameFormat) interface shared by frame formats.
//! - **[`config`]**: Read options and their validation.
//! - **[`error`]**: The error type returned by every codec.

pub mod config;
pub mod error;
pub mod format;
pub mod lammps;
pub(crate) mod lines;
pub mod traits;
pub mod xyz;
