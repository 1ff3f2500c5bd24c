use crate::core::models::lammps::Section;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Format error in {context} on line {line}: {details}")]
    Format {
        context: String,
        line: usize,
        details: String,
    },

    #[error("Unexpected end of input in {context}: expected more lines after line {line}")]
    UnexpectedEof { context: String, line: usize },

    #[error("Frame {requested} not found: the input holds {available} frame(s)")]
    FrameNotFound { requested: String, available: usize },

    #[error("Section '{section}' not found")]
    SectionNotFound { section: Section },

    #[error("Missing required section '{section}': {details}")]
    MissingSection {
        section: Section,
        details: &'static str,
    },

    #[error("Unsupported format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Error in file '{path}': {source}", path = path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn format(context: impl Into<String>, line: usize, details: impl Into<String>) -> Self {
        Self::Format {
            context: context.into(),
            line,
            details: details.into(),
        }
    }

    pub fn unexpected_eof(context: impl Into<String>, line: usize) -> Self {
        Self::UnexpectedEof {
            context: context.into(),
            line,
        }
    }

    /// Attaches the path of the file being processed, unless one is already attached.
    pub fn in_file(self, path: &Path) -> Self {
        match self {
            Self::File { .. } => self,
            other => Self::File {
                path: path.to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, looking through any file context.
    pub fn root(&self) -> &Error {
        match self {
            Self::File { source, .. } => source.root(),
            other => other,
        }
    }
}
