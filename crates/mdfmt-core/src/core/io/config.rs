use crate::core::models::lammps::{Section, UnknownSectionError};
use serde::Deserialize;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use thiserror::Error;

/// Default number of lines scanned while looking for `Box` and `Types` header values.
pub const DEFAULT_HEADER_SCAN_LIMIT: usize = 100;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error(transparent)]
    UnknownSection(#[from] UnknownSectionError),
}

/// Which frame of a multi-frame XYZ file to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawFrameSelection")]
pub enum FrameSelection {
    /// A 1-based frame index.
    Index(NonZeroUsize),
    /// The last frame of the file.
    #[default]
    Last,
}

impl FrameSelection {
    /// Selects the 1-based frame `index`; `0` is rejected.
    pub fn index(index: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(index)
            .map(Self::Index)
            .ok_or_else(|| ConfigError::InvalidParameter {
                name: "frame",
                reason: "frame numbers start at 1".to_string(),
            })
    }
}

impl FromStr for FrameSelection {
    type Err = ConfigError;

    /// Parses `"last"` (any case) or a positive frame number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("last") {
            return Ok(Self::Last);
        }
        let index = s.parse::<usize>().map_err(|_| ConfigError::InvalidParameter {
            name: "frame",
            reason: format!("expected 'last' or a positive integer, got '{}'", s),
        })?;
        Self::index(index)
    }
}

impl fmt::Display for FrameSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(n) => write!(f, "{}", n),
            Self::Last => f.write_str("last"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFrameSelection {
    Index(usize),
    Keyword(String),
}

impl TryFrom<RawFrameSelection> for FrameSelection {
    type Error = ConfigError;

    fn try_from(raw: RawFrameSelection) -> Result<Self, Self::Error> {
        match raw {
            RawFrameSelection::Index(n) => Self::index(n),
            RawFrameSelection::Keyword(s) => s.parse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XyzReadConfig {
    pub frame: FrameSelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LammpsReadConfig {
    /// Sections to decode, in request order.
    pub sections: Vec<Section>,
    /// Maximum number of lines scanned for `Box` and `Types` header values.
    pub header_scan_limit: usize,
    /// Leave absent sections out of the result instead of failing.
    pub skip_missing_sections: bool,
}

impl Default for LammpsReadConfig {
    fn default() -> Self {
        Self {
            sections: Section::ALL.to_vec(),
            header_scan_limit: DEFAULT_HEADER_SCAN_LIMIT,
            skip_missing_sections: false,
        }
    }
}

impl LammpsReadConfig {
    pub fn builder() -> LammpsReadConfigBuilder {
        LammpsReadConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct LammpsReadConfigBuilder {
    sections: Option<Vec<Section>>,
    header_scan_limit: Option<usize>,
    skip_missing_sections: Option<bool>,
}

impl LammpsReadConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = Some(sections);
        self
    }
    pub fn section_list(mut self, list: &str) -> Result<Self, ConfigError> {
        self.sections = Some(Section::parse_list(list)?);
        Ok(self)
    }
    pub fn header_scan_limit(mut self, limit: usize) -> Self {
        self.header_scan_limit = Some(limit);
        self
    }
    pub fn skip_missing_sections(mut self, skip: bool) -> Self {
        self.skip_missing_sections = Some(skip);
        self
    }

    pub fn build(self) -> Result<LammpsReadConfig, ConfigError> {
        let defaults = LammpsReadConfig::default();

        let mut sections = self.sections.unwrap_or(defaults.sections);
        if sections.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "sections",
                reason: "at least one section must be requested".to_string(),
            });
        }
        let mut seen = Vec::with_capacity(sections.len());
        sections.retain(|s| {
            let first = !seen.contains(s);
            seen.push(*s);
            first
        });

        let header_scan_limit = self.header_scan_limit.unwrap_or(defaults.header_scan_limit);
        if header_scan_limit == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "header_scan_limit",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(LammpsReadConfig {
            sections,
            header_scan_limit,
            skip_missing_sections: self
                .skip_missing_sections
                .unwrap_or(defaults.skip_missing_sections),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_selection_parses_last_and_indices() {
        assert_eq!("last".parse::<FrameSelection>().unwrap(), FrameSelection::Last);
        assert_eq!("LAST".parse::<FrameSelection>().unwrap(), FrameSelection::Last);
        assert_eq!(
            " 3 ".parse::<FrameSelection>().unwrap(),
            FrameSelection::index(3).unwrap()
        );
    }

    #[test]
    fn frame_selection_rejects_zero_and_garbage() {
        assert!(matches!(
            "0".parse::<FrameSelection>(),
            Err(ConfigError::InvalidParameter { name: "frame", .. })
        ));
        assert!("-1".parse::<FrameSelection>().is_err());
        assert!("first".parse::<FrameSelection>().is_err());
    }

    #[test]
    fn frame_selection_displays_like_it_parses() {
        assert_eq!(FrameSelection::Last.to_string(), "last");
        assert_eq!(FrameSelection::index(12).unwrap().to_string(), "12");
    }

    #[test]
    fn builder_uses_defaults_when_unset() {
        let config = LammpsReadConfigBuilder::new().build().unwrap();
        assert_eq!(config, LammpsReadConfig::default());
        assert_eq!(config.sections.len(), 8);
        assert_eq!(config.header_scan_limit, DEFAULT_HEADER_SCAN_LIMIT);
        assert!(!config.skip_missing_sections);
    }

    #[test]
    fn builder_parses_section_list_and_drops_duplicates() {
        let config = LammpsReadConfig::builder()
            .section_list("Atoms Bonds Atoms")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.sections, [Section::Atoms, Section::Bonds]);
    }

    #[test]
    fn builder_rejects_unknown_section_name() {
        let result = LammpsReadConfig::builder().section_list("Atoms Velocities");
        assert!(matches!(result, Err(ConfigError::UnknownSection(_))));
    }

    #[test]
    fn builder_rejects_empty_sections_and_zero_limit() {
        assert!(matches!(
            LammpsReadConfig::builder().sections(Vec::new()).build(),
            Err(ConfigError::InvalidParameter { name: "sections", .. })
        ));
        assert!(matches!(
            LammpsReadConfig::builder().header_scan_limit(0).build(),
            Err(ConfigError::InvalidParameter {
                name: "header_scan_limit",
                ..
            })
        ));
    }
}
