use crate::error::{CliError, Result};
use mdfmt::core::io::config::FrameSelection;
use mdfmt::core::models::lammps::Section;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub lammps: Option<FileLammpsConfig>,
    pub xyz: Option<FileXyzConfig>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileLammpsConfig {
    pub sections: Option<Vec<Section>>,
    pub header_scan_limit: Option<usize>,
    pub skip_missing_sections: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileXyzConfig {
    pub frame: Option<FrameSelection>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
