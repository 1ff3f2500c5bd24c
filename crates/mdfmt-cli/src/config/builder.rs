use super::file::FileConfig;
use crate::cli::ConvertArgs;
use crate::error::Result;
use mdfmt::core::io::config::{DEFAULT_HEADER_SCAN_LIMIT, LammpsReadConfig, XyzReadConfig};
use mdfmt::core::models::lammps::Section;
use mdfmt::workflows::convert::ConvertOptions;
use tracing::debug;

/// Merges command-line arguments over the optional configuration file.
pub fn build_convert_options(args: &ConvertArgs) -> Result<ConvertOptions> {
    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let lammps_file = file_config.lammps.unwrap_or_default();
    let xyz_file = file_config.xyz.unwrap_or_default();

    let builder = match &args.sections {
        Some(list) => LammpsReadConfig::builder().section_list(list)?,
        None => LammpsReadConfig::builder().sections(
            lammps_file
                .sections
                .unwrap_or_else(|| Section::ALL.to_vec()),
        ),
    };
    let header_scan_limit = args
        .header_scan_limit
        .or(lammps_file.header_scan_limit)
        .unwrap_or(DEFAULT_HEADER_SCAN_LIMIT);
    let skip_missing_sections =
        args.skip_missing || lammps_file.skip_missing_sections.unwrap_or(false);

    let lammps = builder
        .header_scan_limit(header_scan_limit)
        .skip_missing_sections(skip_missing_sections)
        .build()?;

    let xyz = XyzReadConfig {
        frame: args.frame.or(xyz_file.frame).unwrap_or_default(),
    };

    let options = ConvertOptions {
        from: args.from,
        to: args.to,
        xyz,
        lammps,
    };
    debug!("Resolved conversion options: {:?}", options);
    Ok(options)
}

/// Validates an optional header scan limit, falling back to the default.
pub fn resolve_header_scan_limit(limit: Option<usize>) -> Result<usize> {
    let config = LammpsReadConfig::builder()
        .header_scan_limit(limit.unwrap_or(DEFAULT_HEADER_SCAN_LIMIT))
        .build()?;
    Ok(config.header_scan_limit)
}
