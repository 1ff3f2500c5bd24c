use clap::{Args, Parser, Subcommand};
use mdfmt::core::io::config::FrameSelection;
use mdfmt::workflows::FileFormat;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "mdfmt developers",
    version,
    about = "mdfmt - convert and inspect XYZ trajectories and LAMMPS data files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a file to another format, extracting a frame or a set of sections.
    Convert(ConvertArgs),
    /// Print a summary of a trajectory or data file.
    Inspect(InspectArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input file (e.g., traj.xyz, system.data).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Format of the input file; inferred from the extension when omitted.
    #[arg(long, value_name = "FMT")]
    pub from: Option<FileFormat>,

    /// Format of the output file; inferred from the extension when omitted.
    #[arg(long, value_name = "FMT")]
    pub to: Option<FileFormat>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- XYZ Overrides ---
    /// Frame to extract from a trajectory: a 1-based index or 'last'.
    #[arg(long, value_name = "N|last")]
    pub frame: Option<FrameSelection>,

    // --- LAMMPS Overrides ---
    /// Space separated list of data file sections to read (e.g., "Box Types Atoms").
    #[arg(long, value_name = "LIST")]
    pub sections: Option<String>,

    /// Maximum number of lines searched for box bounds and type counts.
    #[arg(long, value_name = "INT")]
    pub header_scan_limit: Option<usize>,

    /// Leave out requested sections that are missing from the input instead of failing.
    #[arg(long)]
    pub skip_missing: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the file to inspect.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Format of the file; inferred from the extension when omitted.
    #[arg(long, value_name = "FMT")]
    pub format: Option<FileFormat>,

    /// Maximum number of lines searched for box bounds and type counts.
    #[arg(long, value_name = "INT")]
    pub header_scan_limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdfmt::core::io::format::Format;

    #[test]
    fn convert_arguments_are_parsed() {
        let cli = Cli::try_parse_from([
            "mdfmt",
            "-vv",
            "convert",
            "-i",
            "in.txt",
            "-o",
            "out.xyz",
            "--from",
            "xyz",
            "--frame",
            "last",
            "--sections",
            "Box Atoms",
            "--skip-missing",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Convert(args) = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(args.from, Some(FileFormat::Frame(Format::Xyz)));
        assert_eq!(args.to, None);
        assert_eq!(args.frame, Some(FrameSelection::Last));
        assert_eq!(args.sections.as_deref(), Some("Box Atoms"));
        assert!(args.skip_missing);
    }

    #[test]
    fn unknown_format_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["mdfmt", "inspect", "a.txt", "--format", "Foo"]);
        assert!(result.is_err());
    }

    #[test]
    fn frame_zero_is_rejected_at_parse_time() {
        let result =
            Cli::try_parse_from(["mdfmt", "convert", "-i", "a.xyz", "-o", "b.xyz", "--frame", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["mdfmt", "-q", "-v", "inspect", "a.xyz"]);
        assert!(result.is_err());
    }
}
