use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::{
    Layer,
    filter::{LevelFilter, Targets},
    fmt::{self},
    prelude::*,
    registry::LookupSpan,
};

/// Target prefix shared by the library and the binary.
const CRATE_TARGET: &str = "mdfmt";

/// Installs the global subscriber.
///
/// `-v` flags raise the level of `mdfmt` events only. Events from dependencies stay
/// at `WARN` or quieter, and `quiet` silences everything.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let level = level_filter(verbosity, quiet);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(target_filter(level))
        .with(stderr_layer);

    if let Some(path) = log_file {
        let file = File::create(&path).map_err(CliError::Io)?;
        subscriber
            .with(file_layer(file))
            .try_init()
            .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))?;
    } else {
        subscriber
            .try_init()
            .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))?;
    }

    Ok(())
}

fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn target_filter(level: LevelFilter) -> Targets {
    Targets::new()
        .with_target(CRATE_TARGET, level)
        .with_default(level.min(LevelFilter::WARN))
}

/// Plain-text records with targets, for `--log-file`.
fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{Level, debug, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("Failed to set up global logger for tests");
        });
    }

    #[test]
    fn verbosity_flags_map_to_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(3, true), LevelFilter::OFF);
    }

    #[test]
    fn verbose_level_reaches_mdfmt_modules_only() {
        let filter = target_filter(level_filter(2, false));

        assert!(filter.would_enable("mdfmt::core::io::lammps::reader", &Level::DEBUG));
        assert!(!filter.would_enable("mdfmt::core::io::xyz", &Level::TRACE));
        assert!(!filter.would_enable("toml::de", &Level::DEBUG));
        assert!(filter.would_enable("toml::de", &Level::WARN));
    }

    #[test]
    fn default_level_hides_mdfmt_progress() {
        let filter = target_filter(level_filter(0, false));

        assert!(!filter.would_enable("mdfmt::workflows::convert", &Level::INFO));
        assert!(filter.would_enable("mdfmt::workflows::convert", &Level::WARN));
    }

    #[test]
    fn quiet_silences_errors_from_every_target() {
        let filter = target_filter(level_filter(0, true));

        assert!(!filter.would_enable("mdfmt", &Level::ERROR));
        assert!(!filter.would_enable("serde", &Level::ERROR));
    }

    #[test]
    #[serial]
    fn log_file_keeps_mdfmt_debug_and_drops_dependency_debug() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("mdfmt.log");

        let file = File::create(&log_path).unwrap();
        let subscriber = tracing_subscriber::registry()
            .with(target_filter(LevelFilter::DEBUG))
            .with(file_layer(file));

        tracing::subscriber::with_default(subscriber, || {
            debug!(target: "mdfmt::workflows::convert", "Read 3 atoms.");
            debug!(target: "toml::de", "Parsed table.");
            warn!(target: "toml::de", "Duplicate key.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("mdfmt::workflows::convert: Read 3 atoms."));
        assert!(!content.contains("Parsed table."));
        assert!(content.contains("Duplicate key."));
        assert!(!content.contains("\u{1b}["));
    }

    #[test]
    #[serial]
    fn second_initialization_reports_error() {
        ensure_global_logger_is_set();

        let result = setup_logging(0, false, None);
        assert!(matches!(result, Err(CliError::Other(_))));
    }

    #[test]
    #[serial]
    fn directory_as_log_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = setup_logging(0, false, Some(dir.path().to_path_buf()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
