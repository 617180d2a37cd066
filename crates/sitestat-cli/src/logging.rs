use crate::error::{CliError, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{
    Layer,
    filter::{LevelFilter, Targets},
    fmt,
    prelude::*,
    registry::LookupSpan,
};

/// Target prefix shared by the library (`sitestat::...`) and this binary.
const FILE_LOG_TARGET: &str = "sitestat";

fn console_level(verbosity: u8, quiet: bool) -> LevelFilter {
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

/// The log file keeps at least phase-level records, whatever the console shows.
fn file_level(console: LevelFilter) -> LevelFilter {
    console.max(LevelFilter::INFO)
}

/// Plain-text layer for `--log-file`, restricted to this project's targets.
fn file_layer<S>(file: File, level: LevelFilter) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(Targets::new().with_target(FILE_LOG_TARGET, level))
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let console = console_level(verbosity, quiet);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(console);

    let file_layer = log_file
        .map(|path| File::create(path).map_err(CliError::Io))
        .transpose()?
        .map(|file| file_layer(file, file_level(console)));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::PathBuf;
    use std::sync::Once;
    use tracing::{debug, info, trace, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("Failed to set up global logger for tests");
        });
    }

    #[test]
    fn verbosity_maps_to_console_level() {
        assert_eq!(console_level(0, false), LevelFilter::WARN);
        assert_eq!(console_level(1, false), LevelFilter::INFO);
        assert_eq!(console_level(2, false), LevelFilter::DEBUG);
        assert_eq!(console_level(7, false), LevelFilter::TRACE);
        assert_eq!(console_level(2, true), LevelFilter::OFF);
    }

    #[test]
    fn log_file_keeps_info_when_console_is_quiet() {
        assert_eq!(file_level(LevelFilter::OFF), LevelFilter::INFO);
        assert_eq!(file_level(LevelFilter::WARN), LevelFilter::INFO);
        assert_eq!(file_level(LevelFilter::TRACE), LevelFilter::TRACE);
    }

    #[test]
    #[serial]
    fn global_logger_accepts_workflow_events() {
        ensure_global_logger_is_set();

        warn!(system = "FeAl", "Concentrations do not sum to 1");
        info!(num_systems = 2, "Configuration loaded.");
        debug!(num_sites = 4, "Frame loaded.");
        trace!("Solver residual computed.");
    }

    #[test]
    #[serial]
    fn log_file_records_only_project_targets() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("sitestat.log");

        let file = File::create(&log_path).unwrap();
        let subscriber =
            tracing_subscriber::registry().with(file_layer(file, LevelFilter::DEBUG));

        tracing::subscriber::with_default(subscriber, || {
            debug!(target: "sitestat::workflows::sweep", step = 20_000, "Frame done.");
            debug!(target: "csv::writer", "Flushed buffer.");
            trace!(target: "sitestat::core::thermo", "Below the file level.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Frame done."));
        assert!(content.contains("sitestat::workflows::sweep"));
        assert!(content.contains("ThreadId"));
        assert!(!content.contains("Flushed buffer."));
        assert!(!content.contains("Below the file level."));
    }

    #[test]
    #[serial]
    fn unwritable_log_file_is_an_io_error() {
        let invalid_path = PathBuf::from("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(0, false, Some(&invalid_path));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }
}
