//! Logging initialization for the watcher binary.
//!
//! Lines are written to stdout and, optionally, appended to a log file.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use engine_logging::ZonedLogger;
use log::LevelFilter;
use simplelog::{CombinedLogger, SharedLogger};
use watcher_engine::DEFAULT_TIMEZONE;

/// Level used when the configuration could not be read.
const FALLBACK_LEVEL: LevelFilter = LevelFilter::Info;

/// Destination for log output.
pub enum LogDestination {
    /// Write to stdout only.
    Terminal,
    /// Write to stdout and append to the given file.
    Both(PathBuf),
}

/// Initialize the global logger with the specified destination.
///
/// A log file that cannot be opened is reported on stderr and skipped;
/// terminal logging still goes ahead.
pub fn initialize(level: LevelFilter, tz: Tz, destination: LogDestination) {
    let mut loggers: Vec<Box<dyn SharedLogger>> =
        vec![ZonedLogger::new(level, tz, io::stdout())];

    if let LogDestination::Both(path) = destination {
        match open_log_file(&path) {
            Ok(file) => loggers.push(ZonedLogger::new(level, tz, file)),
            Err(err) => {
                eprintln!("Warning: Could not open log file at {:?}: {}", path, err);
            }
        }
    }

    let _ = CombinedLogger::init(loggers);
}

/// Terminal logging for failures that happen before the configured level
/// and timezone are known.
pub fn initialize_fallback() {
    initialize(FALLBACK_LEVEL, DEFAULT_TIMEZONE, LogDestination::Terminal);
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use engine_logging::ZonedLogger;
    use log::{Level, Log, Record};
    use watcher_engine::{ConfigError, DEFAULT_TIMEZONE};

    use super::{open_log_file, FALLBACK_LEVEL};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn config_errors_are_logged_as_error_lines() {
        let buf = SharedBuf::default();
        let logger = ZonedLogger::new(FALLBACK_LEVEL, DEFAULT_TIMEZONE, buf.clone());
        let err = ConfigError::Missing("TARGET_URL");
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .args(format_args!("Invalid configuration: {}", err))
                .build(),
        );

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(output.starts_with('['), "{output}");
        assert!(
            output.ends_with("] - ERROR - Invalid configuration: TARGET_URL is required\n"),
            "{output}"
        );
    }

    #[test]
    fn log_file_is_appended_not_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watcher.log");
        fs::write(&path, "earlier run\n").unwrap();

        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "this run").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "earlier run\nthis run\n");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open_log_file(&dir.path().join("nope").join("watcher.log")).is_err());
    }
}
