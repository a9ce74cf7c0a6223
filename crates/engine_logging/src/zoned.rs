//! Line logger rendering `[DD-MM-YYYY HH:MM:SS] - LEVEL - message` with the
//! timestamp expressed in a configured IANA timezone.

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::{Level, LevelFilter, Log, Metadata, Record};
use simplelog::{Config, SharedLogger};

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// A `log::Log` implementation writing one formatted line per record.
///
/// Implements [`SharedLogger`] so it can be combined with other simplelog
/// loggers through `CombinedLogger`.
pub struct ZonedLogger<W: Write + Send + 'static> {
    level: LevelFilter,
    tz: Tz,
    writable: Mutex<W>,
}

impl<W: Write + Send + 'static> ZonedLogger<W> {
    /// Creates a boxed logger writing records at or above `level` to `writable`.
    pub fn new(level: LevelFilter, tz: Tz, writable: W) -> Box<Self> {
        Box::new(Self {
            level,
            tz,
            writable: Mutex::new(writable),
        })
    }
}

impl<W: Write + Send + 'static> Log for ZonedLogger<W> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let now = Utc::now().with_timezone(&self.tz);
        let line = format_line(&now, record.level(), record.args());
        // A poisoned lock only means another thread panicked mid-write.
        let mut writable = match self.writable.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writable, "{line}");
    }

    fn flush(&self) {
        if let Ok(mut writable) = self.writable.lock() {
            let _ = writable.flush();
        }
    }
}

impl<W: Write + Send + 'static> SharedLogger for ZonedLogger<W> {
    fn level(&self) -> LevelFilter {
        self.level
    }

    fn config(&self) -> Option<&Config> {
        None
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        Box::new(*self)
    }
}

/// Renders a single log line for the given zoned timestamp.
pub fn format_line(time: &DateTime<Tz>, level: Level, message: &fmt::Arguments<'_>) -> String {
    format!(
        "[{}] - {} - {}",
        time.format(TIMESTAMP_FORMAT),
        level_label(level),
        message
    )
}

/// Level names as they appear in log lines; warnings are spelled out.
pub fn level_label(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
