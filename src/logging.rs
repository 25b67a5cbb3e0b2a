//! A [`log`] backend for chat services.
//!
//! Log messages in a chat bridge routinely quote user text, and user text
//! carries markup. [`ChatLogger`] can transcode every message from a given
//! dialect into plain text before writing it, so raw control bytes never
//! reach the terminal.
//!
//! ```rust,no_run
//! use chatmarkup::Dialect;
//! use chatmarkup::logging::ChatLogger;
//! use log::LevelFilter;
//!
//! ChatLogger::new()
//!     .level(LevelFilter::Debug)
//!     .markup(Some(Dialect::ControlByte))
//!     .init()
//!     .expect("logger already installed");
//! ```

use std::io::{self, Write};
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::{OffsetDateTime, format_description::OwnedFormatItem};

use crate::dialect::Dialect;
use crate::sync::lock_recover;
use crate::transcode::transcode;

/// Line-oriented logger for the `log` crate.
///
/// # Thread Safety
///
/// `ChatLogger` implements `Log`, which requires `Sync`. The writer and the
/// last printed timestamp are behind mutexes with poison recovery. Each
/// record is written with a single call while the writer lock is held, so
/// lines from concurrent threads never interleave.
pub struct ChatLogger {
    level: LevelFilter,
    show_time: bool,
    omit_repeated_times: bool,
    show_level: bool,
    show_path: bool,
    markup: Option<Dialect>,
    time_format: OwnedFormatItem,
    last_time: Mutex<Option<String>>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ChatLogger {
    /// Create a logger writing to stderr at `Info` level.
    #[must_use]
    pub fn new() -> Self {
        let time_format = time::format_description::parse_owned::<2>("[hour]:[minute]:[second]")
            .unwrap_or_else(|_| OwnedFormatItem::Compound(Box::default()));
        Self {
            level: LevelFilter::Info,
            show_time: true,
            omit_repeated_times: true,
            show_level: true,
            show_path: false,
            markup: None,
            time_format,
            last_time: Mutex::new(None),
            writer: Mutex::new(Box::new(io::stderr())),
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Blank out a timestamp identical to the previous one.
    #[must_use]
    pub fn omit_repeated_times(mut self, omit: bool) -> Self {
        self.omit_repeated_times = omit;
        self
    }

    /// Enable or disable the level column.
    #[must_use]
    pub fn show_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Append `file:line` to each record when available.
    #[must_use]
    pub fn show_path(mut self, show: bool) -> Self {
        self.show_path = show;
        self
    }

    /// Strip markup of this dialect from messages. `None` writes them as is.
    #[must_use]
    pub fn markup(mut self, dialect: Option<Dialect>) -> Self {
        self.markup = dialect;
        self
    }

    /// Override the time format. An invalid description keeps the current one.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Write to `writer` instead of stderr.
    #[must_use]
    pub fn writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Mutex::new(Box::new(writer));
        self
    }

    /// Install as the global logger.
    ///
    /// # Errors
    ///
    /// Fails if a global logger is already installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format)
            .unwrap_or_else(|_| now.to_string())
    }

    fn format_record(&self, record: &Record<'_>) -> String {
        let mut line = String::new();

        if self.show_time {
            let time_str = self.format_time();
            if self.omit_repeated_times {
                let mut last = lock_recover(&self.last_time);
                if last.as_ref() == Some(&time_str) {
                    line.push_str(&" ".repeat(time_str.len()));
                } else {
                    line.push_str(&time_str);
                    *last = Some(time_str);
                }
            } else {
                line.push_str(&time_str);
            }
            line.push(' ');
        }

        if self.show_level {
            let level_name = record.level().to_string();
            line.push_str(&format!("{level_name:<8}"));
            line.push(' ');
        }

        let message = record.args().to_string();
        match self.markup {
            Some(dialect) => line.push_str(&transcode(&message, dialect, Dialect::PlainText, false)),
            None => line.push_str(&message),
        }

        if self.show_path
            && let Some(path) = record.file()
        {
            line.push(' ');
            line.push_str(path);
            if let Some(line_no) = record.line() {
                line.push_str(&format!(":{line_no}"));
            }
        }

        line
    }
}

impl Default for ChatLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for ChatLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut line = self.format_record(record);
        line.push('\n');
        let mut writer = lock_recover(&self.writer);
        // A logger has nowhere to report its own write failures.
        let _ = writer.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = lock_recover(&self.writer).flush();
    }
}
