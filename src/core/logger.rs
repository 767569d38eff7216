//! Fan-out logger over a fixed set of sinks

use super::{
    encoder::EncoderConfig,
    error::{LoggerError, Result},
    field::Fields,
    level::Level,
    record::Record,
    sink::Core,
};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Exit status used after a fatal record
pub const FATAL_EXIT_CODE: i32 = 1;

/// Payload of the unwind raised after a panic-level record.
///
/// Recover it with `std::panic::catch_unwind` and `downcast_ref::<LogPanic>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPanic {
    pub level: Level,
    pub message: String,
}

impl fmt::Display for LogPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)
    }
}

impl std::error::Error for LogPanic {}

/// Unwind with a [`LogPanic`] payload
pub(crate) fn raise_panic(level: Level, message: &str) -> ! {
    std::panic::panic_any(LogPanic {
        level,
        message: message.to_string(),
    })
}

/// Immutable fan-out of sinks.
///
/// A record is encoded once per distinct encoder and written to every sink
/// whose predicate accepts its level. A failing sink is reported on stderr
/// and never keeps the record from the others.
pub struct Logger {
    cores: Vec<Core>,
    development: bool,
}

impl Logger {
    /// A logger over `cores`. An empty list gives a logger that drops
    /// everything.
    #[must_use]
    pub fn new(cores: Vec<Core>) -> Self {
        Self {
            cores,
            development: false,
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn cores(&self) -> &[Core] {
        &self.cores
    }

    pub fn is_development(&self) -> bool {
        self.development
    }

    /// Whether any sink would accept `level`
    pub fn enabled(&self, level: Level) -> bool {
        self.cores.iter().any(|core| core.enabled(level))
    }

    /// Write one record to every sink that accepts it.
    ///
    /// Only writes; the unwind or exit that follows panic and fatal
    /// records is [`Logger::after_write`].
    pub fn write(
        &self,
        level: Level,
        message: &str,
        fields: &Fields,
        caller: &'static Location<'static>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let record = Record::new(level, message, fields).with_caller(caller);
        let mut encoded: Option<(&Arc<EncoderConfig>, Vec<u8>)> = None;

        for (idx, core) in self.cores.iter().enumerate() {
            if !core.enabled(level) {
                continue;
            }

            let reuse = matches!(encoded, Some((encoder, _)) if Arc::ptr_eq(encoder, core.encoder()));
            if !reuse {
                encoded = Some((core.encoder(), core.encoder().encode(&record)));
            }

            if let Some((_, ref line)) = encoded {
                if let Err(e) = core.write_encoded(line) {
                    eprintln!(
                        "[LOGGER ERROR] Sink #{} ({}) failed: {}",
                        idx,
                        core.name(),
                        e
                    );
                }
            }
        }
    }

    /// Act on a record that was just written: unwind after `Panic` (and
    /// after `DPanic` in development mode), exit after `Fatal`.
    ///
    /// This runs whether or not any sink accepted the record.
    pub fn after_write(&self, level: Level, message: &str) {
        match level {
            Level::Panic => raise_panic(level, message),
            Level::DPanic if self.development => raise_panic(level, message),
            Level::Fatal => self.exit_fatal(),
            _ => {}
        }
    }

    /// Flush every sink, then exit with [`FATAL_EXIT_CODE`]
    pub(crate) fn exit_fatal(&self) -> ! {
        if let Err(e) = self.sync() {
            eprintln!("[LOGGER ERROR] Failed to sync before exit: {}", e);
        }
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Flush every sink.
    ///
    /// # Errors
    ///
    /// Every sink is flushed even when an earlier one fails; all failures
    /// are returned together.
    pub fn sync(&self) -> Result<()> {
        let errors = self
            .cores
            .iter()
            .filter_map(|core| core.sync().err())
            .collect();
        LoggerError::combine(errors)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("cores", &self.cores)
            .field("development", &self.development)
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_log_facade::prelude::*;
/// use std::sync::Arc;
///
/// let level = AtomicLevel::new(Level::Debug);
/// let logger = Logger::builder()
///     .core(stdout_core(Arc::new(EncoderConfig::default()), &level))
///     .development(true)
///     .build();
/// assert_eq!(logger.cores().len(), 1);
/// ```
#[derive(Default)]
pub struct LoggerBuilder {
    cores: Vec<Core>,
    development: bool,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink
    #[must_use = "builder methods return a new value"]
    pub fn core(mut self, core: Core) -> Self {
        self.cores.push(core);
        self
    }

    /// Unwind after `DPanic` records
    #[must_use = "builder methods return a new value"]
    pub fn development(mut self, enabled: bool) -> Self {
        self.development = enabled;
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            cores: self.cores,
            development: self.development,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::BufferAppender;
    use crate::core::appender::Appender;
    use crate::core::level::{AtomicLevel, LevelFilter};
    use std::panic::{self, AssertUnwindSafe};

    fn buffer_core(encoder: &Arc<EncoderConfig>, filter: LevelFilter) -> (Core, BufferAppender) {
        let buffer = BufferAppender::new();
        (Core::new(Arc::clone(encoder), buffer.clone(), filter), buffer)
    }

    struct BrokenAppender;

    impl Appender for BrokenAppender {
        fn append(&mut self, _line: &[u8]) -> Result<()> {
            Err(LoggerError::file_appender("broken", "disk gone"))
        }

        fn flush(&mut self) -> Result<()> {
            Err(LoggerError::file_appender("broken", "cannot flush"))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_write_fans_out_by_predicate() {
        let encoder = Arc::new(EncoderConfig::default());
        let level = AtomicLevel::new(Level::Debug);
        let (all, all_buf) = buffer_core(&encoder, LevelFilter::Threshold(level.clone()));
        let (errors, err_buf) = buffer_core(&encoder, LevelFilter::AtLeast(Level::Error));
        let logger = Logger::new(vec![all, errors]);

        logger.write(Level::Info, "info", &Fields::new(), Location::caller());
        logger.write(Level::Error, "error", &Fields::new(), Location::caller());

        assert_eq!(all_buf.lines().len(), 2);
        assert_eq!(err_buf.lines().len(), 1);
        assert_eq!(err_buf.json_lines()[0]["msg"], "error");
        assert_eq!(all_buf.lines()[1], err_buf.lines()[0]);
    }

    #[test]
    fn test_failing_sink_does_not_block_others() {
        let encoder = Arc::new(EncoderConfig::default());
        let (healthy, buffer) = buffer_core(&encoder, LevelFilter::AtLeast(Level::Debug));
        let broken = Core::new(Arc::clone(&encoder), BrokenAppender, LevelFilter::AtLeast(Level::Debug));
        let logger = Logger::new(vec![broken, healthy]);

        logger.write(Level::Warn, "still here", &Fields::new(), Location::caller());
        assert_eq!(buffer.lines().len(), 1);
    }

    #[test]
    fn test_sync_aggregates_and_visits_every_sink() {
        let encoder = Arc::new(EncoderConfig::default());
        let (healthy, buffer) = buffer_core(&encoder, LevelFilter::AtLeast(Level::Debug));
        let broken = Core::new(Arc::clone(&encoder), BrokenAppender, LevelFilter::AtLeast(Level::Debug));
        let logger = Logger::new(vec![broken, healthy]);

        let err = logger.sync().unwrap_err();
        assert!(err.to_string().contains("cannot flush"));
        assert_eq!(buffer.flush_count(), 1);
    }

    #[test]
    fn test_panic_level_unwinds_with_payload() {
        let logger = Logger::new(Vec::new());
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.after_write(Level::Panic, "bad state");
        }));

        let payload = result.unwrap_err();
        let log_panic = payload.downcast_ref::<LogPanic>().expect("LogPanic payload");
        assert_eq!(log_panic.level, Level::Panic);
        assert_eq!(log_panic.message, "bad state");
    }

    #[test]
    fn test_dpanic_only_unwinds_in_development() {
        let production = Logger::new(Vec::new());
        production.after_write(Level::DPanic, "tolerated");

        let development = Logger::builder().development(true).build();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            development.after_write(Level::DPanic, "not tolerated");
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_level_is_never_written() {
        let encoder = Arc::new(EncoderConfig::default());
        let (core, buffer) = buffer_core(&encoder, LevelFilter::AtLeast(Level::Debug));
        let logger = Logger::new(vec![core]);

        logger.write(Level::Invalid, "nope", &Fields::new(), Location::caller());
        logger.after_write(Level::Invalid, "nope");
        assert!(buffer.contents().is_empty());
    }
}
