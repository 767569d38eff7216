//! The composition root applications hold on to
//!
//! A [`Facade`] owns the three pieces of shared state: the level threshold,
//! the encoder configuration, and the currently installed [`Logger`].
//! Applications create one at startup and pass clones down; there is no
//! process-global instance.

use super::{
    encoder::EncoderConfig,
    error::Result,
    field::{FieldValue, Fields},
    handle::LoggerHandle,
    level::{AtomicLevel, Level},
    logger::{raise_panic, Logger},
    sink::stdout_core,
};
use arc_swap::ArcSwap;
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

struct FacadeInner {
    level: AtomicLevel,
    encoder: Arc<EncoderConfig>,
    logger: ArcSwap<Logger>,
}

/// Leveled logging entry point.
///
/// Clones share everything: a level change or a reinstalled logger is seen
/// by every clone and every [`LoggerHandle`] derived from one on their next
/// record. Emission loads the current logger without locking.
///
/// # Example
/// ```
/// use rust_log_facade::prelude::*;
///
/// let log = Facade::new();
/// log.info("service started");
///
/// let request = log.with("request_id", 42).with("path", "/health");
/// request.warn("slow response");
///
/// log.set_level(Level::Error);
/// log.info("suppressed");
/// ```
#[derive(Clone)]
pub struct Facade {
    inner: Arc<FacadeInner>,
}

impl Facade {
    /// Console-only logger at `Info` with the default encoder
    pub fn new() -> Self {
        Self::with_encoder(EncoderConfig::default())
    }

    /// Console-only logger at `Info` with a custom encoder.
    ///
    /// The encoder is fixed for the lifetime of the facade; every sink built
    /// from it afterwards shares this instance. A `time_layout` chrono cannot
    /// render is replaced by [`DEFAULT_TIME_LAYOUT`](super::encoder::DEFAULT_TIME_LAYOUT).
    pub fn with_encoder(encoder: EncoderConfig) -> Self {
        let level = AtomicLevel::new(Level::Info);
        let encoder = Arc::new(encoder.sanitized());
        let logger = Logger::new(vec![stdout_core(Arc::clone(&encoder), &level)]);
        Self {
            inner: Arc::new(FacadeInner {
                level,
                encoder,
                logger: ArcSwap::from_pointee(logger),
            }),
        }
    }

    /// Current threshold
    pub fn level(&self) -> Level {
        self.inner.level.level()
    }

    /// Install a new threshold, effective on the next record of every sink
    /// using the shared threshold. `Level::Invalid` is ignored.
    pub fn set_level(&self, level: Level) {
        self.inner.level.set_level(level);
    }

    /// Parse `text` (case-insensitive) and install it.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::LevelParse`](super::error::LoggerError::LevelParse)
    /// and leaves the threshold unchanged when `text` names no level.
    pub fn set_level_from_text(&self, text: &str) -> Result<Level> {
        self.inner.level.set_level_from_text(text)
    }

    /// The shared threshold cell, for building sinks
    pub fn atomic_level(&self) -> &AtomicLevel {
        &self.inner.level
    }

    pub fn encoder(&self) -> &Arc<EncoderConfig> {
        &self.inner.encoder
    }

    /// Replace the current logger. Records already being written finish on
    /// the old one; the old sinks are released once nothing references them.
    pub fn install(&self, logger: Logger) {
        self.inner.logger.store(Arc::new(logger));
    }

    /// The logger installed right now
    pub fn current(&self) -> Arc<Logger> {
        self.inner.logger.load_full()
    }

    /// Whether a record at `level` would reach any sink
    pub fn enabled(&self, level: Level) -> bool {
        self.inner.logger.load().enabled(level)
    }

    /// Handle carrying one field
    pub fn with<K, V>(&self, key: K, value: V) -> LoggerHandle
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        LoggerHandle::new(self.clone(), Fields::new().with_field(key, value))
    }

    /// Handle carrying `fields`
    pub fn with_fields(&self, fields: Fields) -> LoggerHandle {
        LoggerHandle::new(self.clone(), fields)
    }

    /// Flush every sink of the current logger.
    ///
    /// # Errors
    ///
    /// Every sink is flushed; all failures come back together.
    pub fn sync(&self) -> Result<()> {
        self.inner.logger.load().sync()
    }

    leveled_methods! {
        /// Log at `Debug`
        Debug => debug, debug_fmt;
        /// Log at `Info`
        Info => info, info_fmt;
        /// Log at `Warn`
        Warn => warn, warn_fmt;
        /// Log at `Error`
        Error => error, error_fmt;
        /// Log at `DPanic`; unwinds afterwards in development mode only
        DPanic => dpanic, dpanic_fmt;
    }

    fn emit(&self, level: Level, caller: &'static Location<'static>, args: fmt::Arguments<'_>) {
        self.dispatch(level, &Fields::new(), caller, args);
    }

    fn emit_panic(&self, caller: &'static Location<'static>, args: fmt::Arguments<'_>) -> ! {
        self.dispatch_panic(&Fields::new(), caller, args)
    }

    fn emit_fatal(&self, caller: &'static Location<'static>, args: fmt::Arguments<'_>) -> ! {
        self.dispatch_fatal(&Fields::new(), caller, args)
    }

    /// Write through the current logger, then run the level's follow-up
    /// (unwind or exit) if it has one.
    pub(crate) fn dispatch(
        &self,
        level: Level,
        fields: &Fields,
        caller: &'static Location<'static>,
        args: fmt::Arguments<'_>,
    ) {
        let logger = self.inner.logger.load();
        let terminal = matches!(level, Level::DPanic | Level::Panic | Level::Fatal);
        if !terminal && !logger.enabled(level) {
            return;
        }

        let message = render(args);
        logger.write(level, &message, fields, caller);
        logger.after_write(level, &message);
    }

    pub(crate) fn dispatch_panic(
        &self,
        fields: &Fields,
        caller: &'static Location<'static>,
        args: fmt::Arguments<'_>,
    ) -> ! {
        let message = render(args);
        self.inner
            .logger
            .load()
            .write(Level::Panic, &message, fields, caller);
        raise_panic(Level::Panic, &message)
    }

    pub(crate) fn dispatch_fatal(
        &self,
        fields: &Fields,
        caller: &'static Location<'static>,
        args: fmt::Arguments<'_>,
    ) -> ! {
        let message = render(args);
        let logger = self.inner.logger.load_full();
        logger.write(Level::Fatal, &message, fields, caller);
        logger.exit_fatal()
    }
}

impl Default for Facade {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Facade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facade")
            .field("level", &self.level())
            .field("logger", &self.inner.logger.load())
            .finish()
    }
}

fn render(args: fmt::Arguments<'_>) -> Cow<'_, str> {
    match args.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(args.to_string()),
    }
}
