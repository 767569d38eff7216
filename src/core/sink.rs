//! Sinks: an encoder, a destination and a level predicate
//!
//! The builder functions at the bottom produce the three sinks the
//! configuration layer composes: console, rotating file, and error-only
//! rotating file.

use super::appender::Appender;
use super::encoder::EncoderConfig;
use super::error::Result;
use super::level::{AtomicLevel, Level, LevelFilter};
use crate::appenders::{ConsoleAppender, MultiAppender, RotatingFileAppender, RotatingFileConfig};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// One write destination with its encoder and level predicate.
///
/// The mutex serializes writes to the destination; records from concurrent
/// threads land whole, in whatever order the lock is taken.
pub struct Core {
    encoder: Arc<EncoderConfig>,
    appender: Mutex<Box<dyn Appender>>,
    filter: LevelFilter,
    name: String,
}

impl Core {
    pub fn new<A: Appender + 'static>(
        encoder: Arc<EncoderConfig>,
        appender: A,
        filter: LevelFilter,
    ) -> Self {
        let name = appender.name().to_string();
        Self {
            encoder,
            appender: Mutex::new(Box::new(appender)),
            filter,
            name,
        }
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        self.filter.enabled(level)
    }

    pub fn encoder(&self) -> &Arc<EncoderConfig> {
        &self.encoder
    }

    pub fn filter(&self) -> &LevelFilter {
        &self.filter
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write an already encoded line. The caller checks [`Core::enabled`].
    pub fn write_encoded(&self, line: &[u8]) -> Result<()> {
        self.appender.lock().append(line)
    }

    pub fn sync(&self) -> Result<()> {
        self.appender.lock().flush()
    }
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("name", &self.name)
            .field("filter", &self.filter)
            .finish()
    }
}

/// Console sink gated by the shared threshold.
///
/// `console` is normally [`ConsoleAppender`]; anything else redirects what
/// would have gone to stdout.
pub fn console_core<A: Appender + 'static>(
    encoder: Arc<EncoderConfig>,
    level: &AtomicLevel,
    console: A,
) -> Core {
    Core::new(encoder, console, LevelFilter::Threshold(level.clone()))
}

/// Stdout sink gated by the shared threshold
pub fn stdout_core(encoder: Arc<EncoderConfig>, level: &AtomicLevel) -> Core {
    console_core(encoder, level, ConsoleAppender::new())
}

/// Rotating-file sink gated by the shared threshold.
///
/// # Panics
///
/// Panics if `config.filename` is empty: a logger must never be assembled
/// with a half-specified file destination.
pub fn file_core(encoder: Arc<EncoderConfig>, level: &AtomicLevel, config: &RotatingFileConfig) -> Core {
    assert_file_config(config);
    Core::new(
        encoder,
        RotatingFileAppender::new(config.clone()),
        LevelFilter::Threshold(level.clone()),
    )
}

/// Console and rotating file behind one predicate.
///
/// Observably the same as two separate sinks at the shared threshold; the
/// record is encoded once and written to both destinations in order.
///
/// # Panics
///
/// Panics if `config.filename` is empty.
pub fn console_and_file_core<A: Appender + 'static>(
    encoder: Arc<EncoderConfig>,
    level: &AtomicLevel,
    console: A,
    config: &RotatingFileConfig,
) -> Core {
    assert_file_config(config);
    let destinations = MultiAppender::new()
        .with_appender(console)
        .with_appender(RotatingFileAppender::new(config.clone()));
    Core::new(encoder, destinations, LevelFilter::Threshold(level.clone()))
}

/// Error-only sink writing to the `-error` sibling of `config`.
///
/// Accepts `Error` and above no matter where the shared threshold is.
///
/// # Panics
///
/// Panics if `config.filename` is empty.
pub fn error_file_core(encoder: Arc<EncoderConfig>, config: &RotatingFileConfig) -> Core {
    assert_file_config(config);
    Core::new(
        encoder,
        RotatingFileAppender::new(config.error_file()),
        LevelFilter::AtLeast(Level::Error),
    )
}

pub(crate) fn assert_file_config(config: &RotatingFileConfig) {
    assert!(
        config.has_filename(),
        "log file config has an empty filename"
    );
}
