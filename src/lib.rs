//! # Rust Log Facade
//!
//! Leveled, structured JSON logging with a runtime-adjustable threshold and
//! up to three local sinks: the console, a size-rotated log file, and an
//! error-only sibling of that file.
//!
//! ## Features
//!
//! - **Explicit root**: a [`Facade`] is created by the application and passed
//!   down; there is no hidden global logger
//! - **Live threshold**: [`Facade::set_level`] takes effect on the next record
//!   of every sink, including ones built earlier
//! - **Field handles**: [`Facade::with`] returns an immutable
//!   [`LoggerHandle`] that adds its fields to every record
//! - **Rotation**: [`RotatingFileAppender`] rotates by size and prunes backups
//!   by count and age, optionally gzipping them
//! - **Synchronous**: every call encodes and writes before returning
//!
//! ## Quick start
//!
//! ```no_run
//! use rust_log_facade::prelude::*;
//!
//! let log = Facade::new();
//! Config::new()
//!     .with_level("info")
//!     .with_file(RotatingFileConfig::new("logs/app.log"))
//!     .with_error_file(true)
//!     .build(&log)?;
//!
//! log.info("ready");
//! log.with("order", 1142).error("payment declined");
//! log.sync()?;
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{
        BufferAppender, ConsoleAppender, MultiAppender, RotatingFileAppender, RotatingFileConfig,
    };
    pub use crate::core::{
        console_and_file_core, console_core, error_file_core, file_core, stdout_core, Appender,
        AtomicLevel, Config, Core, EncoderConfig, Facade, FieldValue, Fields, Level, LevelFilter,
        LogPanic, Logger, LoggerBuilder, LoggerError, LoggerHandle, Result,
    };
}

pub use appenders::{
    derive_error_filename, BufferAppender, ConsoleAppender, MultiAppender, RotatingFileAppender,
    RotatingFileConfig,
};
pub use core::{
    Appender, AtomicLevel, CallerEncoding, Config, Core, EncoderConfig, Facade, FieldValue, Fields,
    Level, LevelEncoding, LevelFilter, LogPanic, Logger, LoggerBuilder, LoggerError, LoggerHandle,
    Record, Result, FATAL_EXIT_CODE,
};
