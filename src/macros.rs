//! Logging macros for ergonomic log message formatting.
//!
//! Each macro takes a [`Facade`](crate::Facade) or a
//! [`LoggerHandle`](crate::LoggerHandle) followed by `format!`-style
//! arguments. The template is only rendered when some sink accepts the
//! level, and the reported caller is the line of the macro invocation.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::prelude::*;
//! use rust_log_facade::info;
//!
//! let log = Facade::new();
//!
//! // Basic logging
//! info!(log, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(log, "Server listening on port {}", port);
//!
//! // Through a handle carrying fields
//! let conn = log.with("peer", "10.0.0.7");
//! info!(conn, "accepted after {}ms", 12);
//! ```

/// Log a message at a level chosen at runtime.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let log = Facade::new();
/// use rust_log_facade::log;
/// log!(log, Level::Info, "Simple message");
/// log!(log, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_fmt($level, format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let log = Facade::new();
/// # log.set_level(Level::Debug);
/// use rust_log_facade::debug;
/// debug!(log, "Debug information");
/// debug!(log, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let log = Facade::new();
/// use rust_log_facade::info;
/// info!(log, "Application started");
/// info!(log, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let log = Facade::new();
/// use rust_log_facade::warn;
/// warn!(log, "Low disk space");
/// warn!(log, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let log = Facade::new();
/// use rust_log_facade::error;
/// error!(log, "Failed to connect to database");
/// error!(log, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a development-panic message; unwinds only in development mode.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let log = Facade::new();
/// use rust_log_facade::dpanic;
/// dpanic!(log, "unexpected state {}", 3);
/// ```
#[macro_export]
macro_rules! dpanic {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::DPanic, $($arg)+)
    };
}

/// Log a panic-level message, then unwind with a
/// [`LogPanic`](crate::LogPanic) payload.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let log = Facade::new();
/// use rust_log_facade::panic_log;
/// use std::panic::{catch_unwind, AssertUnwindSafe};
///
/// let caught = catch_unwind(AssertUnwindSafe(|| {
///     panic_log!(log, "ledger out of balance by {}", 12);
/// }));
/// assert!(caught.is_err());
/// ```
#[macro_export]
macro_rules! panic_log {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panic_fmt(format_args!($($arg)+))
    };
}

/// Log a fatal-level message, flush every sink, then exit the process.
///
/// # Examples
///
/// ```no_run
/// # use rust_log_facade::prelude::*;
/// # let log = Facade::new();
/// use rust_log_facade::fatal;
/// fatal!(log, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal_fmt(format_args!($($arg)+))
    };
}
