//! Core logger types and traits

/// Per-level emission methods shared by [`Facade`] and [`LoggerHandle`].
///
/// The implementing type provides `emit`, `emit_panic` and `emit_fatal`;
/// every generated method is `#[track_caller]` so the location reaching the
/// encoder is the application's call site.
macro_rules! leveled_methods {
    ($($(#[$doc:meta])* $level:ident => $plain:ident, $formatted:ident;)*) => {
        $(
            $(#[$doc])*
            #[track_caller]
            pub fn $plain(&self, message: impl std::fmt::Display) {
                self.emit(
                    $crate::core::Level::$level,
                    std::panic::Location::caller(),
                    format_args!("{}", message),
                );
            }

            #[track_caller]
            pub fn $formatted(&self, args: std::fmt::Arguments<'_>) {
                self.emit($crate::core::Level::$level, std::panic::Location::caller(), args);
            }
        )*

        /// Log at `Panic`, then unwind with a [`LogPanic`](crate::core::LogPanic)
        /// payload. The record is written before the unwind starts.
        #[track_caller]
        pub fn panic(&self, message: impl std::fmt::Display) -> ! {
            self.emit_panic(std::panic::Location::caller(), format_args!("{}", message))
        }

        #[track_caller]
        pub fn panic_fmt(&self, args: std::fmt::Arguments<'_>) -> ! {
            self.emit_panic(std::panic::Location::caller(), args)
        }

        /// Log at `Fatal`, flush every sink, then exit the process with a
        /// non-zero status.
        #[track_caller]
        pub fn fatal(&self, message: impl std::fmt::Display) -> ! {
            self.emit_fatal(std::panic::Location::caller(), format_args!("{}", message))
        }

        #[track_caller]
        pub fn fatal_fmt(&self, args: std::fmt::Arguments<'_>) -> ! {
            self.emit_fatal(std::panic::Location::caller(), args)
        }

        /// Log at a level chosen at runtime. `Panic`, `DPanic` and `Fatal`
        /// keep their follow-up behavior.
        #[track_caller]
        pub fn log(&self, level: $crate::core::Level, message: impl std::fmt::Display) {
            self.emit(level, std::panic::Location::caller(), format_args!("{}", message));
        }

        #[track_caller]
        pub fn log_fmt(&self, level: $crate::core::Level, args: std::fmt::Arguments<'_>) {
            self.emit(level, std::panic::Location::caller(), args);
        }
    };
}

pub mod appender;
pub mod config;
pub mod encoder;
pub mod error;
pub mod facade;
pub mod field;
pub mod handle;
pub mod level;
pub mod logger;
pub mod record;
pub mod sink;

pub use appender::Appender;
pub use config::Config;
pub use encoder::{CallerEncoding, EncoderConfig, LevelEncoding, DEFAULT_TIME_LAYOUT};
pub use error::{LoggerError, Result};
pub use facade::Facade;
pub use field::{FieldValue, Fields};
pub use handle::LoggerHandle;
pub use level::{AtomicLevel, Level, LevelFilter};
pub use logger::{LogPanic, Logger, LoggerBuilder, FATAL_EXIT_CODE};
pub use record::Record;
pub use sink::{
    console_and_file_core, console_core, error_file_core, file_core, stdout_core, Core,
};
