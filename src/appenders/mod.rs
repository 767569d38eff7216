//! Appender implementations

pub mod buffer;
pub mod console;
pub mod multi;
pub mod rotating_file;

pub use buffer::BufferAppender;
pub use console::ConsoleAppender;
pub use multi::MultiAppender;
pub use rotating_file::{
    derive_error_filename, RotatingFileAppender, RotatingFileConfig, DEFAULT_LOG_FILENAME,
    DEFAULT_MAX_SIZE,
};

pub use crate::core::Appender;
