//! Console appender implementation

use crate::core::{Appender, LoggerError, Result};
use std::io::Write;

/// Writes every line to standard output.
///
/// Each line is written under the stdout lock, so lines from concurrent
/// loggers never interleave mid-record.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleAppender;

impl ConsoleAppender {
    pub fn new() -> Self {
        Self
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, line: &[u8]) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(line)
            .map_err(|e| LoggerError::io_operation("writing to stdout", "console write failed", e))
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout()
            .flush()
            .map_err(|e| LoggerError::io_operation("flushing stdout", "console flush failed", e))
    }

    fn name(&self) -> &str {
        "console"
    }
}
