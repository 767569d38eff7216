//! Appender trait for log output destinations

use super::error::Result;

/// A byte-stream destination for encoded lines.
///
/// `append` receives one complete record (terminated by `\n`) per call.
/// Callers serialize access, so implementations need no locking of their own.
pub trait Appender: Send {
    fn append(&mut self, line: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

impl<A: Appender + ?Sized> Appender for Box<A> {
    fn append(&mut self, line: &[u8]) -> Result<()> {
        (**self).append(line)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
