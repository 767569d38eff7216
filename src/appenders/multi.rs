//! Fan one byte stream out to several destinations

use crate::core::{Appender, LoggerError, Result};

/// Writes each line to every child in order.
///
/// A failing child never stops the others; all failures of one call are
/// returned together.
#[derive(Default)]
pub struct MultiAppender {
    appenders: Vec<Box<dyn Appender>>,
}

impl MultiAppender {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    pub fn push(&mut self, appender: Box<dyn Appender>) {
        self.appenders.push(appender);
    }

    pub fn len(&self) -> usize {
        self.appenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appenders.is_empty()
    }
}

impl Appender for MultiAppender {
    fn append(&mut self, line: &[u8]) -> Result<()> {
        let errors = self
            .appenders
            .iter_mut()
            .filter_map(|appender| appender.append(line).err())
            .collect();
        LoggerError::combine(errors)
    }

    fn flush(&mut self) -> Result<()> {
        let errors = self
            .appenders
            .iter_mut()
            .filter_map(|appender| appender.flush().err())
            .collect();
        LoggerError::combine(errors)
    }

    fn name(&self) -> &str {
        "multi"
    }
}
