//! A single leveled record on its way to the sinks

use super::field::Fields;
use super::level::Level;
use chrono::{DateTime, Local};
use std::panic::Location;

/// Everything the encoder needs to render one line.
///
/// Borrowed from the emitting call; nothing outlives the write.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub level: Level,
    pub time: DateTime<Local>,
    pub caller: Option<&'static Location<'static>>,
    pub message: &'a str,
    pub fields: &'a Fields,
}

impl<'a> Record<'a> {
    pub fn new(level: Level, message: &'a str, fields: &'a Fields) -> Self {
        Self {
            level,
            time: Local::now(),
            caller: None,
            message,
            fields,
        }
    }

    pub fn with_caller(mut self, caller: &'static Location<'static>) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }
}
