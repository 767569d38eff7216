//! Severity levels and the shared, atomically updated threshold

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI8, Ordering};
use std::sync::Arc;

/// Record severity, ordered from least to most severe.
///
/// `Invalid` sits above `Fatal` and only exists to report malformed input;
/// no predicate ever enables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
#[repr(i8)]
pub enum Level {
    /// Voluminous output, usually disabled in production
    Debug = -1,
    /// The default threshold
    #[default]
    Info = 0,
    /// More important than info, but needs no human review
    Warn = 1,
    /// High priority; should not occur in a healthy application
    Error = 2,
    /// Important errors; unwinds after writing in development mode
    DPanic = 3,
    /// Unwinds after writing
    Panic = 4,
    /// Exits the process after writing
    Fatal = 5,
    /// Placeholder for unparseable input; never enabled
    Invalid = 6,
}

impl Level {
    /// Every real level, least severe first
    pub const ALL: [Level; 7] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::DPanic,
        Level::Panic,
        Level::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::DPanic => "dpanic",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
            Level::Invalid => "invalid",
        }
    }

    pub fn capital_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::DPanic => "DPANIC",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
            Level::Invalid => "INVALID",
        }
    }

    /// Decode a raw discriminant; out-of-range values map to `Invalid`
    pub fn from_i8(raw: i8) -> Self {
        match raw {
            -1 => Level::Debug,
            0 => Level::Info,
            1 => Level::Warn,
            2 => Level::Error,
            3 => Level::DPanic,
            4 => Level::Panic,
            5 => Level::Fatal,
            _ => Level::Invalid,
        }
    }

    pub fn is_valid(&self) -> bool {
        *self != Level::Invalid
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" | "" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "dpanic" => Ok(Level::DPanic),
            "panic" => Ok(Level::Panic),
            "fatal" => Ok(Level::Fatal),
            _ => Err(LoggerError::level_parse(s)),
        }
    }
}

/// The shared minimum level.
///
/// Clones point at the same cell, so a sink built with a clone sees every
/// later `set_level` on the next record it checks.
#[derive(Debug, Clone)]
pub struct AtomicLevel {
    inner: Arc<AtomicI8>,
}

impl AtomicLevel {
    pub fn new(level: Level) -> Self {
        let level = if level.is_valid() { level } else { Level::Info };
        Self {
            inner: Arc::new(AtomicI8::new(level as i8)),
        }
    }

    #[inline]
    pub fn level(&self) -> Level {
        Level::from_i8(self.inner.load(Ordering::Relaxed))
    }

    /// Install a new threshold. `Level::Invalid` is ignored.
    pub fn set_level(&self, level: Level) {
        if level.is_valid() {
            self.inner.store(level as i8, Ordering::Relaxed);
        }
    }

    /// Parse `text` and install it; on failure the threshold is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::LevelParse`] naming the offending text.
    pub fn set_level_from_text(&self, text: &str) -> Result<Level> {
        let level: Level = text.parse()?;
        self.set_level(level);
        Ok(level)
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        level.is_valid() && level >= self.level()
    }

    /// Whether both handles share one cell
    pub fn same_cell(&self, other: &AtomicLevel) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

/// Level predicate attached to a sink
#[derive(Debug, Clone)]
pub enum LevelFilter {
    /// `level >= current shared threshold`, read on every record
    Threshold(AtomicLevel),
    /// `level >= fixed`, independent of the shared threshold
    AtLeast(Level),
}

impl LevelFilter {
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        match self {
            LevelFilter::Threshold(threshold) => threshold.enabled(level),
            LevelFilter::AtLeast(min) => level.is_valid() && level >= *min,
        }
    }
}
