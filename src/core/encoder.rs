//! JSON line encoding shared by every sink
//!
//! One [`EncoderConfig`] is built when a [`Facade`](super::facade::Facade)
//! is created and handed to every sink by `Arc`; it never changes afterwards.

use super::level::Level;
use super::record::Record;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::panic::Location;

/// Millisecond precision, no zone suffix: `2026-10-15T09:30:45.123`
pub const DEFAULT_TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// How level names are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelEncoding {
    /// `info`
    #[default]
    Lowercase,
    /// `INFO`
    Capital,
}

/// How the caller location is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerEncoding {
    /// Last directory plus file name: `core/facade.rs:42`
    #[default]
    Short,
    /// The path as the compiler recorded it
    Full,
}

/// Formatting rules for every record.
///
/// # Examples
///
/// ```
/// use rust_log_facade::EncoderConfig;
///
/// let encoder = EncoderConfig::default();
/// assert_eq!(encoder.message_key, "msg");
/// assert_eq!(encoder.time_layout, "%Y-%m-%dT%H:%M:%S%.3f");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub caller_key: String,
    pub message_key: String,
    /// strftime-compatible layout, rendered in local time
    pub time_layout: String,
    pub level_encoding: LevelEncoding,
    pub caller_encoding: CallerEncoding,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "ts".to_string(),
            level_key: "level".to_string(),
            caller_key: "caller".to_string(),
            message_key: "msg".to_string(),
            time_layout: DEFAULT_TIME_LAYOUT.to_string(),
            level_encoding: LevelEncoding::Lowercase,
            caller_encoding: CallerEncoding::Short,
        }
    }
}

impl EncoderConfig {
    /// Whether `time_layout` holds only specifiers chrono understands
    pub fn has_valid_time_layout(&self) -> bool {
        !StrftimeItems::new(&self.time_layout).any(|item| matches!(item, Item::Error))
    }

    /// The same configuration with an unusable `time_layout` replaced by
    /// [`DEFAULT_TIME_LAYOUT`]
    pub fn sanitized(mut self) -> Self {
        if !self.has_valid_time_layout() {
            self.time_layout = DEFAULT_TIME_LAYOUT.to_string();
        }
        self
    }

    fn is_reserved_key(&self, key: &str) -> bool {
        key == self.time_key || key == self.level_key || key == self.caller_key || key == self.message_key
    }

    fn encode_time(&self, time: &DateTime<Local>) -> String {
        let mut out = String::new();
        if write!(out, "{}", time.format(&self.time_layout)).is_err() {
            out.clear();
            let _ = write!(out, "{}", time.format(DEFAULT_TIME_LAYOUT));
        }
        out
    }

    fn encode_level(&self, level: Level) -> &'static str {
        match self.level_encoding {
            LevelEncoding::Lowercase => level.as_str(),
            LevelEncoding::Capital => level.capital_str(),
        }
    }

    fn encode_caller(&self, caller: &Location<'_>) -> String {
        match self.caller_encoding {
            CallerEncoding::Full => format!("{}:{}", caller.file(), caller.line()),
            CallerEncoding::Short => format!("{}:{}", trim_caller_path(caller.file()), caller.line()),
        }
    }

    /// Render a record as a single JSON object followed by `\n`.
    ///
    /// Key order: time, level, caller, message, then fields in attachment
    /// order. A field whose key repeats keeps its last value. A field named
    /// like one of the four entry keys is written as `fields.<key>` so it
    /// cannot replace the entry's own time, level, caller or message.
    pub fn encode(&self, record: &Record<'_>) -> Vec<u8> {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            self.time_key.clone(),
            serde_json::Value::String(self.encode_time(&record.time)),
        );
        json_obj.insert(
            self.level_key.clone(),
            serde_json::Value::String(self.encode_level(record.level).to_string()),
        );
        if let Some(caller) = record.caller {
            json_obj.insert(
                self.caller_key.clone(),
                serde_json::Value::String(self.encode_caller(caller)),
            );
        }
        json_obj.insert(
            self.message_key.clone(),
            serde_json::Value::String(record.message.to_string()),
        );

        for (key, value) in record.fields.iter() {
            let key = if self.is_reserved_key(key) {
                format!("fields.{}", key)
            } else {
                key.to_string()
            };
            json_obj.insert(key, value.to_json_value());
        }

        // A Map of Strings and plain values cannot fail to serialize
        let mut line = serde_json::to_vec(&serde_json::Value::Object(json_obj)).unwrap_or_default();
        line.push(b'\n');
        line
    }
}

/// Keep the last directory and the file name of a source path
fn trim_caller_path(path: &str) -> &str {
    let mut separators = path.rmatch_indices(['/', '\\']);
    separators.next();
    match separators.next() {
        Some((idx, _)) => &path[idx + 1..],
        None => path,
    }
}
