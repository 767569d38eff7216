//! Logger handles with attached fields

use super::{
    error::Result,
    facade::Facade,
    field::{FieldValue, Fields},
    level::Level,
};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// A facade plus a frozen set of fields added to every record.
///
/// Handles are immutable: [`LoggerHandle::with`] returns a new handle and
/// leaves this one as it was. The fields are fixed when the handle is made,
/// but every record goes through the logger the facade holds *at emission
/// time*, so a handle made before a reconfiguration writes to the new sinks.
///
/// # Example
/// ```
/// use rust_log_facade::prelude::*;
///
/// let log = Facade::new();
/// let base = log.with("service", "billing");
/// let request = base.with("request_id", 7);
///
/// assert_eq!(base.fields().len(), 1);
/// assert_eq!(request.fields().len(), 2);
/// ```
#[derive(Clone)]
pub struct LoggerHandle {
    facade: Facade,
    fields: Arc<Fields>,
}

impl LoggerHandle {
    pub(crate) fn new(facade: Facade, fields: Fields) -> Self {
        Self {
            facade,
            fields: Arc::new(fields),
        }
    }

    /// New handle with one more field
    #[must_use]
    pub fn with<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut fields = (*self.fields).clone();
        fields.add_field(key, value);
        Self::new(self.facade.clone(), fields)
    }

    /// New handle with `extra` appended after the current fields
    #[must_use]
    pub fn with_fields(&self, extra: Fields) -> Self {
        let mut fields = (*self.fields).clone();
        fields.extend_from(&extra);
        Self::new(self.facade.clone(), fields)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn facade(&self) -> &Facade {
        &self.facade
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.facade.enabled(level)
    }

    /// Flush every sink of the facade's current logger.
    ///
    /// # Errors
    ///
    /// Same as [`Facade::sync`].
    pub fn sync(&self) -> Result<()> {
        self.facade.sync()
    }

    leveled_methods! {
        Debug => debug, debug_fmt;
        Info => info, info_fmt;
        Warn => warn, warn_fmt;
        Error => error, error_fmt;
        DPanic => dpanic, dpanic_fmt;
    }

    fn emit(&self, level: Level, caller: &'static Location<'static>, args: fmt::Arguments<'_>) {
        self.facade.dispatch(level, &self.fields, caller, args);
    }

    fn emit_panic(&self, caller: &'static Location<'static>, args: fmt::Arguments<'_>) -> ! {
        self.facade.dispatch_panic(&self.fields, caller, args)
    }

    fn emit_fatal(&self, caller: &'static Location<'static>, args: fmt::Arguments<'_>) -> ! {
        self.facade.dispatch_fatal(&self.fields, caller, args)
    }
}

impl fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("fields", &self.fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::BufferAppender;
    use crate::core::logger::Logger;
    use crate::core::sink::console_core;

    fn buffered(facade: &Facade) -> BufferAppender {
        let buffer = BufferAppender::new();
        facade.install(Logger::new(vec![console_core(
            Arc::clone(facade.encoder()),
            facade.atomic_level(),
            buffer.clone(),
        )]));
        buffer
    }

    #[test]
    fn test_fields_accumulate_without_mutating_parent() {
        let facade = Facade::new();
        let buffer = buffered(&facade);

        let a = facade.with("a", 1);
        let ab = a.with("b", 2);
        ab.info("both");
        a.info("only a");

        let lines = buffer.json_lines();
        assert_eq!(lines[0]["a"], 1);
        assert_eq!(lines[0]["b"], 2);
        assert_eq!(lines[1]["a"], 1);
        assert!(lines[1].get("b").is_none());
    }

    #[test]
    fn test_debug_carries_fields() {
        let facade = Facade::new();
        let buffer = buffered(&facade);
        facade.set_level(Level::Debug);

        facade.with("user", "ada").debug("lookup");
        assert_eq!(buffer.json_lines()[0]["user"], "ada");
    }

    #[test]
    fn test_handle_follows_reinstalled_logger() {
        let facade = Facade::new();
        let first = buffered(&facade);
        let handle = facade.with("k", "v");

        handle.info("one");
        let second = buffered(&facade);
        handle.info("two");

        assert_eq!(first.lines().len(), 1);
        assert_eq!(second.lines().len(), 1);
        assert_eq!(second.json_lines()[0]["msg"], "two");
        assert_eq!(second.json_lines()[0]["k"], "v");
    }

    #[test]
    fn test_with_fields_appends_in_order() {
        let facade = Facade::new();
        let buffer = buffered(&facade);

        let handle = facade
            .with("first", true)
            .with_fields(Fields::new().with_field("second", 2.5).with_field("third", "x"));
        handle.warn_fmt(format_args!("{} fields", handle.fields().len()));

        let line = &buffer.lines()[0];
        let first = line.find("\"first\"").unwrap();
        let second = line.find("\"second\"").unwrap();
        let third = line.find("\"third\"").unwrap();
        assert!(first < second && second < third);
        assert_eq!(buffer.json_lines()[0]["msg"], "3 fields");
    }
}
