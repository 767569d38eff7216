//! Declarative logger configuration

use super::{
    appender::Appender,
    error::Result,
    facade::Facade,
    level::Level,
    logger::Logger,
    sink::{assert_file_config, console_and_file_core, console_core, error_file_core, file_core},
};
use crate::appenders::{ConsoleAppender, RotatingFileConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// What the installed logger should look like.
///
/// [`Config::build`] picks one of three layouts:
///
/// | `file`  | `enable_error_file` | sinks                                   |
/// |---------|---------------------|-----------------------------------------|
/// | `None`  | ignored             | console                                 |
/// | `Some`  | `false`             | console + file behind one predicate     |
/// | `Some`  | `true`              | console, file, `-error` file (>= Error) |
///
/// # Example
/// ```no_run
/// use rust_log_facade::{Config, Facade, RotatingFileConfig};
///
/// let log = Facade::new();
/// Config::new()
///     .with_level("debug")
///     .with_file(RotatingFileConfig::new("logs/app.log").with_max_backups(5))
///     .with_error_file(true)
///     .build(&log)?;
///
/// log.error("written to console, app.log and app-error.log");
/// # Ok::<(), rust_log_facade::LoggerError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Threshold to install; `None` or a blank string keeps the current one
    pub level: Option<String>,
    /// Rotating file policy; `None` logs to the console only
    pub file: Option<RotatingFileConfig>,
    /// Also write `Error` and above to the `-error` sibling of `file`
    pub enable_error_file: bool,
    /// Unwind after `DPanic` records
    pub development: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::Json`](super::error::LoggerError::Json) for
    /// malformed input.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a JSON error if
    /// it does not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file(mut self, file: RotatingFileConfig) -> Self {
        self.file = Some(file);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_error_file(mut self, enabled: bool) -> Self {
        self.enable_error_file = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_development(mut self, enabled: bool) -> Self {
        self.development = enabled;
        self
    }

    /// Assemble the sinks and install them on `facade`, replacing whatever
    /// was installed before.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::LevelParse`](super::error::LoggerError::LevelParse)
    /// if `level` names no level; nothing is changed in that case.
    ///
    /// # Panics
    ///
    /// Panics if `file` is set with an empty file name.
    pub fn build(&self, facade: &Facade) -> Result<()> {
        self.build_with_console(facade, ConsoleAppender::new())
    }

    /// Like [`Config::build`], with `console` standing in for stdout.
    ///
    /// # Errors
    ///
    /// Same as [`Config::build`].
    ///
    /// # Panics
    ///
    /// Same as [`Config::build`].
    pub fn build_with_console<A: Appender + 'static>(&self, facade: &Facade, console: A) -> Result<()> {
        let level = self
            .level
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::parse::<Level>)
            .transpose()?;
        if let Some(file) = &self.file {
            assert_file_config(file);
        }

        if let Some(level) = level {
            facade.set_level(level);
        }

        let encoder = facade.encoder();
        let threshold = facade.atomic_level();
        let builder = Logger::builder().development(self.development);

        let logger = match &self.file {
            None => builder.core(console_core(Arc::clone(encoder), threshold, console)),
            Some(file) if !self.enable_error_file => builder.core(console_and_file_core(
                Arc::clone(encoder),
                threshold,
                console,
                file,
            )),
            Some(file) => builder
                .core(console_core(Arc::clone(encoder), threshold, console))
                .core(file_core(Arc::clone(encoder), threshold, file))
                .core(error_file_core(Arc::clone(encoder), file)),
        }
        .build();

        facade.install(logger);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::BufferAppender;
    use crate::core::error::LoggerError;
    use std::panic::{self, AssertUnwindSafe};
    use tempfile::tempdir;

    #[test]
    fn test_from_json_str_defaults_missing_keys() {
        let config = Config::from_json_str(
            r#"{"level": "warn", "file": {"filename": "app.log", "max_backups": 3}}"#,
        )
        .unwrap();

        assert_eq!(config.level.as_deref(), Some("warn"));
        assert!(!config.enable_error_file);
        let file = config.file.unwrap();
        assert_eq!(file.max_backups, 3);
        assert_eq!(file.max_size, crate::appenders::rotating_file::DEFAULT_MAX_SIZE);
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        assert!(matches!(
            Config::from_json_str("{level"),
            Err(LoggerError::Json(_))
        ));
    }

    #[test]
    fn test_console_only_layout() {
        let facade = Facade::new();
        let console = BufferAppender::new();
        Config::new()
            .with_level("debug")
            .build_with_console(&facade, console.clone())
            .unwrap();

        assert_eq!(facade.level(), Level::Debug);
        assert_eq!(facade.current().cores().len(), 1);
        facade.debug("hello");
        assert_eq!(console.lines().len(), 1);
    }

    #[test]
    fn test_error_file_ignored_without_file() {
        let facade = Facade::new();
        Config::new()
            .with_error_file(true)
            .build_with_console(&facade, BufferAppender::new())
            .unwrap();
        assert_eq!(facade.current().cores().len(), 1);
    }

    #[test]
    fn test_three_sink_layout() {
        let dir = tempdir().unwrap();
        let facade = Facade::new();
        Config::new()
            .with_file(RotatingFileConfig::new(dir.path().join("svc.log")))
            .with_error_file(true)
            .build_with_console(&facade, BufferAppender::new())
            .unwrap();

        assert_eq!(facade.current().cores().len(), 3);
    }

    #[test]
    fn test_bad_level_changes_nothing() {
        let facade = Facade::new();
        let before = facade.current();
        let err = Config::new()
            .with_level("loud")
            .build_with_console(&facade, BufferAppender::new())
            .unwrap_err();

        assert!(matches!(err, LoggerError::LevelParse { .. }));
        assert_eq!(facade.level(), Level::Info);
        assert!(Arc::ptr_eq(&before, &facade.current()));
    }

    #[test]
    fn test_blank_level_keeps_threshold() {
        let facade = Facade::new();
        facade.set_level(Level::Error);

        for text in [r#"{"level": ""}"#, r#"{"level": "  "}"#] {
            Config::from_json_str(text)
                .unwrap()
                .build_with_console(&facade, BufferAppender::new())
                .unwrap();
            assert_eq!(facade.level(), Level::Error);
        }
    }

    #[test]
    fn test_empty_filename_panics_before_touching_level() {
        let facade = Facade::new();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _ = Config::new()
                .with_level("error")
                .with_file(RotatingFileConfig::new(""))
                .build_with_console(&facade, BufferAppender::new());
        }));

        assert!(result.is_err());
        assert_eq!(facade.level(), Level::Info);
    }

    #[test]
    fn test_development_flag_reaches_logger() {
        let facade = Facade::new();
        Config::new()
            .with_development(true)
            .build_with_console(&facade, BufferAppender::new())
            .unwrap();

        assert!(facade.current().is_development());
        let result = panic::catch_unwind(AssertUnwindSafe(|| facade.dpanic("strict")));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logging.json");
        std::fs::write(&path, r#"{"level": "error", "development": true}"#).unwrap();

        let config = Config::from_json_file(&path).unwrap();
        assert_eq!(config.level.as_deref(), Some("error"));
        assert!(config.development);
        assert!(matches!(
            Config::from_json_file(dir.path().join("missing.json")),
            Err(LoggerError::Io(_))
        ));
    }
}
