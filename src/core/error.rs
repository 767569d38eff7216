//! Error types for the logging facade

use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Unrecognized level text
    #[error("unrecognized level: {text:?}")]
    LevelParse { text: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppender { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotation { path: String, message: String },

    /// A single write is larger than the rotation threshold
    #[error("write length {length} exceeds maximum file size {max_size} for '{path}'")]
    WriteTooLarge {
        path: String,
        length: u64,
        max_size: u64,
    },

    /// Several independent failures, none of which stopped the others
    #[error("{}", DisplayList(.0))]
    Multiple(Vec<LoggerError>),
}

struct DisplayList<'a>(&'a [LoggerError]);

impl fmt::Display for DisplayList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl LoggerError {
    /// Create a level parse error for the offending text
    pub fn level_parse(text: impl Into<String>) -> Self {
        LoggerError::LevelParse { text: text.into() }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppender {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Fold a list of independent failures into one result.
    ///
    /// An empty list is success, a single error is returned as is, and
    /// anything more becomes [`LoggerError::Multiple`]. Nested `Multiple`
    /// values are flattened.
    pub fn combine(errors: Vec<LoggerError>) -> Result<()> {
        let mut flat = Vec::with_capacity(errors.len());
        for err in errors {
            match err {
                LoggerError::Multiple(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => Ok(()),
            1 => Err(flat.remove(0)),
            _ => Err(LoggerError::Multiple(flat)),
        }
    }

    /// The individual failures carried by this error
    pub fn errors(&self) -> &[LoggerError] {
        match self {
            LoggerError::Multiple(inner) => inner,
            other => std::slice::from_ref(other),
        }
    }
}
